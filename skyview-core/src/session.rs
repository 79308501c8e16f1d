//! The single weather screen: search submissions go out as background
//! fetches and completed fetches come back through a channel to be applied
//! in submission order.
//!
//! Each submission gets a generation number. A completion whose generation is
//! older than the latest submission is dropped, so a slow earlier search can
//! never overwrite the result of a later one.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    error::FetchError,
    model::WeatherResult,
    presentation::{self, DisplayModel},
    provider::WeatherSource,
};

/// A finished fetch, tagged with the submission it belongs to.
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub city: String,
    pub outcome: Result<WeatherResult, FetchError>,
}

/// What [`Session::apply`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The display now shows this result.
    Applied,
    /// A newer search was submitted since; ignored.
    Stale,
    /// The fetch failed; the previous display is kept.
    Failed,
}

#[derive(Debug)]
pub struct Session {
    source: Arc<dyn WeatherSource>,
    latest: u64,
    settled: u64,
    display: Option<DisplayModel>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Session {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { source, latest: 0, settled: 0, display: None, tx, rx }
    }

    /// Start fetching `city` in the background and return its generation.
    ///
    /// Must be called from inside a tokio runtime. Never waits on the network.
    pub fn submit(&mut self, city: impl Into<String>) -> u64 {
        self.latest += 1;
        let generation = self.latest;
        let city = city.into();
        debug!(generation, city = %city, "search submitted");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = source.fetch(&city).await;
            // The receiver lives as long as the session; a send error only
            // means the session is gone.
            let _ = tx.send(Completion { generation, city, outcome });
        });

        generation
    }

    /// Wait for the next finished fetch.
    ///
    /// Returns `None` only if no sender remains, which cannot happen while
    /// the session is alive.
    pub async fn recv(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Fold a completion into the display.
    pub fn apply<Tz>(&mut self, completion: Completion, now: &DateTime<Tz>) -> Update
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let Completion { generation, city, outcome } = completion;

        if generation < self.latest {
            debug!(generation, latest = self.latest, city = %city, "dropping stale response");
            return Update::Stale;
        }
        self.settled = generation;

        match outcome {
            Ok(result) => {
                info!(generation, city = %city, condition = %result.condition, "weather updated");
                self.display = Some(presentation::map(&result, &city, now));
                Update::Applied
            }
            Err(err) => {
                log_failure(&city, &err);
                Update::Failed
            }
        }
    }

    /// Wait for the next completion and apply it at the current local time.
    pub async fn next_update(&mut self) -> Option<Update> {
        let completion = self.recv().await?;
        Some(self.apply(completion, &chrono::Local::now()))
    }

    pub fn display(&self) -> Option<&DisplayModel> {
        self.display.as_ref()
    }

    /// Generation of the most recent submission, 0 before any.
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// True once the most recent submission has been applied or has failed.
    pub fn is_settled(&self) -> bool {
        self.settled == self.latest
    }
}

fn log_failure(city: &str, err: &FetchError) {
    match err {
        FetchError::Transport(e) => {
            error!(city, kind = err.kind(), error = %e, "weather API call failed");
        }
        FetchError::Http { status, body } => {
            error!(city, kind = err.kind(), status, body = %body, "weather response unsuccessful");
        }
        FetchError::EmptyBody => {
            error!(city, kind = err.kind(), "empty weather response body");
        }
        FetchError::Decode(e) => {
            error!(city, kind = err.kind(), error = %e, "weather response body not understood");
        }
    }
}
