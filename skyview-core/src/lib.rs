//! Core library for the `skyview` current-weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherSource` trait
//! - The payload → `WeatherResult` boundary that applies every default
//! - Presentation: display strings and the condition → asset table
//! - The screen session that applies fetch results in submission order
//!
//! It is used by `skyview-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::FetchError;
pub use model::WeatherResult;
pub use presentation::{AssetPair, DisplayModel, Theme};
pub use provider::{OpenWeatherClient, WeatherSource};
pub use session::{Completion, Session, Update};
