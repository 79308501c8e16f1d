use std::fmt;

use skyview_core::{DisplayModel, Theme};

/// Glyph row standing in for the theme animation.
fn animation_frame(theme: Theme) -> &'static str {
    match theme {
        Theme::Sunny => "  \\ | /    ☀    \\ | /",
        Theme::Cloudy => "   .--.   ☁   .--.",
        Theme::Rain => "  ' ' '   🌧   ' ' '",
        Theme::Snow => "  * * *   ❄   * * *",
    }
}

/// The whole weather screen, drawn through `Display`.
pub struct Screen<'a>(&'a DisplayModel);

pub fn screen(model: &DisplayModel) -> Screen<'_> {
    Screen(model)
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let assets = &model.assets;

        writeln!(f)?;
        writeln!(f, "{}", animation_frame(assets.theme))?;
        writeln!(f, "[background: {}] [animation: {}]", assets.background, assets.animation)?;
        writeln!(f)?;
        writeln!(f, "{}", model.city)?;
        writeln!(f, "{}  {}", model.day, model.date)?;
        writeln!(f)?;
        writeln!(f, "  {}   {}", model.temperature, model.condition)?;
        writeln!(f, "  {}   {}", model.max_temp, model.min_temp)?;
        writeln!(f)?;
        writeln!(f, "  {:<10} {}", "Humidity", model.humidity)?;
        writeln!(f, "  {:<10} {}", "Wind", model.wind_speed)?;
        writeln!(f, "  {:<10} {}", "Condition", model.condition)?;
        writeln!(f, "  {:<10} {}", "Sunrise", model.sunrise)?;
        writeln!(f, "  {:<10} {}", "Sunset", model.sunset)?;
        writeln!(f, "  {:<10} {}", "Sea", model.sea_level)
    }
}
