// =============================================================================
// Chart Theme — palette and layout defaults
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::types::Direction;

fn default_template() -> String {
    "plotly_dark".to_string()
}

fn default_up() -> String {
    "green".to_string()
}

fn default_down() -> String {
    "red".to_string()
}

fn default_sma1() -> String {
    "#0000b2".to_string()
}

fn default_sma2() -> String {
    "#006600".to_string()
}

fn default_band() -> String {
    "gray".to_string()
}

fn default_primary_line() -> String {
    "black".to_string()
}

fn default_secondary_line() -> String {
    "blue".to_string()
}

/// Colors used by the composer. Any CSS color string is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Renderer template name (e.g. `plotly_dark`).
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_up")]
    pub up: String,

    #[serde(default = "default_down")]
    pub down: String,

    #[serde(default = "default_sma1")]
    pub sma1: String,

    #[serde(default = "default_sma2")]
    pub sma2: String,

    #[serde(default = "default_band")]
    pub band: String,

    /// MACD line and stochastic %K.
    #[serde(default = "default_primary_line")]
    pub primary_line: String,

    /// Signal line and stochastic %D.
    #[serde(default = "default_secondary_line")]
    pub secondary_line: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            template: default_template(),
            up: default_up(),
            down: default_down(),
            sma1: default_sma1(),
            sma2: default_sma2(),
            band: default_band(),
            primary_line: default_primary_line(),
            secondary_line: default_secondary_line(),
        }
    }
}

impl Theme {
    pub fn direction_color(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }
}

fn default_height() -> u32 {
    900
}

fn default_width() -> u32 {
    1200
}

fn default_vertical_spacing() -> f64 {
    0.01
}

/// Figure dimensions handed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_width")]
    pub width: u32,

    /// Gap between stacked panels as a fraction of figure height.
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            height: default_height(),
            width: default_width(),
            vertical_spacing: default_vertical_spacing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_theme_keeps_other_defaults() {
        let theme: Theme = serde_json::from_str(r#"{ "up": "teal" }"#).unwrap();
        assert_eq!(theme.up, "teal");
        assert_eq!(theme.down, "red");
        assert_eq!(theme.template, "plotly_dark");
    }

    #[test]
    fn direction_picks_up_or_down_color() {
        let theme = Theme::default();
        assert_eq!(theme.direction_color(Direction::Up), "green");
        assert_eq!(theme.direction_color(Direction::Down), "red");
    }
}
