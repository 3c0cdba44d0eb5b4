// =============================================================================
// Chart Context — the immutable inputs shared by every chart build
// =============================================================================

use crate::chart::theme::{LayoutSettings, Theme};
use crate::market_data::PriceSeries;

/// Loaded once at startup and passed by reference into every engine and
/// composer call.  Nothing in here changes for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ChartContext {
    pub prices: PriceSeries,
    /// Instrument label, used as candlestick name and price-axis title.
    pub label: String,
    pub theme: Theme,
    pub layout: LayoutSettings,
}

impl ChartContext {
    pub fn new(prices: PriceSeries, label: impl Into<String>) -> Self {
        Self {
            prices,
            label: label.into(),
            theme: Theme::default(),
            layout: LayoutSettings::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }
}
