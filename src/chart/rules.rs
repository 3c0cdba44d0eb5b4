// =============================================================================
// Overlay Rules — which price-panel overlays a config turns on
// =============================================================================
//
// The price panel's optional traces are driven by a single table evaluated
// top to bottom.  Table order is drawing order: the lower band must come
// right after the upper band because its fill targets the previous trace.
// =============================================================================

use serde::Serialize;

use crate::indicator_config::IndicatorConfig;

/// An optional trace on the price panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Sma1,
    Sma2,
    UpperBand,
    LowerBand,
}

/// One row of the inclusion table.
#[derive(Clone, Copy)]
pub struct OverlayRule {
    pub overlay: Overlay,
    pub include: fn(&IndicatorConfig) -> bool,
}

fn sma1_enabled(config: &IndicatorConfig) -> bool {
    config.sma1_enabled
}

fn sma2_enabled(config: &IndicatorConfig) -> bool {
    config.sma2_enabled
}

fn bands_visible(config: &IndicatorConfig) -> bool {
    config.bands_visible()
}

pub const OVERLAY_RULES: [OverlayRule; 4] = [
    OverlayRule {
        overlay: Overlay::Sma1,
        include: sma1_enabled,
    },
    OverlayRule {
        overlay: Overlay::Sma2,
        include: sma2_enabled,
    },
    OverlayRule {
        overlay: Overlay::UpperBand,
        include: bands_visible,
    },
    OverlayRule {
        overlay: Overlay::LowerBand,
        include: bands_visible,
    },
];

/// Overlays included for `config`, in drawing order.
pub fn active_overlays(config: &IndicatorConfig) -> Vec<Overlay> {
    OVERLAY_RULES
        .iter()
        .filter(|rule| (rule.include)(config))
        .map(|rule| rule.overlay)
        .collect()
}
