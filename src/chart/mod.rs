// =============================================================================
// Chart Composition Module
// =============================================================================
//
// Turns a price series plus computed indicators into a declarative ChartSpec
// that any rendering surface can draw without re-deriving indicator values.

pub mod composer;
pub mod context;
pub mod rules;
pub mod spec;
pub mod theme;

pub use composer::{build_chart, compose_chart};
pub use context::ChartContext;
pub use rules::{active_overlays, Overlay, OVERLAY_RULES};
pub use spec::{ChartSpec, Panel, Trace, TraceData, TraceStyle};
pub use theme::{LayoutSettings, Theme};
