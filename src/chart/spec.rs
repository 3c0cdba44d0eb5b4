// =============================================================================
// ChartSpec — declarative, backend-agnostic chart description
// =============================================================================
//
// A ChartSpec is everything a renderer needs and nothing it has to derive:
// one shared date axis, four stacked panels with relative heights, and per
// trace the data plus its style.  Undefined points serialise as `null` so a
// renderer leaves a gap instead of drawing a false zero.
//
// Only ordered containers are used, so serialising the same spec twice yields
// the same bytes.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

/// Relative panel heights, top to bottom.
pub const ROW_WEIGHTS: [f64; 4] = [0.5, 0.1, 0.2, 0.2];

/// Root description of the multi-pane chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub layout: Layout,
    /// Shared x axis: one date per bar, used by every trace in every panel.
    pub x: Vec<NaiveDate>,
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    /// Panel for 1-based `row`.
    pub fn panel(&self, row: u8) -> Option<&Panel> {
        self.panels.iter().find(|p| p.row == row)
    }

    pub fn trace_count(&self) -> usize {
        self.panels.iter().map(|p| p.traces.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub template: String,
    pub height: u32,
    pub width: u32,
    pub show_legend: bool,
    pub range_slider_visible: bool,
    pub vertical_spacing: f64,
    /// All panels pan and zoom together.
    pub shared_x_axis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// 1-based, top to bottom.
    pub row: u8,
    pub height_weight: f64,
    pub y_axis: AxisConfig,
    /// Drawing order; fills reference the previous trace in this list.
    pub traces: Vec<Trace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub title: String,
    pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: Option<String>,
    #[serde(flatten)]
    pub data: TraceData,
    pub style: TraceStyle,
    pub show_legend: bool,
}

impl Trace {
    pub fn kind(&self) -> &'static str {
        match self.data {
            TraceData::Candlestick { .. } => "candlestick",
            TraceData::Line { .. } => "line",
            TraceData::Bar { .. } => "bar",
        }
    }
}

/// Per-bar values, one entry per x-axis date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceData {
    Candlestick {
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Line {
        y: Vec<Option<f64>>,
    },
    Bar {
        y: Vec<Option<f64>>,
        /// One color per bar.
        colors: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    #[default]
    Solid,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    #[default]
    None,
    /// Shade the region between this trace and the previous one in the panel.
    ToPreviousTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    /// Line color; `None` for traces colored per bar or by the renderer.
    pub color: Option<String>,
    pub width: Option<f64>,
    pub dash: Dash,
    pub fill: Fill,
    pub opacity: f64,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            color: None,
            width: None,
            dash: Dash::Solid,
            fill: Fill::None,
            opacity: 1.0,
        }
    }
}

impl TraceStyle {
    pub fn line(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}
