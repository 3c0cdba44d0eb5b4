// =============================================================================
// Chart Composer — four stacked, x-linked panels
// =============================================================================
//
// Row layout (weights from `ROW_WEIGHTS`):
//
//   1. Price: candlestick, then the overlays chosen by OVERLAY_RULES
//   2. Volume: one bar per day, colored by the sign of close - open
//   3. MACD: histogram bars colored by sign, MACD line, signal line
//   4. Stochastic: %K and %D lines
//
// The build is a single pass over immutable inputs.  Identical inputs always
// produce an identical (and identically serialised) ChartSpec.
// =============================================================================

use tracing::{debug, warn};

use crate::chart::context::ChartContext;
use crate::chart::rules::{active_overlays, Overlay};
use crate::chart::spec::{
    AxisConfig, ChartSpec, Dash, Fill, Layout, Panel, Trace, TraceData, TraceStyle, ROW_WEIGHTS,
};
use crate::error::ConfigError;
use crate::indicator_config::{IndicatorConfig, OscillatorParams};
use crate::indicators::{compute_indicators, IndicatorSet, MacdOutput, StochasticOutput};
use crate::types::{Direction, Series};

const BAND_OPACITY: f64 = 0.5;
const PRIMARY_WIDTH: f64 = 2.0;
const SECONDARY_WIDTH: f64 = 1.0;

/// Compute indicators for `config` and compose the chart in one call.
pub fn build_chart(
    ctx: &ChartContext,
    config: &IndicatorConfig,
    params: &OscillatorParams,
) -> Result<ChartSpec, ConfigError> {
    let indicators = compute_indicators(&ctx.prices, config, params)?;
    Ok(compose_chart(ctx, &indicators))
}

/// Assemble the four-panel ChartSpec from precomputed indicator series.
///
/// Overlays and their labels follow the selection recorded in `indicators`.
pub fn compose_chart(ctx: &ChartContext, indicators: &IndicatorSet) -> ChartSpec {
    let panels = vec![
        price_panel(ctx, indicators),
        volume_panel(ctx),
        macd_panel(ctx, &indicators.macd),
        stochastic_panel(ctx, &indicators.stochastic),
    ];

    let spec = ChartSpec {
        layout: Layout {
            title: ctx.label.clone(),
            template: ctx.theme.template.clone(),
            height: ctx.layout.height,
            width: ctx.layout.width,
            show_legend: false,
            range_slider_visible: false,
            vertical_spacing: ctx.layout.vertical_spacing,
            shared_x_axis: true,
        },
        x: ctx.prices.dates().to_vec(),
        panels,
    };

    debug!(
        bars = spec.x.len(),
        traces = spec.trace_count(),
        "chart composed"
    );

    spec
}

// =============================================================================
// Row 1 — price
// =============================================================================

fn price_panel(ctx: &ChartContext, indicators: &IndicatorSet) -> Panel {
    let bars = ctx.prices.bars();
    let mut traces = vec![Trace {
        name: Some(ctx.label.clone()),
        data: TraceData::Candlestick {
            open: bars.iter().map(|b| b.open).collect(),
            high: bars.iter().map(|b| b.high).collect(),
            low: bars.iter().map(|b| b.low).collect(),
            close: bars.iter().map(|b| b.close).collect(),
        },
        style: TraceStyle::default(),
        show_legend: true,
    }];

    for overlay in active_overlays(&indicators.config) {
        match overlay_trace(ctx, indicators, overlay) {
            Some(trace) => traces.push(trace),
            None => warn!(?overlay, "overlay enabled but its series was not computed; skipped"),
        }
    }

    panel(1, ctx.label.clone(), true, traces)
}

fn overlay_trace(ctx: &ChartContext, indicators: &IndicatorSet, overlay: Overlay) -> Option<Trace> {
    let theme = &ctx.theme;
    let config = &indicators.config;
    let band_style = |fill: Fill| TraceStyle {
        color: Some(theme.band.clone()),
        width: None,
        dash: Dash::Dash,
        fill,
        opacity: BAND_OPACITY,
    };

    let trace = match overlay {
        Overlay::Sma1 => line_trace(
            format!("SMA{}", config.sma1_window),
            &indicators.sma1,
            TraceStyle::line(&theme.sma1),
        ),
        Overlay::Sma2 => line_trace(
            format!("SMA{}", config.sma2_window),
            &indicators.sma2,
            TraceStyle::line(&theme.sma2),
        ),
        Overlay::UpperBand => line_trace(
            "upper band".to_string(),
            &indicators.bands.as_ref()?.upper,
            band_style(Fill::None),
        ),
        Overlay::LowerBand => line_trace(
            "lower band".to_string(),
            &indicators.bands.as_ref()?.lower,
            band_style(Fill::ToPreviousTrace),
        ),
    };
    Some(trace)
}

// =============================================================================
// Row 2 — volume
// =============================================================================

fn volume_panel(ctx: &ChartContext) -> Panel {
    let bars = ctx.prices.bars();
    let colors = bars
        .iter()
        .map(|b| ctx.theme.direction_color(Direction::of(Some(b.body()))).to_string())
        .collect();

    let trace = Trace {
        name: Some("Volume".to_string()),
        data: TraceData::Bar {
            y: bars.iter().map(|b| Some(b.volume)).collect(),
            colors,
        },
        style: TraceStyle::default(),
        show_legend: false,
    };

    panel(2, "Volume".to_string(), true, vec![trace])
}

// =============================================================================
// Row 3 — MACD
// =============================================================================

fn macd_panel(ctx: &ChartContext, macd: &MacdOutput) -> Panel {
    let theme = &ctx.theme;
    let histogram = Trace {
        name: Some("MACD histogram".to_string()),
        data: TraceData::Bar {
            y: macd.histogram.values().to_vec(),
            colors: macd
                .histogram
                .values()
                .iter()
                .map(|v| theme.direction_color(Direction::of(*v)).to_string())
                .collect(),
        },
        style: TraceStyle::default(),
        show_legend: true,
    };

    let traces = vec![
        histogram,
        line_trace(
            "MACD".to_string(),
            &macd.macd_line,
            TraceStyle::line(&theme.primary_line).with_width(PRIMARY_WIDTH),
        ),
        line_trace(
            "Signal".to_string(),
            &macd.signal_line,
            TraceStyle::line(&theme.secondary_line).with_width(SECONDARY_WIDTH),
        ),
    ];

    panel(3, "MACD".to_string(), false, traces)
}

// =============================================================================
// Row 4 — stochastic
// =============================================================================

fn stochastic_panel(ctx: &ChartContext, stoch: &StochasticOutput) -> Panel {
    let theme = &ctx.theme;
    let traces = vec![
        line_trace(
            "%K".to_string(),
            &stoch.k_line,
            TraceStyle::line(&theme.primary_line).with_width(PRIMARY_WIDTH),
        ),
        line_trace(
            "%D".to_string(),
            &stoch.d_line,
            TraceStyle::line(&theme.secondary_line).with_width(SECONDARY_WIDTH),
        ),
    ];

    panel(4, "Stoch".to_string(), true, traces)
}

// =============================================================================
// Helpers
// =============================================================================

fn line_trace(name: String, series: &Series, style: TraceStyle) -> Trace {
    Trace {
        name: Some(name),
        data: TraceData::Line {
            y: series.values().to_vec(),
        },
        style,
        show_legend: true,
    }
}

fn panel(row: u8, title: String, show_grid: bool, traces: Vec<Trace>) -> Panel {
    Panel {
        row,
        height_weight: ROW_WEIGHTS[usize::from(row) - 1],
        y_axis: AxisConfig { title, show_grid },
        traces,
    }
}
