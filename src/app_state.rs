// =============================================================================
// Central Application State — Aurora chart service
// =============================================================================
//
// Holds the immutable chart context (price series, theme, layout) and the
// small amount of mutable state the control surface can change: the
// current indicator selection.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock around the runtime config.  Selection updates run
//     their whole read-modify-write under the write lock.
//   - A separate mutex serialises saves, which share one `.tmp` path.
//   - The chart context is behind an Arc and never mutated, so indicator
//     and chart builds run outside any lock.
// =============================================================================

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::chart::{build_chart, ChartContext, ChartSpec};
use crate::error::ConfigError;
use crate::indicator_config::{IndicatorConfig, OscillatorParams};
use crate::indicators::{compute_indicators, IndicatorSet};
use crate::runtime_config::RuntimeConfig;

/// Central application state shared across handlers via `Arc<AppState>`.
pub struct AppState {
    /// Monotonically increasing version counter, bumped whenever the current
    /// indicator selection changes.
    pub state_version: AtomicU64,

    pub context: Arc<ChartContext>,

    pub runtime_config: Arc<RwLock<RuntimeConfig>>,

    /// Where config changes are persisted; `None` disables persistence.
    pub config_path: Option<PathBuf>,

    persist_lock: Mutex<()>,

    pub start_time: Instant,
}

impl AppState {
    pub fn new(context: ChartContext, config: RuntimeConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            context: Arc::new(context),
            runtime_config: Arc::new(RwLock::new(config)),
            config_path,
            persist_lock: Mutex::new(()),
            start_time: Instant::now(),
        }
    }

    // ── Version Management ──────────────────────────────────────────────

    /// Atomically increment the state version.
    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    /// Read the current state version without modifying it.
    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    // ── Indicator selection ─────────────────────────────────────────────

    pub fn indicator_config(&self) -> IndicatorConfig {
        self.runtime_config.read().indicators.clone()
    }

    pub fn oscillators(&self) -> OscillatorParams {
        self.runtime_config.read().oscillators.clone()
    }

    /// Validate and install a new current selection.
    ///
    /// An invalid selection leaves the current one untouched.
    pub fn set_indicator_config(&self, config: IndicatorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.runtime_config.write().indicators = config;
        self.increment_version();
        self.persist();

        info!(version = self.current_state_version(), "indicator selection updated");
        Ok(())
    }

    /// Apply a partial update to the current selection under the write lock.
    ///
    /// `apply` edits a copy of the current selection and returns the list of
    /// changes it made.  The copy is installed only when it changed and
    /// validates; otherwise the current selection is untouched.  Returns the
    /// resulting selection together with the change list.
    pub fn update_indicator_config<F>(
        &self,
        apply: F,
    ) -> Result<(IndicatorConfig, Vec<String>), ConfigError>
    where
        F: FnOnce(&mut IndicatorConfig) -> Vec<String>,
    {
        let (config, changes) = {
            let mut runtime = self.runtime_config.write();
            let mut candidate = runtime.indicators.clone();
            let changes = apply(&mut candidate);
            if changes.is_empty() {
                return Ok((candidate, changes));
            }
            candidate.validate()?;
            runtime.indicators = candidate.clone();
            self.increment_version();
            (candidate, changes)
        };

        self.persist();
        info!(
            version = self.current_state_version(),
            changes = ?changes,
            "indicator selection updated"
        );
        Ok((config, changes))
    }

    /// Best-effort save of the latest runtime config.
    ///
    /// The snapshot is taken while holding the persist lock, so the last save
    /// to finish always writes the newest selection.
    fn persist(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        let _guard = self.persist_lock.lock();
        let snapshot = self.runtime_config.read().clone();
        if let Err(e) = snapshot.save(path) {
            warn!(error = %e, "Failed to persist indicator selection");
        }
    }

    // ── Engine entry points ─────────────────────────────────────────────

    pub fn indicators(&self, config: &IndicatorConfig) -> Result<IndicatorSet, ConfigError> {
        compute_indicators(&self.context.prices, config, &self.oscillators())
    }

    pub fn chart(&self, config: &IndicatorConfig) -> Result<ChartSpec, ConfigError> {
        build_chart(&self.context, config, &self.oscillators())
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
