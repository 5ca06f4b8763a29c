//! Phase-specific validation and adjustment
//!
//! [`prepare`] is the single entry point an operation dispatcher calls
//! before handing a record to the index engine. It merges declared
//! defaults, runs the schema checks, then gives the index family a chance
//! to fill computed defaults and enforce cross-field invariants.

use crate::base;
use crate::error::{ConfigError, Result};
use crate::phase::Phase;
use crate::record::ConfigRecord;

/// Index-family hooks run after the schema checks pass.
///
/// Every hook defaults to accepting the record unchanged.
pub trait PhaseAdjuster {
    fn record(&self) -> &ConfigRecord;

    fn record_mut(&mut self) -> &mut ConfigRecord;

    /// Runs before a top-k search with the requested result count.
    fn check_and_adjust_for_search(&mut self, _k: i64) -> Result<()> {
        Ok(())
    }

    fn check_and_adjust_for_range_search(&mut self) -> Result<()> {
        Ok(())
    }

    fn check_and_adjust_for_build(&mut self) -> Result<()> {
        Ok(())
    }

    fn check_and_adjust_for_deserialize(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Prepare `config` for `phase`.
///
/// On failure the record must not be used for the operation.
pub fn prepare<C: PhaseAdjuster>(config: &mut C, phase: Phase) -> Result<()> {
    let filled = config.record_mut().apply_defaults(phase);
    tracing::debug!(phase = %phase, defaults = filled, "merged declared defaults");

    let checked = config.record().check(phase);
    let outcome = checked.and_then(|()| match phase {
        Phase::Build => config.check_and_adjust_for_build(),
        Phase::Search => {
            let k = config
                .record()
                .get_i64(base::K)
                .ok_or_else(|| ConfigError::MissingRequired {
                    field: base::K.to_string(),
                    phase,
                })?;
            config.check_and_adjust_for_search(k)
        }
        Phase::RangeSearch => config.check_and_adjust_for_range_search(),
        Phase::Deserialize => config.check_and_adjust_for_deserialize(),
    });

    match &outcome {
        Ok(()) => tracing::debug!(
            schema = config.record().schema().name(),
            phase = %phase,
            "configuration prepared"
        ),
        Err(e) => tracing::error!(
            schema = config.record().schema().name(),
            phase = %phase,
            error = %e,
            "configuration rejected"
        ),
    }
    outcome
}
