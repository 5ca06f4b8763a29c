//! Typed DiskANN configuration and its phase adjusters

use config_engine::{
    prepare, ConfigError, ConfigRecord, FieldValue, Phase, PhaseAdjuster, Result, ValueOrigin,
};

use crate::metric::Metric;
use crate::schema::*;

/// How the engine picks the selectivity at which a filtered search switches
/// to PQ + refine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterThreshold {
    /// Negative threshold: the engine computes it from the requested top-k
    Dynamic,
    /// Switch once at least this fraction of the filter bits is set
    Fixed(f64),
}

impl FilterThreshold {
    pub fn from_value(value: f64) -> Self {
        if value < 0.0 {
            FilterThreshold::Dynamic
        } else {
            FilterThreshold::Fixed(value)
        }
    }
}

/// Configuration of one DiskANN operation
#[derive(Debug, Clone)]
pub struct DiskAnnConfig {
    record: ConfigRecord,
}

impl Default for DiskAnnConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DiskAnnConfig {
    pub fn new() -> Self {
        Self {
            record: ConfigRecord::new(diskann_schema()),
        }
    }

    /// Populate a parameter from caller input.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.record.set(name, value)
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self> {
        self.record.set(name, value)?;
        Ok(self)
    }

    /// Validate and adjust the configuration for the operation about to run.
    pub fn prepare(&mut self, phase: Phase) -> Result<()> {
        prepare(self, phase)
    }

    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    pub fn origin(&self, name: &str) -> Option<ValueOrigin> {
        self.record.origin(name)
    }

    pub fn metric(&self) -> Option<Metric> {
        self.record.get_str(METRIC_TYPE).and_then(|m| m.parse().ok())
    }

    pub fn k(&self) -> Option<i64> {
        self.record.get_i64(K)
    }

    pub fn max_degree(&self) -> Option<i64> {
        self.record.get_i64(MAX_DEGREE)
    }

    pub fn search_list_size(&self) -> Option<i64> {
        self.record.get_i64(SEARCH_LIST_SIZE)
    }

    pub fn pq_code_budget_gb(&self) -> Option<f64> {
        self.record.get_f64(PQ_CODE_BUDGET_GB)
    }

    pub fn build_dram_budget_gb(&self) -> Option<f64> {
        self.record.get_f64(BUILD_DRAM_BUDGET_GB)
    }

    pub fn disk_pq_dims(&self) -> Option<i64> {
        self.record.get_i64(DISK_PQ_DIMS)
    }

    pub fn accelerate_build(&self) -> Option<bool> {
        self.record.get_bool(ACCELERATE_BUILD)
    }

    pub fn search_cache_budget_gb(&self) -> Option<f64> {
        self.record.get_f64(SEARCH_CACHE_BUDGET_GB)
    }

    pub fn warm_up(&self) -> Option<bool> {
        self.record.get_bool(WARM_UP)
    }

    pub fn use_bfs_cache(&self) -> Option<bool> {
        self.record.get_bool(USE_BFS_CACHE)
    }

    pub fn beamwidth(&self) -> Option<i64> {
        self.record.get_i64(BEAMWIDTH)
    }

    pub fn min_k(&self) -> Option<i64> {
        self.record.get_i64(MIN_K)
    }

    pub fn max_k(&self) -> Option<i64> {
        self.record.get_i64(MAX_K)
    }

    pub fn search_list_and_k_ratio(&self) -> Option<f64> {
        self.record.get_f64(SEARCH_LIST_AND_K_RATIO)
    }

    pub fn filter_threshold(&self) -> Option<f64> {
        self.record.get_f64(FILTER_THRESHOLD)
    }

    /// Classify `filter_threshold`. The dynamic threshold itself is left to
    /// the engine.
    pub fn filter_strategy(&self) -> Option<FilterThreshold> {
        self.filter_threshold().map(FilterThreshold::from_value)
    }
}

impl PhaseAdjuster for DiskAnnConfig {
    fn record(&self) -> &ConfigRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut ConfigRecord {
        &mut self.record
    }

    /// The search list must be able to hold k results. When left unset it
    /// follows k, floored at [`SEARCH_LIST_SIZE_MIN_VALUE`].
    fn check_and_adjust_for_search(&mut self, k: i64) -> Result<()> {
        match self.search_list_size() {
            None => {
                let size = k.max(SEARCH_LIST_SIZE_MIN_VALUE);
                self.record.set_computed(SEARCH_LIST_SIZE, size)?;
                tracing::debug!(k, search_list_size = size, "computed search_list_size for search");
            }
            Some(size) if k > size => {
                let msg = format!("search_list_size({}) should be larger than k({})", size, k);
                tracing::error!(search_list_size = size, k, "{}", msg);
                return Err(ConfigError::OutOfRange(msg));
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn check_and_adjust_for_build(&mut self) -> Result<()> {
        if self.search_list_size().is_none() {
            self.record
                .set_computed(SEARCH_LIST_SIZE, DEFAULT_SEARCH_LIST_SIZE_FOR_BUILD)?;
            tracing::debug!(
                search_list_size = DEFAULT_SEARCH_LIST_SIZE_FOR_BUILD,
                "defaulted search_list_size for build"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_ready() -> DiskAnnConfig {
        DiskAnnConfig::new()
            .with(PQ_CODE_BUDGET_GB, 0.5)
            .unwrap()
            .with(BUILD_DRAM_BUDGET_GB, 4.0)
            .unwrap()
    }

    #[test]
    fn test_search_fills_search_list_size_from_k() {
        let mut config = DiskAnnConfig::new();
        config.check_and_adjust_for_search(10).unwrap();
        assert_eq!(config.search_list_size(), Some(16));
        assert_eq!(config.origin(SEARCH_LIST_SIZE), Some(ValueOrigin::Computed));

        let mut config = DiskAnnConfig::new();
        config.check_and_adjust_for_search(100).unwrap();
        assert_eq!(config.search_list_size(), Some(100));
    }

    #[test]
    fn test_search_rejects_list_smaller_than_k() {
        let mut config = DiskAnnConfig::new();
        config.set(SEARCH_LIST_SIZE, 5).unwrap();
        let err = config.check_and_adjust_for_search(10).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(
            err.to_string(),
            "Configuration value out of range: search_list_size(5) should be larger than k(10)"
        );
        assert_eq!(config.search_list_size(), Some(5));
    }

    #[test]
    fn test_search_keeps_list_equal_to_k() {
        let mut config = DiskAnnConfig::new();
        config.set(SEARCH_LIST_SIZE, 10).unwrap();
        config.check_and_adjust_for_search(10).unwrap();
        assert_eq!(config.search_list_size(), Some(10));
        assert_eq!(config.origin(SEARCH_LIST_SIZE), Some(ValueOrigin::Explicit));
    }

    #[test]
    fn test_build_defaults_search_list_size() {
        let mut config = build_ready();
        config.check_and_adjust_for_build().unwrap();
        assert_eq!(config.search_list_size(), Some(128));
    }

    #[test]
    fn test_build_ignores_k() {
        let mut config = build_ready();
        config.set(SEARCH_LIST_SIZE, 5).unwrap();
        config.set(K, 100).unwrap();
        config.prepare(Phase::Build).unwrap();
        assert_eq!(config.search_list_size(), Some(5));
    }

    #[test]
    fn test_prepare_search_uses_record_k() {
        let mut config = DiskAnnConfig::new().with(K, 50).unwrap();
        config.prepare(Phase::Search).unwrap();
        assert_eq!(config.search_list_size(), Some(50));
        assert_eq!(config.beamwidth(), Some(8));
        assert_eq!(config.filter_strategy(), Some(FilterThreshold::Dynamic));
        assert_eq!(config.metric(), Some(Metric::L2));
    }

    #[test]
    fn test_filter_strategy() {
        assert_eq!(FilterThreshold::from_value(-1.0), FilterThreshold::Dynamic);
        assert_eq!(FilterThreshold::from_value(-0.5), FilterThreshold::Dynamic);
        assert_eq!(FilterThreshold::from_value(0.0), FilterThreshold::Fixed(0.0));
        assert_eq!(FilterThreshold::from_value(0.9), FilterThreshold::Fixed(0.9));
    }

    #[test]
    fn test_build_accessors_after_prepare() {
        let mut config = build_ready();
        config.prepare(Phase::Build).unwrap();
        assert_eq!(config.max_degree(), Some(48));
        assert_eq!(config.disk_pq_dims(), Some(0));
        assert_eq!(config.accelerate_build(), Some(false));
        assert_eq!(config.search_cache_budget_gb(), Some(0.0));
        assert_eq!(config.pq_code_budget_gb(), Some(0.5));
        assert_eq!(config.build_dram_budget_gb(), Some(4.0));
        assert_eq!(config.warm_up(), None);
        assert_eq!(config.k(), None);
    }
}
