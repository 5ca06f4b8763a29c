//! Parameter schema and phase validation for the disk-resident DiskANN index
//!
//! DiskANN keeps its Vamana graph on SSD and a product-quantized copy of the
//! vectors in memory. This crate declares every tunable parameter of that
//! index (type, default, legal range, phases it is read in) and prepares a
//! per-operation configuration before the engine builds, loads or searches.
//!
//! # Search list size
//!
//! The only cross-field rule lives between `search_list_size` and `k`:
//!
//! - **Search**: an unset list size becomes `max(k, 16)`; an explicit one
//!   smaller than `k` is rejected as out of range.
//! - **Build**: an unset list size becomes `128`; `k` is not consulted.
//!
//! # Example
//!
//! ```rust
//! use diskann_config::{DiskAnnConfig, Phase, BEAMWIDTH, K};
//!
//! let mut config = DiskAnnConfig::new().with(K, 10)?.with(BEAMWIDTH, 4)?;
//! config.prepare(Phase::Search)?;
//!
//! assert_eq!(config.search_list_size(), Some(16));
//! assert_eq!(config.beamwidth(), Some(4));
//! # Ok::<(), diskann_config::ConfigError>(())
//! ```

mod config;
mod metric;
mod schema;

pub use config::{DiskAnnConfig, FilterThreshold};
pub use metric::Metric;
pub use schema::*;

pub use config_engine::{ConfigError, FieldValue, Phase, PhaseAdjuster, Result, ValueOrigin};
