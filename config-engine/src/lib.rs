//! Phase-aware configuration engine for ANN index families
//!
//! This crate provides the base mechanism index families declare their
//! tunable parameters with:
//! - Immutable field descriptors (type, default, range, phases)
//! - Flat schemas composed from a shared base field set and a family set
//! - A per-operation configuration record tracking where each value came from
//! - Schema checks (required fields, ranges) and phase-specific adjustment hooks
//!
//! # Example
//!
//! ```rust
//! use config_engine::{
//!     base_fields, prepare, ConfigRecord, FieldDescriptor, Phase, PhaseAdjuster, Schema,
//! };
//! use lazy_static::lazy_static;
//!
//! lazy_static! {
//!     static ref SCHEMA: Schema = Schema::compose(
//!         "flat",
//!         base_fields(),
//!         vec![FieldDescriptor::integer("nprobe")
//!             .set_default(8)
//!             .set_range(1, 65536)
//!             .for_search()
//!             .build()],
//!     );
//! }
//!
//! struct FlatConfig(ConfigRecord);
//!
//! impl PhaseAdjuster for FlatConfig {
//!     fn record(&self) -> &ConfigRecord { &self.0 }
//!     fn record_mut(&mut self) -> &mut ConfigRecord { &mut self.0 }
//! }
//!
//! let mut config = FlatConfig(ConfigRecord::new(&SCHEMA));
//! config.0.set("k", 5)?;
//! prepare(&mut config, Phase::Search)?;
//! assert_eq!(config.0.get_i64("nprobe"), Some(8));
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod base;
pub mod error;
pub mod field;
pub mod phase;
pub mod record;
pub mod schema;
pub mod validation;

pub use base::base_fields;
pub use error::*;
pub use field::*;
pub use phase::*;
pub use record::*;
pub use schema::*;
pub use validation::*;
