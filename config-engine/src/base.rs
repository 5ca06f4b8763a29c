//! Parameters shared by every index family
//!
//! Index families compose this set with their own declarations through
//! [`Schema::compose`](crate::schema::Schema::compose).

use crate::field::{FieldDescriptor, INT_MAX};

pub const METRIC_TYPE: &str = "metric_type";
pub const K: &str = "k";
pub const NUM_BUILD_THREAD: &str = "num_build_thread";
pub const RADIUS: &str = "radius";
pub const RANGE_FILTER: &str = "range_filter";
pub const TRACE_VISIT: &str = "trace_visit";
pub const DATA_PATH: &str = "data_path";
pub const INDEX_PREFIX: &str = "index_prefix";
pub const ENABLE_MMAP: &str = "enable_mmap";

/// Default number of results for a top-k query
pub const DEFAULT_K: i64 = 10;

pub fn base_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::string(METRIC_TYPE)
            .description("metric type")
            .allow_empty_without_default()
            .for_build_and_search()
            .for_deserialize()
            .build(),
        FieldDescriptor::integer(K)
            .description("search for top k similar vector.")
            .set_default(DEFAULT_K)
            .set_range(1, INT_MAX)
            .for_search()
            .build(),
        FieldDescriptor::integer(NUM_BUILD_THREAD)
            .description("index thread limit for build.")
            .allow_empty_without_default()
            .set_range(1, INT_MAX)
            .for_build()
            .build(),
        FieldDescriptor::float(RADIUS)
            .description("radius for range search")
            .set_default(0.0)
            .for_range_search()
            .build(),
        FieldDescriptor::float(RANGE_FILTER)
            .description("result filter for range search")
            .set_default(f64::INFINITY)
            .for_range_search()
            .build(),
        FieldDescriptor::boolean(TRACE_VISIT)
            .description("trace visit for feder")
            .set_default(false)
            .for_search()
            .for_range_search()
            .build(),
        FieldDescriptor::string(DATA_PATH)
            .description("raw data path.")
            .allow_empty_without_default()
            .for_build()
            .for_deserialize()
            .build(),
        FieldDescriptor::string(INDEX_PREFIX)
            .description("path prefix to load or save index.")
            .allow_empty_without_default()
            .for_build()
            .for_deserialize()
            .build(),
        FieldDescriptor::boolean(ENABLE_MMAP)
            .description("enable mmap for deserialize index")
            .allow_empty_without_default()
            .for_deserialize()
            .build(),
    ]
}
