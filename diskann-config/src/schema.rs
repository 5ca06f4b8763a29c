//! DiskANN parameter declarations
//!
//! The DiskANN table is composed with the shared base fields once, on first
//! use, and is read-only afterwards.

use config_engine::{base_fields, FieldDescriptor, Schema, FLOAT_MAX, INT_MAX};
use lazy_static::lazy_static;

use crate::metric::Metric;

pub const METRIC_TYPE: &str = config_engine::base::METRIC_TYPE;
pub const K: &str = config_engine::base::K;
pub const MAX_DEGREE: &str = "max_degree";
pub const SEARCH_LIST_SIZE: &str = "search_list_size";
pub const PQ_CODE_BUDGET_GB: &str = "pq_code_budget_gb";
pub const BUILD_DRAM_BUDGET_GB: &str = "build_dram_budget_gb";
pub const DISK_PQ_DIMS: &str = "disk_pq_dims";
pub const ACCELERATE_BUILD: &str = "accelerate_build";
pub const SEARCH_CACHE_BUDGET_GB: &str = "search_cache_budget_gb";
pub const WARM_UP: &str = "warm_up";
pub const USE_BFS_CACHE: &str = "use_bfs_cache";
pub const BEAMWIDTH: &str = "beamwidth";
pub const MIN_K: &str = "min_k";
pub const MAX_K: &str = "max_k";
pub const SEARCH_LIST_AND_K_RATIO: &str = "search_list_and_k_ratio";
pub const FILTER_THRESHOLD: &str = "filter_threshold";

/// Floor for a search list size computed from k
pub const SEARCH_LIST_SIZE_MIN_VALUE: i64 = 16;

/// Search list size used for build when none is given
pub const DEFAULT_SEARCH_LIST_SIZE_FOR_BUILD: i64 = 128;

lazy_static! {
    static ref DISKANN_SCHEMA: Schema = Schema::compose("diskann", base_fields(), diskann_fields());
}

/// The composed DiskANN schema.
pub fn diskann_schema() -> &'static Schema {
    &DISKANN_SCHEMA
}

/// Parameters specific to DiskANN. `metric_type` replaces the base
/// declaration.
pub fn diskann_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::string(METRIC_TYPE)
            .description("metric type")
            .set_default(Metric::L2.as_str())
            .one_of(&Metric::NAMES)
            .for_build()
            .for_search()
            .for_deserialize()
            .build(),
        FieldDescriptor::integer(MAX_DEGREE)
            .description("the degree of the graph index.")
            .set_default(48)
            .set_range(1, 2048)
            .for_build()
            .build(),
        FieldDescriptor::integer(SEARCH_LIST_SIZE)
            .description("the size of search list during the index build or search.")
            .allow_empty_without_default()
            .set_range(1, INT_MAX)
            .for_build()
            .for_search()
            .build(),
        FieldDescriptor::float(PQ_CODE_BUDGET_GB)
            .description("the size of PQ compressed representation in GB.")
            .set_range(0, FLOAT_MAX)
            .for_build()
            .build(),
        FieldDescriptor::float(BUILD_DRAM_BUDGET_GB)
            .description("limit on the memory allowed for building the index in GB.")
            .set_range(0, FLOAT_MAX)
            .for_build()
            .build(),
        FieldDescriptor::integer(DISK_PQ_DIMS)
            .description("the dimension of compressed vectors stored on the ssd, use 0 to store uncompressed data.")
            .set_default(0)
            .for_build()
            .build(),
        FieldDescriptor::boolean(ACCELERATE_BUILD)
            .description("a flag to enable fast build.")
            .set_default(false)
            .for_build()
            .build(),
        FieldDescriptor::float(SEARCH_CACHE_BUDGET_GB)
            .description("the size of cached nodes in GB.")
            .set_default(0)
            .set_range(0, FLOAT_MAX)
            .for_build()
            .for_deserialize()
            .build(),
        FieldDescriptor::boolean(WARM_UP)
            .description("should do warm up before search.")
            .set_default(false)
            .for_deserialize()
            .build(),
        FieldDescriptor::boolean(USE_BFS_CACHE)
            .description("should bfs strategy to cache nodes.")
            .set_default(false)
            .for_deserialize()
            .build(),
        FieldDescriptor::integer(BEAMWIDTH)
            .description("the maximum number of IO requests each query will issue per iteration of search code.")
            .set_default(8)
            .set_range(1, 128)
            .for_search()
            .for_range_search()
            .build(),
        FieldDescriptor::integer(MIN_K)
            .description("the min l_search size used in range search.")
            .set_default(100)
            .set_range(1, INT_MAX)
            .for_range_search()
            .build(),
        FieldDescriptor::integer(MAX_K)
            .description("the max l_search size used in range search.")
            .set_default(10000)
            .set_range(1, INT_MAX)
            .for_range_search()
            .build(),
        FieldDescriptor::float(SEARCH_LIST_AND_K_RATIO)
            .description("the ratio of search list size and k.")
            .set_default(2.0)
            .set_range(1.0, 5.0)
            .for_range_search()
            .build(),
        FieldDescriptor::float(FILTER_THRESHOLD)
            .description("the threshold of filter ratio to use PQ + Refine.")
            .set_default(-1.0)
            .set_range(-1.0, 1.0)
            .for_search()
            .build(),
    ]
}
