mod context_filter;
mod core;
mod host_metadata_filter;
mod registry;
mod sql_sanitizer;

pub use context_filter::{ContextFilter, ContextFilterConfig};
pub use self::core::LogFilter;
pub use host_metadata_filter::{HostMetadataFilter, HostMetadataFilterConfig};
pub use registry::{create_filter_from_options, register_filters};
pub use sql_sanitizer::{
    SqlSanitizer, SqlSanitizerConfig, SqlSanitizerError, TRUNCATION_MARKER,
};
