use anyhow::Result;

use crate::cfg::{create_trait_from_type_options, register_trait, TypeOptions};
use crate::log::filter::{
    context_filter::{ContextFilter, ContextFilterConfig},
    host_metadata_filter::{HostMetadataFilter, HostMetadataFilterConfig},
    sql_sanitizer::{SqlSanitizer, SqlSanitizerConfig},
    LogFilter,
};

/// 注册所有 Filter 实现
pub fn register_filters() -> Result<()> {
    register_trait::<SqlSanitizer, dyn LogFilter, SqlSanitizerConfig>("SqlSanitizer")?;
    register_trait::<ContextFilter, dyn LogFilter, ContextFilterConfig>("ContextFilter")?;
    register_trait::<HostMetadataFilter, dyn LogFilter, HostMetadataFilterConfig>(
        "HostMetadataFilter",
    )?;
    Ok(())
}

/// 从 TypeOptions 创建 Filter
pub fn create_filter_from_options(options: &TypeOptions) -> Result<Box<dyn LogFilter>> {
    create_trait_from_type_options(options)
}
