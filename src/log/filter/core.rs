use crate::log::record::LogRecord;
use anyhow::Result;

/// 日志过滤器 trait
///
/// 在格式化之前对 LogRecord 做原地改写或丢弃。
/// 返回 Ok(false) 表示丢弃该记录，后续的格式化和输出都不再执行。
pub trait LogFilter: Send + Sync {
    /// 过滤日志记录
    fn filter(&self, record: &mut LogRecord) -> Result<bool>;
}
