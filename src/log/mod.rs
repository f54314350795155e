//! 日志模块
//!
//! 提供结构化日志能力，核心是一条可配置的流水线：
//! 级别门控 -> 过滤器链 -> 格式化器 -> 输出器。
//!
//! # 特性
//!
//! - 多种日志级别：Trace, Debug, Info, Warn, Error
//! - 可扩展的过滤器：SqlSanitizer（SQL 净化与截断）、ContextFilter、HostMetadataFilter
//! - 可扩展的格式化器：TextFormatter、JsonFormatter、SingleLineFormatter
//! - 多种输出目标：ConsoleAppender、FileAppender、NullAppender
//! - 基于配置的动态创建（JSON5 / YAML / TOML）
//! - 输出路径完全异步
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use utilx::log::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config: LoggerCreateConfig = json5::from_str(r#"
//!         {
//!             level: "debug",
//!             filters: [
//!                 {
//!                     type: "SqlSanitizer",
//!                     options: {
//!                         max_message_length: 2048,
//!                         pretty_print: false,
//!                         include_parameters: true,
//!                     }
//!                 }
//!             ],
//!             formatter: { type: "TextFormatter", options: { colored: false } },
//!             appender: { type: "ConsoleAppender", options: { target: "stdout" } }
//!         }
//!     "#)?;
//!
//!     let logger = Logger::new(config)?;
//!
//!     // 常规日志
//!     logger.info("application started").await?;
//!
//!     // 数据库调用日志：语句和参数由 SqlSanitizer 渲染
//!     logger.sql(
//!         LogLevel::Debug,
//!         "select * from users where id = $1",
//!         Some(SqlParams::positional(vec![SqlValue::Int(42)])),
//!         Some(1.8),
//!     ).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod appender;
pub mod filter;
pub mod formatter;
pub mod global;
pub mod logger;
pub mod logger_manager;
pub mod macros;
pub mod record;
pub mod sql;

// 重新导出核心类型
pub use appender::LogAppender;
pub use filter::LogFilter;
pub use formatter::LogFormatter;
pub use logger::{Logger, LoggerConfig, LoggerCreateConfig};
pub use logger_manager::{LoggerManager, LoggerManagerConfig};
pub use record::{LogLevel, LogRecord, MetadataValue};
pub use sql::{SqlParams, SqlValue};

pub use global::{
    add, console_logger_for, contains, debug, error, get, get_default, get_or_default,
    global_logger_manager, info, init, log, logm, remove, set_default, silence, trace, warn,
};

// 重新导出子模块的注册函数和组件类型
pub use appender::{
    register_appenders, ConsoleAppender, ConsoleAppenderConfig, FileAppender, FileAppenderConfig,
    NullAppender, NullAppenderConfig, Target,
};
pub use filter::{
    register_filters, ContextFilter, ContextFilterConfig, HostMetadataFilter,
    HostMetadataFilterConfig, SqlSanitizer, SqlSanitizerConfig, SqlSanitizerError,
    TRUNCATION_MARKER,
};
pub use formatter::{
    register_formatters, JsonFormatter, JsonFormatterConfig, SingleLineFormatter,
    SingleLineFormatterConfig, TextFormatter, TextFormatterConfig,
};
