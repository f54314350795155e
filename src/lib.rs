//! UtilX - 未分类实用工具集合
//!
//! 把散落在各个项目里的小工具收拢到一个 crate：集合、字符串、日期时间、
//! 文件系统、错误收集，以及一套带 SQL 净化能力的结构化日志流水线。
//! 每个工具都自包含，可以单独使用、单独测试。
//!
//! ## 模块
//!
//! - **cfg**: 声明式组件构造（TypeOptions + 类型注册表）
//! - **log**: 日志模块（过滤器 / 格式化器 / 输出器流水线，含 SQL 净化）
//! - **fs**: 文件系统工具（校验和、路径处理、目录清理）
//! - **collections**: 集合工具（字典反转、迭代器分批）
//! - **strings**: 字符串工具（空白判断）
//! - **datetime**: 日期时间工具（时区归一、按天迭代）
//! - **errors**: 结构化错误收集（可合并的错误树）
//! - **os**: 操作系统查询（当前用户、home 目录）
//! - **benchmark**: 基准测量（秒表）
//!
//! ## 设计理念
//!
//! - 🧩 **自包含**: 工具之间没有隐藏耦合，按需取用
//! - 🔒 **类型安全**: 能力边界用类型表达（如 SqlValue 的可渲染性）
//! - 🛡️ **日志永不崩**: 日志路径上的格式化失败全部降级，不打断宿主应用
//! - ⚡ **异步输出**: 日志输出路径基于 tokio

pub mod benchmark;
pub mod cfg;
pub mod collections;
pub mod datetime;
pub mod errors;
pub mod fs;
pub mod log;
pub mod os;
pub mod strings;

// 重新导出主要的公共 API
pub use cfg::{create_trait_from_type_options, register_trait, TypeOptions};

pub use log::{
    LogAppender, LogFilter, LogFormatter, LogLevel, LogRecord, Logger, LoggerConfig,
    LoggerManagerConfig, SqlParams, SqlSanitizer, SqlSanitizerConfig, SqlValue,
};

pub use benchmark::Stopwatch;
pub use collections::{in_batches, inverted};
pub use datetime::{date_range, ensure_utc};
pub use errors::{add_error_to, ErrorStore};
pub use fs::{
    abspath_if_relative, file_checksum, move_and_create_dest, silent_create_dirs, silent_remove,
    switch_extension,
};
pub use os::{current_user, current_user_home};
pub use strings::{is_blank, is_blank_opt};
