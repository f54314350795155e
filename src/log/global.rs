use anyhow::Result;
use std::sync::Arc;

use crate::log::logger::Logger;
use crate::log::logger_manager::{LoggerManager, LoggerManagerConfig};
use crate::log::record::{LogLevel, LogRecord, MetadataValue};

/// 全局 LoggerManager 单例
///
/// 默认包含一个输出到终端的文本形式 logger
static GLOBAL_LOGGER_MANAGER: once_cell::sync::Lazy<Arc<LoggerManager>> =
    once_cell::sync::Lazy::new(|| {
        Arc::new(
            LoggerManager::new(LoggerManagerConfig::default())
                .expect("failed to create global LoggerManager"),
        )
    });

/// 初始化全局 LoggerManager
///
/// 把配置里的 loggers 合并进全局单例，并替换默认 logger。
///
/// # 示例
///
/// ```ignore
/// let config: LoggerManagerConfig = json5::from_str(r#"
///     {
///         default: { level: "info" },
///         loggers: {
///             "app.db": {
///                 level: "debug",
///                 filters: [{ type: "SqlSanitizer", options: { pretty_print: true } }],
///             }
///         }
///     }
/// "#)?;
/// utilx::log::init(config)?;
/// ```
pub fn init(config: LoggerManagerConfig) -> Result<()> {
    let manager = LoggerManager::new(config)?;

    let new_loggers = manager.loggers.read().unwrap();
    let mut global = GLOBAL_LOGGER_MANAGER.loggers.write().unwrap();
    for (key, logger) in new_loggers.iter() {
        global.insert(key.clone(), logger.clone());
    }
    drop(global);

    GLOBAL_LOGGER_MANAGER.set_default(manager.get_default());

    Ok(())
}

/// 获取全局 LoggerManager
pub fn global_logger_manager() -> Arc<LoggerManager> {
    Arc::clone(&GLOBAL_LOGGER_MANAGER)
}

/// 获取指定 key 的 logger（全局）
pub fn get(key: &str) -> Option<Arc<Logger>> {
    global_logger_manager().get(key)
}

/// 获取指定 key 的 logger，不存在时返回默认 logger（全局）
pub fn get_or_default(key: &str) -> Arc<Logger> {
    global_logger_manager().get_or_default(key)
}

/// 获取默认 logger（全局）
pub fn get_default() -> Arc<Logger> {
    global_logger_manager().get_default()
}

/// 设置默认 logger（全局）
pub fn set_default(logger: Arc<Logger>) {
    global_logger_manager().set_default(logger)
}

/// 动态添加 logger（全局）
pub fn add(key: String, logger: Arc<Logger>) {
    global_logger_manager().add(key, logger)
}

/// 检查指定 key 的 logger 是否存在（全局）
pub fn contains(key: &str) -> bool {
    global_logger_manager().contains(key)
}

/// 移除指定 key 的 logger（全局）
pub fn remove(key: &str) -> Option<Arc<Logger>> {
    global_logger_manager().remove(key)
}

/// 静音指定 key 的 logger
///
/// 用 NullAppender 的 logger 替换该 key 下的实例，一切输出被丢弃。
/// 用于压制过于啰嗦的组件日志。
pub fn silence(key: &str) -> Result<()> {
    let config: crate::log::logger::LoggerCreateConfig =
        serde_json::from_value(serde_json::json!({
            "appender": { "type": "NullAppender", "options": {} }
        }))?;
    add(key.to_string(), Arc::new(Logger::new(config)?));
    Ok(())
}

/// 为指定 key 配置一个输出到终端的 debug 级别 logger
///
/// 开发期排查问题用：快速看到某个组件的全部输出。
pub fn console_logger_for(key: &str) -> Result<()> {
    let config: crate::log::logger::LoggerCreateConfig =
        serde_json::from_value(serde_json::json!({
            "level": "debug",
            "appender": { "type": "ConsoleAppender", "options": {} }
        }))?;
    add(key.to_string(), Arc::new(Logger::new(config)?));
    Ok(())
}

// ========== 默认 logger 的便捷 log 方法 ==========

/// 使用默认 logger 记录日志
pub async fn log(record: LogRecord) -> Result<()> {
    get_default().log(record).await
}

/// 使用默认 logger 记录带 metadata 的日志
pub async fn logm(
    level: LogLevel,
    message: impl Into<String>,
    metadata: impl IntoIterator<Item = (impl Into<String>, MetadataValue)>,
) -> Result<()> {
    get_default().logm(level, message, metadata).await
}

/// 使用默认 logger 记录 TRACE 级别日志
pub async fn trace(message: impl Into<String>) -> Result<()> {
    get_default().trace(message).await
}

/// 使用默认 logger 记录 DEBUG 级别日志
pub async fn debug(message: impl Into<String>) -> Result<()> {
    get_default().debug(message).await
}

/// 使用默认 logger 记录 INFO 级别日志
pub async fn info(message: impl Into<String>) -> Result<()> {
    get_default().info(message).await
}

/// 使用默认 logger 记录 WARN 级别日志
pub async fn warn(message: impl Into<String>) -> Result<()> {
    get_default().warn(message).await
}

/// 使用默认 logger 记录 ERROR 级别日志
pub async fn error(message: impl Into<String>) -> Result<()> {
    get_default().error(message).await
}
