use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::sync::{Arc, Once};
use tokio::sync::RwLock;

use crate::cfg::TypeOptions;
use crate::log::appender::LogAppender;
use crate::log::filter::LogFilter;
use crate::log::formatter::LogFormatter;
use crate::log::record::{LogLevel, LogRecord, MetadataValue};

/// Logger 创建配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggerCreateConfig {
    /// 日志级别
    #[default = "info"]
    pub level: String,

    /// Filter 配置链，按声明顺序依次应用
    pub filters: Vec<TypeOptions>,

    /// Formatter 配置
    #[default(TypeOptions { type_name: "TextFormatter".to_string(), options: serde_json::Value::Null })]
    pub formatter: TypeOptions,

    /// Appender 配置
    #[default(TypeOptions { type_name: "ConsoleAppender".to_string(), options: serde_json::Value::Null })]
    pub appender: TypeOptions,
}

/// Logger 配置
///
/// 支持两种模式：
/// - Reference: 引用已存在的 logger 实例（通过 $instance 字段）
/// - Create: 创建新的 logger 实例
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LoggerConfig {
    /// 引用一个已存在的 logger 实例
    Reference {
        #[serde(rename = "$instance")]
        instance: String,
    },

    /// 创建新的 logger 实例
    Create(LoggerCreateConfig),
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig::Create(LoggerCreateConfig::default())
    }
}

/// 注册所有日志组件（只执行一次）
static REGISTER_ONCE: Once = Once::new();

pub(crate) fn register_log_components() {
    REGISTER_ONCE.call_once(|| {
        let _ = crate::log::formatter::register_formatters();
        let _ = crate::log::appender::register_appenders();
        let _ = crate::log::filter::register_filters();
    });
}

/// 核心日志器
///
/// 流水线：级别门控 -> 过滤器链 -> 格式化 -> 输出。
/// 过滤器返回 false 时丢弃记录。
pub struct Logger {
    level: Arc<RwLock<LogLevel>>,
    filters: Vec<Arc<dyn LogFilter>>,
    formatter: Arc<dyn LogFormatter>,
    appender: Arc<dyn LogAppender>,
}

impl Logger {
    /// 从创建配置创建 Logger
    pub fn new(config: LoggerCreateConfig) -> Result<Self> {
        register_log_components();

        let level = config.level.parse::<LogLevel>().unwrap_or(LogLevel::Info);

        let mut filters = Vec::with_capacity(config.filters.len());
        for filter_options in &config.filters {
            let filter_box = crate::log::filter::create_filter_from_options(filter_options)?;
            filters.push(Arc::from(filter_box));
        }

        let formatter_box =
            crate::log::formatter::create_formatter_from_options(&config.formatter)?;
        let appender_box = crate::log::appender::create_appender_from_options(&config.appender)?;

        Ok(Self {
            level: Arc::new(RwLock::new(level)),
            filters,
            formatter: Arc::from(formatter_box),
            appender: Arc::from(appender_box),
        })
    }

    /// 从配置解析 Logger
    ///
    /// Reference 模式从全局管理器获取已存在的 logger，
    /// Create 模式创建新的实例。
    pub fn resolve(config: LoggerConfig) -> Result<Arc<Self>> {
        match config {
            LoggerConfig::Reference { instance } => {
                crate::log::get(&instance).ok_or_else(|| {
                    anyhow::anyhow!("logger instance '{}' not found in global manager", instance)
                })
            }
            LoggerConfig::Create(create_config) => Ok(Arc::new(Logger::new(create_config)?)),
        }
    }

    /// 设置日志级别
    pub async fn set_level(&self, level: LogLevel) {
        *self.level.write().await = level;
    }

    /// 获取当前日志级别
    pub async fn get_level(&self) -> LogLevel {
        *self.level.read().await
    }

    /// 记录日志
    pub async fn log(&self, record: LogRecord) -> Result<()> {
        let current_level = *self.level.read().await;
        if record.level < current_level {
            return Ok(());
        }

        // 过滤器链：原地改写记录，任何一个返回 false 则丢弃
        let mut record = record;
        for filter in &self.filters {
            if !filter.filter(&mut record)? {
                return Ok(());
            }
        }

        let formatted = self.formatter.format(&record)?;
        self.appender.append(&formatted).await?;

        Ok(())
    }

    /// 记录带 metadata 的日志（通用方法）
    ///
    /// # 示例
    ///
    /// ```ignore
    /// logger.logm(
    ///     LogLevel::Info,
    ///     "user logged in",
    ///     vec![("user_id", 12345.into()), ("username", "alice".into())],
    /// ).await?;
    /// ```
    pub async fn logm(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = (impl Into<String>, MetadataValue)>,
    ) -> Result<()> {
        let mut record = LogRecord::new(level, message.into());
        for (key, value) in metadata.into_iter() {
            record.metadata.push((key.into(), value));
        }
        self.log(record).await
    }

    /// 记录 TRACE 级别日志
    pub async fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Trace, message.into()))
            .await
    }

    /// 记录 DEBUG 级别日志
    pub async fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Debug, message.into()))
            .await
    }

    /// 记录 INFO 级别日志
    pub async fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Info, message.into()))
            .await
    }

    /// 记录 WARN 级别日志
    pub async fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Warn, message.into()))
            .await
    }

    /// 记录 ERROR 级别日志
    pub async fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Error, message.into()))
            .await
    }

    /// 记录一次数据库调用
    ///
    /// 搭配 SqlSanitizer 过滤器使用：语句、参数和耗时挂在记录上，
    /// 由过滤器渲染为最终消息。
    pub async fn sql(
        &self,
        level: LogLevel,
        statement: impl Into<String>,
        parameters: Option<crate::log::sql::SqlParams>,
        duration_ms: Option<f64>,
    ) -> Result<()> {
        let mut record = LogRecord::new(level, String::new()).with_statement(statement);
        if let Some(parameters) = parameters {
            record = record.with_parameters(parameters);
        }
        if let Some(duration_ms) = duration_ms {
            record = record.with_duration_ms(duration_ms);
        }
        self.log(record).await
    }
}

impl From<LoggerCreateConfig> for Logger {
    fn from(config: LoggerCreateConfig) -> Self {
        Logger::new(config).expect("failed to create Logger")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::sql::{SqlParams, SqlValue};
    use tempfile::TempDir;

    /// 辅助函数：为测试创建一个写入临时文件的 Logger
    fn file_logger(dir: &TempDir, level: &str, filters: &str) -> (Logger, std::path::PathBuf) {
        let path = dir.path().join("test.log");
        let config_json = format!(
            r#"{{
                level: "{}",
                filters: {},
                formatter: {{ type: "TextFormatter", options: {{}} }},
                appender: {{
                    type: "FileAppender",
                    options: {{ file_path: "{}" }}
                }}
            }}"#,
            level,
            filters,
            path.to_string_lossy()
        );

        let config: LoggerCreateConfig =
            json5::from_str(&config_json).expect("failed to parse LoggerCreateConfig");
        (Logger::new(config).unwrap(), path)
    }

    #[tokio::test]
    async fn test_logger_new_default_level() {
        let dir = TempDir::new().unwrap();
        let (logger, _) = file_logger(&dir, "info", "[]");
        assert_eq!(logger.get_level().await, LogLevel::Info);
    }

    #[tokio::test]
    async fn test_logger_set_level() {
        let dir = TempDir::new().unwrap();
        let (logger, _) = file_logger(&dir, "info", "[]");

        logger.set_level(LogLevel::Debug).await;
        assert_eq!(logger.get_level().await, LogLevel::Debug);
    }

    #[tokio::test]
    async fn test_logger_level_filtering() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let (logger, path) = file_logger(&dir, "info", "[]");

        logger.debug("filtered out").await?;
        logger.info("kept").await?;

        let content = std::fs::read_to_string(&path)?;
        assert!(!content.contains("filtered out"));
        assert!(content.contains("kept"));
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_logm_with_metadata() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let (logger, path) = file_logger(&dir, "debug", "[]");

        logger
            .logm(
                LogLevel::Info,
                "user action",
                vec![("user_id", 12345i64.into()), ("action", "login".into())],
            )
            .await?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("user action"));
        assert!(content.contains("user_id=12345"));
        assert!(content.contains("action=login"));
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_with_sanitizer_filter() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let (logger, path) = file_logger(
            &dir,
            "debug",
            r#"[{ type: "SqlSanitizer", options: { max_message_length: 2048 } }]"#,
        );

        logger
            .sql(
                LogLevel::Debug,
                "select * from users where id = $1",
                Some(SqlParams::positional(vec![SqlValue::Int(7)])),
                Some(3.5),
            )
            .await?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("SELECT * FROM users WHERE id = 7"));
        assert!(content.contains("sql_duration=3.50 ms"));
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_from_json5_config() -> Result<()> {
        let config: LoggerCreateConfig = json5::from_str(
            r#"
            {
                level: "debug",
                formatter: {
                    type: "TextFormatter",
                    options: { colored: false }
                },
                appender: {
                    type: "NullAppender",
                }
            }
            "#,
        )?;

        let logger = Logger::new(config)?;
        assert_eq!(logger.get_level().await, LogLevel::Debug);
        logger.info("discarded").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_logger_invalid_filter_type_fails() {
        let config: LoggerCreateConfig = json5::from_str(
            r#"
            {
                level: "info",
                filters: [{ type: "NoSuchFilter", options: {} }],
                appender: { type: "NullAppender" }
            }
            "#,
        )
        .unwrap();

        assert!(Logger::new(config).is_err());
    }
}
