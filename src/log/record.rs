use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use crate::log::sql::SqlParams;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// 最详细的日志
    Trace = 0,
    /// 调试信息
    Debug = 1,
    /// 一般信息
    Info = 2,
    /// 警告信息
    Warn = 3,
    /// 错误信息
    Error = 4,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("invalid log level: {}", s)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// 元数据值，支持多种类型
#[derive(Debug, Clone)]
pub enum MetadataValue {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Null,
    /// 任意 JSON 兼容的数据
    Json(Value),
}

impl Serialize for MetadataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MetadataValue::String(s) => serializer.serialize_str(s),
            MetadataValue::I64(n) => serializer.serialize_i64(*n),
            MetadataValue::U64(n) => serializer.serialize_u64(*n),
            MetadataValue::F64(n) => serializer.serialize_f64(*n),
            MetadataValue::Bool(b) => serializer.serialize_bool(*b),
            MetadataValue::Null => serializer.serialize_none(),
            MetadataValue::Json(v) => v.serialize(serializer),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{}", s),
            MetadataValue::I64(n) => write!(f, "{}", n),
            MetadataValue::U64(n) => write!(f, "{}", n),
            MetadataValue::F64(n) => write!(f, "{}", n),
            MetadataValue::Bool(b) => write!(f, "{}", b),
            MetadataValue::Null => write!(f, "null"),
            MetadataValue::Json(v) => write!(f, "'{}'", v),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::I64(n)
    }
}

impl From<i32> for MetadataValue {
    fn from(n: i32) -> Self {
        MetadataValue::I64(n as i64)
    }
}

impl From<u64> for MetadataValue {
    fn from(n: u64) -> Self {
        MetadataValue::U64(n)
    }
}

impl From<u32> for MetadataValue {
    fn from(n: u32) -> Self {
        MetadataValue::U64(n as u64)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::F64(n)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

impl From<Value> for MetadataValue {
    fn from(v: Value) -> Self {
        MetadataValue::Json(v)
    }
}

impl MetadataValue {
    /// 从任意实现了 Serialize 的自定义结构体创建 MetadataValue
    pub fn from_struct<T: serde::Serialize>(value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(json_value) => MetadataValue::Json(json_value),
            Err(_) => MetadataValue::Null,
        }
    }
}

/// 日志记录
///
/// 除了常规的消息和位置信息，还可以携带一条数据库调用负载
/// （statement + parameters + 执行耗时），由 SqlSanitizer 过滤器
/// 渲染进最终消息。
pub struct LogRecord {
    /// 日志级别
    pub level: LogLevel,
    /// 日志消息
    pub message: String,
    /// 模块路径
    pub module: Option<String>,
    /// 源文件路径
    pub file: Option<String>,
    /// 行号
    pub line: Option<u32>,
    /// 时间戳
    pub timestamp: SystemTime,
    /// 线程 ID（已缓存的字符串表示）
    pub thread_id: String,
    /// 自定义元数据
    pub metadata: Vec<(String, MetadataValue)>,
    /// 数据库语句文本
    pub statement: Option<String>,
    /// 数据库语句的绑定参数
    pub parameters: Option<SqlParams>,
    /// 数据库语句的执行耗时（毫秒）
    pub duration_ms: Option<f64>,
}

impl LogRecord {
    /// 创建新的日志记录
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message,
            module: None,
            file: None,
            line: None,
            timestamp: SystemTime::now(),
            // 缓存 thread_id 的字符串表示，避免每次格式化时转换
            thread_id: format!("{:?}", std::thread::current().id()),
            metadata: Vec::new(),
            statement: None,
            parameters: None,
            duration_ms: None,
        }
    }

    /// 添加元数据
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// 设置位置信息（文件和行号）
    pub fn with_location(mut self, file: String, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }

    /// 设置模块路径
    pub fn with_module(mut self, module: String) -> Self {
        self.module = Some(module);
        self
    }

    /// 附加数据库语句
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    /// 附加数据库语句的绑定参数
    pub fn with_parameters(mut self, parameters: SqlParams) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// 附加数据库语句的执行耗时（毫秒）
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

impl Serialize for LogRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        use serde_json::Map;
        use std::time::UNIX_EPOCH;

        let timestamp = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let metadata_map: Map<String, Value> = self
            .metadata
            .iter()
            .map(|(k, v)| {
                let json_value = serde_json::to_value(v).unwrap_or(Value::Null);
                (k.clone(), json_value)
            })
            .collect();

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("timestamp", &timestamp)?;
        map.serialize_entry("level", &self.level.to_string())?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("module", &self.module)?;
        map.serialize_entry("file", &self.file)?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry("thread_id", &self.thread_id)?;

        if !self.metadata.is_empty() {
            map.serialize_entry("metadata", &metadata_map)?;
        } else {
            map.serialize_entry("metadata", &None::<&Map<String, Value>>)?;
        }

        // SQL 负载只在存在时序列化
        if let Some(statement) = &self.statement {
            map.serialize_entry("statement", statement)?;
        }
        if let Some(parameters) = &self.parameters {
            map.serialize_entry("parameters", &parameters.to_note_value())?;
        }
        if let Some(duration_ms) = self.duration_ms {
            map.serialize_entry("duration_ms", &duration_ms)?;
        }

        map.end()
    }
}
