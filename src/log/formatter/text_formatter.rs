use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::log::formatter::LogFormatter;
use crate::log::record::{LogLevel, LogRecord};

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 是否启用颜色输出
    #[default = false]
    pub colored: bool,
}

/// 文本格式化器
///
/// 输出格式：`[时间戳] [线程ID] 级别 [文件:行号] 消息 | key=value ...`
pub struct TextFormatter {
    config: TextFormatterConfig,
}

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        Self { config }
    }

    fn push_dimmed(&self, result: &mut String, content: &str) {
        result.push('[');
        if self.config.colored {
            result.push_str("\x1b[2m");
        }
        result.push_str(content);
        if self.config.colored {
            result.push_str("\x1b[0m");
        }
        result.push_str("] ");
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        use std::fmt::Write;

        let metadata_len: usize = record
            .metadata
            .iter()
            .map(|(k, v)| k.len() + v.to_string().len() + 2)
            .sum();
        let mut result =
            String::with_capacity(64 + record.message.len() + record.thread_id.len() + metadata_len);

        // 时间戳固定为 UTC ISO-8601 毫秒精度
        let timestamp: DateTime<Utc> = record.timestamp.into();
        self.push_dimmed(
            &mut result,
            &timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        );

        self.push_dimmed(&mut result, &record.thread_id);

        if self.config.colored {
            write!(result, "{} ", colored_level(record.level)).unwrap();
        } else {
            write!(result, "{:<5} ", record.level).unwrap();
        }

        if let (Some(file), Some(line)) = (&record.file, record.line) {
            self.push_dimmed(&mut result, &format!("{}:{}", file, line));
        }

        if self.config.colored {
            result.push_str("\x1b[97m");
        }
        result.push_str(&record.message);
        if self.config.colored {
            result.push_str("\x1b[0m");
        }

        if !record.metadata.is_empty() {
            result.push_str(" |");
            for (key, value) in &record.metadata {
                result.push(' ');
                if self.config.colored {
                    result.push_str("\x1b[36m");
                }
                result.push_str(key);
                if self.config.colored {
                    result.push_str("\x1b[0m");
                }
                result.push('=');
                result.push_str(&value.to_string());
            }
        }

        Ok(result)
    }
}

/// 带颜色的级别字符串（静态字面量，避免运行时开销）
fn colored_level(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "\u{1b}[31mERROR\u{1b}[0m",
        LogLevel::Warn => "\u{1b}[33mWARN \u{1b}[0m",
        LogLevel::Info => "\u{1b}[32mINFO \u{1b}[0m",
        LogLevel::Debug => "\u{1b}[36mDEBUG\u{1b}[0m",
        LogLevel::Trace => "\u{1b}[37;2mTRACE\u{1b}[0m",
    }
}

crate::impl_from!(TextFormatterConfig => TextFormatter);
crate::impl_box_from!(TextFormatter => dyn LogFormatter);
