use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};

use crate::log::appender::LogAppender;

/// 输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleAppender 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    /// 输出到 stdout 还是 stderr
    pub target: Target,
    /// 每条日志后立即 flush
    #[default = true]
    pub auto_flush: bool,
}

/// 终端输出器
pub struct ConsoleAppender {
    config: ConsoleAppenderConfig,
}

impl ConsoleAppender {
    pub fn new(config: ConsoleAppenderConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl LogAppender for ConsoleAppender {
    async fn append(&self, formatted_message: &str) -> Result<()> {
        match self.config.target {
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", formatted_message)?;
                if self.config.auto_flush {
                    stdout.flush()?;
                }
            }
            Target::Stderr => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{}", formatted_message)?;
                if self.config.auto_flush {
                    stderr.flush()?;
                }
            }
        }
        Ok(())
    }
}

crate::impl_from!(ConsoleAppenderConfig => ConsoleAppender);
crate::impl_box_from!(ConsoleAppender => dyn LogAppender);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_appender_append() {
        let appender = ConsoleAppender::new(ConsoleAppenderConfig::default());
        assert!(appender.append("Test message").await.is_ok());
    }

    #[tokio::test]
    async fn test_console_appender_stderr() {
        let config: ConsoleAppenderConfig =
            json5::from_str(r#"{ target: "stderr", auto_flush: false }"#).unwrap();
        assert_eq!(config.target, Target::Stderr);

        let appender = ConsoleAppender::new(config);
        assert!(appender.append("Test message").await.is_ok());
        assert!(appender.flush().await.is_ok());
    }

    #[test]
    fn test_console_appender_config_default() {
        let config = ConsoleAppenderConfig::default();
        assert_eq!(config.target, Target::Stdout);
        assert!(config.auto_flush);
    }
}
