use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::log::appender::LogAppender;

/// NullAppender 配置（无选项）
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct NullAppenderConfig {}

/// 空输出器
///
/// 丢弃一切输出。配合 `log::silence` 用于静音某个过于啰嗦的 logger，
/// 或者在测试里吞掉日志。
pub struct NullAppender {}

impl NullAppender {
    pub fn new(_: NullAppenderConfig) -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl LogAppender for NullAppender {
    async fn append(&self, _formatted_message: &str) -> Result<()> {
        Ok(())
    }
}

crate::impl_from!(NullAppenderConfig => NullAppender);
crate::impl_box_from!(NullAppender => dyn LogAppender);
