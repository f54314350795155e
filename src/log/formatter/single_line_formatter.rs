use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::cfg::TypeOptions;
use crate::log::formatter::LogFormatter;
use crate::log::record::LogRecord;

/// SingleLineFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct SingleLineFormatterConfig {
    /// 内部格式化器配置，输出经它格式化后再做换行转义
    #[default(TypeOptions { type_name: "TextFormatter".to_string(), options: serde_json::Value::Null })]
    pub inner: TypeOptions,
}

/// 单行格式化器
///
/// 包装任意内部格式化器，把输出中的换行转义为 `\n` 字面量，
/// 强制每条记录占据一行。多行的 SQL 美化输出经过它之后
/// 可以安全写入按行切分的日志采集管道。
pub struct SingleLineFormatter {
    inner: Box<dyn LogFormatter>,
}

impl SingleLineFormatter {
    pub fn new(config: SingleLineFormatterConfig) -> Result<Self> {
        let inner = crate::log::formatter::create_formatter_from_options(&config.inner)?;
        Ok(Self { inner })
    }
}

impl LogFormatter for SingleLineFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        Ok(self.inner.format(record)?.replace('\n', "\\n"))
    }
}

crate::impl_from!(SingleLineFormatterConfig => SingleLineFormatter, expect: "invalid SingleLineFormatter config");
crate::impl_box_from!(SingleLineFormatter => dyn LogFormatter);
