use anyhow::Result;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::log::filter::LogFilter;
use crate::log::record::{LogRecord, MetadataValue};

/// HostMetadataFilter 配置（保留扩展性）
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct HostMetadataFilterConfig {}

/// 主机元数据过滤器
///
/// 为每条日志记录附加三个元数据字段：
///
/// - `hostname`：主机名（取不到时为 `-`）
/// - `isotime`：记录时间戳的本地时区 ISO-8601 表示
/// - `isotime_utc`：同一时刻的 UTC 表示
pub struct HostMetadataFilter {
    hostname: String,
    _config: HostMetadataFilterConfig,
}

impl HostMetadataFilter {
    pub fn new(config: HostMetadataFilterConfig) -> Self {
        let hostname = std::env::var("HOSTNAME")
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "-".to_string());

        Self {
            hostname,
            _config: config,
        }
    }
}

impl LogFilter for HostMetadataFilter {
    fn filter(&self, record: &mut LogRecord) -> Result<bool> {
        let local: DateTime<Local> = record.timestamp.into();
        let utc: DateTime<Utc> = record.timestamp.into();

        record.metadata.push((
            "hostname".to_string(),
            MetadataValue::String(self.hostname.clone()),
        ));
        record.metadata.push((
            "isotime".to_string(),
            MetadataValue::String(local.to_rfc3339_opts(SecondsFormat::Micros, false)),
        ));
        record.metadata.push((
            "isotime_utc".to_string(),
            MetadataValue::String(utc.to_rfc3339_opts(SecondsFormat::Micros, true)),
        ));

        Ok(true)
    }
}

crate::impl_from!(HostMetadataFilterConfig => HostMetadataFilter);
crate::impl_box_from!(HostMetadataFilter => dyn LogFilter);
