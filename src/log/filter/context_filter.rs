use std::cell::RefCell;

use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::log::filter::LogFilter;
use crate::log::record::{LogRecord, MetadataValue};
use crate::strings::is_blank;

thread_local! {
    // 线程本地的日志上下文，保持插入顺序
    static LOGGING_CONTEXT: RefCell<Vec<(String, String)>> = const { RefCell::new(Vec::new()) };
}

/// ContextFilter 配置（保留扩展性）
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ContextFilterConfig {}

/// 动态上下文过滤器
///
/// 把线程本地的键值上下文附加到流经的每条日志记录的元数据上。
/// 典型用法是在处理一次请求（或任何多步骤流程）开始时写入
/// `request_id`，该线程随后产生的所有日志都自动带上这个标记，
/// 流程结束时清空。
///
/// 上下文存储在线程本地，不同线程互不可见；空白值的键不会被渲染。
///
/// # 示例
///
/// ```
/// use utilx::log::ContextFilter;
///
/// ContextFilter::put("request_id", "f67d41a0");
/// // ... 此线程随后的日志都带有 request_id=f67d41a0 ...
/// ContextFilter::clear();
/// ```
pub struct ContextFilter {
    _config: ContextFilterConfig,
}

impl ContextFilter {
    pub fn new(config: ContextFilterConfig) -> Self {
        Self { _config: config }
    }

    /// 写入上下文键值，已存在的键被覆盖
    pub fn put(key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        LOGGING_CONTEXT.with(|context| {
            let mut context = context.borrow_mut();
            match context.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => context.push((key, value)),
            }
        });
    }

    /// 删除指定键
    pub fn remove(key: &str) {
        LOGGING_CONTEXT.with(|context| {
            context.borrow_mut().retain(|(k, _)| k != key);
        });
    }

    /// 清空当前线程的上下文
    pub fn clear() {
        LOGGING_CONTEXT.with(|context| {
            context.borrow_mut().clear();
        });
    }

    /// 当前线程上下文的快照
    pub fn snapshot() -> Vec<(String, String)> {
        LOGGING_CONTEXT.with(|context| context.borrow().clone())
    }
}

impl LogFilter for ContextFilter {
    fn filter(&self, record: &mut LogRecord) -> Result<bool> {
        for (key, value) in Self::snapshot() {
            if is_blank(&value) {
                continue;
            }
            record
                .metadata
                .push((key, MetadataValue::String(value)));
        }
        Ok(true)
    }
}

crate::impl_from!(ContextFilterConfig => ContextFilter);
crate::impl_box_from!(ContextFilter => dyn LogFilter);
