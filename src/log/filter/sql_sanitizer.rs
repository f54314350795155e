use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use thiserror::Error;

use crate::log::filter::LogFilter;
use crate::log::record::{LogRecord, MetadataValue};
use crate::log::sql::{self, SqlParams};

/// 截断标记，追加在被截断消息的末尾
pub const TRUNCATION_MARKER: &str = "...";

/// 参数注释区超过该长度（字符数）时收缩为首尾各 100 个字符
const PARAMS_NOTE_LIMIT: usize = 202;

/// SqlSanitizer 配置
///
/// 配置在构造后不可变，过滤器自身不持有任何可变状态，
/// 可以被多个线程并发调用。
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct SqlSanitizerConfig {
    /// 输出消息的最大长度，按 Unicode 标量值计数。
    ///
    /// 超长消息被截断为前缀加截断标记，总长度恰好等于该值。
    /// 默认 2048，低于常见 syslog UDP 报文上限（rsyslog 默认 2048 字节），
    /// 超长消息在这类传输上会被丢弃或拦腰截断。
    #[default = 2048]
    pub max_message_length: usize,

    /// 是否把语句美化为多行（关键字大写 + 按子句换行）。
    /// 关闭时语句仍会被归一为单行。
    #[default = false]
    pub pretty_print: bool,

    /// 是否把绑定参数按字面量合并进语句。
    ///
    /// 合并失败（参数不可渲染、个数不匹配等）时降级为在语句后
    /// 追加一段参数注释，而不是报错。
    #[default = true]
    pub include_parameters: bool,

    /// 是否为 SQL 关键字着色。只适合终端查看，不要用于 syslog。
    /// 消息发生截断时跳过着色，长度不变式只对可见文本成立。
    #[default = false]
    pub colored: bool,
}

/// SqlSanitizer 的配置错误
#[derive(Debug, Error)]
pub enum SqlSanitizerError {
    #[error(
        "max_message_length must be greater than the truncation marker length {marker_len}, got {given}"
    )]
    MaxLengthTooSmall { given: usize, marker_len: usize },
}

/// SQL 日志净化过滤器
///
/// 对携带数据库语句的日志记录做三步处理：
///
/// 1. 语句格式化（可选多行美化）；
/// 2. 绑定参数合并，无法合并时降级为追加参数注释；
/// 3. 按 `max_message_length` 截断，保证下游传输不会收到超长消息。
///
/// 渲染过程中的任何问题都降级为更朴素的输出，过滤器永远不会
/// 因为格式化失败而丢弃记录或向调用方返回错误。对同一条记录
/// 重复应用得到相同的结果。
pub struct SqlSanitizer {
    config: SqlSanitizerConfig,
}

impl SqlSanitizer {
    /// 创建过滤器，配置非法时立即报错
    pub fn new(config: SqlSanitizerConfig) -> Result<Self, SqlSanitizerError> {
        let marker_len = TRUNCATION_MARKER.chars().count();
        if config.max_message_length <= marker_len {
            return Err(SqlSanitizerError::MaxLengthTooSmall {
                given: config.max_message_length,
                marker_len,
            });
        }
        Ok(Self { config })
    }

    /// 渲染语句文本：参数合并 + 格式化，失败逐级降级
    fn render_statement(&self, statement: &str, parameters: Option<&SqlParams>) -> String {
        if self.config.include_parameters {
            if let Some(params) = parameters {
                if let Some(merged) = sql::merge_parameters(statement, params) {
                    return sql::format_statement(&merged, self.config.pretty_print);
                }
            }
        }

        let mut rendered = sql::format_statement(statement, self.config.pretty_print);

        // 合并不了（或未启用合并）的参数以注释形式跟在语句后面
        if let Some(params) = parameters {
            if !params.is_empty() {
                let mut note = params.to_note_value().to_string();
                if note.chars().count() > PARAMS_NOTE_LIMIT {
                    note = shorten_note(&note);
                }
                rendered = format!("{}; with params: {}", rendered, note);
            }
        }

        rendered
    }

    /// 截断消息到 max_message_length，被截断的消息以标记结尾
    fn truncate(&self, message: String) -> String {
        let max = self.config.max_message_length;
        let length = message.chars().count();
        if length <= max {
            return message;
        }

        let keep = max - TRUNCATION_MARKER.chars().count();
        let cut: usize = message
            .char_indices()
            .nth(keep)
            .map(|(idx, _)| idx)
            .unwrap_or(message.len());

        let mut truncated = message;
        truncated.truncate(cut);
        truncated.push_str(TRUNCATION_MARKER);
        truncated
    }
}

/// 收缩参数注释：保留首尾各 100 个字符
///
/// 截断优先牺牲参数内容而不是语句内容，语句截断由整体长度控制兜底。
fn shorten_note(note: &str) -> String {
    let head: String = note.chars().take(100).collect();
    let tail_start = note.chars().count() - 100;
    let tail: String = note.chars().skip(tail_start).collect();
    format!("{} ... {}", head, tail)
}

impl LogFilter for SqlSanitizer {
    fn filter(&self, record: &mut LogRecord) -> Result<bool> {
        let rendered = match &record.statement {
            Some(statement) => {
                // 执行耗时渲染为固定格式的元数据，缺失时用占位符。
                // 重复应用时不再追加，保证净化是幂等的。
                if !record.metadata.iter().any(|(k, _)| k == "sql_duration") {
                    let duration = match record.duration_ms {
                        Some(ms) => format!("{:.2} ms", ms),
                        None => "_.___ ms".to_string(),
                    };
                    record
                        .metadata
                        .push(("sql_duration".to_string(), MetadataValue::String(duration)));
                }

                self.render_statement(statement, record.parameters.as_ref())
            }
            None => std::mem::take(&mut record.message),
        };

        let length = rendered.chars().count();
        record.message = if length > self.config.max_message_length {
            self.truncate(rendered)
        } else if self.config.colored && record.statement.is_some() {
            sql::colorize_statement(&rendered)
        } else {
            rendered
        };

        Ok(true)
    }
}

crate::impl_from!(SqlSanitizerConfig => SqlSanitizer, expect: "invalid SqlSanitizer config");
crate::impl_box_from!(SqlSanitizer => dyn LogFilter);
