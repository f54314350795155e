//! 错误收集工具模块
//!
//! 提供一个结构化的错误存储：错误以 JSON 树的形式组织，叶子是消息数组，
//! 中间节点按字段分组。合并规则保证已有的子树信息不会被标量消息覆盖，
//! 归属不明的消息统一落入 `_schema` 桶。
//!
//! 典型用途是表单/模型校验：多个校验步骤各自产出错误，最终合并为一棵
//! 可以直接序列化返回的错误树。

use serde_json::{Map, Value};

use crate::strings::is_blank;

/// 自身错误（无法归属到具体字段的消息）使用的键
const SELF_ERRORS_KEY: &str = "_schema";

/// 将错误合并进错误树
///
/// `error` 支持三种形态：
///
/// - 字符串：追加到 `_schema` 数组；
/// - 数组：逐条追加到 `_schema` 数组；
/// - 对象：按键递归合并。某个键下已有消息数组、又来了一个子对象时，
///   旧数组整体移入该子树的 `_schema` 桶再继续合并，反之亦然。
///
/// 空白消息（Null、空串、纯空白）被忽略。非字符串标量按其 JSON 文本处理。
///
/// # 示例
///
/// ```
/// use serde_json::{json, Map};
/// use utilx::errors::add_error_to;
///
/// let mut store = Map::new();
/// add_error_to(&mut store, json!({"person": {"email": "is not an email"}}));
/// add_error_to(&mut store, json!({"person": {"email": "is from illegal domain"}}));
///
/// assert_eq!(
///     serde_json::Value::Object(store),
///     json!({"person": {"email": ["is not an email", "is from illegal domain"]}})
/// );
/// ```
pub fn add_error_to(dest: &mut Map<String, Value>, error: Value) {
    let data = normalize(error);

    match data {
        Value::Null => {}
        Value::String(message) => {
            if !is_blank(&message) {
                push_self_error(dest, Value::String(message));
            }
        }
        Value::Array(messages) => {
            for message in messages {
                push_self_error(dest, message);
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                if is_blank_value(&value) {
                    continue;
                }
                merge_under_key(dest, key, value);
            }
        }
        other => push_self_error(dest, Value::String(other.to_string())),
    }
}

/// 将一个值合并到 `dest[key]` 下
fn merge_under_key(dest: &mut Map<String, Value>, key: String, value: Value) {
    // 先按现有节点的形态分派，再重新借用，避免同时持有两处可变借用
    enum Slot {
        Missing,
        Leaf,
        Branch,
        Scalar,
    }

    let slot = match dest.get(&key) {
        None => Slot::Missing,
        Some(Value::Array(_)) => Slot::Leaf,
        Some(Value::Object(_)) => Slot::Branch,
        Some(_) => Slot::Scalar,
    };

    match slot {
        Slot::Missing => {
            let entry = match value {
                Value::String(s) => Value::Array(vec![Value::String(s)]),
                Value::Array(items) => Value::Array(items),
                Value::Object(map) => {
                    let mut child = Map::new();
                    add_error_to(&mut child, Value::Object(map));
                    Value::Object(child)
                }
                other => Value::Array(vec![Value::String(other.to_string())]),
            };
            dest.insert(key, entry);
        }

        Slot::Leaf => {
            if let Value::Object(map) = value {
                // 已有的消息数组移入子树的 _schema 桶，避免丢失
                let existing = match dest.remove(&key) {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                let mut child = Map::new();
                child.insert(SELF_ERRORS_KEY.to_string(), Value::Array(existing));
                add_error_to(&mut child, Value::Object(map));
                dest.insert(key, Value::Object(child));
            } else if let Some(Value::Array(existing)) = dest.get_mut(&key) {
                match value {
                    Value::String(s) => existing.push(Value::String(s)),
                    Value::Array(mut items) => existing.append(&mut items),
                    other => existing.push(Value::String(other.to_string())),
                }
            }
        }

        Slot::Branch => {
            if let Some(Value::Object(child)) = dest.get_mut(&key) {
                match value {
                    Value::Object(map) => add_error_to(child, Value::Object(map)),
                    other => push_self_error(child, other),
                }
            }
        }

        Slot::Scalar => {
            // 树中出现了标量节点（外部构造的存储），整体转为数组再合并
            let previous = dest.remove(&key).unwrap_or(Value::Null);
            dest.insert(key.clone(), Value::Array(vec![previous]));
            merge_under_key(dest, key, value);
        }
    }
}

fn push_self_error(dest: &mut Map<String, Value>, message: Value) {
    let message = match message {
        Value::String(s) => {
            if is_blank(&s) {
                return;
            }
            Value::String(s)
        }
        other => Value::String(other.to_string()),
    };

    match dest.get_mut(SELF_ERRORS_KEY) {
        Some(Value::Array(items)) => items.push(message),
        _ => {
            dest.insert(SELF_ERRORS_KEY.to_string(), Value::Array(vec![message]));
        }
    }
}

/// 归一化错误数据：标量转为字符串，数组和对象递归处理
fn normalize(error: Value) -> Value {
    match error {
        Value::Null => Value::Null,
        Value::String(s) => Value::String(s),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, normalize(v))).collect())
        }
        other => Value::String(other.to_string()),
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_blank(s),
        _ => false,
    }
}

/// 错误存储
///
/// `add_error_to` 的便捷封装，可以直接收集 `Result` 的错误。
#[derive(Debug, Clone, Default)]
pub struct ErrorStore {
    root: Map<String, Value>,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否没有收集到任何错误
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// 合并一个错误
    pub fn add(&mut self, error: impl Into<Value>) {
        add_error_to(&mut self.root, error.into());
    }

    /// 将错误合并到指定子键下
    pub fn add_under(&mut self, subkey: &str, error: impl Into<Value>) {
        let mut wrapper = Map::new();
        wrapper.insert(subkey.to_string(), error.into());
        add_error_to(&mut self.root, Value::Object(wrapper));
    }

    /// 收集 Result 的错误，返回成功值
    ///
    /// `Err` 的 Display 文本进入 `_schema` 桶，随后返回 None。
    pub fn add_result<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add(err.to_string());
                None
            }
        }
    }

    /// 以 JSON 值的形式导出错误树
    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}
