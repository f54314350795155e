//! SQL 语句展示工具
//!
//! 为日志输出准备 SQL 语句：空白归一、关键字大写、按子句换行、
//! 绑定参数按字面量合并。这里做的全部是展示层面的改写，不解析语法，
//! 也不改变语句语义。
//!
//! 具体的改写规则是固定的外观约定：
//!
//! - 关键字判定按整个 token 精确匹配（大小写不敏感）；
//! - 多行模式在主要子句（SELECT / FROM / WHERE / ...）前换行，
//!   AND / OR 换行并缩进两格；
//! - 单行模式把所有空白压成单个空格；
//! - 参数占位符支持 `?`、`$1`、`%s`、`:name`、`%(name)s` 五种形态，
//!   引号内的内容不参与识别。

use serde_json::Value;

/// 驱动无关的绑定参数值
///
/// 区分"能渲染为字面量"和"不能渲染"两类：二进制等不可渲染的值
/// 用 [`SqlValue::Opaque`] 表示，合并时会触发降级路径。
#[derive(Debug, Clone)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// 任意 JSON 值（jsonb 参数等）
    Json(Value),
    /// 无法渲染为文本的值（二进制、驱动内部对象）
    Opaque {
        /// 展示用的类型说明，如 "bytea"
        type_name: String,
    },
}

impl SqlValue {
    pub fn opaque(type_name: impl Into<String>) -> Self {
        SqlValue::Opaque {
            type_name: type_name.into(),
        }
    }

    /// 能力检查：该值能否渲染为 SQL 字面量
    ///
    /// 返回 None 表示不能安全渲染，调用方应走降级路径。
    pub fn as_literal(&self) -> Option<String> {
        match self {
            SqlValue::Null => Some("NULL".to_string()),
            SqlValue::Bool(true) => Some("TRUE".to_string()),
            SqlValue::Bool(false) => Some("FALSE".to_string()),
            SqlValue::Int(n) => Some(n.to_string()),
            SqlValue::Float(x) => Some(x.to_string()),
            SqlValue::Text(s) => Some(quote_text(s)),
            SqlValue::Json(v) => Some(quote_text(&v.to_string())),
            SqlValue::Opaque { .. } => None,
        }
    }

    /// 参数注释区展示用的 JSON 形态
    fn to_note_value(&self) -> Value {
        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Bool(b) => Value::Bool(*b),
            SqlValue::Int(n) => Value::from(*n),
            SqlValue::Float(x) => Value::from(*x),
            SqlValue::Text(s) => Value::String(s.clone()),
            SqlValue::Json(v) => v.clone(),
            SqlValue::Opaque { type_name } => Value::String(format!("<{}>", type_name)),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Int(n)
    }
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        SqlValue::Int(n as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(x: f64) -> Self {
        SqlValue::Float(x)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

/// 绑定参数集合
#[derive(Debug, Clone)]
pub enum SqlParams {
    /// 位置参数（`?`、`$1`、`%s`）
    Positional(Vec<SqlValue>),
    /// 命名参数（`:name`、`%(name)s`）
    Named(Vec<(String, SqlValue)>),
}

impl SqlParams {
    pub fn positional(values: Vec<SqlValue>) -> Self {
        SqlParams::Positional(values)
    }

    pub fn named<K: Into<String>>(pairs: Vec<(K, SqlValue)>) -> Self {
        SqlParams::Named(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SqlParams::Positional(values) => values.is_empty(),
            SqlParams::Named(pairs) => pairs.is_empty(),
        }
    }

    /// 参数注释区展示用的 JSON 形态：位置参数转数组，命名参数转对象
    pub fn to_note_value(&self) -> Value {
        match self {
            SqlParams::Positional(values) => {
                Value::Array(values.iter().map(SqlValue::to_note_value).collect())
            }
            SqlParams::Named(pairs) => Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_note_value()))
                    .collect(),
            ),
        }
    }

    fn lookup(&self, name: &str) -> Option<&SqlValue> {
        match self {
            SqlParams::Positional(_) => None,
            SqlParams::Named(pairs) => pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
        }
    }
}

/// SQL 单引号字符串字面量：内部的单引号按双写转义
fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// 将绑定参数按字面量合并进语句
///
/// 尽力而为：任何一个占位符无法解析（参数个数不匹配、命名参数缺失、
/// 值不可渲染、占位符风格与参数形态不符）都返回 None，由调用方降级为
/// "语句 + 参数注释"的形式。引号内的内容不会被当作占位符。
pub fn merge_parameters(statement: &str, params: &SqlParams) -> Option<String> {
    let mut out = String::with_capacity(statement.len() + 16);
    let chars: Vec<char> = statement.chars().collect();

    let mut i = 0;
    let mut seq_next = 0usize; // 顺序占位符（? / %s）已消费个数
    let mut max_index = 0usize; // $n 形式出现过的最大下标
    let mut named_seen = false;
    let mut placeholder_seen = false;

    let positional = |idx: usize| -> Option<String> {
        match params {
            SqlParams::Positional(values) => values.get(idx)?.as_literal(),
            SqlParams::Named(_) => None,
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            // 单引号字符串整体拷贝，'' 转义一起处理
            '\'' => {
                out.push(ch);
                i += 1;
                while i < chars.len() {
                    out.push(chars[i]);
                    if chars[i] == '\'' {
                        if chars.get(i + 1) == Some(&'\'') {
                            out.push('\'');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }

            // 双引号标识符整体拷贝
            '"' => {
                out.push(ch);
                i += 1;
                while i < chars.len() {
                    out.push(chars[i]);
                    if chars[i] == '"' {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }

            '?' => {
                placeholder_seen = true;
                out.push_str(&positional(seq_next)?);
                seq_next += 1;
                i += 1;
            }

            '$' => {
                let mut j = i + 1;
                let mut digits = String::new();
                while j < chars.len() && chars[j].is_ascii_digit() {
                    digits.push(chars[j]);
                    j += 1;
                }
                if digits.is_empty() {
                    out.push(ch);
                    i += 1;
                } else {
                    placeholder_seen = true;
                    let index: usize = digits.parse().ok()?;
                    if index == 0 {
                        return None;
                    }
                    out.push_str(&positional(index - 1)?);
                    max_index = max_index.max(index);
                    i = j;
                }
            }

            '%' => match chars.get(i + 1) {
                // %% 是字面量百分号
                Some('%') => {
                    out.push('%');
                    i += 2;
                }
                Some('s') => {
                    placeholder_seen = true;
                    out.push_str(&positional(seq_next)?);
                    seq_next += 1;
                    i += 2;
                }
                Some('(') => {
                    let mut j = i + 2;
                    let mut name = String::new();
                    while j < chars.len() && chars[j] != ')' {
                        name.push(chars[j]);
                        j += 1;
                    }
                    // 必须是完整的 %(name)s 形态
                    if chars.get(j) != Some(&')') || chars.get(j + 1) != Some(&'s') {
                        return None;
                    }
                    placeholder_seen = true;
                    named_seen = true;
                    out.push_str(&params.lookup(&name)?.as_literal()?);
                    i = j + 2;
                }
                _ => {
                    out.push(ch);
                    i += 1;
                }
            },

            ':' => {
                // :: 是类型转换，不是占位符
                if chars.get(i + 1) == Some(&':') {
                    out.push_str("::");
                    i += 2;
                } else if chars
                    .get(i + 1)
                    .map(|c| c.is_ascii_alphabetic() || *c == '_')
                    .unwrap_or(false)
                {
                    let mut j = i + 1;
                    let mut name = String::new();
                    while j < chars.len()
                        && (chars[j].is_ascii_alphanumeric() || chars[j] == '_')
                    {
                        name.push(chars[j]);
                        j += 1;
                    }
                    placeholder_seen = true;
                    named_seen = true;
                    out.push_str(&params.lookup(&name)?.as_literal()?);
                    i = j;
                } else {
                    out.push(ch);
                    i += 1;
                }
            }

            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }

    // 合并后校验参数覆盖情况
    match params {
        SqlParams::Positional(values) => {
            if values.is_empty() {
                return if placeholder_seen { None } else { Some(out) };
            }
            if named_seen {
                return None;
            }
            // 顺序风格要求个数精确匹配，下标风格要求最大下标触到参数末尾
            let covered = (seq_next == values.len() && max_index == 0)
                || (seq_next == 0 && max_index == values.len());
            if covered {
                Some(out)
            } else {
                None
            }
        }
        SqlParams::Named(pairs) => {
            if pairs.is_empty() {
                return if placeholder_seen { None } else { Some(out) };
            }
            // 命名参数允许有多余的键，但至少要有一个被用到
            if named_seen {
                Some(out)
            } else {
                None
            }
        }
    }
}

/// 展示用关键字表（精确匹配整个 token，大小写不敏感）
const KEYWORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "AS", "ASC", "BEGIN", "BETWEEN", "BY", "CASE", "COMMIT", "CONFLICT",
    "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DO", "DROP", "ELSE", "END",
    "EXISTS", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT",
    "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NOTHING", "NULL", "OFFSET",
    "ON", "OR", "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RELEASE", "RETURNING", "RIGHT",
    "ROLLBACK", "SAVEPOINT", "SELECT", "SET", "TABLE", "THEN", "UNION", "UPDATE", "VALUES",
    "WHEN", "WHERE",
];

/// 新行起始的单词子句
const CLAUSE_STARTERS: &[&str] = &[
    "FROM", "WHERE", "HAVING", "LIMIT", "OFFSET", "SET", "VALUES", "RETURNING", "UNION",
];

/// JOIN 的前置修饰词
const JOIN_MODIFIERS: &[&str] = &["LEFT", "RIGHT", "INNER", "FULL", "CROSS"];

fn is_keyword(token: &str) -> bool {
    KEYWORDS
        .iter()
        .any(|kw| token.eq_ignore_ascii_case(kw))
}

enum Token {
    Word(String),
    Quoted(String),
}

/// 按空白切分，引号内的内容（含空白）保持为单个 token
fn tokenize(sql: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut quote_char = '\'';

    let chars: Vec<char> = sql.chars().collect();
    let mut i = 0;
    let mut current_is_quoted = false;

    while i < chars.len() {
        let ch = chars[i];
        if quoted {
            current.push(ch);
            if ch == quote_char {
                if quote_char == '\'' && chars.get(i + 1) == Some(&'\'') {
                    current.push('\'');
                    i += 2;
                    continue;
                }
                quoted = false;
            }
            i += 1;
        } else if ch == '\'' || ch == '"' {
            quoted = true;
            quote_char = ch;
            current_is_quoted = true;
            current.push(ch);
            i += 1;
        } else if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(if current_is_quoted {
                    Token::Quoted(std::mem::take(&mut current))
                } else {
                    Token::Word(std::mem::take(&mut current))
                });
                current_is_quoted = false;
            }
            i += 1;
        } else {
            current.push(ch);
            i += 1;
        }
    }
    if !current.is_empty() {
        tokens.push(if current_is_quoted {
            Token::Quoted(current)
        } else {
            Token::Word(current)
        });
    }

    tokens
}

/// 格式化语句文本
///
/// `pretty` 为 false 时输出单行（空白归一 + 关键字大写），
/// 为 true 时按子句换行、AND / OR 缩进。
pub fn format_statement(sql: &str, pretty: bool) -> String {
    let words: Vec<String> = tokenize(sql)
        .into_iter()
        .map(|token| match token {
            Token::Word(w) if is_keyword(&w) => w.to_ascii_uppercase(),
            Token::Word(w) => w,
            Token::Quoted(q) => q,
        })
        .collect();

    if !pretty {
        return words.join(" ");
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, word) in words.iter().enumerate() {
        let break_before = if i == 0 {
            false
        } else if word == "AND" || word == "OR" {
            true
        } else if word == "SELECT" || CLAUSE_STARTERS.contains(&word.as_str()) {
            true
        } else if word == "JOIN" {
            // 带修饰词的 JOIN 在修饰词处换行
            let prev = &words[i - 1];
            !(JOIN_MODIFIERS.contains(&prev.as_str()) || prev == "OUTER")
        } else if JOIN_MODIFIERS.contains(&word.as_str()) {
            matches!(words.get(i + 1).map(String::as_str), Some("JOIN") | Some("OUTER"))
        } else if word == "GROUP" || word == "ORDER" {
            words.get(i + 1).map(String::as_str) == Some("BY")
        } else {
            false
        };

        if break_before && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            if word == "AND" || word == "OR" {
                current.push_str("  ");
            }
        }
        if !current.is_empty() && !current.ends_with("  ") {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// 为格式化后的语句着色（ANSI），只有关键字 token 被染色
pub fn colorize_statement(formatted: &str) -> String {
    use colored::Colorize;

    formatted
        .split('\n')
        .map(|line| {
            line.split(' ')
                .map(|word| {
                    if is_keyword(word) {
                        word.blue().bold().to_string()
                    } else {
                        word.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
