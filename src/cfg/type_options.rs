// TypeOptions 序列化相关实现

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 类型选项结构
///
/// 描述"创建哪种类型、用什么选项"，是所有可插拔组件的配置形态：
///
/// ```json5
/// {
///     type: "TextFormatter",
///     options: { colored: false }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeOptions {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub options: JsonValue,
}

impl TypeOptions {
    /// 从 JSON 字符串创建（支持 JSON5：注释、尾随逗号、未引用的键）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// 导出为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 导出为 YAML 字符串
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// 导出为 TOML 字符串
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json5_with_comments() -> Result<()> {
        let opts = TypeOptions::from_json(
            r#"
            {
                // 注释和尾随逗号都是合法的
                type: "TextFormatter",
                options: {
                    colored: true,
                },
            }
            "#,
        )?;

        assert_eq!(opts.type_name, "TextFormatter");
        assert_eq!(opts.options, json!({"colored": true}));
        Ok(())
    }

    #[test]
    fn test_from_json_missing_options_defaults_to_null() -> Result<()> {
        let opts = TypeOptions::from_json(r#"{ type: "NullAppender" }"#)?;
        assert_eq!(opts.type_name, "NullAppender");
        assert_eq!(opts.options, JsonValue::Null);
        Ok(())
    }

    #[test]
    fn test_from_yaml() -> Result<()> {
        let opts = TypeOptions::from_yaml(
            r#"
type: FileAppender
options:
  file_path: /tmp/app.log
"#,
        )?;

        assert_eq!(opts.type_name, "FileAppender");
        assert_eq!(opts.options["file_path"], "/tmp/app.log");
        Ok(())
    }

    #[test]
    fn test_from_toml() -> Result<()> {
        let opts = TypeOptions::from_toml(
            r#"
type = "ConsoleAppender"

[options]
target = "stderr"
"#,
        )?;

        assert_eq!(opts.type_name, "ConsoleAppender");
        assert_eq!(opts.options["target"], "stderr");
        Ok(())
    }

    #[test]
    fn test_json_roundtrip() -> Result<()> {
        let opts = TypeOptions {
            type_name: "SqlSanitizer".to_string(),
            options: json!({"max_message_length": 128, "pretty_print": true}),
        };

        let parsed = TypeOptions::from_json(&opts.to_json()?)?;
        assert_eq!(parsed, opts);
        Ok(())
    }
}
