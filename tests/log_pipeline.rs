//! 日志流水线集成测试
//!
//! 从 JSON5 配置构建完整的 logger（过滤器 + 格式化器 + 输出器），
//! 写入临时文件后读回验证。

use anyhow::Result;
use tempfile::TempDir;

use utilx::log::{LogLevel, Logger, LoggerCreateConfig, SqlParams, SqlValue};

fn logger_writing_to(path: &std::path::Path, config_body: &str) -> Result<Logger> {
    let config_json = format!(
        r#"{{
            {},
            appender: {{
                type: "FileAppender",
                options: {{ file_path: "{}" }}
            }}
        }}"#,
        config_body,
        path.to_string_lossy()
    );

    let config: LoggerCreateConfig = json5::from_str(&config_json)?;
    Ok(Logger::new(config)?)
}

#[tokio::test]
async fn test_sql_record_through_full_pipeline() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");

    let logger = logger_writing_to(
        &path,
        r#"
        level: "debug",
        filters: [
            {
                type: "SqlSanitizer",
                options: {
                    max_message_length: 2048,
                    pretty_print: false,
                    include_parameters: true,
                }
            }
        ],
        formatter: { type: "TextFormatter", options: {} }
        "#,
    )?;

    logger
        .sql(
            LogLevel::Debug,
            "select name from users where id = $1 and active = $2",
            Some(SqlParams::positional(vec![
                SqlValue::Int(42),
                SqlValue::Bool(true),
            ])),
            Some(2.25),
        )
        .await?;

    let content = std::fs::read_to_string(&path)?;

    assert!(content.contains("SELECT name FROM users WHERE id = 42 AND active = TRUE"));
    assert!(content.contains("sql_duration=2.25 ms"));
    assert!(content.contains("DEBUG"));
    Ok(())
}

#[tokio::test]
async fn test_pretty_sql_flattened_by_single_line_formatter() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");

    let logger = logger_writing_to(
        &path,
        r#"
        level: "debug",
        filters: [
            { type: "SqlSanitizer", options: { pretty_print: true } }
        ],
        formatter: {
            type: "SingleLineFormatter",
            options: {
                inner: { type: "TextFormatter", options: {} }
            }
        }
        "#,
    )?;

    logger
        .sql(
            LogLevel::Debug,
            "select id from users where age > 21 and active = true",
            None,
            None,
        )
        .await?;

    let content = std::fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.lines().collect();

    // 多行的美化输出被压成单行，换行成为字面量
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("SELECT id\\nFROM users\\nWHERE age > 21\\n  AND active = true"));
    Ok(())
}

#[tokio::test]
async fn test_truncation_invariant_through_pipeline() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");

    let logger = logger_writing_to(
        &path,
        r#"
        level: "debug",
        filters: [
            { type: "SqlSanitizer", options: { max_message_length: 40 } }
        ],
        formatter: { type: "JsonFormatter", options: {} }
        "#,
    )?;

    let long_statement = format!(
        "select * from events where payload = '{}'",
        "x".repeat(500)
    );
    logger.sql(LogLevel::Debug, long_statement, None, None).await?;

    let content = std::fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(content.trim())?;
    let message = value["message"].as_str().unwrap();

    assert_eq!(message.chars().count(), 40);
    assert!(message.ends_with("..."));
    Ok(())
}

#[tokio::test]
async fn test_opaque_parameters_never_break_logging() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");

    let logger = logger_writing_to(
        &path,
        r#"
        level: "debug",
        filters: [
            { type: "SqlSanitizer", options: {} }
        ],
        formatter: { type: "TextFormatter", options: {} }
        "#,
    )?;

    logger
        .sql(
            LogLevel::Debug,
            "insert into blobs (data) values (?)",
            Some(SqlParams::positional(vec![SqlValue::opaque("bytea")])),
            None,
        )
        .await?;

    let content = std::fs::read_to_string(&path)?;

    // 不可渲染的参数走降级路径：语句原样 + 参数注释
    assert!(content.contains("INSERT INTO blobs (data) VALUES (?)"));
    assert!(content.contains("; with params: [\"<bytea>\"]"));
    Ok(())
}

#[tokio::test]
async fn test_plain_records_pass_through_sanitizer() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");

    let logger = logger_writing_to(
        &path,
        r#"
        level: "info",
        filters: [
            { type: "SqlSanitizer", options: {} }
        ],
        formatter: { type: "TextFormatter", options: {} }
        "#,
    )?;

    logger.info("plain application message").await?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains("plain application message"));
    assert!(!content.contains("sql_duration"));
    Ok(())
}
