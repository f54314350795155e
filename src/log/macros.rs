//! 日志宏模块
//!
//! 提供自动捕获文件和行号信息的日志宏
//!
//! # 示例
//!
//! ```ignore
//! use utilx::{info, error};
//!
//! // 简单日志
//! info!(logger, "application started")?;
//!
//! // 带 metadata 的日志
//! info!(logger, "user logged in", "user_id" => 12345, "username" => "alice")?;
//! ```

/// 记录 TRACE 级别日志
#[macro_export]
macro_rules! trace {
    ($logger:expr, $msg:expr) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Trace, $msg.into())
                .with_location(file!().to_string(), line!())
        ).await
    };
    ($logger:expr, $msg:expr, $($key:expr => $value:expr),* $(,)?) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Trace, $msg.into())
                .with_location(file!().to_string(), line!())
                $(.with_metadata($key, $value))*
        ).await
    };
}

/// 记录 DEBUG 级别日志
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Debug, $msg.into())
                .with_location(file!().to_string(), line!())
        ).await
    };
    ($logger:expr, $msg:expr, $($key:expr => $value:expr),* $(,)?) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Debug, $msg.into())
                .with_location(file!().to_string(), line!())
                $(.with_metadata($key, $value))*
        ).await
    };
}

/// 记录 INFO 级别日志
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Info, $msg.into())
                .with_location(file!().to_string(), line!())
        ).await
    };
    ($logger:expr, $msg:expr, $($key:expr => $value:expr),* $(,)?) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Info, $msg.into())
                .with_location(file!().to_string(), line!())
                $(.with_metadata($key, $value))*
        ).await
    };
}

/// 记录 WARN 级别日志
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Warn, $msg.into())
                .with_location(file!().to_string(), line!())
        ).await
    };
    ($logger:expr, $msg:expr, $($key:expr => $value:expr),* $(,)?) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Warn, $msg.into())
                .with_location(file!().to_string(), line!())
                $(.with_metadata($key, $value))*
        ).await
    };
}

/// 记录 ERROR 级别日志
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Error, $msg.into())
                .with_location(file!().to_string(), line!())
        ).await
    };
    ($logger:expr, $msg:expr, $($key:expr => $value:expr),* $(,)?) => {
        $logger.log(
            $crate::log::LogRecord::new($crate::log::LogLevel::Error, $msg.into())
                .with_location(file!().to_string(), line!())
                $(.with_metadata($key, $value))*
        ).await
    };
}
