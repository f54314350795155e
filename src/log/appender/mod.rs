mod console_appender;
mod file_appender;
mod null_appender;
mod registry;
mod trait_;

pub use console_appender::{ConsoleAppender, ConsoleAppenderConfig, Target};
pub use file_appender::{FileAppender, FileAppenderConfig};
pub use null_appender::{NullAppender, NullAppenderConfig};
pub use registry::{create_appender_from_options, register_appenders};
pub use trait_::LogAppender;
