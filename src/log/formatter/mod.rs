mod core;
mod json_formatter;
mod registry;
mod single_line_formatter;
mod text_formatter;

pub use self::core::LogFormatter;
pub use json_formatter::{JsonFormatter, JsonFormatterConfig};
pub use registry::{create_formatter_from_options, register_formatters};
pub use single_line_formatter::{SingleLineFormatter, SingleLineFormatterConfig};
pub use text_formatter::{TextFormatter, TextFormatterConfig};
