//! cfg 模块 - 声明式组件构造
//!
//! 通过 `TypeOptions`（类型名 + 选项）描述组件，由注册表按名称构造
//! trait 对象。日志模块的 formatter / appender / filter 都经由这里创建。

pub mod macros;
pub mod registry;
pub mod type_options;

// 重新导出公共 API
pub use registry::{create_trait_from_type_options, register_trait};
pub use type_options::TypeOptions;
