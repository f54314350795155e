//! 操作系统工具模块

use std::path::PathBuf;

/// 查询当前用户的用户名
///
/// 依次读取 `USER` 和 `LOGNAME` 环境变量，都未设置时返回 None。
pub fn current_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .ok()
        .filter(|name| !name.is_empty())
}

/// 查询当前用户的 home 目录
pub fn current_user_home() -> Option<PathBuf> {
    dirs::home_dir()
}
