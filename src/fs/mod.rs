//! 文件系统工具模块
//!
//! 提供文件校验和、路径处理、目录创建/删除等小工具。
//! 所有 `silent_` 前缀的函数按约定吞掉错误，适合清理类场景使用。

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sha2::Digest;

/// 计算文件的摘要（十六进制小写）
///
/// 摘要算法通过类型参数指定，任何实现 `sha2::Digest` 的算法都可以使用。
/// 路径不存在或不是普通文件时返回 `Ok(None)`。
///
/// # 示例
///
/// ```no_run
/// use sha2::Sha256;
/// use utilx::fs::file_checksum;
///
/// let digest = file_checksum::<Sha256>("/etc/hosts")?;
/// # anyhow::Ok(())
/// ```
pub fn file_checksum<D: Digest>(file_path: impl AsRef<Path>) -> io::Result<Option<String>> {
    let path = file_path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }

    let mut file = File::open(path)?;
    let mut hasher = D::new();
    let mut buffer = vec![0u8; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        write!(hex, "{:02x}", byte).unwrap();
    }
    Ok(Some(hex))
}

/// 相对路径挂载到指定目录下，绝对路径原样返回
///
/// # 示例
///
/// ```
/// use std::path::PathBuf;
/// use utilx::fs::abspath_if_relative;
///
/// assert_eq!(
///     abspath_if_relative("foo/bar", "/tmp"),
///     PathBuf::from("/tmp/foo/bar")
/// );
/// assert_eq!(
///     abspath_if_relative("/opt/baz", "/tmp"),
///     PathBuf::from("/opt/baz")
/// );
/// ```
pub fn abspath_if_relative(
    relative_path: impl AsRef<Path>,
    relative_to: impl AsRef<Path>,
) -> PathBuf {
    let path = relative_path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        relative_to.as_ref().join(path)
    }
}

/// 将文件移动到目标目录，目录不存在时自动创建
///
/// 返回移动后的新路径。跨文件系统 rename 失败时退化为复制加删除。
pub fn move_and_create_dest(
    src_path: impl AsRef<Path>,
    dst_dir: impl AsRef<Path>,
) -> io::Result<PathBuf> {
    let src = src_path.as_ref();
    let dst_dir = dst_dir.as_ref();

    std::fs::create_dir_all(dst_dir)?;

    let file_name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("source path has no file name: {}", src.display()),
        )
    })?;
    let dst = dst_dir.join(file_name);

    if std::fs::rename(src, &dst).is_err() {
        std::fs::copy(src, &dst)?;
        std::fs::remove_file(src)?;
    }

    Ok(dst)
}

/// 创建目录（包括所有父目录），失败时静默忽略
pub fn silent_create_dirs(path: impl AsRef<Path>) {
    let _ = std::fs::create_dir_all(path);
}

/// 删除文件或目录树，不存在时静默忽略
pub fn silent_remove(path: impl AsRef<Path>) {
    let path = path.as_ref();
    let _ = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
}

/// 替换路径的扩展名
///
/// `new_extension` 不带点号，传空字符串则去掉扩展名。
pub fn switch_extension(path: impl AsRef<Path>, new_extension: &str) -> PathBuf {
    path.as_ref().with_extension(new_extension)
}
