use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::log::appender::LogAppender;

/// FileAppender 配置
#[derive(Debug, Clone, Deserialize)]
pub struct FileAppenderConfig {
    /// 日志文件路径
    pub file_path: String,
}

/// 文件输出器
///
/// 以追加模式写入文件，父目录不存在时自动创建
pub struct FileAppender {
    file: Arc<Mutex<tokio::fs::File>>,
}

impl FileAppender {
    /// 同步构造方法（阻塞 I/O，用于支持 From trait）
    pub fn new(config: FileAppenderConfig) -> Result<Self> {
        use std::fs::OpenOptions;

        let path = PathBuf::from(&config.file_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            file: Arc::new(Mutex::new(tokio::fs::File::from_std(file))),
        })
    }
}

#[async_trait::async_trait]
impl LogAppender for FileAppender {
    async fn append(&self, formatted_message: &str) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        let mut file = self.file.lock().await;
        file.write_all(formatted_message.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        let mut file = self.file.lock().await;
        file.flush().await?;
        Ok(())
    }
}

crate::impl_from!(FileAppenderConfig => FileAppender, expect: "failed to open log file");
crate::impl_box_from!(FileAppender => dyn LogAppender);
