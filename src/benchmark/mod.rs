//! 基准测量工具模块

use std::time::Instant;

/// 简单秒表，以毫秒为单位测量一段代码的耗时
///
/// # 示例
///
/// ```
/// use utilx::benchmark::Stopwatch;
///
/// let mut stopwatch = Stopwatch::start();
/// // ... 被测代码 ...
/// stopwatch.stop();
/// assert!(stopwatch.duration_ms() >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started_at: Instant,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    /// 启动秒表
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
            stopped_at: None,
        }
    }

    /// 停止秒表
    ///
    /// 重复调用只记录第一次停止的时刻。
    pub fn stop(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(Instant::now());
        }
    }

    /// 测量耗时（毫秒）
    ///
    /// 未停止时返回从启动到当前时刻的耗时。
    pub fn duration_ms(&self) -> f64 {
        let end = self.stopped_at.unwrap_or_else(Instant::now);
        end.duration_since(self.started_at).as_secs_f64() * 1000.0
    }

    /// 测量闭包的执行耗时，返回执行结果和毫秒数
    pub fn time_it<T>(f: impl FnOnce() -> T) -> (T, f64) {
        let mut stopwatch = Stopwatch::start();
        let result = f();
        stopwatch.stop();
        (result, stopwatch.duration_ms())
    }
}
