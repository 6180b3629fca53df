//! 性能指标模块
//!
//! 使用原子计数器记录命令提交与失败次数，读取不需要加链路锁。

use std::sync::atomic::{AtomicU64, Ordering};

/// 路径命令指标
///
/// # 使用示例
///
/// ```rust
/// use s2_driver::PathMetrics;
/// use std::sync::atomic::Ordering;
///
/// let metrics = PathMetrics::new();
/// metrics.commands_total.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(metrics.snapshot().commands_total, 1);
/// ```
#[derive(Debug, Default)]
pub struct PathMetrics {
    /// 发出的命令总数（含失败）
    pub commands_total: AtomicU64,

    /// simple 模式提交次数
    pub simple_submissions: AtomicU64,

    /// path 模式提交次数
    pub path_submissions: AtomicU64,

    /// 链路错误次数
    pub link_failures: AtomicU64,

    /// 应答解析错误次数
    pub decode_failures: AtomicU64,
}

impl PathMetrics {
    /// 创建新的指标实例（所有计数器初始化为 0）
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取指标快照
    ///
    /// 各计数器分别以 `Relaxed` 读取，之间可能有微小的时间差。
    pub fn snapshot(&self) -> PathMetricsSnapshot {
        PathMetricsSnapshot {
            commands_total: self.commands_total.load(Ordering::Relaxed),
            simple_submissions: self.simple_submissions.load(Ordering::Relaxed),
            path_submissions: self.path_submissions.load(Ordering::Relaxed),
            link_failures: self.link_failures.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
        }
    }

    /// 重置所有计数器
    pub fn reset(&self) {
        self.commands_total.store(0, Ordering::Relaxed);
        self.simple_submissions.store(0, Ordering::Relaxed);
        self.path_submissions.store(0, Ordering::Relaxed);
        self.link_failures.store(0, Ordering::Relaxed);
        self.decode_failures.store(0, Ordering::Relaxed);
    }
}

/// 指标快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathMetricsSnapshot {
    pub commands_total: u64,
    pub simple_submissions: u64,
    pub path_submissions: u64,
    pub link_failures: u64,
    pub decode_failures: u64,
}

impl PathMetricsSnapshot {
    /// 失败总数
    pub fn failures(&self) -> u64 {
        self.link_failures + self.decode_failures
    }
}
