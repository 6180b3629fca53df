//! 链路共享句柄
//!
//! 一台机器人只有一条链路。路径、LED、板载存储等子系统共用同一个
//! [`SharedLink`]，锁是链路级的，因此任何时刻最多只有一条命令在途。

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Duration;

/// 独占访问守卫
///
/// 守卫离开作用域时自动释放锁（包括 `?` 提前返回和 panic 展开）。
pub type LinkGuard<'a, L> = MutexGuard<'a, L>;

/// 可克隆的链路句柄（`Arc<Mutex<L>>`）
///
/// 克隆只复制句柄，不复制链路本身。
pub struct SharedLink<L> {
    inner: Arc<Mutex<L>>,
}

impl<L> SharedLink<L> {
    pub fn new(link: L) -> Self {
        Self {
            inner: Arc::new(Mutex::new(link)),
        }
    }

    /// 获取独占访问（阻塞直到当前持有者释放）
    ///
    /// `parking_lot` 的锁不可重入：同一线程在持有守卫时再次调用会死锁。
    pub fn lock(&self) -> LinkGuard<'_, L> {
        self.inner.lock()
    }

    /// 尝试获取独占访问（不阻塞）
    pub fn try_lock(&self) -> Option<LinkGuard<'_, L>> {
        self.inner.try_lock()
    }

    /// 带超时获取独占访问
    pub fn try_lock_for(&self, timeout: Duration) -> Option<LinkGuard<'_, L>> {
        self.inner.try_lock_for(timeout)
    }

    /// 链路当前是否被占用
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// 共享该链路的句柄数量
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<L> Clone for SharedLink<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L> From<L> for SharedLink<L> {
    fn from(link: L) -> Self {
        Self::new(link)
    }
}

impl<L> std::fmt::Debug for SharedLink<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLink")
            .field("locked", &self.is_locked())
            .field("handles", &self.handle_count())
            .finish()
    }
}
