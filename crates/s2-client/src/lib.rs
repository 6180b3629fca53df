//! 客户端接口模块
//!
//! 本模块提供 Scribbler 2 路径子系统的类型安全接口：
//! - Type State Pattern（`S2Robot<L, Idle>` / `S2Robot<L, PathActive>`）
//! - 运动命令只存在于路径模式状态上，未进入路径模式就无法调用
//! - 强类型速度（`PathSpeed`，0~15）
//!
//! 如果需要直接发出任意命令，可以使用 `s2-driver` 的 `S2Path`。

pub mod state;
pub mod types;

// 重新导出常用类型
pub use state::{Idle, PathActive, PathModeConfig, S2Robot, TransitionError};
pub use types::*;
