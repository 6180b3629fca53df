//! 驱动层模块
//!
//! 本模块提供 Scribbler 2 路径子系统的命令收发，包括：
//! - 命令包构建与提交（simple / path 两种模式）
//! - 应答解析（int32、坐标、传感器快照）
//! - 链路级独占访问（RAII 守卫，任何退出路径都会释放）
//! - 性能指标（原子计数器）
//!
//! # 使用场景
//!
//! 适用于需要直接发出任意路径命令的场景。
//! 需要在编译期避免“未进入路径模式就发运动命令”的用户应该使用 `s2-client`。

pub mod decoder;
mod error;
pub mod metrics;
mod path;

pub use decoder::ResponseDecoder;
pub use error::DriverError;
pub use metrics::{PathMetrics, PathMetricsSnapshot};
pub use path::{PathReply, S2Path};
