//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use s2_sdk::prelude::*;
//! ```

// 客户端层（推荐使用）
pub use crate::client::{Idle, PathActive, PathModeConfig, S2Robot, TransitionError};
pub use crate::client::types::*;

// 链路层
pub use crate::link::{S2Link, SharedLink};

// 驱动层（高级用户使用）
pub use crate::driver::S2Path as Driver;
pub use crate::driver::{PathMetricsSnapshot, PathReply};

// 错误类型
pub use crate::driver::DriverError;
pub use crate::link::LinkError;
pub use crate::protocol::ProtocolError;
