//! 客户端类型
//!
//! - `PathSpeed`: 路径速度（0~15）
//! - `ClientError`: 客户端错误

mod error;
mod speed;

pub use error::{ClientError, Result};
pub use speed::PathSpeed;

// 协议层值类型
pub use s2_protocol::{Coordinate, SensorSnapshot};
