//! S2 SDK - Scribbler 2 路径协议 Rust SDK
//!
//! Scribbler 2 机器人的路径子系统：进入/退出路径模式、读写位姿、
//! 以及路径模式下的移动、转向和圆弧命令。
//!
//! # 架构设计
//!
//! 本 SDK 采用分层架构，从底层到高层：
//!
//! - **协议层** (`protocol`): 操作码、命令包编码、应答解码
//! - **链路层** (`link`): 链路抽象与独占访问句柄
//! - **驱动层** (`driver`): 按命令模板执行一次请求/应答交换
//! - **客户端层** (`client`): 类型状态接口，运动命令只能在路径模式下调用
//!
//! # 快速开始
//!
//! ```rust,ignore
//! use s2_sdk::prelude::*;
//!
//! let robot = S2Robot::new(link);
//! let (robot, _) = robot.begin_path(PathModeConfig::default())?;
//! robot.move_by(0, 100)?;
//! robot.turn_by(90)?;
//! let (robot, _) = robot.end_path()?;
//! let posn = robot.get_posn()?;
//! ```
//!
//! 需要直接发送命令（不做状态检查）的用户可以使用驱动层：
//!
//! ```rust,ignore
//! use s2_sdk::driver::S2Path;
//! ```

pub use s2_client as client;
pub use s2_driver as driver;
pub use s2_link as link;
pub use s2_protocol as protocol;

mod logging;
pub mod prelude;

pub use logging::{DEFAULT_LOG_DIRECTIVES, init_logger, try_init_logger};

// --- 用户以此为界 ---

pub use link::{LinkError, S2Link, SharedLink};
pub use protocol::{Coordinate, PathCommand, ProtocolError, SensorSnapshot};

pub use driver::DriverError;

// 客户端层（推荐使用）
pub use client::{ClientError, Idle, PathActive, PathModeConfig, PathSpeed, S2Robot};

// 类型别名：为驱动层提供清晰的别名
pub type Driver<L> = driver::S2Path<L>;
