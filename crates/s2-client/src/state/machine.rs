//! Type State Machine - 编译期状态安全
//!
//! 机器人有两种模式：空闲（idle）与路径模式（path-active）。
//! 使用状态类型参数区分两者，运动命令只定义在 `S2Robot<L, PathActive>` 上，
//! 因此“未进入路径模式就发送运动命令”无法通过编译。

use crate::types::{ClientError, Coordinate, PathSpeed, Result, SensorSnapshot};
use s2_driver::S2Path;
use s2_link::{S2Link, SharedLink};
use std::fmt;
use thiserror::Error;
use tracing::info;

// ==================== 状态类型 ====================

/// 空闲状态
///
/// 可以读写位姿，不能发送运动命令。
#[derive(Debug)]
pub struct Idle;

/// 路径模式状态
///
/// 由 `begin_path` 进入，由 `end_path` 退出。
#[derive(Debug)]
pub struct PathActive {
    speed: PathSpeed,
}

// ==================== 配置 ====================

/// 路径模式配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathModeConfig {
    /// 路径速度（默认 15，最快）
    pub speed: PathSpeed,
}

impl PathModeConfig {
    pub fn with_speed(mut self, speed: PathSpeed) -> Self {
        self.speed = speed;
        self
    }
}

// ==================== 状态转换错误 ====================

/// 状态转换失败
///
/// 转换命令失败时机器人的实际模式无法确定（命令可能已送达），
/// 因此原状态的句柄随错误一并返回，调用方可以重试或改用其他方式恢复。
#[derive(Error)]
#[error("{error}")]
pub struct TransitionError<R> {
    /// 转换前的句柄
    pub robot: R,
    /// 失败原因
    #[source]
    pub error: ClientError,
}

impl<R> TransitionError<R> {
    /// 丢弃句柄，只保留错误
    pub fn into_error(self) -> ClientError {
        self.error
    }
}

impl<R> fmt::Debug for TransitionError<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<R> From<TransitionError<R>> for ClientError {
    fn from(err: TransitionError<R>) -> Self {
        err.error
    }
}

// ==================== S2Robot 状态机 ====================

/// Scribbler 2 路径子系统（Type State Pattern）
///
/// # 类型参数
///
/// - `L`: 链路类型
/// - `State`: 当前状态（`Idle`, `PathActive`）
///
/// 本层不会在析构时自动退出路径模式：`end_path` 是一条可能阻塞到运动结束的
/// path 命令，应由调用方显式发出。
pub struct S2Robot<L, State = Idle> {
    driver: S2Path<L>,
    state: State,
}

// ==================== 所有状态共有 ====================

impl<L: S2Link, State> S2Robot<L, State> {
    /// 底层驱动（可克隆，与本句柄共享链路）
    pub fn driver(&self) -> &S2Path<L> {
        &self.driver
    }

    /// 链路句柄
    pub fn shared_link(&self) -> &SharedLink<L> {
        self.driver.shared_link()
    }

    /// 读取当前位置
    pub fn get_posn(&self) -> Result<Coordinate> {
        Ok(self.driver.get_posn()?)
    }

    /// 读取当前朝向角
    pub fn get_angle(&self) -> Result<i32> {
        Ok(self.driver.get_angle()?)
    }

    /// 设定当前位置（不移动机器人）
    pub fn set_posn(&self, x: i32, y: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.set_posn(x, y)?)
    }

    /// 设定当前朝向角（不移动机器人）
    pub fn set_angle(&self, angle: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.set_angle(angle)?)
    }
}

// ==================== Idle 状态 ====================

impl<L: S2Link> S2Robot<L, Idle> {
    /// 独占一条链路
    pub fn new(link: L) -> Self {
        Self::from_driver(S2Path::new(link))
    }

    /// 与其他子系统共用链路
    pub fn with_shared_link(link: SharedLink<L>) -> Self {
        Self::from_driver(S2Path::with_shared_link(link))
    }

    /// 从已有驱动构造（视为空闲状态）
    pub fn from_driver(driver: S2Path<L>) -> Self {
        Self {
            driver,
            state: Idle,
        }
    }

    /// 进入路径模式
    ///
    /// # 返回
    ///
    /// - `Ok((S2Robot<L, PathActive>, SensorSnapshot))`: 成功，附带执行后的传感器快照
    /// - `Err(TransitionError)`: 失败，错误中带回空闲状态句柄
    #[allow(clippy::type_complexity)]
    pub fn begin_path(
        self,
        config: PathModeConfig,
    ) -> std::result::Result<(S2Robot<L, PathActive>, SensorSnapshot), TransitionError<Self>> {
        match self.driver.begin_path(config.speed.value()) {
            Ok(sensors) => {
                info!(speed = config.speed.value(), "entered path mode");
                let robot = S2Robot {
                    driver: self.driver,
                    state: PathActive {
                        speed: config.speed,
                    },
                };
                Ok((robot, sensors))
            },
            Err(e) => Err(TransitionError {
                robot: self,
                error: e.into(),
            }),
        }
    }

    /// 以指定速度进入路径模式
    ///
    /// 越界速度在发送任何字节之前被拒绝。
    #[allow(clippy::type_complexity)]
    pub fn begin_path_with_speed(
        self,
        speed: u8,
    ) -> std::result::Result<(S2Robot<L, PathActive>, SensorSnapshot), TransitionError<Self>> {
        match PathSpeed::new(speed) {
            Ok(speed) => self.begin_path(PathModeConfig { speed }),
            Err(error) => Err(TransitionError { robot: self, error }),
        }
    }
}

// ==================== PathActive 状态 ====================

impl<L: S2Link> S2Robot<L, PathActive> {
    /// 进入路径模式时使用的速度
    pub fn speed(&self) -> PathSpeed {
        self.state.speed
    }

    /// 移动到 (x, y)（坐标只发送低 16 位）
    pub fn move_to(&self, x: i32, y: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.move_to(x, y)?)
    }

    /// 相对移动 (x, y)
    pub fn move_by(&self, x: i32, y: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.move_by(x, y)?)
    }

    /// 转向到指定角度
    pub fn turn_to(&self, angle: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.turn_to(angle)?)
    }

    /// 相对转动
    pub fn turn_by(&self, angle: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.turn_by(angle)?)
    }

    /// 沿圆弧移动到 (x, y)
    pub fn arc_to(&self, x: i32, y: i32, radius: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.arc_to(x, y, radius)?)
    }

    /// 沿圆弧相对移动 (x, y)
    pub fn arc_by(&self, x: i32, y: i32, radius: i32) -> Result<SensorSnapshot> {
        Ok(self.driver.arc_by(x, y, radius)?)
    }

    /// 退出路径模式
    ///
    /// 失败时错误中带回路径模式句柄，可以直接重试。
    #[allow(clippy::type_complexity)]
    pub fn end_path(
        self,
    ) -> std::result::Result<(S2Robot<L, Idle>, SensorSnapshot), TransitionError<Self>> {
        match self.driver.end_path() {
            Ok(sensors) => {
                info!("left path mode");
                let robot = S2Robot {
                    driver: self.driver,
                    state: Idle,
                };
                Ok((robot, sensors))
            },
            Err(e) => Err(TransitionError {
                robot: self,
                error: e.into(),
            }),
        }
    }
}

impl<L, State: fmt::Debug> fmt::Debug for S2Robot<L, State> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S2Robot")
            .field("state", &self.state)
            .field("driver", &self.driver)
            .finish()
    }
}
