//! 路径协议门面
//!
//! 提供对外的 `S2Path` 结构体。每个操作都遵循同一模板：
//!
//! 1. 获取链路独占访问（阻塞等待当前持有者）
//! 2. 构建并填充命令包
//! 3. 按命令固定的提交模式发送，阻塞等待应答
//! 4. 按声明的返回类型解析应答
//! 5. 释放独占访问（守卫析构，成功、解析失败、链路失败都会释放）

use crate::decoder::ResponseDecoder;
use crate::error::DriverError;
use crate::metrics::{PathMetrics, PathMetricsSnapshot};
use s2_link::{S2Link, SharedLink, SubmitMode};
use s2_protocol::{Coordinate, PathCommand, ReplyKind, SensorSnapshot};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{debug, warn};

/// 通用命令应答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathReply {
    Sensors(SensorSnapshot),
    Int32(i32),
    Coordinate(Coordinate),
}

/// 路径子系统驱动（对外 API）
///
/// 本层不跟踪机器人的 idle / path-active 状态，调用方发什么就转发什么。
/// 需要编译期保证的调用方应使用 `s2-client` 的类型状态接口。
///
/// `S2Path` 可在多线程间共享（`&self` 方法），并发调用按获得锁的顺序串行执行。
pub struct S2Path<L> {
    link: SharedLink<L>,
    metrics: Arc<PathMetrics>,
}

impl<L: S2Link> S2Path<L> {
    /// 独占一条链路
    pub fn new(link: L) -> Self {
        Self::with_shared_link(SharedLink::new(link))
    }

    /// 与其他子系统共用一条链路（锁是链路级的）
    pub fn with_shared_link(link: SharedLink<L>) -> Self {
        Self {
            link,
            metrics: Arc::new(PathMetrics::new()),
        }
    }

    /// 链路句柄（用于挂接其他子系统）
    pub fn shared_link(&self) -> &SharedLink<L> {
        &self.link
    }

    /// 指标句柄
    pub fn metrics(&self) -> Arc<PathMetrics> {
        Arc::clone(&self.metrics)
    }

    /// 指标快照
    pub fn metrics_snapshot(&self) -> PathMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// 执行任意路径命令，按命令声明的类型返回应答
    pub fn execute(&self, command: &PathCommand) -> Result<PathReply, DriverError> {
        match command.reply_kind() {
            ReplyKind::Sensors => self
                .run(command, |d| d.decode_sensor_snapshot())
                .map(PathReply::Sensors),
            ReplyKind::Int32 => self.run(command, |d| d.decode_i32()).map(PathReply::Int32),
            ReplyKind::Coordinate => self
                .run(command, |d| d.decode_coordinate())
                .map(PathReply::Coordinate),
        }
    }

    /// 进入路径模式
    ///
    /// `speed` 只保留低 4 位（0~15）。
    pub fn begin_path(&self, speed: u8) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::begin_path(speed))
    }

    /// 退出路径模式
    pub fn end_path(&self) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::end_path())
    }

    /// 读取当前位置
    pub fn get_posn(&self) -> Result<Coordinate, DriverError> {
        self.run(&PathCommand::get_posn(), |d| d.decode_coordinate())
    }

    /// 读取当前朝向角
    pub fn get_angle(&self) -> Result<i32, DriverError> {
        self.run(&PathCommand::get_angle(), |d| d.decode_i32())
    }

    /// 设定当前位置（不移动机器人，32 位字段）
    pub fn set_posn(&self, x: i32, y: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::set_posn(x, y))
    }

    /// 设定当前朝向角（不移动机器人，32 位字段）
    pub fn set_angle(&self, angle: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::set_angle(angle))
    }

    /// 移动到 (x, y)
    ///
    /// 坐标只发送低 16 位，超出 `i16` 范围的值会回绕。
    pub fn move_to(&self, x: i32, y: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::move_to(x, y))
    }

    /// 相对移动 (x, y)
    pub fn move_by(&self, x: i32, y: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::move_by(x, y))
    }

    /// 转向到指定角度
    pub fn turn_to(&self, angle: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::turn_to(angle))
    }

    /// 相对转动指定角度
    pub fn turn_by(&self, angle: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::turn_by(angle))
    }

    /// 沿给定半径的圆弧移动到 (x, y)
    pub fn arc_to(&self, x: i32, y: i32, radius: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::arc_to(x, y, radius))
    }

    /// 沿给定半径的圆弧相对移动 (x, y)
    pub fn arc_by(&self, x: i32, y: i32, radius: i32) -> Result<SensorSnapshot, DriverError> {
        self.run_sensors(&PathCommand::arc_by(x, y, radius))
    }

    fn run_sensors(&self, command: &PathCommand) -> Result<SensorSnapshot, DriverError> {
        self.run(command, |d| d.decode_sensor_snapshot())
    }

    /// 一次完整的请求/应答交换
    ///
    /// 守卫 `link` 在函数返回时析构，锁在所有路径上都会释放。
    fn run<T>(
        &self,
        command: &PathCommand,
        decode: impl FnOnce(&mut ResponseDecoder<'_, L>) -> Result<T, DriverError>,
    ) -> Result<T, DriverError> {
        let mut link = self.link.lock();
        self.metrics.commands_total.fetch_add(1, Ordering::Relaxed);

        let result = Self::exchange(&mut *link, command, &self.metrics, decode);

        if let Err(e) = &result {
            let counter = match e {
                DriverError::Link(_) => &self.metrics.link_failures,
                DriverError::Protocol(_) => &self.metrics.decode_failures,
            };
            counter.fetch_add(1, Ordering::Relaxed);
            warn!(opcode = command.opcode().as_u8(), "path command failed: {}", e);
        }
        result
    }

    fn exchange<T>(
        link: &mut L,
        command: &PathCommand,
        metrics: &PathMetrics,
        decode: impl FnOnce(&mut ResponseDecoder<'_, L>) -> Result<T, DriverError>,
    ) -> Result<T, DriverError> {
        let packet = command.to_packet()?;
        let mode = command.submit_mode();

        debug!(
            opcode = packet.opcode().as_u8(),
            ?mode,
            bytes = %hex::encode(packet.as_bytes()),
            "submit path command"
        );

        let counter = match mode {
            SubmitMode::Simple => &metrics.simple_submissions,
            SubmitMode::Path => &metrics.path_submissions,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        link.submit(mode, packet.as_bytes())?;

        let mut decoder = ResponseDecoder::new(link);
        decode(&mut decoder)
    }
}

impl<L> Clone for S2Path<L> {
    /// 克隆共享同一条链路和同一组指标
    fn clone(&self) -> Self {
        Self {
            link: self.link.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<L> std::fmt::Debug for S2Path<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S2Path")
            .field("link", &self.link)
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}
