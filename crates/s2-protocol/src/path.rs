//! 路径命令编码
//!
//! 各操作的负载布局（Byte 0 为操作码，多字节整数均为大端）：
//!
//! | 操作 | 操作码 | 负载 | 提交模式 |
//! |---|---|---|---|
//! | beginPath(speed) | 161 | `1, 0, speed & 0x0F` | simple |
//! | endPath() | 161 | `0` | path |
//! | getPosn() | 165 | 无 | simple |
//! | getAngle() | 167 | 无 | simple |
//! | setPosn(x, y) | 166 | x(4), y(4) | simple |
//! | setAngle(angle) | 168 | angle(4) | simple |
//! | moveTo/By(x, y) | 162 | flag, x(2), y(2) | path |
//! | turnTo/By(angle) | 164 | flag, angle(2) | path |
//! | arcTo/By(x, y, radius) | 163 | flag, x(2), y(2), radius(2) | path |
//!
//! `flag` 为长度标志：绝对运动（To）为 `2 + 1`，相对运动（By）为 `4 + 1`。
//! 固件依靠它区分两种运动，两者的负载宽度完全一致。

use crate::ProtocolError;
use crate::i32_low16_to_bytes_be;
use crate::opcodes::Opcode;
use crate::packet::CommandPacket;

/// 进入路径模式标志
pub const PATH_MODE_ENTER: u8 = 1;

/// 退出路径模式标志
pub const PATH_MODE_EXIT: u8 = 0;

/// 绝对运动（To）的长度标志
pub const LENGTH_FLAG_ABSOLUTE: u8 = 2 + 1;

/// 相对运动（By）的长度标志
pub const LENGTH_FLAG_RELATIVE: u8 = 4 + 1;

/// 路径速度掩码（速度只占低 4 位）
pub const SPEED_MASK: u8 = 0x0F;

/// 提交模式
///
/// 两种模式对调用方都是同步阻塞的，区别只在链路层是否等待运动完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmitMode {
    /// 单次请求、单次应答，立即完成（模式切换、查询、设定）
    Simple,

    /// 运动命令：链路层负责等待机器人报告运动完成后再给出应答
    Path,
}

/// 应答类型（每条命令声明的返回类型）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// 一个传感器快照
    Sensors,
    /// 一个 int32
    Int32,
    /// 两个连续的 int32（先 x 后 y）
    Coordinate,
}

/// 运动参考系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionReference {
    /// 绝对（路径坐标系内），对应 `moveTo`/`turnTo`/`arcTo`
    Absolute,
    /// 相对当前位姿，对应 `moveBy`/`turnBy`/`arcBy`
    Relative,
}

impl MotionReference {
    /// 长度标志字节
    #[inline]
    pub fn length_flag(self) -> u8 {
        match self {
            MotionReference::Absolute => LENGTH_FLAG_ABSOLUTE,
            MotionReference::Relative => LENGTH_FLAG_RELATIVE,
        }
    }
}

/// 路径命令
///
/// 运动类变体的坐标、角度、半径以 `i32` 传入，编码时只保留低 16 位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    /// 进入路径模式（速度 0~15，超出部分被掩码丢弃）
    BeginPath { speed: u8 },
    /// 退出路径模式
    EndPath,
    /// 读取位置
    GetPosn,
    /// 读取朝向角
    GetAngle,
    /// 设定位置（32 位字段）
    SetPosn { x: i32, y: i32 },
    /// 设定朝向角（32 位字段）
    SetAngle { angle: i32 },
    /// 直线运动
    Move {
        reference: MotionReference,
        x: i32,
        y: i32,
    },
    /// 转向
    Turn { reference: MotionReference, angle: i32 },
    /// 圆弧运动
    Arc {
        reference: MotionReference,
        x: i32,
        y: i32,
        radius: i32,
    },
}

impl PathCommand {
    pub fn begin_path(speed: u8) -> Self {
        PathCommand::BeginPath { speed }
    }

    pub fn end_path() -> Self {
        PathCommand::EndPath
    }

    pub fn get_posn() -> Self {
        PathCommand::GetPosn
    }

    pub fn get_angle() -> Self {
        PathCommand::GetAngle
    }

    pub fn set_posn(x: i32, y: i32) -> Self {
        PathCommand::SetPosn { x, y }
    }

    pub fn set_angle(angle: i32) -> Self {
        PathCommand::SetAngle { angle }
    }

    pub fn move_to(x: i32, y: i32) -> Self {
        PathCommand::Move {
            reference: MotionReference::Absolute,
            x,
            y,
        }
    }

    pub fn move_by(x: i32, y: i32) -> Self {
        PathCommand::Move {
            reference: MotionReference::Relative,
            x,
            y,
        }
    }

    pub fn turn_to(angle: i32) -> Self {
        PathCommand::Turn {
            reference: MotionReference::Absolute,
            angle,
        }
    }

    pub fn turn_by(angle: i32) -> Self {
        PathCommand::Turn {
            reference: MotionReference::Relative,
            angle,
        }
    }

    pub fn arc_to(x: i32, y: i32, radius: i32) -> Self {
        PathCommand::Arc {
            reference: MotionReference::Absolute,
            x,
            y,
            radius,
        }
    }

    pub fn arc_by(x: i32, y: i32, radius: i32) -> Self {
        PathCommand::Arc {
            reference: MotionReference::Relative,
            x,
            y,
            radius,
        }
    }

    /// 操作码
    pub fn opcode(&self) -> Opcode {
        match self {
            PathCommand::BeginPath { .. } | PathCommand::EndPath => Opcode::SetPath,
            PathCommand::GetPosn => Opcode::GetPosn,
            PathCommand::GetAngle => Opcode::GetAngle,
            PathCommand::SetPosn { .. } => Opcode::SetPosn,
            PathCommand::SetAngle { .. } => Opcode::SetAngle,
            PathCommand::Move { .. } => Opcode::Move,
            PathCommand::Turn { .. } => Opcode::Turn,
            PathCommand::Arc { .. } => Opcode::Arc,
        }
    }

    /// 包总长度（负载 + 操作码）
    pub fn packet_len(&self) -> usize {
        match self {
            PathCommand::BeginPath { .. } => 4,
            PathCommand::EndPath => 2,
            PathCommand::GetPosn | PathCommand::GetAngle => 1,
            PathCommand::SetPosn { .. } => 9,
            PathCommand::SetAngle { .. } => 5,
            PathCommand::Move { .. } => 6,
            PathCommand::Turn { .. } => 4,
            PathCommand::Arc { .. } => 8,
        }
    }

    /// 提交模式
    ///
    /// 注意 `beginPath` 走 simple，而同一操作码的 `endPath` 走 path。
    pub fn submit_mode(&self) -> SubmitMode {
        match self {
            PathCommand::BeginPath { .. }
            | PathCommand::GetPosn
            | PathCommand::GetAngle
            | PathCommand::SetPosn { .. }
            | PathCommand::SetAngle { .. } => SubmitMode::Simple,
            PathCommand::EndPath
            | PathCommand::Move { .. }
            | PathCommand::Turn { .. }
            | PathCommand::Arc { .. } => SubmitMode::Path,
        }
    }

    /// 应答类型
    pub fn reply_kind(&self) -> ReplyKind {
        match self {
            PathCommand::GetPosn => ReplyKind::Coordinate,
            PathCommand::GetAngle => ReplyKind::Int32,
            _ => ReplyKind::Sensors,
        }
    }

    /// 编码为命令包
    pub fn to_packet(&self) -> Result<CommandPacket, ProtocolError> {
        let mut packet = CommandPacket::new(self.opcode(), self.packet_len())?;

        match *self {
            PathCommand::BeginPath { speed } => {
                packet
                    .put_u8(1, PATH_MODE_ENTER)
                    .put_u8(2, 0) // 保留
                    .put_u8(3, speed & SPEED_MASK);
            },
            PathCommand::EndPath => {
                packet.put_u8(1, PATH_MODE_EXIT);
            },
            PathCommand::GetPosn | PathCommand::GetAngle => {},
            PathCommand::SetPosn { x, y } => {
                packet.put_i32_be(1, x).put_i32_be(5, y);
            },
            PathCommand::SetAngle { angle } => {
                packet.put_i32_be(1, angle);
            },
            PathCommand::Move { reference, x, y } => {
                packet
                    .put_u8(1, reference.length_flag())
                    .put_i16_be(2, low16(x))
                    .put_i16_be(4, low16(y));
            },
            PathCommand::Turn { reference, angle } => {
                packet
                    .put_u8(1, reference.length_flag())
                    .put_i16_be(2, low16(angle));
            },
            PathCommand::Arc {
                reference,
                x,
                y,
                radius,
            } => {
                packet
                    .put_u8(1, reference.length_flag())
                    .put_i16_be(2, low16(x))
                    .put_i16_be(4, low16(y))
                    .put_i16_be(6, low16(radius));
            },
        }

        Ok(packet)
    }
}

/// 截断到低 16 位（按位回绕，不做饱和）
#[inline]
fn low16(value: i32) -> i16 {
    i16::from_be_bytes(i32_low16_to_bytes_be(value))
}
