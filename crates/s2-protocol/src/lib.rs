//! # S2 Protocol
//!
//! Scribbler 2 路径（path）子系统的串口命令协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `opcodes`: 操作码常量与枚举
//! - `packet`: 命令包工厂（定长、零初始化缓冲区）
//! - `path`: 路径命令编码（各操作的负载布局）
//! - `feedback`: 应答解析（int32、坐标、传感器快照）
//!
//! ## 字节序
//!
//! 协议中所有多字节整数均为大端字节序（高位在前）。
//! 本模块提供了字节序转换工具函数。
//!
//! ## 字段宽度
//!
//! 位姿设定命令（`setPosn`、`setAngle`）使用完整的 32 位字段；
//! 所有运动命令（`moveTo/By`、`turnTo/By`、`arcTo/By`）只发送每个值的低 16 位。
//! 超出 16 位有符号范围的值会被静默截断，这是固件协议本身的限制。

pub mod feedback;
pub mod opcodes;
pub mod packet;
pub mod path;

// 重新导出常用类型
pub use feedback::*;
pub use opcodes::*;
pub use packet::*;
pub use path::*;

use thiserror::Error;

/// 协议编解码错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 命令包长度不足以容纳操作码字节
    #[error("Packet too short for opcode {opcode}: length {len}")]
    PacketTooShort { opcode: u8, len: usize },

    /// 应答字节数不足
    #[error("Short reply: expected {expected} bytes, got {actual}")]
    ShortReply { expected: usize, actual: usize },

    /// 未知操作码
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u8),
}

/// 字节序转换工具函数
///
/// 协议使用高位在前（大端字节序），
/// 这些函数用于在协议层进行字节序转换。
///
/// 大端字节序转 i32
pub fn bytes_to_i32_be(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// 大端字节序转 i16
pub fn bytes_to_i16_be(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// i32 转大端字节序
pub fn i32_to_bytes_be(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// i16 转大端字节序
pub fn i16_to_bytes_be(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

/// 取 i32 的低 16 位并按大端输出
///
/// 运动命令字段的编码方式：`(v >> 8) & 0xFF, v & 0xFF`。
/// 高 16 位被丢弃，结果等价于 `v mod 65536`。
pub fn i32_low16_to_bytes_be(value: i32) -> [u8; 2] {
    i16_to_bytes_be(value as i16)
}
