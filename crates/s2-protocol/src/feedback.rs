//! 应答解析模块
//!
//! 路径子系统的应答只有三种形态：
//! - 一个 int32（大端、补码）
//! - 两个连续 int32 组成的坐标（先 x 后 y）
//! - 一个传感器快照（不透明字节块，内部结构由链路/传感器模块定义）

use crate::{ProtocolError, bytes_to_i32_be};
use bytes::Bytes;
use std::fmt;

/// int32 应答的字节数
pub const INT32_REPLY_LEN: usize = 4;

/// 从应答字节中解析一个 int32
///
/// 只读取前 4 个字节，多余字节由调用方决定如何处理。
///
/// # 错误
///
/// - `ProtocolError::ShortReply`: 不足 4 字节
pub fn decode_i32(reply: &[u8]) -> Result<i32, ProtocolError> {
    let bytes: [u8; INT32_REPLY_LEN] = reply
        .get(..INT32_REPLY_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(ProtocolError::ShortReply {
            expected: INT32_REPLY_LEN,
            actual: reply.len(),
        })?;
    Ok(bytes_to_i32_be(bytes))
}

/// 平面坐标（单位：机器人原生距离步长）
///
/// 本层不做范围检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 从 8 字节应答中解析坐标（先 x 后 y）
    pub fn decode(reply: &[u8]) -> Result<Self, ProtocolError> {
        if reply.len() < 2 * INT32_REPLY_LEN {
            return Err(ProtocolError::ShortReply {
                expected: 2 * INT32_REPLY_LEN,
                actual: reply.len(),
            });
        }
        let x = decode_i32(&reply[..INT32_REPLY_LEN])?;
        let y = decode_i32(&reply[INT32_REPLY_LEN..])?;
        Ok(Self { x, y })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// 传感器快照
///
/// 每条会改变机器人状态的命令执行后，机器人都会回传一份核心传感器读数。
/// 其字段布局属于传感器模块，本层只将其作为不透明字节块传递。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SensorSnapshot {
    raw: Bytes,
}

impl SensorSnapshot {
    /// 从链路给出的应答构造快照
    ///
    /// `expected_len` 是链路声明的单份传感器应答长度。
    ///
    /// # 错误
    ///
    /// - `ProtocolError::ShortReply`: 应答不足 `expected_len` 字节（含空应答）
    pub fn from_reply(raw: Bytes, expected_len: usize) -> Result<Self, ProtocolError> {
        if raw.len() < expected_len {
            return Err(ProtocolError::ShortReply {
                expected: expected_len,
                actual: raw.len(),
            });
        }
        Ok(Self { raw })
    }

    /// 原始字节
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// 取出底层 `Bytes`（零拷贝）
    pub fn into_bytes(self) -> Bytes {
        self.raw
    }
}

impl fmt::Debug for SensorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SensorSnapshot")
            .field(&hex::encode(&self.raw))
            .finish()
    }
}

impl fmt::Display for SensorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.raw))
    }
}
