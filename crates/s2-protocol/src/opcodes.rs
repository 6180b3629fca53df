//! 操作码常量定义和枚举
//!
//! 路径子系统使用 161~168 共 8 个操作码，均为固定常量。

use crate::ProtocolError;
use num_enum::{IntoPrimitive, TryFromPrimitive, TryFromPrimitiveError};

// ============================================================================
// 操作码常量
// ============================================================================

/// 进入/退出路径模式
pub const OP_SET_PATH: u8 = 161;

/// 直线运动（绝对/相对由长度标志区分）
pub const OP_MOVE: u8 = 162;

/// 圆弧运动
pub const OP_ARC: u8 = 163;

/// 转向
pub const OP_TURN: u8 = 164;

/// 读取位置
pub const OP_GET_POSN: u8 = 165;

/// 设定位置（不移动机器人）
pub const OP_SET_POSN: u8 = 166;

/// 读取朝向角
pub const OP_GET_ANGLE: u8 = 167;

/// 设定朝向角（不移动机器人）
pub const OP_SET_ANGLE: u8 = 168;

/// 路径子系统操作码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Opcode {
    SetPath = 161,
    Move = 162,
    Arc = 163,
    Turn = 164,
    GetPosn = 165,
    SetPosn = 166,
    GetAngle = 167,
    SetAngle = 168,
}

impl Opcode {
    /// 所有操作码（按数值升序）
    pub const ALL: [Opcode; 8] = [
        Opcode::SetPath,
        Opcode::Move,
        Opcode::Arc,
        Opcode::Turn,
        Opcode::GetPosn,
        Opcode::SetPosn,
        Opcode::GetAngle,
        Opcode::SetAngle,
    ];

    /// 原始字节值
    #[inline]
    pub fn as_u8(self) -> u8 {
        self.into()
    }
}

impl From<TryFromPrimitiveError<Opcode>> for ProtocolError {
    fn from(err: TryFromPrimitiveError<Opcode>) -> Self {
        ProtocolError::UnknownOpcode(err.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(Opcode::SetPath.as_u8(), OP_SET_PATH);
        assert_eq!(Opcode::SetAngle.as_u8(), OP_SET_ANGLE);
        assert_eq!(Opcode::SetPath.as_u8(), 161);
        assert_eq!(Opcode::Move.as_u8(), 162);
        assert_eq!(Opcode::Arc.as_u8(), 163);
        assert_eq!(Opcode::Turn.as_u8(), 164);
        assert_eq!(Opcode::GetPosn.as_u8(), 165);
        assert_eq!(Opcode::SetPosn.as_u8(), 166);
        assert_eq!(Opcode::GetAngle.as_u8(), 167);
        assert_eq!(Opcode::SetAngle.as_u8(), 168);
    }

    #[test]
    fn test_opcode_try_from() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::try_from(op.as_u8()).unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_opcode() {
        let err: ProtocolError = Opcode::try_from(0x50).unwrap_err().into();
        assert_eq!(err, ProtocolError::UnknownOpcode(0x50));

        assert!(Opcode::try_from(160).is_err());
        assert!(Opcode::try_from(169).is_err());
    }
}
