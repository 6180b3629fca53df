//! 命令包工厂
//!
//! 每个命令包都是一块定长、零初始化的字节缓冲区，Byte 0 为操作码，
//! 其余字节为负载，含义由操作码决定（见 [`path`](crate::path) 模块）。

use crate::ProtocolError;
use crate::opcodes::Opcode;
use smallvec::SmallVec;
use std::fmt;

/// 操作码所占字节数（包的最小长度）
pub const OPCODE_LEN: usize = 1;

/// 路径子系统最长的命令包（`setPosn`：1 + 4 + 4）
pub const MAX_PATH_PACKET_LEN: usize = 9;

/// 命令包缓冲区类型
///
/// 使用 SmallVec 在栈上预留 9 字节，足以覆盖路径子系统的全部命令，
/// 避免每次命令都进行堆分配。
pub type PacketBuffer = SmallVec<[u8; MAX_PATH_PACKET_LEN]>;

/// 命令包
///
/// 在单次操作内创建、填充、提交、丢弃，不跨调用共享。
///
/// # 不变量
///
/// - `bytes[0]` 始终等于 `opcode`
/// - 长度在创建时确定，之后不变；未写入的字节保持为 0
#[derive(Clone, PartialEq, Eq)]
pub struct CommandPacket {
    opcode: Opcode,
    bytes: PacketBuffer,
}

impl CommandPacket {
    /// 创建零填充的命令包，并在 Byte 0 写入操作码
    ///
    /// # 错误
    ///
    /// - `ProtocolError::PacketTooShort`: `len` 小于 [`OPCODE_LEN`]
    pub fn new(opcode: Opcode, len: usize) -> Result<Self, ProtocolError> {
        if len < OPCODE_LEN {
            return Err(ProtocolError::PacketTooShort {
                opcode: opcode.as_u8(),
                len,
            });
        }

        let mut bytes: PacketBuffer = SmallVec::from_elem(0, len);
        bytes[0] = opcode.as_u8();
        Ok(Self { opcode, bytes })
    }

    /// 操作码
    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// 完整的包字节（含操作码）
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 负载字节（操作码之后的部分）
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[OPCODE_LEN..]
    }

    /// 包总长度
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 包是否为空（构造保证至少包含操作码，始终返回 false）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 写入单个字节
    ///
    /// # Panics
    ///
    /// `offset` 为 0（操作码位置）或越界时 panic。
    pub fn put_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        assert!(offset >= OPCODE_LEN, "offset 0 is reserved for the opcode");
        self.bytes[offset] = value;
        self
    }

    /// 以大端写入 2 字节
    ///
    /// # Panics
    ///
    /// 同 [`put_u8`](Self::put_u8)。
    pub fn put_i16_be(&mut self, offset: usize, value: i16) -> &mut Self {
        self.put_slice(offset, &crate::i16_to_bytes_be(value))
    }

    /// 以大端写入 4 字节
    ///
    /// # Panics
    ///
    /// 同 [`put_u8`](Self::put_u8)。
    pub fn put_i32_be(&mut self, offset: usize, value: i32) -> &mut Self {
        self.put_slice(offset, &crate::i32_to_bytes_be(value))
    }

    fn put_slice(&mut self, offset: usize, data: &[u8]) -> &mut Self {
        assert!(offset >= OPCODE_LEN, "offset 0 is reserved for the opcode");
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        self
    }

    /// 消费命令包，取出底层缓冲区
    pub fn into_bytes(self) -> PacketBuffer {
        self.bytes
    }
}

impl AsRef<[u8]> for CommandPacket {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for CommandPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPacket")
            .field("opcode", &self.opcode)
            .field("bytes", &hex::encode(&self.bytes))
            .finish()
    }
}

/// 命令包工厂函数
///
/// 等价于 [`CommandPacket::new`]。
pub fn make_command_packet(opcode: Opcode, len: usize) -> Result<CommandPacket, ProtocolError> {
    CommandPacket::new(opcode, len)
}
