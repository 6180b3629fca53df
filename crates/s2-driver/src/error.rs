//! 驱动层错误类型定义

use s2_link::LinkError;
use s2_protocol::ProtocolError;
use thiserror::Error;

/// 驱动层错误类型
///
/// 本层不重试、不重连：每个操作只尝试一次，错误原样交给调用方。
#[derive(Error, Debug)]
pub enum DriverError {
    /// 链路错误（发送失败、断开、超时等）
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// 协议错误（应答字节不足、空应答等）
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl DriverError {
    /// 是否为链路故障（TransportFailure）
    pub fn is_link_failure(&self) -> bool {
        matches!(self, DriverError::Link(_))
    }

    /// 是否为应答解析故障（DecodeFailure）
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, DriverError::Protocol(_))
    }
}
