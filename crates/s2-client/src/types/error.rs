//! 客户端错误类型

use s2_driver::DriverError;
use thiserror::Error;

/// 客户端错误类型
#[derive(Debug, Error)]
pub enum ClientError {
    /// 驱动层错误（链路故障或应答解析故障）
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// 路径速度超出 0~15
    #[error("Invalid path speed: {0} (expected 0..=15)")]
    InvalidSpeed(u8),
}

impl ClientError {
    /// 是否可以原样重试
    ///
    /// 链路层超时通常可以重试；参数错误和解析错误不应重试。
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Driver(DriverError::Link(s2_link::LinkError::Timeout))
        )
    }
}

/// 客户端 Result 类型
pub type Result<T> = std::result::Result<T, ClientError>;
