//! # S2 Link Layer
//!
//! 串口链路抽象层：把“发送命令包、读取应答、独占访问”这三件事收敛到
//! [`S2Link`] trait 和 [`SharedLink`] 句柄上。
//!
//! 物理传输（蓝牙串口的打开/关闭、字节级成帧、超时调优）由具体实现负责，
//! 不在本 crate 范围内。

use bytes::Bytes;
use thiserror::Error;

pub use s2_protocol::SubmitMode;

mod shared;

pub use shared::{LinkGuard, SharedLink};

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "mock")]
pub use mock::{FailurePoint, MockLink, MockLinkConfig, Submission};

/// 链路层统一错误类型（TransportFailure）
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Device Error: {0}")]
    Device(#[from] LinkDeviceError),
    #[error("Reply timeout")]
    Timeout,
    #[error("Link disconnected")]
    Disconnected,
}

/// 设备错误的结构化分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDeviceErrorKind {
    Unknown,
    NotFound,
    AccessDenied,
    Busy,
    InvalidFraming,
    Backend,
}

/// 结构化设备错误
#[derive(Error, Debug, Clone)]
#[error("{kind:?}: {message}")]
pub struct LinkDeviceError {
    pub kind: LinkDeviceErrorKind,
    pub message: String,
}

impl LinkDeviceError {
    pub fn new(kind: LinkDeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            LinkDeviceErrorKind::NotFound | LinkDeviceErrorKind::AccessDenied
        )
    }
}

impl From<String> for LinkDeviceError {
    fn from(message: String) -> Self {
        Self::new(LinkDeviceErrorKind::Unknown, message)
    }
}

impl From<&str> for LinkDeviceError {
    fn from(message: &str) -> Self {
        Self::new(LinkDeviceErrorKind::Unknown, message)
    }
}

/// 到单台机器人的半双工字节链路
///
/// 所有方法都是同步阻塞的。实现方不需要自行加锁：
/// 独占访问由 [`SharedLink`] 在更外层保证。
pub trait S2Link {
    /// simple 模式提交：发送命令包，应答随即可读
    fn submit_simple(&mut self, packet: &[u8]) -> Result<(), LinkError>;

    /// path 模式提交：发送命令包，并阻塞到机器人报告运动完成
    fn submit_path_command(&mut self, packet: &[u8]) -> Result<(), LinkError>;

    /// 从当前应答流中读取至多 `len` 字节
    ///
    /// 应答提前结束时可以返回少于 `len` 的字节，由上层判定是否为解析错误；
    /// 完全没有应答时应返回 `LinkError::Timeout`。
    fn read_reply(&mut self, len: usize) -> Result<Bytes, LinkError>;

    /// 单份传感器应答的字节数
    ///
    /// 快照内容不透明，但长度由链路另一端的固件决定，上层据此判定应答是否完整。
    fn sensor_reply_len(&self) -> usize;

    /// 读取下一份传感器应答
    ///
    /// 与 [`read_reply`](S2Link::read_reply) 一样可以返回不完整的应答；
    /// 不足 [`sensor_reply_len`](S2Link::sensor_reply_len) 字节时由解码器报告
    /// `ShortReply`。
    fn read_sensor_reply(&mut self) -> Result<Bytes, LinkError> {
        let len = self.sensor_reply_len();
        self.read_reply(len)
    }

    /// 按模式分发提交
    fn submit(&mut self, mode: SubmitMode, packet: &[u8]) -> Result<(), LinkError> {
        match mode {
            SubmitMode::Simple => self.submit_simple(packet),
            SubmitMode::Path => self.submit_path_command(packet),
        }
    }
}

impl<L: S2Link + ?Sized> S2Link for Box<L> {
    fn submit_simple(&mut self, packet: &[u8]) -> Result<(), LinkError> {
        (**self).submit_simple(packet)
    }

    fn submit_path_command(&mut self, packet: &[u8]) -> Result<(), LinkError> {
        (**self).submit_path_command(packet)
    }

    fn read_reply(&mut self, len: usize) -> Result<Bytes, LinkError> {
        (**self).read_reply(len)
    }

    fn sensor_reply_len(&self) -> usize {
        (**self).sensor_reply_len()
    }

    fn read_sensor_reply(&mut self) -> Result<Bytes, LinkError> {
        (**self).read_sensor_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingLink {
        simple: usize,
        path: usize,
        reads: Vec<usize>,
    }

    impl S2Link for CountingLink {
        fn submit_simple(&mut self, _packet: &[u8]) -> Result<(), LinkError> {
            self.simple += 1;
            Ok(())
        }

        fn submit_path_command(&mut self, _packet: &[u8]) -> Result<(), LinkError> {
            self.path += 1;
            Ok(())
        }

        fn read_reply(&mut self, len: usize) -> Result<Bytes, LinkError> {
            self.reads.push(len);
            Err(LinkError::Timeout)
        }

        fn sensor_reply_len(&self) -> usize {
            11
        }
    }

    #[test]
    fn test_submit_dispatch() {
        let mut link = CountingLink::default();
        link.submit(SubmitMode::Simple, &[165]).unwrap();
        link.submit(SubmitMode::Path, &[161, 0]).unwrap();
        link.submit(SubmitMode::Path, &[162, 3, 0, 0, 0, 0]).unwrap();
        assert_eq!(link.simple, 1);
        assert_eq!(link.path, 2);
    }

    #[test]
    fn test_boxed_dyn_link() {
        let mut link: Box<dyn S2Link + Send> = Box::new(CountingLink::default());
        link.submit(SubmitMode::Simple, &[167]).unwrap();
        assert!(matches!(link.read_reply(4), Err(LinkError::Timeout)));
        assert!(matches!(link.read_sensor_reply(), Err(LinkError::Timeout)));
        assert_eq!(link.sensor_reply_len(), 11);
    }

    #[test]
    fn test_sensor_read_uses_declared_len() {
        let mut link = CountingLink::default();
        assert!(link.read_sensor_reply().is_err());
        assert_eq!(link.reads, vec![11]);
    }

    #[test]
    fn test_link_error_display() {
        assert_eq!(LinkError::Timeout.to_string(), "Reply timeout");
        assert_eq!(LinkError::Disconnected.to_string(), "Link disconnected");

        let err: LinkError =
            LinkDeviceError::new(LinkDeviceErrorKind::Busy, "rfcomm busy").into();
        assert_eq!(err.to_string(), "Device Error: Busy: rfcomm busy");
    }

    #[test]
    fn test_device_error_fatal() {
        assert!(LinkDeviceError::new(LinkDeviceErrorKind::NotFound, "x").is_fatal());
        assert!(!LinkDeviceError::new(LinkDeviceErrorKind::Busy, "x").is_fatal());
        let err: LinkDeviceError = "plain".into();
        assert_eq!(err.kind, LinkDeviceErrorKind::Unknown);
    }
}
