//! Mock 链路
//!
//! 用于测试的模拟链路：记录每一次提交，模拟机器人对路径命令的响应，
//! 并支持注入一次性故障和逐字节发送延迟。
//!
//! 启用方式：`s2-link = { features = ["mock"] }`

use crate::{LinkDeviceError, LinkDeviceErrorKind, LinkError, S2Link, SubmitMode};
use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;
use s2_protocol::{LENGTH_FLAG_RELATIVE, Opcode, PATH_MODE_ENTER, bytes_to_i16_be, bytes_to_i32_be};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// 默认传感器应答长度（Scribbler 2 核心传感器应答为 11 字节）
pub const DEFAULT_SENSOR_REPLY_LEN: usize = 11;

/// Mock 链路配置
#[derive(Debug, Clone)]
pub struct MockLinkConfig {
    /// 每份传感器应答的字节数
    pub sensor_reply_len: usize,
    /// 逐字节写入“线路”时的间隔（用于放大并发窗口）
    pub byte_delay: Duration,
    /// 是否模拟机器人自动应答
    ///
    /// 关闭后只返回通过 [`MockLink::push_reply`] 预置的应答。
    pub simulate_robot: bool,
}

impl Default for MockLinkConfig {
    fn default() -> Self {
        Self {
            sensor_reply_len: DEFAULT_SENSOR_REPLY_LEN,
            byte_delay: Duration::ZERO,
            simulate_robot: true,
        }
    }
}

/// 故障注入点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    /// 下一次提交失败（`LinkError::Disconnected`）
    Submit,
    /// 下一次读取失败（`LinkError::Timeout`）
    Reply,
    /// 下一次提交返回设备错误
    Device,
}

/// 一次提交记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: SubmitMode,
    pub bytes: Vec<u8>,
}

/// 模拟的机器人位姿状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockRobotState {
    pub x: i32,
    pub y: i32,
    pub angle: i32,
    pub path_active: bool,
    /// 路径模式外收到的运动命令数
    pub motions_outside_path: u32,
}

/// 模拟链路
pub struct MockLink {
    config: MockLinkConfig,
    /// 当前应答流
    reply_stream: BytesMut,
    /// 预置的应答块（按提交顺序逐块放入应答流）
    scripted: VecDeque<Bytes>,
    submissions: Vec<Submission>,
    /// 线路字节日志（所有提交按实际写出顺序拼接）
    wire: Arc<Mutex<Vec<u8>>>,
    pending_failure: Option<FailurePoint>,
    state: MockRobotState,
}

impl MockLink {
    pub fn new(config: MockLinkConfig) -> Self {
        Self {
            config,
            reply_stream: BytesMut::new(),
            scripted: VecDeque::new(),
            submissions: Vec::new(),
            wire: Arc::new(Mutex::new(Vec::new())),
            pending_failure: None,
            state: MockRobotState::default(),
        }
    }

    /// 只回放预置应答的链路
    pub fn scripted() -> Self {
        Self::new(MockLinkConfig {
            simulate_robot: false,
            ..Default::default()
        })
    }

    /// 预置一块应答，下一次提交后可读
    pub fn push_reply(&mut self, reply: impl Into<Bytes>) -> &mut Self {
        self.scripted.push_back(reply.into());
        self
    }

    /// 注入一次性故障
    pub fn inject_failure(&mut self, point: FailurePoint) -> &mut Self {
        self.pending_failure = Some(point);
        self
    }

    /// 全部提交记录
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// 最近一次提交
    pub fn last_submission(&self) -> Option<&Submission> {
        self.submissions.last()
    }

    /// 线路字节日志句柄
    pub fn wire(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.wire)
    }

    /// 模拟机器人状态
    pub fn robot_state(&self) -> MockRobotState {
        self.state
    }

    /// 应答流中尚未读取的字节数
    pub fn pending_reply_len(&self) -> usize {
        self.reply_stream.len()
    }

    fn take_failure(&mut self, points: &[FailurePoint]) -> Option<FailurePoint> {
        match self.pending_failure {
            Some(p) if points.contains(&p) => self.pending_failure.take(),
            _ => None,
        }
    }

    fn write_wire(&self, packet: &[u8]) {
        for &byte in packet {
            self.wire.lock().push(byte);
            if !self.config.byte_delay.is_zero() {
                std::thread::sleep(self.config.byte_delay);
            }
        }
    }

    fn submit_inner(&mut self, mode: SubmitMode, packet: &[u8]) -> Result<(), LinkError> {
        match self.take_failure(&[FailurePoint::Submit, FailurePoint::Device]) {
            Some(FailurePoint::Device) => {
                return Err(LinkDeviceError::new(
                    LinkDeviceErrorKind::InvalidFraming,
                    "injected device failure",
                )
                .into());
            },
            Some(_) => return Err(LinkError::Disconnected),
            None => {},
        }

        trace!(?mode, len = packet.len(), "mock link submit");
        self.write_wire(packet);
        self.submissions.push(Submission {
            mode,
            bytes: packet.to_vec(),
        });

        // 新的应答覆盖上一次未读完的应答
        self.reply_stream.clear();
        if let Some(reply) = self.scripted.pop_front() {
            self.reply_stream.extend_from_slice(&reply);
        } else if self.config.simulate_robot {
            let reply = self.process_packet(packet);
            self.reply_stream.extend_from_slice(&reply);
        }
        Ok(())
    }

    /// 模拟机器人执行命令并生成应答
    fn process_packet(&mut self, packet: &[u8]) -> Vec<u8> {
        let Some(&op) = packet.first() else {
            return Vec::new();
        };
        let Ok(opcode) = Opcode::try_from(op) else {
            return self.sensor_reply(op);
        };

        let i16_at = |i: usize| -> i32 {
            packet
                .get(i..i + 2)
                .map(|b| bytes_to_i16_be([b[0], b[1]]) as i32)
                .unwrap_or(0)
        };
        let i32_at = |i: usize| -> i32 {
            packet
                .get(i..i + 4)
                .map(|b| bytes_to_i32_be([b[0], b[1], b[2], b[3]]))
                .unwrap_or(0)
        };
        let relative = packet.get(1) == Some(&LENGTH_FLAG_RELATIVE);

        match opcode {
            Opcode::SetPath => {
                self.state.path_active = packet.get(1) == Some(&PATH_MODE_ENTER);
            },
            Opcode::GetPosn => {
                let mut reply = self.state.x.to_be_bytes().to_vec();
                reply.extend_from_slice(&self.state.y.to_be_bytes());
                return reply;
            },
            Opcode::GetAngle => return self.state.angle.to_be_bytes().to_vec(),
            Opcode::SetPosn => {
                self.state.x = i32_at(1);
                self.state.y = i32_at(5);
            },
            Opcode::SetAngle => self.state.angle = i32_at(1),
            Opcode::Move | Opcode::Arc => {
                self.note_motion();
                let (x, y) = (i16_at(2), i16_at(4));
                if relative {
                    self.state.x = self.state.x.wrapping_add(x);
                    self.state.y = self.state.y.wrapping_add(y);
                } else {
                    self.state.x = x;
                    self.state.y = y;
                }
            },
            Opcode::Turn => {
                self.note_motion();
                let angle = i16_at(2);
                self.state.angle = if relative {
                    self.state.angle.wrapping_add(angle)
                } else {
                    angle
                };
            },
        }
        self.sensor_reply(op)
    }

    fn note_motion(&mut self) {
        if !self.state.path_active {
            self.state.motions_outside_path += 1;
        }
    }

    /// 传感器应答：Byte 0 为命令操作码，Byte 1 为路径模式标志，其余为 0
    fn sensor_reply(&self, op: u8) -> Vec<u8> {
        let mut reply = vec![0u8; self.config.sensor_reply_len];
        if let Some(b) = reply.get_mut(0) {
            *b = op;
        }
        if let Some(b) = reply.get_mut(1) {
            *b = self.state.path_active as u8;
        }
        reply
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new(MockLinkConfig::default())
    }
}

impl S2Link for MockLink {
    fn submit_simple(&mut self, packet: &[u8]) -> Result<(), LinkError> {
        self.submit_inner(SubmitMode::Simple, packet)
    }

    fn submit_path_command(&mut self, packet: &[u8]) -> Result<(), LinkError> {
        self.submit_inner(SubmitMode::Path, packet)
    }

    fn read_reply(&mut self, len: usize) -> Result<Bytes, LinkError> {
        if self.take_failure(&[FailurePoint::Reply]).is_some() {
            return Err(LinkError::Timeout);
        }
        if self.reply_stream.is_empty() {
            return Err(LinkError::Timeout);
        }
        let n = len.min(self.reply_stream.len());
        Ok(self.reply_stream.split_to(n).freeze())
    }

    fn sensor_reply_len(&self) -> usize {
        self.config.sensor_reply_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_submissions() {
        let mut link = MockLink::default();
        link.submit_simple(&[161, 1, 0, 15]).unwrap();
        link.submit_path_command(&[161, 0]).unwrap();

        assert_eq!(link.submissions().len(), 2);
        assert_eq!(link.submissions()[0].mode, SubmitMode::Simple);
        assert_eq!(link.last_submission().unwrap().bytes, vec![161, 0]);
        assert_eq!(*link.wire().lock(), vec![161, 1, 0, 15, 161, 0]);
    }

    #[test]
    fn test_simulated_pose() {
        let mut link = MockLink::default();
        link.submit_simple(&[166, 0xFF, 0xFF, 0xFF, 0x9C, 0x00, 0x00, 0x00, 0x05]).unwrap();
        let sensors = link.read_sensor_reply().unwrap();
        assert_eq!(sensors.len(), DEFAULT_SENSOR_REPLY_LEN);
        assert_eq!(sensors[0], 166);

        link.submit_simple(&[165]).unwrap();
        let reply = link.read_reply(8).unwrap();
        assert_eq!(&reply[..], &[0xFF, 0xFF, 0xFF, 0x9C, 0x00, 0x00, 0x00, 0x05]);
    }

    #[test]
    fn test_simulated_relative_motion() {
        let mut link = MockLink::default();
        link.submit_simple(&[161, 1, 0, 15]).unwrap();
        link.submit_path_command(&[162, 3, 0x00, 0x0A, 0x00, 0x14]).unwrap();
        link.submit_path_command(&[162, 5, 0x00, 0x01, 0xFF, 0xFF]).unwrap();
        link.submit_path_command(&[164, 5, 0x00, 0x2D]).unwrap();

        let state = link.robot_state();
        assert_eq!((state.x, state.y, state.angle), (11, 19, 45));
        assert!(state.path_active);
        assert_eq!(state.motions_outside_path, 0);
    }

    #[test]
    fn test_motion_outside_path_counted() {
        let mut link = MockLink::default();
        link.submit_path_command(&[164, 3, 0x00, 0x2D]).unwrap();
        assert_eq!(link.robot_state().motions_outside_path, 1);
    }

    #[test]
    fn test_scripted_reply_and_partial_read() {
        let mut link = MockLink::scripted();
        link.push_reply(vec![0x00, 0x01]);
        link.submit_simple(&[167]).unwrap();

        let reply = link.read_reply(4).unwrap();
        assert_eq!(reply.len(), 2);
        assert!(matches!(link.read_reply(4), Err(LinkError::Timeout)));
    }

    #[test]
    fn test_partial_sensor_reply_passed_through() {
        let mut link = MockLink::scripted();
        link.push_reply(vec![0xA6, 0x01, 0x00, 0x00, 0x00]);
        link.submit_simple(&[166, 0, 0, 0, 1, 0, 0, 0, 2]).unwrap();

        // 链路只负责搬运字节，完整性由解码器对照 sensor_reply_len 判定
        assert_eq!(link.sensor_reply_len(), DEFAULT_SENSOR_REPLY_LEN);
        assert_eq!(link.read_sensor_reply().unwrap().len(), 5);
    }

    #[test]
    fn test_injected_failures_are_one_shot() {
        let mut link = MockLink::default();
        link.inject_failure(FailurePoint::Submit);
        assert!(matches!(link.submit_simple(&[165]), Err(LinkError::Disconnected)));
        assert!(link.submissions().is_empty());
        link.submit_simple(&[165]).unwrap();

        link.inject_failure(FailurePoint::Reply);
        assert!(matches!(link.read_reply(8), Err(LinkError::Timeout)));
        assert_eq!(link.read_reply(8).unwrap().len(), 8);

        link.inject_failure(FailurePoint::Device);
        assert!(matches!(link.submit_simple(&[167]), Err(LinkError::Device(_))));
    }
}
