//! 应答解析器
//!
//! 在持锁期间从链路的应答流中按声明的返回类型读取数据。
//! 不重试：应答不完整直接返回错误。

use crate::error::DriverError;
use s2_link::S2Link;
use s2_protocol::{Coordinate, INT32_REPLY_LEN, SensorSnapshot, decode_i32};
use tracing::trace;

/// 应答解析器
///
/// 只借用链路，生命周期不超过一次命令交换。
pub struct ResponseDecoder<'a, L: S2Link + ?Sized> {
    link: &'a mut L,
}

impl<'a, L: S2Link + ?Sized> ResponseDecoder<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    /// 读取一个 int32（4 字节，大端，补码）
    pub fn decode_i32(&mut self) -> Result<i32, DriverError> {
        let reply = self.link.read_reply(INT32_REPLY_LEN)?;
        let value = decode_i32(&reply)?;
        trace!(value, "decoded int32 reply");
        Ok(value)
    }

    /// 读取两个连续的 int32，先 x 后 y
    pub fn decode_coordinate(&mut self) -> Result<Coordinate, DriverError> {
        let reply = self.link.read_reply(2 * INT32_REPLY_LEN)?;
        let posn = Coordinate::decode(&reply)?;
        trace!(x = posn.x, y = posn.y, "decoded coordinate reply");
        Ok(posn)
    }

    /// 读取一份传感器快照
    ///
    /// 不足链路声明的快照长度时返回 `ShortReply`，不会截断后继续使用。
    pub fn decode_sensor_snapshot(&mut self) -> Result<SensorSnapshot, DriverError> {
        let expected = self.link.sensor_reply_len();
        let reply = self.link.read_sensor_reply()?;
        let snapshot = SensorSnapshot::from_reply(reply, expected)?;
        trace!(len = snapshot.len(), "decoded sensor reply");
        Ok(snapshot)
    }
}
