//! 路径速度

use super::error::ClientError;
use std::fmt;

/// 路径速度（0~15，15 最快）
///
/// 协议中速度只占 4 位。此类型在构造时拒绝越界值，
/// 而不是像驱动层那样静默掩码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct PathSpeed(u8);

impl PathSpeed {
    pub const MIN: PathSpeed = PathSpeed(0);
    pub const MAX: PathSpeed = PathSpeed(15);

    /// 创建速度
    ///
    /// # 错误
    ///
    /// - `ClientError::InvalidSpeed`: `value > 15`
    pub fn new(value: u8) -> Result<Self, ClientError> {
        if value > Self::MAX.0 {
            return Err(ClientError::InvalidSpeed(value));
        }
        Ok(PathSpeed(value))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for PathSpeed {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for PathSpeed {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PathSpeed> for u8 {
    fn from(speed: PathSpeed) -> Self {
        speed.0
    }
}

impl fmt::Display for PathSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert_eq!(PathSpeed::new(0).unwrap(), PathSpeed::MIN);
        assert_eq!(PathSpeed::new(15).unwrap().value(), 15);
        assert!(matches!(PathSpeed::new(16), Err(ClientError::InvalidSpeed(16))));
        assert!(PathSpeed::try_from(255).is_err());
        assert_eq!(PathSpeed::default(), PathSpeed::MAX);
    }

    #[test]
    fn test_into_u8() {
        let raw: u8 = PathSpeed::new(7).unwrap().into();
        assert_eq!(raw, 7);
        assert_eq!(PathSpeed::new(7).unwrap().to_string(), "7");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let speed: PathSpeed = serde_json::from_str("9").unwrap();
        assert_eq!(speed.value(), 9);
        assert!(serde_json::from_str::<PathSpeed>("20").is_err());
        assert_eq!(serde_json::to_string(&speed).unwrap(), "9");
    }
}
