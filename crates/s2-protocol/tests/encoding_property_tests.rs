//! 编码的属性测试
//!
//! 使用 proptest 验证字段宽度规则。

use proptest::prelude::*;
use s2_protocol::{PathCommand, bytes_to_i32_be};

proptest! {
    /// setPosn 的 32 位字段可完整还原（含负数）
    #[test]
    fn set_posn_roundtrip(x in any::<i32>(), y in any::<i32>()) {
        let packet = PathCommand::set_posn(x, y).to_packet().unwrap();
        let bytes = packet.as_bytes();
        prop_assert_eq!(bytes_to_i32_be([bytes[1], bytes[2], bytes[3], bytes[4]]), x);
        prop_assert_eq!(bytes_to_i32_be([bytes[5], bytes[6], bytes[7], bytes[8]]), y);
    }

    /// setAngle 的 32 位字段可完整还原
    #[test]
    fn set_angle_roundtrip(angle in any::<i32>()) {
        let packet = PathCommand::set_angle(angle).to_packet().unwrap();
        let b = packet.as_bytes();
        prop_assert_eq!(bytes_to_i32_be([b[1], b[2], b[3], b[4]]), angle);
    }

    /// 运动字段等于 v mod 65536
    #[test]
    fn motion_fields_truncate_to_low16(x in any::<i32>(), y in any::<i32>(), r in any::<i32>()) {
        let low = |v: i32| (v.rem_euclid(65536) as u16).to_be_bytes();

        for cmd in [PathCommand::move_to(x, y), PathCommand::move_by(x, y)] {
            let p = cmd.to_packet().unwrap();
            prop_assert_eq!(&p.as_bytes()[2..4], &low(x)[..]);
            prop_assert_eq!(&p.as_bytes()[4..6], &low(y)[..]);
        }

        for cmd in [PathCommand::turn_to(x), PathCommand::turn_by(x)] {
            let p = cmd.to_packet().unwrap();
            prop_assert_eq!(&p.as_bytes()[2..4], &low(x)[..]);
        }

        for cmd in [PathCommand::arc_to(x, y, r), PathCommand::arc_by(x, y, r)] {
            let p = cmd.to_packet().unwrap();
            prop_assert_eq!(&p.as_bytes()[2..4], &low(x)[..]);
            prop_assert_eq!(&p.as_bytes()[4..6], &low(y)[..]);
            prop_assert_eq!(&p.as_bytes()[6..8], &low(r)[..]);
        }
    }

    /// To/By 变体只在长度标志上不同
    #[test]
    fn to_and_by_share_payload_shape(x in any::<i32>(), y in any::<i32>(), r in any::<i32>()) {
        let pairs = [
            (PathCommand::move_to(x, y), PathCommand::move_by(x, y)),
            (PathCommand::turn_to(x), PathCommand::turn_by(x)),
            (PathCommand::arc_to(x, y, r), PathCommand::arc_by(x, y, r)),
        ];
        for (to, by) in pairs {
            let to = to.to_packet().unwrap();
            let by = by.to_packet().unwrap();
            prop_assert_eq!(to.len(), by.len());
            prop_assert_eq!(to.as_bytes()[0], by.as_bytes()[0]);
            prop_assert_eq!(to.as_bytes()[1], 3);
            prop_assert_eq!(by.as_bytes()[1], 5);
            prop_assert_eq!(&to.as_bytes()[2..], &by.as_bytes()[2..]);
        }
    }
}
