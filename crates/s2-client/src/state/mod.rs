//! 路径模式状态机

mod machine;

pub use machine::*;
