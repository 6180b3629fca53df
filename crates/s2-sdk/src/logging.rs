//! 日志初始化
//!
//! SDK 内部统一使用 `tracing` 记录日志。这里提供一个默认的订阅器：
//! 过滤规则取自 `RUST_LOG`，未设置时使用 [`DEFAULT_LOG_DIRECTIVES`]；
//! 同时把 `log` crate 的记录桥接进 `tracing`。

use tracing_subscriber::EnvFilter;

/// 默认过滤规则
pub const DEFAULT_LOG_DIRECTIVES: &str = "s2_sdk=info,s2_client=info,s2_driver=info";

/// 初始化全局日志订阅器
///
/// 已经初始化过（或宿主程序已安装自己的订阅器）时什么都不做。
pub fn init_logger() {
    if let Err(e) = try_init_logger() {
        tracing::debug!("logger already initialized: {}", e);
    }
}

/// 初始化全局日志订阅器，失败时返回错误
pub fn try_init_logger() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    log::debug!("s2-sdk logger initialized");
    Ok(())
}
