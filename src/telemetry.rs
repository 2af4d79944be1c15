//! 日志初始化
//!
//! 使用 `RUST_LOG` 控制日志级别（默认 `info`），时间戳使用本地时区的 RFC 3339 格式。

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 初始化全局 tracing subscriber，只应在进程启动时调用一次。
pub fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTime::rfc_3339()))
        .try_init()?;

    Ok(())
}
