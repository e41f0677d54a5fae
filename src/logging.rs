//! 日誌初始化
//!
//! 使用 `RUST_LOG` 控制輸出層級，未設定時為 info。
//! 例如 `RUST_LOG=restock_ga=debug` 可看到每個世代的統計。

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌系統
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .init();
}
