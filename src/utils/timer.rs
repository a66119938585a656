//! Platform timer used to bound command execution.

use std::time::Duration;

/// Sleep for `duration` on the browser event loop.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Sleep for `duration` on the tokio timer. Requires a tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
