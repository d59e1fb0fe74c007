//! Target-specific async helpers.

/// Sleeps without blocking the UI thread on either target.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// Runs `tick` every `interval_ms`, forever. The first tick comes one full
/// interval after the call, so dropping the future and calling again restarts
/// the schedule.
pub async fn poll_every<F, Fut>(interval_ms: u64, mut tick: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    loop {
        sleep_ms(interval_ms).await;
        tick().await;
    }
}

pub fn platform_name() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "web"
    } else {
        "desktop"
    }
}
