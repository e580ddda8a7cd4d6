#[doc(hidden)]
#[macro_export]
macro_rules! time {
    ($what:expr, $($token:tt)*) => ({
        let start = std::time::Instant::now();
        let value = { $($token)* };
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "{} finished", $what);
        value
    });
}
