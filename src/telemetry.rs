//! Opt-in `tracing` subscriber for hosts that have none of their own.
//!
//! The library only emits events; nothing is printed until a subscriber is
//! installed, either here or by the host.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `easy_chart=info`.
///
/// `false` means nothing was installed: the `telemetry` feature is off or a
/// global subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("easy_chart=info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
