use env_logger::Env;

/// Initialise `env_logger`. `RUST_LOG` wins; otherwise each `-v` raises the
/// default level from `warn`.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
}
