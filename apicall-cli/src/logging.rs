use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG`, when set, wins over `-v`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,apicall_core=info,apicall_cli=info",
        2 => "info,apicall_core=debug,apicall_cli=debug",
        _ => "debug,apicall_core=trace,apicall_cli=trace",
    }
}
