//! tracing subscriber setup
//!
//! Logs go to stderr so that the step output on stdout stays readable.
//! `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "bulletin_split=debug,bulletin_split_common=debug,info"
    } else {
        "warn,bulletin_split=info"
    }
}
