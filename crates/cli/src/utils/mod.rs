//! Terminal and logging setup shared by the wrap3 binaries.

use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

/// Initializes a tracing subscriber for logging.
///
/// Events are written to stderr and filtered through `RUST_LOG`, e.g. `RUST_LOG=wrap3=trace`.
pub fn subscriber() {
    let registry = tracing_subscriber::Registry::default().with(env_filter());
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);
    if let Err(err) = registry.with(fmt).try_init() {
        debug!("tracing subscriber already installed: {err}");
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy()
}

/// Enables colored output when the terminal supports it and `NO_COLOR` is not set.
pub fn enable_paint() {
    let enable = yansi::Condition::os_support() && yansi::Condition::tty_and_color_live();
    yansi::whenever(yansi::Condition::cached(enable));
}

/// Conditionally print a message.
///
/// This macro accepts a predicate and the message to print if the predicate is true.
///
/// ```ignore
/// let quiet = true;
/// p_println!(!quiet => "Hello, world!");
/// ```
#[macro_export]
macro_rules! p_println {
    ($p:expr => $($arg:tt)*) => {{
        if $p {
            println!($($arg)*)
        }
    }}
}
