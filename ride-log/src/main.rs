use std::io;

use tracing_subscriber::EnvFilter;

use ride_log::clock::SystemClock;
use ride_log::config::DisplayConfig;
use ride_log::shell::Session;

/// Set to any value to turn off coloured status messages.
const NO_COLOR_VAR: &str = "RIDE_LOG_NO_COLOR";

fn main() -> io::Result<()> {
    // Logs go to stderr so they never mix with shell output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = DisplayConfig::default();
    if std::env::var_os(NO_COLOR_VAR).is_some() {
        config = config.without_color();
    }

    println!("Ride log. Type 'help' for commands.");

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut session = Session::new(stdin, stdout, SystemClock, config);
    session.run()
}
