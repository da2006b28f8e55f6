use chrono::Local;
use eyre::Result;
use fern::Dispatch;

/// Sets up the application logger on stdout.
///
/// The level comes from the `RUST_LOG` env var and defaults to `Info`.
///
/// # Returns
/// * `Result<()>` - Success or failure of logger setup
///
/// # Errors
/// * If logger configuration fails
/// * If a logger was already installed
pub fn setup_logger() -> Result<()> {
    Dispatch::new()
        .level(level_from_env())
        .chain(std::io::stdout())
        // Format log messages with time, level and module target
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ));
        })
        .apply()?;
    Ok(())
}

/// Logging level from `RUST_LOG`, defaulting to `Info`
fn level_from_env() -> log::LevelFilter {
    std::env::var("RUST_LOG")
        .map(|level| level.parse().unwrap_or(log::LevelFilter::Info))
        .unwrap_or(log::LevelFilter::Info)
}
