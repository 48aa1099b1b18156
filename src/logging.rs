use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr and a file under `log_dir`. The default
/// level is `info`; the `debug_logging` setting raises it to `debug`, in
/// which case `RUST_LOG` may override the filter. When debug logging is
/// disabled the environment variable is ignored so a stray `RUST_LOG` cannot
/// turn on verbose output.
///
/// The returned guard must be kept alive for the process lifetime or tail
/// log lines are lost.
pub fn init(debug: bool, log_dir: &str) -> WorkerGuard {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let _ = std::fs::create_dir_all(log_dir);
    let appender = tracing_appender::rolling::never(log_dir, "fluenter.log");
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr.and(file_writer))
        .try_init();

    guard
}
