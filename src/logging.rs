//! Tracing setup for the binary.
//!
//! One subscriber serves the whole run: an EnvFilter derived from the
//! configured LogLevel, a stdout layer (compact or JSON), and optionally a
//! non-blocking file layer. File logging is refused when any ancestor of the
//! log path is a symlink; the run then continues with stdout only.

use anyhow::Result;
use chrono::Local;
use flatstash::output as out;
use flatstash::{default_log_path, path_has_symlink_ancestor, LogLevel};
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{registry, Layer, Registry};

/// Local wall-clock stamps, DD/MM/YY HH:MM:SS.
struct LocalStamp;

impl FormatTime for LocalStamp {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn filter_directive(lvl: &LogLevel) -> &'static str {
    match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    }
}

/// One formatted layer over an arbitrary writer. Boxing lets the stdout and
/// file layers share a Vec regardless of format.
fn fmt_layer<W>(json: bool, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let base = tsfmt::layer()
        .with_writer(writer)
        .with_timer(LocalStamp)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true);
    if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    }
}

/// Open the log file for append behind a non-blocking worker.
///
/// Returns None (after explaining why on stderr) instead of failing the run:
/// a missing log file is an inconvenience, not a reason to abort a batch.
fn open_log_file(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            out::print_warn(&format!(
                "not logging to '{}': an ancestor of the path is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "not logging to '{}': cannot inspect the path: {e}",
                path.display()
            ));
            return None;
        }
    }

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match std::fs::OpenOptions::new().append(true).create(true).open(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("cannot open log file '{}': {e}", path.display()));
            None
        }
    }
}

/// Install the global subscriber. The returned guard, when present, must
/// live until shutdown so the file worker flushes its queue.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let mut layers = vec![fmt_layer(json, std::io::stdout)];

    let mut guard = None;
    if let Some(path) = log_file {
        if let Some((writer, g)) = open_log_file(path) {
            layers.push(fmt_layer(json, writer));
            guard = Some(g);
        } else {
            out::print_warn(&format!(
                "file logging to '{}' is off for this run; events go to stdout only",
                path.display()
            ));
            if let Some(fallback) = default_log_path() {
                out::print_info(&format!(
                    "the default log location '{}' may work instead",
                    fallback.display()
                ));
            }
        }
    }

    registry()
        .with(layers)
        .with(EnvFilter::new(filter_directive(lvl)))
        .init();
    Ok(guard)
}
