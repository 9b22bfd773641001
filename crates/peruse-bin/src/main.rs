//! Peruse entrypoint: CLI parsing, file loading, logging bootstrap and the
//! synchronous event loop wiring controller, renderer and terminal together.
//!
//! The loop blocks on the terminal's next event, hands it to the controller,
//! executes the returned draw instructions, and blocks again. No threads, no
//! timers; the only scoped resource is the terminal session itself, restored
//! on every exit path by the backend guard.

use anyhow::Result;
use clap::Parser;
use core_control::{Controller, Update};
use core_events::{PagerEvent, WindowSpec};
use core_render::writer::Writer;
use core_render::{RepaintPlan, draw_full, draw_scroll, draw_status, pad_window};
use core_terminal::{CrosstermBackend, TerminalCapabilities};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use thiserror::Error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "peruse", version, about = "Terminal text pager")]
struct Args {
    /// File to page through.
    pub path: PathBuf,
}

#[derive(Debug, Error)]
enum PagerError {
    /// The text source cannot be read. Fatal, reported before any terminal
    /// mode is entered.
    #[error("{path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    let lines = match load_document(&args.path) {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };
    info!(
        target: "runtime",
        file = %args.path.display(),
        line_count = lines.len(),
        "document_loaded"
    );

    match run(lines) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The guard has already restored the terminal by the time this
            // prints.
            eprintln!("peruse: {err:#}");
            tracing::error!(target: "runtime", error = %err, "session_error");
            ExitCode::from(1)
        }
    }
}

/// Read the whole source before the session starts; the document never
/// changes afterwards.
fn load_document(path: &Path) -> Result<Vec<String>, PagerError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| PagerError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        })?;
    Ok(content.lines().map(str::to_string).collect())
}

fn run(lines: Vec<String>) -> Result<()> {
    let caps = TerminalCapabilities::detect();
    let mut backend = CrosstermBackend::new();
    let mut term = backend.enter_guard()?;

    let mut spec = term.window_spec()?;
    let mut controller = Controller::new(lines, spec);
    info!(target: "runtime", rows = spec.rows(), cols = spec.cols(), "session_start");
    render(&controller.initial_update(), &spec, &caps)?;

    loop {
        match term.next_event()? {
            PagerEvent::Key(key) => {
                let update = controller.handle_key(key);
                if update.quit {
                    info!(target: "runtime", "quit");
                    return Ok(());
                }
                render(&update, &spec, &caps)?;
            }
            PagerEvent::Resize(cols, rows) => {
                info!(target: "runtime", cols, rows, "resize");
                spec = term.window_spec()?;
                render(&controller.resize(spec), &spec, &caps)?;
            }
        }
    }
}

/// Execute one set of draw instructions: pad the window, pick the repaint
/// path, repaint the status line, flush once.
fn render(update: &Update, spec: &WindowSpec, caps: &TerminalCapabilities) -> Result<()> {
    if update.is_noop() {
        return Ok(());
    }
    let mut w = Writer::new();
    if let Some(rep) = &update.repaint {
        let padded = pad_window(&rep.rows, spec);
        match rep.plan {
            RepaintPlan::Scroll { delta } if caps.supports_scroll_region => {
                draw_scroll(&mut w, spec, &padded, delta, &rep.highlight)
            }
            // Full plans, and scroll plans on terminals without scroll
            // support, repaint everything.
            _ => draw_full(&mut w, spec, &padded, &rep.highlight),
        }
    }
    if let Some(status) = &update.status {
        draw_status(&mut w, spec, status);
    }
    w.flush()
}

/// File-based tracing setup: stdout belongs to the pager UI, so diagnostics
/// go to `peruse.log` in the working directory, filtered by `RUST_LOG`.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("peruse.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "peruse.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => {
            // A subscriber is already installed (test harness); dropping the
            // guard shuts the worker down.
            None
        }
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_requires_a_path() {
        assert!(Args::try_parse_from(["peruse"]).is_err());
        let args = Args::try_parse_from(["peruse", "notes.txt"]).expect("path accepted");
        assert_eq!(args.path, PathBuf::from("notes.txt"));
    }

    #[test]
    fn load_document_splits_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "first\nsecond\n\nlast").unwrap();
        let lines = load_document(&path).unwrap();
        assert_eq!(lines, ["first", "second", "", "last"]);
    }

    #[test]
    fn load_document_of_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();
        assert!(load_document(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_reports_path_and_cause() {
        let err = load_document(Path::new("/no/such/file")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("/no/such/file: "), "got: {msg}");
    }
}
