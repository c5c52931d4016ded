//! Application orchestrator.
//! Loads config, initializes logging, installs signal handlers, then hands
//! the run to the library pipeline and maps its result to an exit code.

use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};
use tracing_appender::non_blocking::WorkerGuard;

use flatstash::output as out;
use flatstash::{
    load_config_from_yaml_path, pipeline, shutdown, validate_and_normalize, Config,
    ExitCode, FlatstashError, Mode, RunOutcome, CONFIG_ENV_VAR,
};

use crate::cli::Args;
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    let Some(config_path) = args.resolved_config() else {
        out::print_error(&format!(
            "No config file given. Pass CONFIG or set {}.",
            CONFIG_ENV_VAR
        ));
        return ExitCode::Usage;
    };

    let mut cfg = match load_config_from_yaml_path(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            out::print_error(&format!("{:#}", anyhow::Error::new(FlatstashError::from(e))));
            return ExitCode::Config;
        }
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = match init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            return ExitCode::General;
        }
    };

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    if let Err(e) = install_interrupt_handler(Arc::clone(&guard_slot)) {
        out::print_error(&format!("Failed to install the interrupt handler: {e}"));
        return ExitCode::General;
    }

    if shutdown::is_requested() {
        return ExitCode::Success;
    }

    debug!("Starting flatstash: {:?}", args);

    let mode = if args.undo { Mode::Restore } else { Mode::Stash };
    let code = run_pipeline(&mut cfg, mode, &args);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    code
}

/// Wire Ctrl-C to the cooperative shutdown flag. The guard slot is drained
/// in the handler so tracing_appender flushes even on an interrupted run.
fn install_interrupt_handler(
    guard_slot: Arc<Mutex<Option<WorkerGuard>>>,
) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        shutdown::request();
        out::print_warn("Received interrupt; finishing the current file...");
        if let Ok(mut g) = guard_slot.lock() {
            let _ = g.take();
        }
    })
}

fn run_pipeline(cfg: &mut Config, mode: Mode, args: &Args) -> ExitCode {
    // Stash runs read manifests; restore runs read the destination tree.
    if let Err(e) = validate_and_normalize(cfg, mode == Mode::Stash) {
        let e = FlatstashError::from(e);
        let code = e.exit_code();
        error!(code = i32::from(code), kind = e.kind(), error = %e, "Config rejected");
        out::print_error(&format!("{:#}", anyhow::Error::new(e)));
        return code;
    }

    let assume_yes = args.yes;
    let result = pipeline::run(cfg, mode, args.dry_run, |summary| {
        out::print_plan(summary);
        if assume_yes {
            out::print_info("Confirmation skipped (--yes).");
            return true;
        }
        prompt_yes(summary.total)
    });

    match result {
        Ok(run) => match &run.outcome {
            RunOutcome::DryRun { summary } => {
                out::print_plan(summary);
                out::print_success("Dry run complete; nothing was moved.");
                ExitCode::Success
            }
            RunOutcome::Declined => {
                out::print_info("Canceled; nothing was moved.");
                ExitCode::Success
            }
            RunOutcome::Executed { report, logged } => {
                out::print_outcome(report);
                out::print_info(&format!(
                    "{} row(s) written to move log '{}'",
                    logged,
                    cfg.move_log.display()
                ));
                if report.failed() > 0 {
                    ExitCode::PartialFailure
                } else {
                    ExitCode::Success
                }
            }
        },
        Err(e) => {
            let code = e.exit_code();
            error!(code = i32::from(code), kind = e.kind(), error = %e, "Run failed");
            match e {
                FlatstashError::Validation { report } => out::print_violations(&report),
                other => out::print_error(&format!("{:#}", anyhow::Error::new(other))),
            }
            code
        }
    }
}

fn prompt_yes(total: usize) -> bool {
    out::print_user(&format!("Type 'yes' to proceed with {total} file(s):"));
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    line.trim().eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_interrupt_handler_is_an_error_not_a_panic() {
        let slot = Arc::new(Mutex::new(None));
        install_interrupt_handler(Arc::clone(&slot)).expect("first install");
        // ctrlc allows only one handler per process; the second attempt must
        // surface as an Err the caller can map to an exit code.
        let err = install_interrupt_handler(slot).expect_err("second install");
        assert!(!err.to_string().is_empty());
    }
}
