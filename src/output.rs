use owo_colors::OwoColorize;

use crate::engine::{BatchReport, MoveStatus};
use crate::pipeline::PlanSummary;
use crate::preflight::PreflightReport;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as prompts and per-file results which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Show what a run is about to do, one line per manifest group.
pub fn print_plan(summary: &PlanSummary) {
    let verb = match summary.action {
        crate::engine::MoveAction::Relocate => "move",
        crate::engine::MoveAction::CopyOnly => "copy",
    };
    print_user(&format!(
        "Plan: {} {} file(s) ({})",
        verb,
        summary.total,
        summary.mode.verb()
    ));
    for (manifest, count) in &summary.per_manifest {
        print_user(&format!("  {}: {} file(s)", manifest, count));
    }
}

/// Show every validation violation on stderr; the caller decided nothing
/// will move.
pub fn print_violations(report: &PreflightReport) {
    print_error(&format!(
        "{} problem(s) found while validating {} planned move(s); nothing was moved",
        report.violations.len(),
        report.checked
    ));
    for v in &report.violations {
        eprintln!(
            "  {}: '{}' -> '{}': {}",
            v.manifest,
            v.source.display(),
            v.dest.display(),
            v.kind
        );
    }
}

/// Show how the batch went, with one line per failure.
pub fn print_outcome(report: &BatchReport) {
    let line = format!(
        "{} of {} file(s) done, {} failed",
        report.succeeded(),
        report.outcomes.len(),
        report.failed()
    );
    if report.is_complete_success() {
        print_success(&line);
    } else {
        print_warn(&line);
    }
    for outcome in &report.outcomes {
        if let MoveStatus::Failed { reason } = &outcome.status {
            eprintln!(
                "  failed: '{}' -> '{}': {}",
                outcome.source.display(),
                outcome.dest.display(),
                reason
            );
        }
    }
}
