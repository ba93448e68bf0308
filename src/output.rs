//! Terminal output formatting.
//!
//! Human-readable rendering of a finished scan. Thin presentation glue
//! over [`ScanReport`]; the engine itself never prints.

use crate::scanner::ScanReport;
use console::style;
use std::io::{self, Write};

/// Print a summary table of open ports to stdout.
pub fn print_report(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(
        out,
        "  {} {} ({}) - {} ports in {:.2}s",
        style("Scanned").bold(),
        report.target,
        report.range,
        report.ports_scanned,
        report.duration_ms as f64 / 1000.0
    )?;

    if report.results.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").yellow())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {:>6}  {:<8}  {:<12}  {}",
        style("PORT").bold(),
        style("STATE").bold(),
        style("SERVICE").bold(),
        style("BANNER").bold()
    )?;

    for result in &report.results {
        writeln!(
            out,
            "  {:>6}  {:<8}  {:<12}  {}",
            result.port,
            style(result.status.to_string()).green().bold(),
            result.service,
            style(truncate(&result.banner, 48)).dim()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {} {} open",
        style(report.open_count()).green().bold(),
        if report.open_count() == 1 { "port" } else { "ports" }
    )?;
    writeln!(out)?;

    Ok(())
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }
}
