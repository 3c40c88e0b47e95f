use std::fmt::Write;

use crate::batch::BatchReport;

/// Tekstrapport: fordeling per label + avviste rader.
pub fn render_report(report: &BatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Risk Report ({}) ---", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    for (label, n) in &report.counts {
        let pct = if report.total == 0 { 0.0 } else { 100.0 * *n as f64 / report.total as f64 };
        let _ = writeln!(out, "{:<9} {:>7} ({:5.1}%)", label.as_str(), n, pct);
    }
    let _ = writeln!(out, "Rejected: {}", report.rejected.len());
    for r in &report.rejected {
        let _ = writeln!(out, "  row {}: {}", r.row, r.error);
    }
    let _ = write!(out, "Total: {}", report.total);
    out
}

pub fn print_report(report: &BatchReport) {
    println!("{}", render_report(report));
}
