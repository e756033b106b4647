//! Human-readable run banner and summary

use std::fmt::{self, Write};

use http_bench_core::RunReport;

use crate::cli::RunPlan;

/// Print what is about to run
pub fn print_banner(plan: &RunPlan) {
    let template = &plan.template;
    let config = &plan.config;

    println!("Target: {}", template.url());
    println!("Method: {}", template.method());
    println!("Concurrency: {}", config.concurrency);
    println!("Total Requests: {}", config.total_requests);
    println!("Timeout: {:?}", config.timeout);
    if config.rate_limit > 0 {
        println!("Rate Limit: {} req/s", config.rate_limit);
    }
    if !template.headers().is_empty() {
        println!("Custom Headers:");
        for (name, value) in template.headers() {
            println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }
    if !template.body().is_empty() {
        println!("Body: {} bytes", template.body().len());
    }
    println!();
}

/// Render the final summary
///
/// Latency lines appear only when at least one request succeeded.
pub fn render(report: &RunReport, total_requests: u64) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_summary(&mut out, report, total_requests);
    out
}

fn write_summary(out: &mut impl Write, report: &RunReport, total_requests: u64) -> fmt::Result {
    let summary = &report.summary;

    writeln!(out)?;
    writeln!(out, "--- Summary ---")?;
    if report.interrupted {
        writeln!(
            out,
            "Interrupted: {}/{} requests sent",
            summary.total_sent, total_requests
        )?;
    }
    writeln!(out, "Total Time: {:?}", report.elapsed)?;
    writeln!(out, "Total Requests: {total_requests}")?;
    writeln!(out, "Workers: {}", report.total_workers())?;
    writeln!(out, "Sent: {}", summary.total_sent)?;
    writeln!(out, "Success: {}", summary.total_success)?;
    writeln!(out, "Fail: {}", summary.total_fail)?;
    writeln!(out, "Success Rate: {:.2}%", report.success_rate() * 100.0)?;
    writeln!(out, "Requests/sec: {:.2}", report.requests_per_second)?;

    if summary.total_success > 0 {
        if let (Some(min), Some(max), Some(avg)) = (
            summary.min_latency(),
            summary.max_latency(),
            summary.average_latency(),
        ) {
            writeln!(out, "Min Latency: {min:?}")?;
            writeln!(out, "Max Latency: {max:?}")?;
            writeln!(out, "Avg Latency: {avg:?}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_bench_core::RunSummary;
    use std::time::Duration;

    fn report(summary: RunSummary) -> RunReport {
        RunReport {
            summary,
            workers: Vec::new(),
            elapsed: Duration::from_secs(2),
            requests_per_second: summary.total_completed() as f64 / 2.0,
            started_at: chrono::Utc::now(),
            interrupted: false,
        }
    }

    #[test]
    fn test_render_with_latency() {
        let text = render(
            &report(RunSummary {
                total_sent: 4,
                total_success: 3,
                total_fail: 1,
                min_latency_ns: Some(1_000_000),
                max_latency_ns: Some(4_000_000),
                sum_latency_ns: 9_000_000,
                average_latency_ns: Some(3_000_000),
            }),
            4,
        );

        assert!(text.contains("Total Requests: 4"));
        assert!(text.contains("Sent: 4"));
        assert!(text.contains("Workers: 0"));
        assert!(text.contains("Success: 3"));
        assert!(text.contains("Fail: 1"));
        assert!(text.contains("Success Rate: 75.00%"));
        assert!(text.contains("Requests/sec: 2.00"));
        assert!(text.contains("Min Latency: 1ms"));
        assert!(text.contains("Max Latency: 4ms"));
        assert!(text.contains("Avg Latency: 3ms"));
        assert!(!text.contains("Interrupted"));
    }

    #[test]
    fn test_render_omits_latency_without_success() {
        let text = render(
            &report(RunSummary {
                total_sent: 2,
                total_success: 0,
                total_fail: 2,
                min_latency_ns: Some(5),
                max_latency_ns: Some(9),
                sum_latency_ns: 14,
                average_latency_ns: None,
            }),
            2,
        );

        assert!(text.contains("Fail: 2"));
        assert!(!text.contains("Latency"));
    }

    #[test]
    fn test_render_interrupted() {
        let mut r = report(RunSummary {
            total_sent: 3,
            total_success: 3,
            total_fail: 0,
            min_latency_ns: Some(1),
            max_latency_ns: Some(1),
            sum_latency_ns: 3,
            average_latency_ns: Some(1),
        });
        r.interrupted = true;

        let text = render(&r, 10);
        assert!(text.contains("Interrupted: 3/10 requests sent"));
        assert!(text.contains("Total Requests: 10"));
        assert!(text.contains("Sent: 3"));
    }
}
