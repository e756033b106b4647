//! CLI argument parsing and run dispatch

mod input;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use http_bench_core::{LoadConfig, OrchestratorBuilder, RequestTemplate};

use crate::progress::ProgressReporter;
use crate::summary;

use input::{load_body, normalize_target, parse_headers};

const PROGRESS_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "http-bench")]
#[command(author, version, about = "Concurrent HTTP load generator", long_about = None)]
pub struct Cli {
    /// Target URL or host (takes precedence over --url)
    pub target: Option<String>,

    /// Target URL
    #[arg(long, default_value = "http://localhost:8000")]
    pub url: String,

    /// Number of concurrent workers (values below 1 run a single worker)
    #[arg(short = 'c', long, default_value_t = 50, allow_negative_numbers = true)]
    pub concurrency: i64,

    /// Total number of requests
    #[arg(short = 'n', long = "requests", default_value_t = 1000, allow_negative_numbers = true)]
    pub requests: i64,

    /// HTTP method
    #[arg(short = 'X', long = "method", default_value = "GET")]
    pub method: String,

    /// File whose contents are sent as the request body
    #[arg(long)]
    pub body: Option<PathBuf>,

    /// Custom header, repeatable: -H 'Key: Value'
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Per-request timeout in seconds (0 uses the default)
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Global rate limit in requests per second (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub rate: u32,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs, resolved from the command line
#[derive(Debug)]
pub struct RunPlan {
    pub config: LoadConfig,
    pub template: RequestTemplate,
}

impl Cli {
    /// URL the run targets
    pub fn target_url(&self) -> String {
        match &self.target {
            Some(target) => normalize_target(target),
            None => self.url.clone(),
        }
    }

    /// Validate flags and build the load configuration and request template
    pub fn resolve(&self) -> Result<RunPlan> {
        if self.requests <= 0 {
            bail!("n must be > 0");
        }
        let total_requests =
            usize::try_from(self.requests).context("request count does not fit in usize")?;
        let concurrency = usize::try_from(self.concurrency.max(1)).unwrap_or(usize::MAX);

        let body = load_body(self.body.as_deref())?;
        let headers = parse_headers(&self.headers);

        let url = self.target_url();
        let template = RequestTemplate::new(&self.method, &url)
            .with_context(|| format!("Invalid request for {url}"))?
            .with_headers(headers)?
            .with_body(body);

        let config = LoadConfig::new(concurrency, total_requests)
            .with_rate_limit(self.rate)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_insecure(self.insecure)
            .normalized();

        Ok(RunPlan { config, template })
    }

    /// Execute the run and print the result
    pub async fn run(&self) -> Result<()> {
        let plan = self.resolve()?;

        if !self.json {
            summary::print_banner(&plan);
        }

        let total = plan.config.total_requests as u64;
        let orchestrator = OrchestratorBuilder::new()
            .config(plan.config)
            .template(plan.template)
            .build()?;

        let progress = (!self.json)
            .then(|| ProgressReporter::spawn(orchestrator.stats(), total, PROGRESS_INTERVAL));

        let result = orchestrator.run_with_signal_handling().await;

        if let Some(progress) = progress {
            progress.finish();
        }

        let report = result?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", summary::render(&report, total));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("http-bench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.url, "http://localhost:8000");
        assert_eq!(cli.concurrency, 50);
        assert_eq!(cli.requests, 1000);
        assert_eq!(cli.method, "GET");
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.rate, 0);
        assert!(!cli.insecure);
        assert!(!cli.json);

        let plan = cli.resolve().unwrap();
        assert_eq!(plan.config.concurrency, 50);
        assert_eq!(plan.config.total_requests, 1000);
        assert_eq!(plan.config.timeout, Duration::from_secs(10));
        assert_eq!(plan.template.url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_positional_target_overrides_url() {
        let cli = parse(&["--url", "http://ignored:1", "192.0.2.7:9000"]);
        assert_eq!(cli.target_url(), "http://192.0.2.7:9000");
    }

    #[test]
    fn test_zero_requests_rejected() {
        let err = parse(&["-n", "0"]).resolve().unwrap_err();
        assert_eq!(err.to_string(), "n must be > 0");

        let err = parse(&["-n", "-5"]).resolve().unwrap_err();
        assert_eq!(err.to_string(), "n must be > 0");
    }

    #[test]
    fn test_non_positive_concurrency_coerced() {
        let plan = parse(&["-c", "0", "-n", "3"]).resolve().unwrap();
        assert_eq!(plan.config.concurrency, 1);

        let plan = parse(&["-c", "-4", "-n", "3"]).resolve().unwrap();
        assert_eq!(plan.config.concurrency, 1);
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let plan = parse(&["--timeout", "0"]).resolve().unwrap();
        assert_eq!(plan.config.timeout, http_bench_core::config::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_repeated_headers_and_method() {
        let plan = parse(&[
            "-X",
            "POST",
            "-H",
            "X-Tag: a",
            "-H",
            "bogus",
            "-H",
            "X-Tag: b",
            "--rate",
            "25",
            "--insecure",
            "http://example.com/submit",
        ])
        .resolve()
        .unwrap();

        assert_eq!(plan.template.method().as_str(), "POST");
        let tags: Vec<_> = plan.template.headers().get_all("x-tag").iter().collect();
        assert_eq!(tags, vec!["a", "b"]);
        assert_eq!(plan.template.headers().len(), 2);
        assert_eq!(plan.config.rate_limit, 25);
        assert!(plan.config.insecure);
    }

    #[test]
    fn test_body_file_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"payload").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let plan = parse(&["-X", "PUT", "--body", &path]).resolve().unwrap();
        assert_eq!(&plan.template.body()[..], b"payload");
    }

    #[test]
    fn test_missing_body_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        let err = parse(&["--body", path.to_str().unwrap()])
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read body file"));
    }

    #[test]
    fn test_invalid_method_rejected() {
        assert!(parse(&["-X", "NOT A METHOD"]).resolve().is_err());
    }
}
