use article_export::{DuplicatePolicy, ExportConfig, Exporter};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, error, trace};

/// Export JSON article records as individual markdown files
#[derive(Parser, Debug)]
#[command(name = "article-export", version)]
#[command(about = "Write one markdown file per article in a JSON export", long_about = None)]
struct Cli {
    /// JSON file holding an array of article records [default: articles.json]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory receiving the markdown files [default: markdown_files]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of files written at the same time
    #[arg(short = 'j', long)]
    max_parallel: Option<usize>,

    /// Which record to keep when several share a slug
    #[arg(long, value_enum)]
    on_duplicate: Option<DuplicateArg>,

    /// Exit with a non-zero status if anything was skipped or failed
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplicateArg {
    LastWins,
    FirstWins,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::LastWins => DuplicatePolicy::LastWins,
            DuplicateArg::FirstWins => DuplicatePolicy::FirstWins,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, config: &mut ExportConfig) {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(max) = self.max_parallel {
            config.max_parallel_writes = max;
        }
        if let Some(policy) = self.on_duplicate {
            config.on_duplicate = policy.into();
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("article-export started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let mut config = match ExportConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Fatal error: {e:#}");
            exit_if_strict(cli.strict, 2);
            return;
        }
    };
    cli.apply_overrides(&mut config);
    debug!("Effective configuration: {:?}", config);

    match Exporter::new(config).run().await {
        Ok(report) if !report.is_clean() => exit_if_strict(cli.strict, 1),
        Ok(_) => {}
        // Already logged by the exporter
        Err(e) => exit_if_strict(cli.strict, e.exit_code()),
    }
}

fn exit_if_strict(strict: bool, code: i32) {
    if strict {
        std::process::exit(code);
    }
}
