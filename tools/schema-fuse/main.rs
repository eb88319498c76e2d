use clap::Parser;
use schema_fuse::job::{
    DEFAULT_DEFINITIONS_PATH, DEFAULT_MISSING_REPORT_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_PERFORMANCE_PATH,
};
use schema_fuse::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const BANNER_RULE: &str = "============================================================";

/// Fuses a variable definition schema with a per-subject performance dataset
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the definition schema JSON file
    #[arg(short, long, default_value = DEFAULT_DEFINITIONS_PATH, env = "SCHEMA_FUSE_DEFINITIONS")]
    definitions: PathBuf,

    /// Path to the performance dataset JSON file
    #[arg(short, long, default_value = DEFAULT_PERFORMANCE_PATH, env = "SCHEMA_FUSE_PERFORMANCE")]
    performance: PathBuf,

    /// Where to write the fused schema
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH, env = "SCHEMA_FUSE_OUTPUT")]
    output: PathBuf,

    /// Where to write the missing variables report
    #[arg(short, long, default_value = DEFAULT_MISSING_REPORT_PATH, env = "SCHEMA_FUSE_REPORT")]
    report: PathBuf,

    /// Show per-variable progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FusionConfig {
        definitions_path: cli.definitions,
        performance_path: cli.performance,
        output_path: cli.output,
        missing_report_path: cli.report,
    };

    println!("{}", BANNER_RULE);
    println!("Schema Fusion Tool");
    println!("{}", BANNER_RULE);
    println!("Definition schema:   {}", config.definitions_path.display());
    println!("Performance dataset: {}", config.performance_path.display());
    println!();

    let start = Instant::now();
    let job = FusionJob::builder(config).build();
    let outcome = job
        .run()
        .unwrap_or_else(|e| exit_with_error(&format!("Fusion failed: {}", e)));

    print!("{}", ReportGenerator::render_console(&outcome.summary));
    println!();
    match &outcome.report {
        ReportStatus::NotNeeded => {}
        ReportStatus::Written(path) => {
            println!("Missing variables list saved to: {}", path.display())
        }
        ReportStatus::Failed(e) => println!("Warning: {}", e),
    }

    println!("\n{}", BANNER_RULE);
    println!("Fusion completed successfully in {:?}", start.elapsed());
    println!("Batch timestamp: {}", outcome.timestamp);
    println!("Output file: {}", job.config().output_path.display());
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "schema_fuse=debug"
    } else {
        "schema_fuse=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .compact()
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
