use clap::Parser;
use std::path::PathBuf;

use sbom_decompose::application::dto::OutputFormat;
use sbom_decompose::config::Overrides;

/// Decompose a CycloneDX SBOM into an acyclic dependency tree
#[derive(Parser, Debug)]
#[command(name = "sbom-decompose")]
#[command(version)]
#[command(
    about = "Decompose a CycloneDX SBOM into an acyclic dependency tree with transitive vulnerability exposure",
    long_about = None
)]
pub struct Args {
    /// Path to a CycloneDX JSON SBOM
    pub input: PathBuf,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (defaults to sbom-decompose.config.yml next to the input)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum score (0.0-10.0) counted as transitive exposure [default: 8.0]
    #[arg(
        long = "min-severity",
        value_name = "SCORE",
        env = "SBOM_DECOMPOSE_MIN_TRANSITIVE_SEVERITY"
    )]
    pub min_severity: Option<f64>,

    /// Keep only subtrees that lead to a vulnerability at or above the threshold
    #[arg(long)]
    pub only_vulnerable: bool,

    /// Deepest tree level to render; 0 means unlimited
    #[arg(long, value_name = "LEVEL")]
    pub max_depth: Option<usize>,

    /// Exit with code 1 when the root is transitively exposed
    #[arg(long)]
    pub fail_on_vulnerable: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format,
            min_transitive_severity: self.min_severity,
            only_vulnerable: self.only_vulnerable,
            max_depth: self.max_depth,
            fail_on_vulnerable: self.fail_on_vulnerable,
        }
    }
}
