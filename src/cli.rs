/// Command-line flags and the config they produce.
use anyhow::Context;
use clap::{ArgAction, Parser};
use findext_core::WalkConfig;
use std::path::PathBuf;
use tracing::Level;

/// Find files by extension with a live-adjustable depth limit.
///
/// While running: SIGUSR1 logs the current directory and depth, SIGUSR2
/// raises the depth limit by --depth-step, SIGINT/SIGTERM stop the search
/// and print what was found so far.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to search [default: current working directory]
    pub root: Option<PathBuf>,

    /// Extension to match, including the leading dot (case-sensitive)
    #[arg(short, long, default_value = ".go")]
    pub ext: String,

    /// Initial depth limit; the root is depth 0 [default: 5]
    #[arg(short = 'd', long)]
    pub max_depth: Option<i64>,

    /// Abort the search after this many seconds (0 = no deadline)
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Amount added to the depth limit on SIGUSR2
    #[arg(long, default_value_t = 2)]
    pub depth_step: i64,

    /// Cap on concurrent directory threads [default: unbounded]
    #[arg(long)]
    pub max_units: Option<usize>,

    /// Report only the first file seen for each file name
    #[arg(long)]
    pub dedup: bool,

    /// JSON walk configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as a JSON array
    #[arg(long)]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::WARN;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Build the walk configuration: config file first, then flag overrides.
    pub fn walk_config(&self) -> anyhow::Result<WalkConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str::<WalkConfig>(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => WalkConfig::default(),
        };

        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_units) = self.max_units {
            config.max_units = Some(max_units);
        }
        if self.dedup {
            config.dedup_by_name = true;
        }
        Ok(config)
    }
}
