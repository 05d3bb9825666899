use std::path::PathBuf;

use clap::Parser;
use fsift::pattern::{split_patterns, DEFAULT_PATTERNS};
use fsift::ScanBuilder;

#[cfg(windows)]
pub const DEFAULT_ROOT: &str = "C:\\Users";
#[cfg(not(windows))]
pub const DEFAULT_ROOT: &str = "./";

#[derive(Parser, Debug)]
#[command(
    name = "fsift",
    version,
    about = "Find files whose names match glob patterns or a regex",
    long_about = "fsift walks a directory tree and prints every file whose base name matches \
                  one of the glob patterns or the regex, one path per line, sorted. With the \
                  default pattern set, *.kdbx and *.conf files are listed last."
)]
pub struct Cli {
    /// Root path to start scanning from
    #[arg(short, long, default_value = DEFAULT_ROOT)]
    pub path: PathBuf,

    /// Comma-separated list of file glob patterns [default: *.txt,*.csv,*.kdbx,*.config,*.conf,*.key,*.rsa,*.ini]
    #[arg(short, long, value_name = "LIST")]
    pub ext: Option<String>,

    /// Regex to match file names (e.g. '.*key.*'). Combines with --ext
    #[arg(short, long, value_name = "REGEX")]
    pub regex: Option<String>,

    /// Traversal threads (1 walks sequentially) [default: logical CPUs]
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Maximum depth below the root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Log skipped directories
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all diagnostics on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The glob list in effect.
    ///
    /// An explicit `--ext` always wins, even when empty. Without it, the
    /// default set applies unless a regex was given on its own.
    pub fn patterns(&self) -> Vec<String> {
        match (&self.ext, self.regex.as_deref()) {
            (Some(list), _) => split_patterns(list),
            (None, Some(re)) if !re.is_empty() => Vec::new(),
            (None, _) => DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "off"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    pub fn to_builder(&self) -> ScanBuilder {
        let mut builder = fsift::scan()
            .root(self.path.clone())
            .patterns(self.patterns())
            .collect_errors(self.verbose);

        if let Some(re) = &self.regex {
            builder = builder.regex(re.clone());
        }
        if let Some(n) = self.threads {
            builder = builder.threads(n);
        }
        if let Some(d) = self.max_depth {
            builder = builder.max_depth(d);
        }
        builder
    }
}
