//! CLI definitions and entry point

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::debug;

use treesift::cancel::CancellationToken;
use treesift::config::Config;
use treesift::core::services::split_patterns;
use treesift::output::{OutputMode, ScanReport};
use treesift::resolver::IgnoreResolver;

/// treesift - Hybrid ignore resolution for source trees
#[derive(Parser, Debug)]
#[command(
    name = "treesift",
    version,
    about = "Show which paths of a source tree are noise",
    long_about = "Resolve the ignored set of a directory tree.\n\n\
                  Dependency and build directories are pruned by name, then git \
                  check-ignore decides the rest. Without git, the root .gitignore \
                  is evaluated instead."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Disable every ignore mechanism
    #[arg(long)]
    pub raw: bool,

    /// Extra exclude patterns, comma-separated (`name/` matches directories only)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Deepest level to print with --list (1 = top-level entries)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Skip git and evaluate the root .gitignore directly
    #[arg(long)]
    pub no_oracle: bool,

    /// Print the paths that are kept
    #[arg(short, long)]
    pub list: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags win over both config files
    fn apply(&self, config: &mut Config) {
        if self.raw {
            config.scan.raw = true;
        }
        let excludes: Vec<String> = self.exclude.iter().flat_map(|list| split_patterns(list)).collect();
        if !excludes.is_empty() {
            config.scan.exclude = excludes;
        }
        if self.no_oracle {
            config.oracle.enabled = false;
        }
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let mut config = Config::load(&cli.root);
    cli.apply(&mut config);
    debug!("effective config: {config:?}");

    let token = CancellationToken::new();
    #[cfg(feature = "signals")]
    install_interrupt_handler(token.clone());

    let resolver = IgnoreResolver::new(config.to_resolve_options());
    let resolution = resolver
        .resolve_with(&cli.root, &token)
        .with_context(|| format!("cannot scan {}", cli.root.display()))?;

    ScanReport::new(&cli.root, &resolution, cli.list, cli.max_depth).render(output_mode);
    Ok(())
}

/// First Ctrl-C cancels the scan; a second one exits immediately
#[cfg(feature = "signals")]
fn install_interrupt_handler(token: CancellationToken) {
    let spawned = std::thread::Builder::new().name("treesift-signal".to_string()).spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                debug!("signal handling unavailable: {err}");
                return;
            },
        };
        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            eprintln!("Interrupted; finishing with partial results (Ctrl-C again to abort)");
            token.cancel();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        });
    });
    if let Err(err) = spawned {
        debug!("cannot start signal thread: {err}");
    }
}
