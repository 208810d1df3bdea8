//! Showcase - interactive terminal driver for the mock API and view router
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use showcase_cli::{build_session, run, Options, TerminalSurface};

/// Showcase - browse the framework showcase from a terminal
#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Drive the showcase mock API and view router from stdin", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Answer simulated requests immediately
    #[arg(long)]
    no_latency: bool,

    /// Section to open first, as in a location fragment (e.g. `#demo`)
    #[arg(long, value_name = "SECTION")]
    fragment: Option<String>,

    /// Log at debug level unless SHOWCASE_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    showcase_core::logging::init(args.verbose);

    let options = Options {
        config: args.config,
        no_latency: args.no_latency,
        fragment: args.fragment,
    };
    let mut session = build_session(&options)?;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut surface = TerminalSurface::new(std::io::stdout());
    let fragment = options.fragment.as_deref().unwrap_or_default();
    run(&mut session, input, &mut surface, fragment).await
}
