//! Interactive terminal front end for the showcase engine.
//!
//! Reads one command per line, turns it into a [`UiEvent`] and lets the
//! [`Session`] drive a [`TerminalSurface`]. Logs go to stderr; everything
//! the user asked to see goes to the surface's writer.

pub mod command;
pub mod surface;

use std::io::Write;
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use showcase_core::{Session, ShowcaseConfig, UiEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

pub use command::{parse_command, Command, CommandError, HELP};
pub use surface::TerminalSurface;

/// Startup options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub no_latency: bool,
    pub fragment: Option<String>,
}

/// Load (or default) the configuration and start a session.
pub fn build_session(options: &Options) -> Result<Session> {
    let mut config = match &options.config {
        Some(path) => ShowcaseConfig::load(path)
            .wrap_err_with(|| format!("loading config from {}", path.display()))?,
        None => ShowcaseConfig::default(),
    };
    if options.no_latency {
        config = config.without_latency();
    }
    Ok(Session::new(&config)?)
}

/// Paint the first view, then process `input` line by line until it ends
/// or the user quits.
pub async fn run<R, W>(
    session: &mut Session,
    input: R,
    surface: &mut TerminalSurface<W>,
    fragment: &str,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session
        .handle(
            UiEvent::Startup {
                fragment: fragment.to_string(),
            },
            surface,
        )
        .await;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.wrap_err("reading input")? {
        match parse_command(&line) {
            Ok(Command::Blank) => {}
            Ok(Command::Quit) => break,
            Ok(Command::Help) => surface.print(HELP),
            Ok(Command::Users) => surface.print_users(&session.api().records()),
            Ok(Command::Event(event)) => {
                debug!(?event, "Handling input");
                session.handle(event, surface).await;
            }
            Err(e) => surface.print(&format!("error: {e}")),
        }
    }
    info!(session = %session.id(), "Input closed");
    Ok(())
}
