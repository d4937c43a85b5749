//! strand binary: parse arguments, set up logging and the terminal, run the editor

mod runtime;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use strand::cli::CliArgs;

use runtime::App;

fn main() -> Result<()> {
    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    strand::tracing::init(startup.log_level.as_deref());
    tracing::info!(
        files = startup.files.len(),
        use_config = startup.use_config,
        "strand {} starting",
        env!("CARGO_PKG_VERSION")
    );

    let (cols, rows) = crossterm::terminal::size().context("Failed to read terminal size")?;
    let app = App::new(startup, cols, rows);

    let mut terminal = runtime::terminal::init()?;
    let result = app.run(&mut terminal);
    runtime::terminal::restore()?;

    if let Err(e) = &result {
        tracing::error!("Editor stopped with an error: {:#}", e);
    }
    result
}
