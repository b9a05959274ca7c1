use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use shopdesk::app::Workspace;
use shopdesk::cli::{format_layout, CliArgs, CliCommand};
use shopdesk::config::WorkspaceConfig;
use shopdesk::messages::Msg;
use shopdesk::persistence::{FileStorage, LayoutStorage, MemoryStorage};
use shopdesk::replay;

fn main() -> Result<()> {
    shopdesk::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => WorkspaceConfig::load_from(path),
        None => WorkspaceConfig::load(),
    };

    let storage: Box<dyn LayoutStorage> = match args.store {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => match FileStorage::open_default() {
            Some(storage) => Box::new(storage),
            None => {
                tracing::warn!("No config directory available, layout will not be saved");
                Box::new(MemoryStorage::new())
            }
        },
    };

    let mut workspace = Workspace::open(config, storage);
    let command = args.command.unwrap_or(CliCommand::Show);

    match &command {
        CliCommand::Replay { script } => {
            let source = std::fs::read_to_string(script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let steps = replay::parse_script(&source)
                .with_context(|| format!("Invalid script {}", script.display()))?;
            replay::run(&mut workspace, &steps, Instant::now());
        }
        CliCommand::Resize { width, .. } => {
            let height = workspace.model().viewport.height;
            workspace.dispatch(Msg::viewport(*width, height));
            run_layout_command(&mut workspace, &command)?;
        }
        _ => run_layout_command(&mut workspace, &command)?,
    }

    print!("{}", format_layout(workspace.layout()));
    Ok(())
}

fn run_layout_command(workspace: &mut Workspace, command: &CliCommand) -> Result<()> {
    let Some(msg) = command.to_layout_msg(workspace.layout())? else {
        return Ok(());
    };
    if workspace.dispatch(Msg::Layout(msg)).is_none() {
        bail!("Layout operation rejected");
    }
    Ok(())
}
