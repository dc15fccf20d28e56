//! Command dispatch: the presentation side of the parser

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, render};
use crate::config::{config_template, global_config_path, project_config_path, Settings};
use crate::infrastructure::ServiceContainer;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Parse { input }) => _parse(&container(cli)?, input),
        Some(Commands::Tree { input }) => _tree(&container(cli)?, input),
        Some(Commands::Layout { input }) => _layout(&container(cli)?, input),
        Some(Commands::Check { input }) => _check(&container(cli)?, input),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(env::current_dir().with_path_context("resolve project dir", Path::new("."))?),
    }
}

/// Settings from files and environment, with command-line switches on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(&dir))?;
    if cli.strict {
        settings.parser.strict_numbering = true;
    }
    if cli.castling_suffix {
        settings.grammar.castling_suffix = true;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

#[instrument(skip(container))]
fn _parse(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let text = container.game.read_transcript(&input.source())?;
    let turns = container.game.parse(&text)?;
    output::info(&render::turn_table(&turns, &container.settings.tree.root_label));
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let text = container.game.read_transcript(&input.source())?;
    let positioned = container.game.build_tree(&text)?;
    output::info(&positioned.tree.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn _layout(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let text = container.game.read_transcript(&input.source())?;
    let positioned = container.game.build_tree(&text)?;

    output::header(&format!(
        "{:>4} {:>5}  {:<5}  {:<8}  parent",
        "x", "depth", "side", "label"
    ));
    for row in render::layout_rows(&positioned) {
        output::info(&format!(
            "{:>4} {:>5}  {}  {:<8}  {}",
            row.x,
            row.depth,
            output::side_tag(row.side),
            row.label,
            row.parent.as_deref().unwrap_or("-")
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _check(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let text = container.game.read_transcript(&input.source())?;
    let turns = container.game.parse(&text)?;
    output::success(&format!(
        "valid: {} turns, {} plies",
        turns.len(),
        turns.ply_count()
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            output::info(&format!("global:  {}", global));
            output::info(&format!(
                "project: {}",
                project_config_path(&project_dir(cli)?).display()
            ));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no config directory available on this system".into())
                })?
            } else {
                project_config_path(&project_dir(cli)?)
            };
            let container = ServiceContainer::new(Settings::default());
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .with_path_context("create directory for", &path)?;
            container
                .fs
                .write(&path, &config_template())
                .with_path_context("write config", &path)?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
