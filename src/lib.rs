pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod text;
pub mod tools;

use anyhow::Context;
use cli::{Cli, Commands};
use error::{ToolFailure, ToolResponse, ToolResult};
use output::FileNamer;
use tools::ToolContext;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    let json = cli.json;
    let result = match cli.command {
        Commands::Config(args) => return config_cmd(args),
        Commands::Output(args) => with_context(|ctx| output(ctx, args)),
        Commands::Resolve(args) => with_context(|ctx| resolve(ctx, args)),
        Commands::Name(args) => Ok(Ok(name(&load_config()?, args))),
        Commands::CheckInput(args) => with_context(|ctx| check_input(ctx, args)),
        Commands::Cleanup(args) => with_context(|ctx| cleanup(ctx, args)),
    }?;

    emit(ToolResponse::from_result(result), json)
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config problems are operator errors, not tool failures, so they surface
/// through `anyhow` instead of the response.
fn with_context<F>(f: F) -> anyhow::Result<ToolResult<String>>
where
    F: FnOnce(&ToolContext) -> ToolResult<String>,
{
    let config = load_config()?;
    Ok(ToolContext::from_env(config).and_then(|ctx| f(&ctx)))
}

fn load_config() -> anyhow::Result<config::Config> {
    let config = config::Config::load().context("load config")?;
    config.validate()?;
    Ok(config)
}

fn emit(response: ToolResponse, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.is_error {
        anyhow::bail!("{}", response.text);
    }
    println!("{}", response.text);
    Ok(())
}

fn output(ctx: &ToolContext, args: cli::OutputArgs) -> ToolResult<String> {
    let target = ctx.prepare_output(args.tool, &args.text, &args.dir, args.full_id)?;
    Ok(target.as_path().display().to_string())
}

fn resolve(ctx: &ToolContext, args: cli::ResolveArgs) -> ToolResult<String> {
    let dir = ctx.resolve_output_dir(&args.dir)?;
    Ok(dir.as_path().display().to_string())
}

/// Naming is pure; it never needs the home directory.
fn name(config: &config::Config, args: cli::NameArgs) -> String {
    FileNamer::new()
        .full_id(args.full_id)
        .unique(args.unique || config.unique_names)
        .name(&args.tag, &args.text, &args.ext)
        .to_string()
}

fn check_input(ctx: &ToolContext, args: cli::CheckInputArgs) -> ToolResult<String> {
    let path = ctx.input_file(&args.path, !args.any_file)?;
    Ok(path.display().to_string())
}

fn cleanup(ctx: &ToolContext, args: cli::CleanupArgs) -> ToolResult<String> {
    let dir = ctx.resolve_output_dir(&args.dir)?;
    let max_age_hours = args
        .max_age_hours
        .unwrap_or(ctx.config().cleanup_max_age_hours);
    let deleted = output::cleanup::cleanup_old_files(dir.as_path(), max_age_hours)
        .map_err(|err| ToolFailure::Message(format!("Cleanup failed: {err:#}")))?;
    Ok(format!(
        "Deleted {deleted} file(s) older than {max_age_hours}h from {}",
        dir.as_path().display()
    ))
}

fn config_cmd(args: cli::ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        let path = config::Config::init_default()?;
        println!("Initialized config at {}", path.display());
        return Ok(());
    }

    let load = || -> anyhow::Result<config::Config> {
        match &args.file {
            Some(path) => config::Config::load_from_path(path),
            None => config::Config::load(),
        }
    };

    if args.show {
        let config = load()?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.validate {
        let config = load()?;
        config.validate()?;
        println!("Config OK");
        return Ok(());
    }

    let path = config::Config::default_path()?;
    println!("{}", path.display());
    Ok(())
}
