use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::tools::Tool;

#[derive(Parser, Debug)]
#[command(name = "audioforge", version, about = "Output paths and file names for audio generation tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print tool results as JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Output(OutputArgs),
    Resolve(ResolveArgs),
    Name(NameArgs),
    CheckInput(CheckInputArgs),
    Cleanup(CleanupArgs),
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(long, value_enum, help = "Tool producing the artifact")]
    pub tool: Tool,

    #[arg(long, help = "Text the artifact is named after")]
    pub text: String,

    #[arg(long, default_value = "", help = "Output directory (empty for the desktop)")]
    pub dir: String,

    #[arg(long, help = "Use the whole text in the file name")]
    pub full_id: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(value_name = "DIR", default_value = "", help = "Output directory (empty for the desktop)")]
    pub dir: String,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    #[arg(long, help = "Tool tag, e.g. tts")]
    pub tag: String,

    #[arg(long, help = "Text the name is derived from")]
    pub text: String,

    #[arg(long, help = "File extension")]
    pub ext: String,

    #[arg(long, help = "Use the whole text in the file name")]
    pub full_id: bool,

    #[arg(long, help = "Append a disambiguating token")]
    pub unique: bool,
}

#[derive(Args, Debug)]
pub struct CheckInputArgs {
    #[arg(value_name = "PATH", help = "Input file to validate")]
    pub path: String,

    #[arg(long, help = "Accept files that are not audio or video")]
    pub any_file: bool,
}

#[derive(Args, Debug)]
pub struct CleanupArgs {
    #[arg(value_name = "DIR", default_value = "", help = "Directory to clean (empty for the desktop)")]
    pub dir: String,

    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Delete files older than this many hours"
    )]
    pub max_age_hours: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show current config as JSON")]
    pub show: bool,

    #[arg(long, help = "Create default config file")]
    pub init: bool,

    #[arg(long, help = "Validate configuration")]
    pub validate: bool,

    #[arg(long, value_name = "PATH", help = "Read config from this file")]
    pub file: Option<PathBuf>,
}
