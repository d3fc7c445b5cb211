use clap::Parser;

fn main() -> anyhow::Result<()> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    let cli = audioforge::cli::Cli::parse();
    audioforge::run(cli)
}
