use clap::Parser;
use deck::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => deck::cli::build::run(args)?,
        Commands::Validate(args) => deck::cli::validate::run(args)?,
        Commands::Themes(args) => deck::cli::themes::run(args)?,
        Commands::Completions(args) => deck::cli::completions::run(args)?,
    }

    Ok(())
}
