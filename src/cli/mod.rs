pub mod build;
pub mod completions;
pub mod themes;
pub mod validate;

use clap::{Parser, Subcommand};

/// deck - Text-first presentation compiler
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a source file into an HTML presentation
    Build(build::BuildArgs),

    /// Parse source files and report errors without writing output
    Validate(validate::ValidateArgs),

    /// List available themes
    Themes(themes::ThemesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
