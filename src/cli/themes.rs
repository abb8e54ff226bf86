//! Themes command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::theme;

/// List available themes
#[derive(Args, Debug)]
pub struct ThemesArgs {
    /// Directory containing theme directories
    #[arg(long, default_value = "themes")]
    pub themes_dir: PathBuf,
}

pub fn run(args: ThemesArgs) -> Result<()> {
    let names = theme::themes_available(&args.themes_dir);

    if names.is_empty() {
        println!("No themes found in {}", args.themes_dir.display());
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}
