//! Build command implementation.
//!
//! Compiles a source file and writes the presentation (index.html plus
//! runtime and theme assets) to the output directory. Nothing is written
//! when compilation fails.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{RecursiveMode, Watcher};
use serde::Serialize;

use crate::assemble;
use crate::compile::{compile_source, CompileOptions};
use crate::error::{DeckError, Result};
use crate::registry::DirectiveRegistry;
use crate::theme::Theme;

/// Compile a source file into an HTML presentation
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input source file
    pub input: PathBuf,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Theme name (overrides the source's .meta{theme=...})
    #[arg(long)]
    pub theme: Option<String>,

    /// Directory containing theme directories
    #[arg(long, default_value = "themes")]
    pub themes_dir: PathBuf,

    /// Directory searched for additional .flf figlet fonts
    #[arg(long)]
    pub fonts_dir: Option<PathBuf>,

    /// Print a machine-readable build report to stdout
    #[arg(long)]
    pub json: bool,

    /// Rebuild whenever the input file changes
    #[arg(long)]
    pub watch: bool,

    /// Increase output verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Serialize)]
struct BuildReport<'a> {
    input: &'a Path,
    output: &'a Path,
    slides: u32,
    theme: Option<&'a str>,
    watermarks: usize,
    nav_buttons: usize,
}

pub fn run(args: BuildArgs) -> Result<()> {
    build_once(&args)?;

    if args.watch {
        watch(&args)?;
    }

    Ok(())
}

fn build_once(args: &BuildArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.input).map_err(|e| DeckError::Io {
        path: args.input.clone(),
        message: format!("failed to read input: {}", e),
    })?;

    if args.verbose >= 1 {
        eprintln!("Compiling {}", args.input.display());
    }

    let registry = DirectiveRegistry::new();
    let options = CompileOptions {
        fonts_dir: args.fonts_dir.clone(),
    };
    let (body, state) = compile_source(&source, &registry, &options)?;

    let theme_name = args
        .theme
        .as_deref()
        .or_else(|| state.theme())
        .map(str::to_string);
    let theme = match &theme_name {
        Some(name) => Some(Theme::load(name, &args.themes_dir)?),
        None => None,
    };
    if args.verbose >= 2 {
        match &theme {
            Some(theme) => eprintln!("Theme: {} ({})", theme.name, theme.dir.display()),
            None => eprintln!("Theme: none"),
        }
    }

    let html = assemble::html_document(&body, &state, theme.as_ref());
    assemble::assets::output_write(&args.output, &html, theme.as_ref())?;

    if args.json {
        let report = BuildReport {
            input: &args.input,
            output: &args.output,
            slides: state.slide_count,
            theme: theme_name.as_deref(),
            watermarks: state.watermarks.len(),
            nav_buttons: state.nav_entries.len(),
        };
        let line = serde_json::to_string_pretty(&report).map_err(|e| DeckError::Build {
            message: format!("failed to serialize build report: {}", e),
            help: None,
        })?;
        println!("{}", line);
    } else {
        println!(
            "Built {} slide(s) to {}",
            state.slide_count,
            args.output.join("index.html").display()
        );
    }

    Ok(())
}

/// Rebuild on every change to the input file until interrupted. A failed
/// rebuild reports its error and keeps watching.
fn watch(args: &BuildArgs) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;

    let dir = args
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive).map_err(watch_error)?;

    let file_name = args.input.file_name();
    println!("Watching {} (ctrl-c to stop)", args.input.display());

    loop {
        let event = rx.recv().map_err(|e| DeckError::Build {
            message: format!("watch channel closed: {}", e),
            help: None,
        })?;
        let Ok(event) = event else {
            continue;
        };

        let touches_input = match file_name {
            Some(name) => event.paths.iter().any(|p| p.ends_with(name)),
            None => true,
        };
        if !touches_input {
            continue;
        }

        // Editors fire bursts of events per save; drain them into one build.
        while rx.recv_timeout(Duration::from_millis(100)).is_ok() {}

        if let Err(e) = build_once(args) {
            eprintln!("{:?}", miette::Report::new(e));
        }
    }
}

fn watch_error(e: notify::Error) -> DeckError {
    DeckError::Build {
        message: format!("file watcher failed: {}", e),
        help: None,
    }
}
