//! Validate command implementation.
//!
//! Parses source files and reports structural errors without writing any
//! output. Exits on the first file that fails.

use std::path::PathBuf;

use clap::Args;

use crate::error::{DeckError, Result};
use crate::escape;
use crate::parser;
use crate::registry::DirectiveRegistry;

/// Parse source files and report errors without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Source files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let registry = DirectiveRegistry::new();

    for file in &args.files {
        let source = std::fs::read_to_string(file).map_err(|e| DeckError::Io {
            path: file.clone(),
            message: format!("failed to read file: {}", e),
        })?;

        let (protected, _) = escape::protect(&source);
        let doc = parser::parse(&protected, &registry)?;

        println!("{}: ok ({} top-level node(s))", file.display(), doc.nodes.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_file_passes() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("ok.sd");
        std::fs::write(&file, ".slide{.title{Hi}}").unwrap();

        run(ValidateArgs { files: vec![file] }).unwrap();
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bad.sd");
        std::fs::write(&file, ".slide{oops").unwrap();

        assert!(run(ValidateArgs { files: vec![file] }).is_err());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.sd");
        let good = tmp.path().join("good.sd");
        std::fs::write(&bad, ".unknown-thing{x}").unwrap();
        std::fs::write(&good, ".slide{x}").unwrap();

        let err = run(ValidateArgs {
            files: vec![bad, good],
        })
        .unwrap_err();
        assert!(err.to_string().contains("unknown-thing"));
    }
}
