//! Output writing: the assembled document, the embedded runtime assets,
//! and any theme files.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{DeckError, Result};
use crate::theme::Theme;

/// Runtime stylesheet, written to `css/deck.css` in the output.
pub const DECK_CSS: &str = include_str!("../../assets/deck.css");

/// Runtime script (navigation, reveal, typewriter), written to `js/deck.js`.
pub const DECK_JS: &str = include_str!("../../assets/deck.js");

/// Write `index.html`, the runtime assets, and the theme's files into
/// `output_dir`, creating directories as needed.
pub fn output_write(output_dir: &Path, html: &str, theme: Option<&Theme>) -> Result<()> {
    dir_create(output_dir)?;
    dir_create(&output_dir.join("css"))?;
    dir_create(&output_dir.join("js"))?;

    file_write(&output_dir.join("index.html"), html)?;
    file_write(&output_dir.join("css").join("deck.css"), DECK_CSS)?;
    file_write(&output_dir.join("js").join("deck.js"), DECK_JS)?;

    if let Some(theme) = theme {
        if let Some(css) = theme.css_path() {
            let content = std::fs::read_to_string(&css).map_err(|e| DeckError::Io {
                path: css.clone(),
                message: format!("failed to read theme css: {}", e),
            })?;
            file_write(&output_dir.join("css").join("theme.css"), &content)?;
        }
        if let Some(assets) = theme.assets_dir() {
            tree_copy(&assets, &output_dir.join("assets"))?;
        }
    }

    Ok(())
}

fn dir_create(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| DeckError::Io {
        path: dir.to_path_buf(),
        message: format!("failed to create directory: {}", e),
    })
}

fn file_write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| DeckError::Io {
        path: path.to_path_buf(),
        message: format!("failed to write: {}", e),
    })
}

/// Recursively copy a directory tree, preserving relative layout.
fn tree_copy(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| DeckError::Io {
            path: src.to_path_buf(),
            message: format!("failed to walk theme assets: {}", e),
        })?;

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            dir_create(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                dir_create(parent)?;
            }
            std::fs::copy(entry.path(), &target).map_err(|e| DeckError::Io {
                path: entry.path().to_path_buf(),
                message: format!("failed to copy theme asset: {}", e),
            })?;
        }
    }
    Ok(())
}
