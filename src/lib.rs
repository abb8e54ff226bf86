//! deck - Text-first presentation compiler
//!
//! Parses `.directive{content}` markup into an abstract syntax tree, then
//! renders that tree inside-out into a self-contained HTML/CSS/JS slide
//! deck with progressive reveal, typewriter animation, ASCII art,
//! watermarks, and themeable navigation.

pub mod art;
pub mod assemble;
pub mod cli;
pub mod compile;
pub mod error;
pub mod escape;
pub mod parser;
pub mod placeholder;
pub mod registry;
pub mod theme;

pub use compile::{compile_source, CompileOptions, CompileState, Compiler};
pub use error::{DeckError, Result};
pub use parser::{parse, DirectiveNode, Document, Modifiers, Node};
pub use registry::{Category, DirectiveRegistry, DirectiveSpec, Handler, Invocation};
pub use theme::{themes_available, Theme};
