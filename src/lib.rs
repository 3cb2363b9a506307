//! # descwriter
//!
//! Renders a semantically tagged documentation tree (descriptions of classes,
//! functions, methods and attributes with their prose, field lists and
//! definition lists) into a flat stream of formatted paragraphs and runs.
//!
//! ```text
//! JSON tree ──DocTreeParser──▶ DocNode ──WriterEngine──▶ DocumentSink
//!                                                        (MemoryDocument → text / JSON)
//! ```
//!
//! Indentation follows lexical nesting: a description at nesting level `L`
//! is written at `base + L * indent_step`, and every Writer hands the
//! [`RenderCursor`] back at its base indent so siblings line up.

pub mod config;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod sink;


pub use config::*;
pub use error::*;
pub use parser::*;
pub use renderer::*;
pub use sink::*;
