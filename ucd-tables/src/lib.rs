//! Generates JavaScript data modules from the Unicode Character Database.
//!
//! Each category (a general category, script, block, binary property, bidi
//! class, ...) becomes a directory with `code-points.js`, `regex.js` and
//! `symbols.js`; a few table types also get a consolidated `index.js`
//! mapping code points back to their category.
use std::path::PathBuf;

pub mod emit_js;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod source;
pub mod util;

pub use emit_js::{emit, EmitError, OutputLayout};
pub use model::{Category, CategoryMap, DirectoryIndex, TableType, TypeSelector};
pub use pipeline::{run, Config, SourceKind};
pub use source::read_source;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {kind} source: {source}")]
    Parse {
        kind: SourceKind,
        #[source]
        source: parse::ParseError,
    },
    #[error(transparent)]
    Emit(#[from] EmitError),
}
