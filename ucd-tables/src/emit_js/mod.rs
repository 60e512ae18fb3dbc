/// JavaScript table emitter: CommonJS data modules per category plus
/// consolidated reverse-lookup indexes.
mod emit;
mod index;
mod layout;
mod regex;
mod writer;

pub use emit::{emit, EmitError, BIDI_CLASS_PREFIX};
pub use index::{AuxiliaryIndex, Conflict};
pub use layout::OutputLayout;
pub use regex::{to_pattern, CodePointSet};
pub use writer::LiteralWriter;
