//! Vellum LS - Load and Save
//!
//! Streaming parse (Load) and serialize (Save) between markup text and the
//! `vellum-dom` tree. Inputs and outputs are descriptors carrying several
//! possible representations, consulted in a fixed priority order. Byte
//! sources go through encoding detection (`encoding_rs`); markup reading
//! and escaping go through `quick-xml`. Recoverable and fatal conditions
//! during parse/serialize are reported to a registered [`ErrorHandler`]
//! rather than raised, and failures surface as `None`/`false`.

mod config;
mod error;
mod input;
mod load;
mod output;
mod save;

pub use config::{ParserConfig, ResourceResolver, SerializerConfig};
pub use error::{CollectingHandler, ErrorHandler, LsError, LsSeverity};
pub use input::LsInput;
pub use load::{ParseAction, Parser};
pub use output::LsOutput;
pub use save::Serializer;
