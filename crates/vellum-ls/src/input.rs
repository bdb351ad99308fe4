//! Parse input descriptor
//!
//! An [`LsInput`] carries up to five possible source representations; the
//! parser consults exactly one, chosen by fixed priority: character stream,
//! byte stream, string data, system identifier, public identifier.

use std::io::{BufRead, Read};

/// Where a parse reads from.
///
/// All fields default to empty. An all-empty input is a fatal
/// `"no-input-specified"` condition at parse time, not a construction
/// error.
#[derive(Default)]
pub struct LsInput {
    /// Pre-decoded text. Highest priority.
    pub character_stream: Option<Box<dyn BufRead>>,
    /// Raw bytes; the encoding is detected (BOM, then XML declaration),
    /// subject to [`LsInput::encoding`] and the
    /// `charset-overrides-xml-encoding` parser parameter.
    pub byte_stream: Option<Box<dyn Read>>,
    /// In-memory document text.
    pub string_data: Option<String>,
    /// URI to resolve through the resource resolver, falling back to the
    /// local filesystem.
    pub system_id: Option<String>,
    /// Public identifier; only usable through a resource resolver.
    pub public_id: Option<String>,
    /// Externally-known encoding of the byte stream (e.g. from a transport
    /// header).
    pub encoding: Option<String>,
}

impl LsInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input backed by in-memory text.
    pub fn from_string(data: impl Into<String>) -> Self {
        Self {
            string_data: Some(data.into()),
            ..Self::default()
        }
    }

    /// Input backed by raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            byte_stream: Some(Box::new(std::io::Cursor::new(bytes))),
            ..Self::default()
        }
    }

    /// Input backed by a pre-decoded character stream.
    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        Self {
            character_stream: Some(Box::new(reader)),
            ..Self::default()
        }
    }

    /// Input named by URI.
    pub fn from_system_id(system_id: impl Into<String>) -> Self {
        Self {
            system_id: Some(system_id.into()),
            ..Self::default()
        }
    }

    /// Whether any source representation is present.
    pub fn is_specified(&self) -> bool {
        self.character_stream.is_some()
            || self.byte_stream.is_some()
            || self.string_data.is_some()
            || self.system_id.is_some()
            || self.public_id.is_some()
    }
}

impl std::fmt::Debug for LsInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LsInput")
            .field("character_stream", &self.character_stream.is_some())
            .field("byte_stream", &self.byte_stream.is_some())
            .field("string_data", &self.string_data.as_deref().map(str::len))
            .field("system_id", &self.system_id)
            .field("public_id", &self.public_id)
            .field("encoding", &self.encoding)
            .finish()
    }
}
