//! Serialize output descriptor
//!
//! An [`LsOutput`] names the destination of a write; the serializer
//! consults exactly one, by fixed priority: character stream, byte stream,
//! system identifier. Writing to a system identifier is outside this scope
//! and reports a fatal condition rather than silently no-opping.

use std::fmt;
use std::io;

/// Where a write goes.
#[derive(Default)]
pub struct LsOutput<'a> {
    /// Text sink. Highest priority; receives the serialized markup as-is.
    pub character_stream: Option<&'a mut dyn fmt::Write>,
    /// Byte sink; the serialized text is encoded with the resolved
    /// encoding before writing.
    pub byte_stream: Option<&'a mut dyn io::Write>,
    /// Destination URI. Not supported in this scope.
    pub system_id: Option<String>,
    /// Explicit destination encoding, overriding the document's declared
    /// one.
    pub encoding: Option<String>,
}

impl<'a> LsOutput<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output into a text sink (e.g. a `String`).
    pub fn to_characters(sink: &'a mut dyn fmt::Write) -> Self {
        Self {
            character_stream: Some(sink),
            ..Self::default()
        }
    }

    /// Output into a byte sink, encoded.
    pub fn to_bytes(sink: &'a mut dyn io::Write) -> Self {
        Self {
            byte_stream: Some(sink),
            ..Self::default()
        }
    }

    /// Output named by URI.
    pub fn to_system_id(system_id: impl Into<String>) -> Self {
        Self {
            system_id: Some(system_id.into()),
            ..Self::default()
        }
    }

    /// Request a specific destination encoding.
    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = Some(encoding.to_string());
        self
    }
}

impl fmt::Debug for LsOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LsOutput")
            .field("character_stream", &self.character_stream.is_some())
            .field("byte_stream", &self.byte_stream.is_some())
            .field("system_id", &self.system_id)
            .field("encoding", &self.encoding)
            .finish()
    }
}
