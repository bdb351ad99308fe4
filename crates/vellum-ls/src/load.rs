//! Load: streaming parse into a document tree
//!
//! The parser resolves its input by fixed priority, decodes byte sources
//! with BOM and XML-declaration sniffing, then walks the markup reader
//! event-by-event, mapping each event to a document factory call.
//! Processing instructions, entity references and whitespace-only text are
//! skipped in this scope. Failures go through the error handler channel
//! and surface as `None`, never as a panic or an `Err`.

use std::io::Read;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use vellum_dom::{Document, DomError, DomResult, NodeId};

use crate::config::{ParserConfig, ResourceResolver};
use crate::error::{ErrorHandler, LsError, LsSeverity};
use crate::LsInput;

/// Where parsed content lands when parsing into an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAction {
    AppendAsChildren,
    ReplaceChildren,
    InsertBefore,
    InsertAfter,
    Replace,
}

/// The Load half of the subsystem.
pub struct Parser {
    config: ParserConfig,
    handler: Option<Box<dyn ErrorHandler>>,
    resolver: Option<Box<dyn ResourceResolver>>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            handler: None,
            resolver: None,
        }
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            handler: None,
            resolver: None,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ParserConfig {
        &mut self.config
    }

    /// Register the receiver for parse conditions.
    pub fn set_error_handler(&mut self, handler: Box<dyn ErrorHandler>) {
        self.handler = Some(handler);
    }

    pub fn take_error_handler(&mut self) -> Option<Box<dyn ErrorHandler>> {
        self.handler.take()
    }

    /// Register the resolver consulted for system/public identifiers.
    pub fn set_resource_resolver(&mut self, resolver: Box<dyn ResourceResolver>) {
        self.resolver = Some(resolver);
    }

    /// Abort an in-flight parse. Present in the contract but not
    /// implemented: parsing is fully synchronous, so there is never an
    /// in-flight parse to abort.
    pub fn abort(&mut self) -> DomResult<()> {
        Err(DomError::NotSupported("parser abort".to_string()))
    }

    /// Parse an input into a new document. `None` on failure; the reason
    /// goes to the error handler.
    pub fn parse(&mut self, input: LsInput) -> Option<Document> {
        let text = self.resolve_input(input)?;
        let mut doc = Document::new();
        tracing::debug!(len = text.len(), "parsing document");
        self.build(&mut doc, Document::ROOT, &text, true)?;
        Some(doc)
    }

    /// Convenience wrapper over [`Parser::parse`] for in-memory text.
    pub fn parse_string(&mut self, text: &str) -> Option<Document> {
        self.parse(LsInput::from_string(text))
    }

    /// Parse an input into an existing document at `context`. Only
    /// [`ParseAction::ReplaceChildren`] is supported in this scope; the
    /// other actions report `"action-not-supported"` and return `None`.
    /// On success the context node is returned.
    pub fn parse_with_context(
        &mut self,
        input: LsInput,
        doc: &mut Document,
        context: NodeId,
        action: ParseAction,
    ) -> Option<NodeId> {
        if action != ParseAction::ReplaceChildren {
            self.report(
                LsSeverity::Error,
                "action-not-supported",
                format!("parse action {action:?} is not implemented"),
            );
            return None;
        }
        if doc.get(context).is_none() {
            self.report(
                LsSeverity::FatalError,
                "context-not-found",
                "context node does not belong to the document",
            );
            return None;
        }
        let text = self.resolve_input(input)?;

        // Stage the replacement in a detached fragment so a malformed
        // input leaves the context's existing children in place.
        let staging = doc.create_document_fragment();
        self.build(doc, staging, &text, false)?;

        let old: Vec<NodeId> = doc.children(context).to_vec();
        for &child in &old {
            if doc.remove_child(context, child).is_err() {
                break;
            }
        }
        if self.attach(doc, context, staging).is_none() {
            // Splice rejected: put the previous children back.
            for &child in &old {
                let _ = doc.append_child(context, child);
            }
            return None;
        }
        Some(context)
    }

    // ---- input resolution ------------------------------------------------

    /// Turn an input descriptor into document text, by priority:
    /// character stream, byte stream, string data, system id, public id.
    fn resolve_input(&mut self, input: LsInput) -> Option<String> {
        let LsInput {
            character_stream,
            byte_stream,
            string_data,
            system_id,
            public_id,
            encoding,
        } = input;

        if let Some(mut stream) = character_stream {
            let mut text = String::new();
            if let Err(err) = stream.read_to_string(&mut text) {
                self.report(LsSeverity::FatalError, "io-error", err.to_string());
                return None;
            }
            return Some(strip_bom(text));
        }
        if let Some(mut stream) = byte_stream {
            let mut bytes = Vec::new();
            if let Err(err) = stream.read_to_end(&mut bytes) {
                self.report(LsSeverity::FatalError, "io-error", err.to_string());
                return None;
            }
            return self.decode(&bytes, encoding.as_deref());
        }
        if let Some(data) = string_data {
            return Some(strip_bom(data));
        }
        if let Some(sys) = system_id {
            let resolved = self
                .resolver
                .as_mut()
                .and_then(|r| r.resolve(public_id.as_deref(), &sys));
            if let Some(replacement) = resolved {
                return self.resolve_input(replacement);
            }
            return match std::fs::read(local_path(&sys)) {
                Ok(bytes) => self.decode(&bytes, encoding.as_deref()),
                Err(err) => {
                    self.report(
                        LsSeverity::FatalError,
                        "resource-not-resolved",
                        format!("cannot resolve '{sys}': {err}"),
                    );
                    None
                }
            };
        }
        if let Some(public) = public_id {
            // A bare public id is only resolvable through a resolver, and
            // none volunteered.
            self.report(
                LsSeverity::FatalError,
                "resource-not-resolved",
                format!("no resolver for public id '{public}'"),
            );
            return None;
        }
        self.report(
            LsSeverity::FatalError,
            "no-input-specified",
            "none of the five input representations is present",
        );
        None
    }

    /// Decode raw bytes to text. A byte-order mark wins outright; below
    /// that, precedence between the external charset and the encoding
    /// named in the XML declaration follows `charset-overrides-xml-encoding`.
    fn decode(&mut self, bytes: &[u8], external: Option<&str>) -> Option<String> {
        let declared = sniff_declared_encoding(bytes);
        let label = if self.config.charset_overrides_xml_encoding {
            external.or(declared.as_deref())
        } else {
            declared.as_deref().or(external)
        };
        let encoding = match label {
            Some(label) => match Encoding::for_label(label.as_bytes()) {
                Some(encoding) => encoding,
                None => {
                    self.report(
                        LsSeverity::FatalError,
                        "unsupported-encoding",
                        format!("unknown encoding label '{label}'"),
                    );
                    return None;
                }
            },
            None => UTF_8,
        };
        // decode() sniffs the BOM itself and lets it override the label.
        let (text, actual, malformed) = encoding.decode(bytes);
        if malformed {
            self.report(
                LsSeverity::Warning,
                "character-decoding",
                format!("malformed {} sequences replaced", actual.name()),
            );
        }
        Some(strip_bom(text.into_owned()))
    }

    // ---- tree building ---------------------------------------------------

    /// Walk the reader and hang the parsed nodes under `parent`.
    /// Declaration and doctype events are only honored at document level.
    fn build(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        text: &str,
        document_level: bool,
    ) -> Option<()> {
        let mut reader = Reader::from_str(text);
        let mut stack = vec![parent];
        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    self.report(LsSeverity::FatalError, "malformed-xml", err.to_string());
                    return None;
                }
            };
            let current = *stack.last()?;
            match event {
                Event::Decl(decl) => {
                    if document_level {
                        self.apply_declaration(doc, &decl);
                    }
                }
                Event::DocType(dt) => {
                    if self.config.disallow_doctype {
                        self.report(
                            LsSeverity::FatalError,
                            "doctype-not-allowed",
                            "document contains a doctype and disallow-doctype is set",
                        );
                        return None;
                    }
                    if document_level {
                        let raw = String::from_utf8_lossy(&dt);
                        let (name, public, system) = parse_doctype(raw.trim());
                        let node = doc.create_document_type(&name, &public, &system);
                        self.attach(doc, current, node)?;
                    }
                }
                Event::Start(start) => {
                    let element = self.start_element(doc, &start)?;
                    self.attach(doc, current, element)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = self.start_element(doc, &start)?;
                    self.attach(doc, current, element)?;
                }
                Event::End(_) => {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
                Event::Text(text) => match text.unescape() {
                    Ok(content) => {
                        if !content.trim().is_empty() {
                            let node = doc.create_text(&content);
                            self.attach(doc, current, node)?;
                        }
                    }
                    Err(err) => {
                        self.report(LsSeverity::FatalError, "malformed-xml", err.to_string());
                        return None;
                    }
                },
                Event::CData(cdata) => {
                    let content = String::from_utf8_lossy(&cdata);
                    let node = doc.create_cdata(&content);
                    self.attach(doc, current, node)?;
                }
                Event::Comment(comment) => {
                    let content = String::from_utf8_lossy(&comment);
                    let node = doc.create_comment(&content);
                    self.attach(doc, current, node)?;
                }
                Event::Eof => break,
                // Processing instructions, entity references and anything
                // else outside the modeled subset are skipped, not built.
                _ => {}
            }
        }
        Some(())
    }

    /// Create an element with its attributes from a start tag.
    fn start_element(&mut self, doc: &mut Document, start: &BytesStart<'_>) -> Option<NodeId> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let element = doc.create_element(&name);
        for attr in start.attributes() {
            let attr = match attr {
                Ok(attr) => attr,
                Err(err) => {
                    self.report(LsSeverity::FatalError, "malformed-xml", err.to_string());
                    return None;
                }
            };
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(value) => value,
                Err(err) => {
                    self.report(LsSeverity::FatalError, "malformed-xml", err.to_string());
                    return None;
                }
            };
            if let Err(err) = doc.set_attribute(element, &key, &value) {
                self.report(LsSeverity::FatalError, "malformed-xml", err.to_string());
                return None;
            }
        }
        Some(element)
    }

    /// Append a parsed node, converting structural rejection (e.g. a
    /// second root element) into a fatal condition.
    fn attach(&mut self, doc: &mut Document, parent: NodeId, child: NodeId) -> Option<()> {
        match doc.append_child(parent, child) {
            Ok(_) => Some(()),
            Err(err) => {
                self.report(LsSeverity::FatalError, "malformed-xml", err.to_string());
                None
            }
        }
    }

    fn apply_declaration(&mut self, doc: &mut Document, decl: &quick_xml::events::BytesDecl<'_>) {
        if let Ok(version) = decl.version() {
            doc.set_xml_version(&String::from_utf8_lossy(&version));
        }
        if let Some(Ok(encoding)) = decl.encoding() {
            doc.set_xml_encoding(Some(&String::from_utf8_lossy(&encoding)));
        }
        if let Some(Ok(standalone)) = decl.standalone() {
            doc.set_standalone(Some(standalone.as_ref() == b"yes"));
        }
    }

    fn report(&mut self, severity: LsSeverity, kind: &str, message: impl Into<String>) {
        let error = LsError::new(severity, kind, message);
        tracing::debug!(%error, "parse condition");
        if let Some(handler) = &mut self.handler {
            handler.handle(&error);
        }
    }
}

/// Filesystem path for a system identifier: a `file:` URI loses its
/// scheme (and empty authority), a bare path passes through untouched.
fn local_path(system_id: &str) -> &str {
    system_id.strip_prefix("file://").unwrap_or(system_id)
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Encoding label from the XML declaration, read off the raw bytes before
/// any decoding happens. The declaration is ASCII by construction in every
/// ASCII-compatible encoding, which is all this sniff supports.
fn sniff_declared_encoding(bytes: &[u8]) -> Option<String> {
    let prefix_len = bytes.len().min(256);
    let prefix: String = bytes[..prefix_len].iter().map(|&b| b as char).collect();
    let trimmed = prefix.trim_start();
    if !trimmed.starts_with("<?xml") {
        return None;
    }
    let decl = &trimmed[..trimmed.find("?>")?];
    let after = decl[decl.find("encoding")? + "encoding".len()..].trim_start();
    let after = after.strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &after[1..];
    Some(rest[..rest.find(quote)?].to_string())
}

/// Split doctype content into (name, public id, system id).
/// Handles `name`, `name SYSTEM "sys"`, and `name PUBLIC "pub" "sys"`.
fn parse_doctype(raw: &str) -> (String, String, String) {
    let mut rest = raw.trim();
    let name_end = rest
        .find(|c: char| c.is_whitespace())
        .unwrap_or(rest.len());
    let name = rest[..name_end].to_string();
    rest = rest[name_end..].trim_start();

    let mut public = String::new();
    let mut system = String::new();
    if let Some(after) = rest.strip_prefix("PUBLIC") {
        let mut literals = quoted_literals(after);
        public = literals.next().unwrap_or_default();
        system = literals.next().unwrap_or_default();
    } else if let Some(after) = rest.strip_prefix("SYSTEM") {
        system = quoted_literals(after).next().unwrap_or_default();
    }
    (name, public, system)
}

/// Iterate the quoted literals in a doctype external-id tail.
fn quoted_literals(text: &str) -> impl Iterator<Item = String> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        let start = rest.find(['"', '\''])?;
        let quote = rest.as_bytes()[start] as char;
        let body = &rest[start + 1..];
        let end = body.find(quote)?;
        let literal = body[..end].to_string();
        rest = &body[end + 1..];
        Some(literal)
    })
}
