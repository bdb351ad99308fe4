//! Save: streaming serialize back to markup text
//!
//! The serializer resolves the destination encoding (explicit output
//! encoding, then the document's declared encoding, then UTF-8), walks the
//! tree once in document order, and emits one well-formed token per node
//! kind. The underlying writer never produces the XML declaration; the
//! serializer writes it itself so the resolved encoding name actually
//! appears in it. Failures go through the error handler channel and
//! surface as `false`.

use std::fmt::Write as _;

use encoding_rs::Encoding;
use quick_xml::escape::{escape, partial_escape};
use vellum_dom::{Document, Node, NodeData, NodeId};

use crate::config::SerializerConfig;
use crate::error::{ErrorHandler, LsError, LsSeverity};
use crate::LsOutput;

/// The Save half of the subsystem.
pub struct Serializer {
    config: SerializerConfig,
    handler: Option<Box<dyn ErrorHandler>>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            config: SerializerConfig::default(),
            handler: None,
        }
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self {
            config,
            handler: None,
        }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SerializerConfig {
        &mut self.config
    }

    /// Register the receiver for serialize conditions.
    pub fn set_error_handler(&mut self, handler: Box<dyn ErrorHandler>) {
        self.handler = Some(handler);
    }

    /// Serialize a document to the output. `true` on success; on failure
    /// the reason goes to the error handler and the result is `false`.
    pub fn write(&mut self, doc: &Document, output: LsOutput<'_>) -> bool {
        let label = output
            .encoding
            .clone()
            .or_else(|| doc.xml_encoding().map(str::to_string))
            .unwrap_or_else(|| "UTF-8".to_string());
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            self.report(
                LsSeverity::FatalError,
                "unsupported-encoding",
                format!("unknown encoding label '{label}'"),
            );
            return false;
        };
        tracing::debug!(encoding = %label, "serializing document");

        let text = self.serialize_to_text(doc, &label);

        if let Some(sink) = output.character_stream {
            if let Err(err) = sink.write_str(&text) {
                self.report(LsSeverity::FatalError, "io-error", err.to_string());
                return false;
            }
            return true;
        }
        if let Some(sink) = output.byte_stream {
            let (bytes, _, unmappable) = encoding.encode(&text);
            if unmappable {
                self.report(
                    LsSeverity::Warning,
                    "character-encoding",
                    format!("characters not representable in {label} were substituted"),
                );
            }
            if let Err(err) = sink.write_all(&bytes) {
                self.report(LsSeverity::FatalError, "io-error", err.to_string());
                return false;
            }
            return true;
        }
        if output.system_id.is_some() {
            self.report(
                LsSeverity::FatalError,
                "system-id-output-not-supported",
                "writing to a system identifier is not implemented",
            );
            return false;
        }
        self.report(
            LsSeverity::FatalError,
            "no-output-specified",
            "none of the output representations is present",
        );
        false
    }

    /// Convenience wrapper over [`Serializer::write`] producing a string.
    pub fn write_to_string(&mut self, doc: &Document) -> Option<String> {
        let mut out = String::new();
        if self.write(doc, LsOutput::to_characters(&mut out)) {
            Some(out)
        } else {
            None
        }
    }

    // ---- emission --------------------------------------------------------

    fn serialize_to_text(&self, doc: &Document, encoding_label: &str) -> String {
        let mut out = String::new();
        if self.config.xml_declaration && !self.config.canonical_form {
            // Write the declaration here, with the resolved encoding name;
            // node emission below never produces one.
            out.push_str("<?xml version=\"");
            out.push_str(doc.xml_version());
            out.push_str("\" encoding=\"");
            out.push_str(encoding_label);
            out.push('"');
            if let Some(standalone) = doc.standalone() {
                out.push_str(" standalone=\"");
                out.push_str(if standalone { "yes" } else { "no" });
                out.push('"');
            }
            out.push_str("?>");
            if self.config.format_pretty_print {
                out.push('\n');
            }
        }
        let top_level = doc.children(Document::ROOT);
        for (i, &child) in top_level.iter().enumerate() {
            if self.config.format_pretty_print && i > 0 {
                out.push('\n');
            }
            self.emit_node(doc, child, 0, &mut out);
        }
        if self.config.format_pretty_print && !top_level.is_empty() {
            out.push('\n');
        }
        out
    }

    fn emit_node(&self, doc: &Document, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = doc.get(id) else { return };
        match &node.data {
            NodeData::Element(_) => self.emit_element(doc, id, depth, out),
            NodeData::Text(text) => out.push_str(&partial_escape(text.as_str())),
            NodeData::Cdata(content) => {
                out.push_str("<![CDATA[");
                out.push_str(content);
                out.push_str("]]>");
            }
            NodeData::Comment(content) => {
                out.push_str("<!--");
                out.push_str(content);
                out.push_str("-->");
            }
            NodeData::ProcessingInstruction { target, data } => {
                out.push_str("<?");
                out.push_str(target);
                if !data.is_empty() {
                    out.push(' ');
                    out.push_str(data);
                }
                out.push_str("?>");
            }
            NodeData::DocumentType {
                name,
                public_id,
                system_id,
            } => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                if !public_id.is_empty() {
                    let _ = write!(out, " PUBLIC \"{public_id}\" \"{system_id}\"");
                } else if !system_id.is_empty() {
                    let _ = write!(out, " SYSTEM \"{system_id}\"");
                }
                out.push('>');
            }
            // A nested document node cannot occur; fragments and attribute
            // nodes serialize as their content when asked directly.
            NodeData::Document | NodeData::DocumentFragment => {
                for &child in doc.children(id) {
                    self.emit_node(doc, child, depth, out);
                }
            }
            NodeData::Attribute { value, .. } => out.push_str(&escape(value.as_str())),
        }
    }

    fn emit_element(&self, doc: &Document, id: NodeId, depth: usize, out: &mut String) {
        let Some(elem) = doc.get(id).and_then(Node::as_element) else {
            return;
        };
        out.push('<');
        out.push_str(&elem.name);

        if self.config.canonical_form {
            let mut attrs: Vec<_> = elem.attrs.iter().collect();
            attrs.sort_by(|a, b| a.name.cmp(&b.name));
            for attr in attrs {
                let _ = write!(out, " {}=\"{}\"", attr.name, escape(attr.value.as_str()));
            }
        } else {
            for attr in &elem.attrs {
                let _ = write!(out, " {}=\"{}\"", attr.name, escape(attr.value.as_str()));
            }
        }

        let children = doc.children(id);
        if children.is_empty() {
            if self.config.canonical_form {
                let _ = write!(out, "></{}>", elem.name);
            } else {
                out.push_str("/>");
            }
            return;
        }
        out.push('>');

        let indent_children = self.config.format_pretty_print
            && children
                .iter()
                .all(|&c| doc.get(c).is_none_or(|n| n.as_text().is_none()));
        for &child in children {
            if indent_children {
                out.push('\n');
                for _ in 0..(depth + 1) {
                    out.push_str("  ");
                }
            }
            self.emit_node(doc, child, depth + 1, out);
        }
        if indent_children {
            out.push('\n');
            for _ in 0..depth {
                out.push_str("  ");
            }
        }
        let _ = write!(out, "</{}>", elem.name);
    }

    fn report(&mut self, severity: LsSeverity, kind: &str, message: impl Into<String>) {
        let error = LsError::new(severity, kind, message);
        tracing::debug!(%error, "serialize condition");
        if let Some(handler) = &mut self.handler {
            handler.handle(&error);
        }
    }
}
