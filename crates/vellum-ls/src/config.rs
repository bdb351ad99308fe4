//! Load/Save configuration
//!
//! Parameters are addressed by their DOM configuration names. Unknown
//! names are a `NotFound` error; names whose value is fixed in this scope
//! accept only that fixed value and reject everything else with
//! `NotSupported` instead of silently no-opping.

use vellum_dom::{DomError, DomResult};

use crate::LsInput;

/// Resolves external resources named by system/public identifier.
pub trait ResourceResolver {
    /// Map an identifier pair to a replacement input, or `None` to let the
    /// parser fall back to its default resolution.
    fn resolve(&mut self, public_id: Option<&str>, system_id: &str) -> Option<LsInput>;
}

/// Parser parameters.
///
/// Settable: `charset-overrides-xml-encoding`, `disallow-doctype`. The
/// remaining recognized names are fixed for this scope. The
/// `resource-resolver` parameter is an object and is set through
/// [`crate::Parser::set_resource_resolver`], not through
/// [`ParserConfig::set_parameter`].
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// An externally-supplied charset wins over the XML declaration.
    pub charset_overrides_xml_encoding: bool,
    /// Reject documents containing a doctype.
    pub disallow_doctype: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            charset_overrides_xml_encoding: true,
            disallow_doctype: false,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean parameter by its configuration name.
    pub fn set_parameter(&mut self, name: &str, value: bool) -> DomResult<()> {
        match name {
            "charset-overrides-xml-encoding" => {
                self.charset_overrides_xml_encoding = value;
                Ok(())
            }
            "disallow-doctype" => {
                self.disallow_doctype = value;
                Ok(())
            }
            _ => {
                let fixed = self.fixed_value(name)?;
                if value == fixed {
                    Ok(())
                } else {
                    Err(DomError::NotSupported(format!(
                        "parameter '{name}' is fixed to {fixed} in this scope"
                    )))
                }
            }
        }
    }

    /// Read a boolean parameter by its configuration name.
    pub fn get_parameter(&self, name: &str) -> DomResult<bool> {
        match name {
            "charset-overrides-xml-encoding" => Ok(self.charset_overrides_xml_encoding),
            "disallow-doctype" => Ok(self.disallow_doctype),
            _ => self.fixed_value(name),
        }
    }

    fn fixed_value(&self, name: &str) -> DomResult<bool> {
        match name {
            "ignore-unknown-character-denormalization" => Ok(true),
            "infoset" => Ok(true),
            "namespaces" => Ok(true),
            "well-formed" => Ok(true),
            "supported-media-types-only" => Ok(false),
            "validate" => Ok(false),
            "validate-if-schema" => Ok(false),
            _ => Err(DomError::NotFound(format!("unknown parameter '{name}'"))),
        }
    }
}

/// Serializer parameters.
///
/// Settable: `canonical-form`, `discard-default-content`,
/// `format-pretty-print`, `xml-declaration`.
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// No XML declaration, no empty-element shorthand, attributes sorted
    /// by name.
    pub canonical_form: bool,
    /// Recognized for compatibility; without DTD information there is
    /// never default content to discard.
    pub discard_default_content: bool,
    /// Indent element content.
    pub format_pretty_print: bool,
    /// Emit the XML declaration (suppressed by canonical form).
    pub xml_declaration: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            canonical_form: false,
            discard_default_content: true,
            format_pretty_print: false,
            xml_declaration: true,
        }
    }
}

impl SerializerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean parameter by its configuration name.
    pub fn set_parameter(&mut self, name: &str, value: bool) -> DomResult<()> {
        match name {
            "canonical-form" => {
                self.canonical_form = value;
                Ok(())
            }
            "discard-default-content" => {
                self.discard_default_content = value;
                Ok(())
            }
            "format-pretty-print" => {
                self.format_pretty_print = value;
                Ok(())
            }
            "xml-declaration" => {
                self.xml_declaration = value;
                Ok(())
            }
            _ => {
                let fixed = self.fixed_value(name)?;
                if value == fixed {
                    Ok(())
                } else {
                    Err(DomError::NotSupported(format!(
                        "parameter '{name}' is fixed to {fixed} in this scope"
                    )))
                }
            }
        }
    }

    /// Read a boolean parameter by its configuration name.
    pub fn get_parameter(&self, name: &str) -> DomResult<bool> {
        match name {
            "canonical-form" => Ok(self.canonical_form),
            "discard-default-content" => Ok(self.discard_default_content),
            "format-pretty-print" => Ok(self.format_pretty_print),
            "xml-declaration" => Ok(self.xml_declaration),
            _ => self.fixed_value(name),
        }
    }

    fn fixed_value(&self, name: &str) -> DomResult<bool> {
        match name {
            "ignore-unknown-character-denormalization" => Ok(true),
            "normalize-characters" => Ok(false),
            _ => Err(DomError::NotFound(format!("unknown parameter '{name}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settable_parser_parameters() {
        let mut config = ParserConfig::new();
        assert!(config.get_parameter("charset-overrides-xml-encoding").unwrap());
        config.set_parameter("disallow-doctype", true).unwrap();
        assert!(config.get_parameter("disallow-doctype").unwrap());
    }

    #[test]
    fn test_fixed_parameters_accept_only_their_value() {
        let mut config = ParserConfig::new();
        assert!(config.set_parameter("validate", false).is_ok());
        assert!(matches!(
            config.set_parameter("validate", true),
            Err(DomError::NotSupported(_))
        ));
        assert!(matches!(
            config.set_parameter("namespaces", false),
            Err(DomError::NotSupported(_))
        ));
    }

    #[test]
    fn test_unknown_parameter_is_not_found() {
        let parser = ParserConfig::new();
        assert!(matches!(
            parser.get_parameter("nonsense"),
            Err(DomError::NotFound(_))
        ));
        let mut serializer = SerializerConfig::new();
        assert!(matches!(
            serializer.set_parameter("nonsense", true),
            Err(DomError::NotFound(_))
        ));
    }

    #[test]
    fn test_serializer_defaults() {
        let config = SerializerConfig::new();
        assert!(!config.get_parameter("canonical-form").unwrap());
        assert!(config.get_parameter("xml-declaration").unwrap());
        assert!(!config.get_parameter("format-pretty-print").unwrap());
        assert!(!config.get_parameter("normalize-characters").unwrap());
    }
}
