//! Selector text parser
//!
//! Hand-rolled character walker: comma-separated alternatives, compound
//! chains joined by descendant/child/sibling combinators, simple selectors
//! for tag, id, class and attribute tests.

use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    SimpleSelector,
};
use crate::SelectorError;

pub(crate) fn parse_group(text: &str) -> Result<Vec<ComplexSelector>, SelectorError> {
    let mut parser = Parser::new(text);
    let mut selectors = Vec::new();
    loop {
        selectors.push(parser.parse_complex()?);
        parser.skip_ws();
        if parser.eat(',') {
            continue;
        }
        if parser.at_end() {
            break;
        }
        return Err(parser.error("unexpected trailing input"));
    }
    tracing::trace!(text, alternatives = selectors.len(), "parsed selector group");
    Ok(selectors)
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: &str) -> SelectorError {
        SelectorError {
            text: self.text.to_string(),
            reason: reason.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Skip whitespace, reporting whether any was consumed.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_ws();
        let first = self.parse_compound()?;
        // The leftmost compound's combinator is never consulted.
        let mut parts = vec![(Combinator::Descendant, first)];

        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    parts.push((Combinator::Child, self.parse_compound()?));
                }
                Some('+') => {
                    self.pos += 1;
                    self.skip_ws();
                    parts.push((Combinator::NextSibling, self.parse_compound()?));
                }
                Some('~') => {
                    self.pos += 1;
                    self.skip_ws();
                    parts.push((Combinator::SubsequentSibling, self.parse_compound()?));
                }
                Some(_) if had_ws => {
                    parts.push((Combinator::Descendant, self.parse_compound()?));
                }
                Some(c) => {
                    return Err(self.error(&format!("unexpected character '{c}'")));
                }
            }
        }
        Ok(ComplexSelector { parts })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();
        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    components.push(SimpleSelector::Universal);
                }
                Some('#') => {
                    self.pos += 1;
                    let name = self.parse_ident()?;
                    components.push(SimpleSelector::Id(name));
                }
                Some('.') => {
                    self.pos += 1;
                    let name = self.parse_ident()?;
                    components.push(SimpleSelector::Class(name));
                }
                Some('[') => {
                    self.pos += 1;
                    components.push(SimpleSelector::Attribute(self.parse_attribute()?));
                }
                Some(c) if is_ident_start(c) => {
                    let name = self.parse_ident()?;
                    components.push(SimpleSelector::Type(name));
                }
                _ => break,
            }
        }
        if components.is_empty() {
            return Err(self.error("expected a selector"));
        }
        Ok(CompoundSelector { components })
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_ws();
        let name = self.parse_ident()?;
        self.skip_ws();

        if self.eat(']') {
            return Ok(AttributeSelector {
                name,
                matcher: None,
            });
        }

        let op = match self.bump() {
            Some('=') => None,
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                if !self.eat('=') {
                    return Err(self.error("expected '=' in attribute matcher"));
                }
                Some(c)
            }
            _ => return Err(self.error("expected attribute matcher or ']'")),
        };

        self.skip_ws();
        let value = self.parse_attribute_value()?;
        self.skip_ws();
        if !self.eat(']') {
            return Err(self.error("unterminated attribute selector"));
        }

        let matcher = match op {
            None => AttributeMatcher::Exact(value),
            Some('~') => AttributeMatcher::Includes(value),
            Some('|') => AttributeMatcher::DashMatch(value),
            Some('^') => AttributeMatcher::Prefix(value),
            Some('$') => AttributeMatcher::Suffix(value),
            Some('*') => AttributeMatcher::Substring(value),
            Some(_) => unreachable!("op is constrained above"),
        };
        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
        })
    }

    fn parse_attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => return Err(self.error("unterminated string")),
                    }
                }
                Ok(value)
            }
            _ => self.parse_ident(),
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                ident.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
