//! MediaList and StyleSheet registry
//!
//! Ordered, duplicate-free medium lists plus the style-sheet descriptors
//! that style-bearing nodes hang off. Sheets derive their metadata from the
//! owner node's attributes when one exists, otherwise from explicit backing
//! fields.

use crate::error::{DomError, DomResult};
use crate::{Document, NodeId};

/// An ordered, duplicate-free list of medium names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaList {
    media: Vec<String>,
    read_only: bool,
}

impl MediaList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated media string.
    pub fn from_media_text(text: &str) -> DomResult<Self> {
        let mut list = Self::new();
        list.set_media_text(text)?;
        Ok(list)
    }

    /// Freeze this list; further mutation is rejected.
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Medium at `index`, if present.
    pub fn item(&self, index: usize) -> Option<&str> {
        self.media.get(index).map(String::as_str)
    }

    pub fn contains(&self, medium: &str) -> bool {
        self.media.iter().any(|m| m == medium)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.media.iter().map(String::as_str)
    }

    /// The comma-separated serialized form.
    pub fn media_text(&self) -> String {
        self.media.join(", ")
    }

    /// Replace the whole list from a comma-separated string.
    pub fn set_media_text(&mut self, text: &str) -> DomResult<()> {
        self.check_writable()?;
        let mut media = Vec::new();
        for part in text.split(',') {
            let medium = part.trim();
            if medium.is_empty() {
                if text.trim().is_empty() {
                    break;
                }
                return Err(DomError::Syntax(format!("malformed media list '{text}'")));
            }
            if !media.iter().any(|m: &String| m == medium) {
                media.push(medium.to_string());
            }
        }
        self.media = media;
        Ok(())
    }

    /// Append a medium. An already-present medium is removed first, so the
    /// list never holds a duplicate and the newest occurrence lands last.
    pub fn append_medium(&mut self, medium: &str) -> DomResult<()> {
        self.check_writable()?;
        let medium = medium.trim();
        if medium.is_empty() {
            return Err(DomError::Syntax("empty medium name".into()));
        }
        self.media.retain(|m| m != medium);
        self.media.push(medium.to_string());
        Ok(())
    }

    /// Delete a medium; absent media are a `NotFound` error.
    pub fn delete_medium(&mut self, medium: &str) -> DomResult<()> {
        self.check_writable()?;
        let before = self.media.len();
        self.media.retain(|m| m != medium);
        if self.media.len() == before {
            return Err(DomError::NotFound(format!("medium '{medium}' not in list")));
        }
        Ok(())
    }

    fn check_writable(&self) -> DomResult<()> {
        if self.read_only {
            return Err(DomError::NoModificationAllowed(
                "media list is read-only".into(),
            ));
        }
        Ok(())
    }
}

/// A style sheet associated with an owner node or created programmatically.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    owner: NodeId,
    title: Option<String>,
    sheet_type: Option<String>,
    href: Option<String>,
    media: MediaList,
    pub disabled: bool,
}

impl StyleSheet {
    /// A sheet backed by a style-bearing node; metadata is derived from the
    /// node's attributes on each access.
    pub fn for_node(owner: NodeId) -> Self {
        Self {
            owner,
            title: None,
            sheet_type: None,
            href: None,
            media: MediaList::new(),
            disabled: false,
        }
    }

    /// A programmatic sheet with explicit backing fields.
    pub fn programmatic(title: Option<&str>, media_text: &str) -> DomResult<Self> {
        Ok(Self {
            owner: NodeId::NONE,
            title: title.map(str::to_string),
            sheet_type: Some("text/css".to_string()),
            href: None,
            media: MediaList::from_media_text(media_text)?,
            disabled: false,
        })
    }

    pub fn owner_node(&self) -> Option<NodeId> {
        self.owner.checked()
    }

    fn owner_attr(&self, doc: &Document, name: &str) -> Option<String> {
        doc.attribute(self.owner.checked()?, name).map(str::to_string)
    }

    /// Sheet title: owner's `title` attribute, else the backing field.
    pub fn title(&self, doc: &Document) -> Option<String> {
        if self.owner.is_some() {
            self.owner_attr(doc, "title")
        } else {
            self.title.clone()
        }
    }

    /// Sheet type: owner's `type` attribute, else the backing field, else
    /// "text/css".
    pub fn sheet_type(&self, doc: &Document) -> String {
        if self.owner.is_some() {
            if let Some(t) = self.owner_attr(doc, "type") {
                return t;
            }
        } else if let Some(t) = &self.sheet_type {
            return t.clone();
        }
        "text/css".to_string()
    }

    /// Sheet location: owner's `href` attribute, else the backing field.
    pub fn href(&self, doc: &Document) -> Option<String> {
        if self.owner.is_some() {
            self.owner_attr(doc, "href")
        } else {
            self.href.clone()
        }
    }

    /// Media list: parsed from the owner's `media` attribute when an owner
    /// exists, else the backing list.
    pub fn media(&self, doc: &Document) -> MediaList {
        if self.owner.is_some() {
            let text = self.owner_attr(doc, "media").unwrap_or_default();
            MediaList::from_media_text(&text).unwrap_or_default()
        } else {
            self.media.clone()
        }
    }

    /// Backing media list of a programmatic sheet.
    pub fn media_mut(&mut self) -> &mut MediaList {
        &mut self.media
    }
}

/// Ordered sheet registry: at most one sheet per owner node.
#[derive(Debug, Clone, Default)]
pub struct StyleSheetList {
    sheets: Vec<StyleSheet>,
}

impl StyleSheetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&StyleSheet> {
        self.sheets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleSheet> {
        self.sheets.iter()
    }

    /// Add a sheet. A sheet whose owner node is already registered replaces
    /// the existing entry in place, keeping list order stable.
    pub fn add(&mut self, sheet: StyleSheet) {
        if let Some(owner) = sheet.owner_node() {
            if let Some(existing) = self
                .sheets
                .iter_mut()
                .find(|s| s.owner_node() == Some(owner))
            {
                *existing = sheet;
                return;
            }
        }
        self.sheets.push(sheet);
    }

    /// Drop the sheet registered for an owner node.
    pub fn remove_for(&mut self, owner: NodeId) {
        self.sheets.retain(|s| s.owner_node() != Some(owner));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_medium_dedups_and_moves_to_end() {
        let mut list = MediaList::new();
        list.append_medium("screen").unwrap();
        list.append_medium("print").unwrap();
        list.append_medium("screen").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.item(0), Some("print"));
        assert_eq!(list.item(1), Some("screen"));
    }

    #[test]
    fn test_delete_missing_medium_is_not_found() {
        let mut list = MediaList::from_media_text("screen").unwrap();
        let err = list.delete_medium("print").unwrap_err();
        assert_eq!(err.code(), 8);
        list.delete_medium("screen").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_read_only_list_rejects_mutation() {
        let mut list = MediaList::from_media_text("screen, print")
            .unwrap()
            .into_read_only();
        let err = list.append_medium("tv").unwrap_err();
        assert_eq!(err.code(), 7);
        assert_eq!(list.media_text(), "screen, print");
    }

    #[test]
    fn test_media_text_round_trip() {
        let list = MediaList::from_media_text(" screen ,print ").unwrap();
        assert_eq!(list.media_text(), "screen, print");
        assert!(MediaList::from_media_text("screen,,print").is_err());
        assert!(MediaList::from_media_text("").unwrap().is_empty());
    }

    #[test]
    fn test_sheet_derives_from_owner_attributes() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let style = doc.create_element("style");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, style).unwrap();
        doc.set_attribute(style, "title", "main").unwrap();
        doc.set_attribute(style, "media", "screen, print").unwrap();

        let sheet = StyleSheet::for_node(style);
        assert_eq!(sheet.title(&doc), Some("main".to_string()));
        assert_eq!(sheet.sheet_type(&doc), "text/css");
        assert_eq!(sheet.media(&doc).media_text(), "screen, print");
        assert_eq!(sheet.href(&doc), None);
    }

    #[test]
    fn test_programmatic_sheet_uses_backing_fields() {
        let doc = Document::new();
        let sheet = StyleSheet::programmatic(Some("alt"), "print").unwrap();
        assert_eq!(sheet.title(&doc), Some("alt".to_string()));
        assert!(sheet.media(&doc).contains("print"));
        assert!(sheet.owner_node().is_none());
    }

    #[test]
    fn test_sheet_list_dedups_by_owner() {
        let mut doc = Document::new();
        let a = doc.create_element("style");
        let b = doc.create_element("link");

        let mut list = StyleSheetList::new();
        list.add(StyleSheet::for_node(a));
        list.add(StyleSheet::for_node(b));
        list.add(StyleSheet::for_node(a));

        assert_eq!(list.len(), 2);
        assert_eq!(list.item(0).unwrap().owner_node(), Some(a));
        assert_eq!(list.item(1).unwrap().owner_node(), Some(b));
    }
}
