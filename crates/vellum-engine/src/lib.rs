//! Vellum Engine
//!
//! Facade over the document engine: the node tree and event dispatch
//! (`vellum-dom`), the selector engine (`vellum-css`), the navigator
//! cursor (`vellum-xpath`) and the Load/Save subsystem (`vellum-ls`).
//!
//! # Example
//! ```rust
//! use vellum_engine::ls::Parser;
//! use vellum_engine::css::query_selector;
//!
//! let mut parser = Parser::new();
//! let doc = parser.parse_string("<list><item id=\"a\"/></list>").unwrap();
//! let item = query_selector(&doc, vellum_engine::dom::Document::ROOT, "#a").unwrap();
//! assert!(item.is_some());
//! ```

mod wrapper;

pub use wrapper::WrapperCache;

// Re-export sub-crates for direct access
pub use vellum_css as css;
pub use vellum_dom as dom;
pub use vellum_ls as ls;
pub use vellum_xpath as xpath;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
