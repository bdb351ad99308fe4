//! Example: parse, query and re-serialize a document

use vellum_engine::css::query_selector_all;
use vellum_engine::dom::Document;
use vellum_engine::ls::{Parser, Serializer};
use vellum_engine::xpath::Navigator;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let source = "<library>\
                  <book id=\"b1\"><title>Parsing</title></book>\
                  <book id=\"b2\"><title>Serializing</title></book>\
                  </library>";

    let mut parser = Parser::new();
    let doc = parser.parse_string(source).expect("well-formed input");
    println!("Vellum engine v{}", vellum_engine::VERSION);

    let titles = query_selector_all(&doc, Document::ROOT, "book > title").unwrap();
    for title in titles {
        println!("title: {}", doc.text_content(title));
    }

    let mut nav = Navigator::new(&doc);
    if nav.move_to_id("b2") {
        println!("navigator found: {}", nav.value());
    }

    let out = Serializer::new().write_to_string(&doc).expect("serializable");
    println!("{out}");
}
