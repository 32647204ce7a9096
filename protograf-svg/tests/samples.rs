//! Render every sample sheet to SVG and inspect the documents.

use protograf::samples::{self, SAMPLE_COUNT};
use protograf::RenderContext as _;
use protograf_svg::RenderContext;

fn render_page(number: usize, page: usize) -> String {
    let sample = samples::get(number).unwrap();
    let mut rc = RenderContext::new(sample.size());
    sample.draw(&mut rc, page).unwrap();
    rc.finish().unwrap();
    let mut out = Vec::new();
    rc.write(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn count(doc: &roxmltree::Document, tag: &str) -> usize {
    doc.descendants().filter(|n| n.has_tag_name(tag)).count()
}

#[test]
fn every_page_is_well_formed() {
    for number in 0..SAMPLE_COUNT {
        let pages = samples::get::<RenderContext>(number).unwrap().pages();
        for page in 0..pages {
            let text = render_page(number, page);
            let doc = roxmltree::Document::parse(&text)
                .unwrap_or_else(|e| panic!("sample {} page {}: {}", number, page, e));
            let root = doc.root_element();
            assert_eq!(root.tag_name().name(), "svg");
            assert!(root.attribute("viewBox").is_some());
            assert!(root.children().filter(|n| n.is_element()).count() > 1);
        }
    }
}

#[test]
fn hex_map_labels_every_cell() {
    let text = render_page(0, 0);
    let doc = roxmltree::Document::parse(&text).unwrap();
    let labels: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(labels.len(), 9 * 7);
    assert!(labels.contains(&"A01"));
    assert!(labels.contains(&"I07"));
    // a fill and an outline per hex
    assert_eq!(count(&doc, "path"), 2 * 9 * 7);
}

#[test]
fn rack_holds_fifteen_balls() {
    let text = render_page(4, 0);
    let doc = roxmltree::Document::parse(&text).unwrap();
    assert_eq!(count(&doc, "circle"), 15);
}

#[test]
fn deck_pages_hold_six_cards() {
    let sample = samples::get::<RenderContext>(3).unwrap();
    assert_eq!(sample.pages(), 3);
    for page in 0..sample.pages() {
        let text = render_page(3, page);
        let doc = roxmltree::Document::parse(&text).unwrap();
        let cards = doc
            .descendants()
            .filter(|n| n.has_tag_name("rect") && n.attribute("rx").is_some())
            .count();
        // every card is filled and outlined
        assert_eq!(cards, 2 * 6);
    }
}
