use super::*;
use crate::kernel::format::{FontSpec, TextColor};
use crate::kernel::print::{Orientation, Paper, Paragraph};

fn doc(paragraphs: &[(&str, Alignment)]) -> PrintDocument {
    PrintDocument {
        title: "test".to_string(),
        paragraphs: paragraphs
            .iter()
            .map(|(text, alignment)| Paragraph {
                text: text.to_string(),
                alignment: *alignment,
            })
            .collect(),
        font: FontSpec::default(),
        color: TextColor::BLACK,
    }
}

fn lorem(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn empty_document_yields_one_blank_page() {
    let pages = paginate(&doc(&[("", Alignment::Left)]), &PageSetup::default());
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_blank());
    assert_eq!((pages[0].width, pages[0].height), (595.0, 842.0));
}

#[test]
fn wrapping_keeps_every_word_in_order() {
    let text = lorem(200);
    let pages = paginate(&doc(&[(&text, Alignment::Left)]), &PageSetup::default());

    let rebuilt: Vec<String> = pages
        .iter()
        .flat_map(|p| p.lines.iter())
        .flat_map(|l| l.text.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect();
    let original: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    assert_eq!(rebuilt, original);
}

#[test]
fn lines_never_exceed_printable_width() {
    let setup = PageSetup::default();
    let text = lorem(300);
    let pages = paginate(&doc(&[(&text, Alignment::Left)]), &setup);
    for line in pages.iter().flat_map(|p| p.lines.iter()) {
        assert!(line.width <= setup.printable_width() + 0.01);
    }
}

#[test]
fn justified_lines_fill_width_except_the_last() {
    let setup = PageSetup::default();
    let text = lorem(60);
    let pages = paginate(&doc(&[(&text, Alignment::Justify)]), &setup);
    let lines = &pages[0].lines;
    assert!(lines.len() > 1);

    for line in &lines[..lines.len() - 1] {
        assert_eq!(line.x, setup.margin_pt);
        assert!((line.width - setup.printable_width()).abs() < 0.01);
        assert!(line.word_spacing >= 0.0);
    }
    let last = lines.last().unwrap();
    assert_eq!(last.word_spacing, 0.0);
}

#[test]
fn right_aligned_lines_end_at_right_margin() {
    let setup = PageSetup::default();
    let pages = paginate(&doc(&[("short line", Alignment::Right)]), &setup);
    let line = &pages[0].lines[0];
    let right_edge = setup.page_size().0 - setup.margin_pt;
    assert!((line.x + line.width - right_edge).abs() < 0.01);
}

#[test]
fn centered_lines_have_equal_slack() {
    let setup = PageSetup::default();
    let pages = paginate(&doc(&[("middle", Alignment::Center)]), &setup);
    let line = &pages[0].lines[0];
    let left = line.x - setup.margin_pt;
    let right = setup.page_size().0 - setup.margin_pt - (line.x + line.width);
    assert!((left - right).abs() < 0.01);
}

#[test]
fn long_documents_span_multiple_pages() {
    let paragraphs: Vec<(String, Alignment)> =
        (0..100).map(|i| (format!("line {i}"), Alignment::Left)).collect();
    let borrowed: Vec<(&str, Alignment)> =
        paragraphs.iter().map(|(t, a)| (t.as_str(), *a)).collect();
    let pages = paginate(&doc(&borrowed), &PageSetup::default());

    // 698pt of printable height / 14.4pt lines = 48 lines per page.
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].lines.len(), 48);
    assert_eq!(pages[2].lines.len(), 4);
    assert!(pages[0].lines[0].y > pages[0].lines[1].y);
}

#[test]
fn landscape_swaps_page_dimensions() {
    let setup = PageSetup {
        paper: Paper::Letter,
        orientation: Orientation::Landscape,
        ..PageSetup::default()
    };
    let pages = paginate(&doc(&[("x", Alignment::Left)]), &setup);
    assert_eq!((pages[0].width, pages[0].height), (792.0, 612.0));
}

#[test]
fn wrap_splits_overlong_words() {
    assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    assert_eq!(wrap("ab cd ef", 5), vec!["ab cd", "ef"]);
    assert_eq!(wrap("", 5), vec![""]);
}

#[test]
fn tabs_expand_to_four_columns() {
    assert_eq!(expand_tabs("a\tb"), "a   b");
    assert_eq!(expand_tabs("\tx"), "    x");
}
