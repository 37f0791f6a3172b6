use super::*;
use crate::kernel::format::{Alignment, FontSpec, TextColor};
use crate::kernel::print::{paginate, PageSetup, Paragraph};

fn sample(text: &str, font: FontSpec) -> PrintDocument {
    PrintDocument {
        title: "sample".to_string(),
        paragraphs: text
            .split('\n')
            .map(|t| Paragraph {
                text: t.to_string(),
                alignment: Alignment::Left,
            })
            .collect(),
        font,
        color: TextColor::rgb(0, 0, 128),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn renders_a_pdf_document() {
    let doc = sample("hello\nworld", FontSpec::default());
    let pages = paginate(&doc, &PageSetup::default());
    let bytes = render_pdf(&pages, &doc);

    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/Courier"));
    assert!(contains(&bytes, b"(hello)"));
    assert!(contains(&bytes, b"(world)"));
}

#[test]
fn one_page_object_per_layout() {
    let text = (0..120).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let doc = sample(&text, FontSpec::default());
    let pages = paginate(&doc, &PageSetup::default());
    assert_eq!(pages.len(), 3);

    let bytes = render_pdf(&pages, &doc);
    let page_objects = count(&bytes, b"/Type /Page") - count(&bytes, b"/Type /Pages");
    assert_eq!(page_objects, 3);
    assert!(contains(&bytes, b"/Count 3"));
}

#[test]
fn bold_italic_font_selects_matching_base_font() {
    let font = FontSpec {
        bold: true,
        italic: true,
        ..FontSpec::default()
    };
    let doc = sample("styled", font);
    let bytes = render_pdf(&paginate(&doc, &PageSetup::default()), &doc);
    assert!(contains(&bytes, b"/Courier-BoldOblique"));
}

#[test]
fn underline_draws_strokes() {
    let font = FontSpec {
        underline: true,
        ..FontSpec::default()
    };
    let doc = sample("under", font);
    let content = page_content(&paginate(&doc, &PageSetup::default())[0], &doc);
    assert!(contains(&content, b" l\n"));
    assert!(content.ends_with(b"\nS"));
}

#[test]
fn win_ansi_encoding_replaces_unsupported_chars() {
    assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
    assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
    assert_eq!(encode_win_ansi("€—"), vec![0x80, 0x97]);
    assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    assert_eq!(encode_win_ansi("x\r"), b"x".to_vec());
}
