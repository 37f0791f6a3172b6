//! PDF output for paginated layouts, built on `pdf-writer`.
//!
//! Uses one standard Type1 font (no embedding) with WinAnsi encoding. Characters the
//! encoding cannot represent are printed as `?`.

use super::{PageLayout, PrintDocument};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

const FONT_NAME: Name<'static> = Name(b"F1");
const PRODUCER: &str = "zpad";

struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        let id = Ref::new(self.0);
        self.0 += 1;
        id
    }
}

pub fn render_pdf(pages: &[PageLayout], doc: &PrintDocument) -> Vec<u8> {
    let mut alloc = RefAlloc(1);
    let catalog_id = alloc.next();
    let tree_id = alloc.next();
    let font_id = alloc.next();
    let info_id = alloc.next();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.next(), alloc.next())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(&doc.title))
        .producer(TextStr(PRODUCER));
    pdf.type1_font(font_id)
        .base_font(Name(doc.font.base_font().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (layout, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, layout.width, layout.height));
        page.parent(tree_id);
        page.contents(*content_id);
        page.resources().fonts().pair(FONT_NAME, font_id);
        page.finish();

        let content = page_content(layout, doc);
        pdf.stream(*content_id, &content);
    }

    pdf.finish()
}

fn page_content(layout: &PageLayout, doc: &PrintDocument) -> Vec<u8> {
    let size = f32::from(doc.font.size_pt);
    let (r, g, b) = doc.color.unit_rgb();

    let mut content = Content::new();
    content.set_fill_rgb(r, g, b);
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(size * 0.05);

    for line in &layout.lines {
        if line.text.is_empty() {
            continue;
        }

        let encoded = encode_win_ansi(&line.text);
        content.begin_text();
        content.set_font(FONT_NAME, size);
        content.set_word_spacing(line.word_spacing);
        content.next_line(line.x, line.y);
        content.show(Str(&encoded));
        content.end_text();

        if doc.font.underline {
            let y = line.y - size * 0.12;
            content.move_to(line.x, y);
            content.line_to(line.x + line.width, y);
            content.stroke();
        }
    }

    content.finish()
}

/// Maps text onto WinAnsiEncoding (Latin-1 plus the CP1252 punctuation block).
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| *c != '\r')
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/print/pdf.rs"]
mod tests;
