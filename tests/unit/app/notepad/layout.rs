use super::*;
use crate::kernel::services::ports::TextSurface;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn pieces(s: &str, width: usize) -> Vec<String> {
    let c = chars(s);
    wrap_line(&c, width, 4)
        .into_iter()
        .map(|r| c[r].iter().collect())
        .collect()
}

#[test]
fn wraps_at_word_boundaries() {
    assert_eq!(pieces("hello big world", 10), vec!["hello big ", "world"]);
    assert_eq!(pieces("short", 10), vec!["short"]);
    assert_eq!(pieces("", 10), vec![""]);
}

#[test]
fn long_words_break_hard() {
    assert_eq!(pieces("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn wide_chars_count_two_cells() {
    assert_eq!(pieces("日本語です", 4), vec!["日本", "語で", "す"]);
}

#[test]
fn rows_cover_every_char_once() {
    let text = "the quick brown fox jumps over the lazy dog";
    let c = chars(text);
    let ranges = wrap_line(&c, 7, 4);
    let mut next = 0;
    for r in &ranges {
        assert_eq!(r.start, next);
        next = r.end;
    }
    assert_eq!(next, c.len());
}

#[test]
fn center_and_right_offsets() {
    let mut doc = DocumentSurface::from_text("abcd");
    doc.set_alignment(Alignment::Center);
    let row = &layout_line(&doc, 0, 10, 4)[0];
    assert_eq!(row.xs[0], 3);

    doc.set_alignment(Alignment::Right);
    let row = &layout_line(&doc, 0, 10, 4)[0];
    assert_eq!(row.xs[0], 6);
    assert_eq!(*row.xs.last().expect("end"), 10);
}

#[test]
fn justify_fills_all_but_last_row() {
    let mut doc = DocumentSurface::from_text("aa bb cc dd");
    doc.set_alignment(Alignment::Justify);
    let rows = layout_line(&doc, 0, 7, 4);
    assert_eq!(rows.len(), 2);
    // "aa bb " stretched: "bb" ends at the right edge.
    let first = &rows[0];
    let b_end = first.x_of(first.start + 5);
    assert_eq!(b_end, 7);
    let last = &rows[1];
    assert_eq!(last.xs[0], 0);
    assert_eq!(last.x_of(last.start + 3), 3);
}

#[test]
fn col_at_maps_clicks_back() {
    let mut doc = DocumentSurface::from_text("abcd");
    doc.set_alignment(Alignment::Right);
    let row = &layout_line(&doc, 0, 10, 4)[0];
    assert_eq!(row.col_at(0), 0);
    assert_eq!(row.col_at(7), 1);
    assert_eq!(row.col_at(20), 4);
}

#[test]
fn follow_cursor_scrolls_down_and_up() {
    let text: String = (0..20).map(|i| format!("line {i}\n")).collect();
    let mut doc = DocumentSurface::from_text(&text);
    let mut view = Viewport::default();

    doc.set_cursor_position(12, 0, false);
    view.follow_cursor(&doc, 40, 5, 4);
    assert_eq!(view, Viewport { line: 8, row: 0 });

    doc.set_cursor_position(10, 0, false);
    view.follow_cursor(&doc, 40, 5, 4);
    assert_eq!(view, Viewport { line: 8, row: 0 });

    doc.set_cursor_position(2, 0, false);
    view.follow_cursor(&doc, 40, 5, 4);
    assert_eq!(view, Viewport { line: 2, row: 0 });
}

#[test]
fn rows_start_inside_wrapped_paragraph() {
    let doc = DocumentSurface::from_text("aaaa bbbb cccc\nnext");
    let view = Viewport { line: 0, row: 1 };
    let rows = view.rows(&doc, 5, 10, 4);
    let texts: Vec<String> = rows.iter().map(|r| r.chars.iter().collect()).collect();
    assert_eq!(texts, vec!["bbbb ", "cccc", "next"]);
}

#[test]
fn scroll_stops_at_document_edges() {
    let doc = DocumentSurface::from_text("a\nb\nc");
    let mut view = Viewport::default();
    view.scroll(&doc, -3, 10, 4);
    assert_eq!(view, Viewport::default());
    view.scroll(&doc, 10, 10, 4);
    assert_eq!(view, Viewport { line: 2, row: 0 });
}
