//! End-to-end layout scenarios rendered to a text grid.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use solas::core::buffer::CellBuffer;
use solas::core::frame::Frame;
use solas::{
    Cell, Hotspots, Rect, RenderContext, Size, View, bordered, group, spacer, stack, text, width,
};

/// Render a view at the given bounds and return the cell buffer.
fn render(view: &dyn View, w: u16, h: u16) -> CellBuffer {
    let mut buffer = CellBuffer::new(Size::new(w, h));
    let mut hotspots = Hotspots::new();
    let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
    view.render(&mut ctx);
    buffer
}

/// Render a buffer to a text grid, one line per row, for comparison.
fn to_text(buf: &CellBuffer) -> String {
    let mut result = String::new();
    for y in 0..buf.height() {
        if let Some(row) = buf.row(y) {
            for cell in row {
                result.push_str(&cell.grapheme);
            }
        }
        result.push('\n');
    }
    result
}

#[test]
fn plain_stack() {
    let view = stack(vec![
        text("Line 1").boxed(),
        text("Line 2").boxed(),
        text("Line 3").boxed(),
    ]);
    let buf = render(&view, 20, 5);

    assert_eq!(
        to_text(&buf),
        "Line 1              \n\
         Line 2              \n\
         Line 3              \n\
         \x20                   \n\
         \x20                   \n"
    );
    // Dirty region covers exactly the written cells.
    assert_eq!(buf.dirty().rect(), Some(Rect::new(0, 0, 6, 3)));
}

#[test]
fn rounded_bordered_title() {
    let view = bordered(text("X")).title("Title");
    let buf = render(&view, 15, 3);
    assert_eq!(
        to_text(&buf),
        "╭─ Title ─────╮\n\
         │ X           │\n\
         ╰─────────────╯\n"
    );
}

#[test]
fn flex_split() {
    let view = stack(vec![
        text("A").boxed(),
        spacer().boxed(),
        text("B").boxed(),
        spacer().boxed(),
        text("C").boxed(),
    ]);
    let buf = render(&view, 10, 9);

    let row = |y: u16| {
        buf.row(y)
            .map(|r| r.iter().map(|c| c.grapheme.as_str()).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    };
    assert_eq!(row(0), "A");
    assert_eq!(row(4), "B");
    assert_eq!(row(8), "C");
    for y in [1, 2, 3, 5, 6, 7] {
        assert_eq!(row(y), "", "row {y} should be blank");
    }
}

#[test]
fn group_with_right_aligned_spacer() {
    let view = group(vec![
        text("L").boxed(),
        spacer().boxed(),
        text("R").boxed(),
    ]);
    let buf = render(&view, 30, 1);
    assert_eq!(buf.get(0, 0).map(|c| c.grapheme.as_str()), Some("L"));
    assert_eq!(buf.get(29, 0).map(|c| c.grapheme.as_str()), Some("R"));
}

#[test]
fn wide_char_fixed_width_cell() {
    // "你好" in a 5-column cell: two width-2 characters at columns 0-3,
    // column 4 blank, continuation flags at 1 and 3.
    let view = width(5, text("\u{4f60}\u{597d}"));
    let buf = render(&view, 5, 1);

    assert_eq!(buf.get(0, 0).map(|c| c.grapheme.as_str()), Some("\u{4f60}"));
    assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
    assert_eq!(buf.get(2, 0).map(|c| c.grapheme.as_str()), Some("\u{597d}"));
    assert!(buf.get(3, 0).is_some_and(Cell::is_continuation));
    assert!(buf.get(4, 0).is_some_and(Cell::is_blank));
}

#[test]
fn wide_char_continuation_invariant_holds_after_render() {
    let view = stack(vec![
        text("\u{4e16}\u{754c} ok").boxed(),
        text("x\u{4f60}y").boxed(),
    ]);
    let buf = render(&view, 8, 2);

    for y in 0..buf.height() {
        for x in 0..buf.width() {
            if buf.get(x, y).is_some_and(Cell::is_continuation) {
                assert!(x > 0, "continuation at column 0");
                let primary = buf.get(x - 1, y).unwrap();
                assert!(primary.is_wide(), "no wide primary left of ({x},{y})");
                assert_eq!(
                    primary.style,
                    buf.get(x, y).unwrap().style,
                    "style mismatch at ({x},{y})"
                );
            }
        }
    }
}

#[test]
fn zero_sized_bounds_render_nothing() {
    let view = stack(vec![text("hidden").boxed()]);
    let buf = render(&view, 0, 0);
    assert!(buf.dirty().is_empty());
}

#[test]
fn empty_containers_measure_zero() {
    assert_eq!(stack(vec![]).measure(40, 10), Size::new(0, 0));
    assert_eq!(group(vec![]).measure(40, 10), Size::new(0, 0));
}
