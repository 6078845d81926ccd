//! The scrolled page body.

use crate::ui::helpers::{position_cursor, write_line};
use crate::ui::layout::Layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HitBox, HitMap, Line};

/// Left and right margin of the page body, in cells.
pub const PAGE_MARGIN: usize = 1;

/// Paints `viewport` lines of `layout` starting at document row `offset`
/// into pane rows `0..viewport` and records their hit boxes.
pub fn render_document(
    out: &mut String,
    hits: &mut HitMap,
    layout: &Layout,
    offset: usize,
    viewport: usize,
    theme: &Theme,
    cols: usize,
) {
    let width = cols.saturating_sub(PAGE_MARGIN * 2);
    let blank = Line::default();

    for screen_row in 0..viewport {
        let line = layout.lines.get(offset + screen_row).unwrap_or(&blank);
        position_cursor(out, screen_row + 1, 1);
        out.push_str(&" ".repeat(PAGE_MARGIN.min(cols)));
        write_line(out, line, theme, width);
        out.push_str(&" ".repeat(cols.saturating_sub(width + PAGE_MARGIN)));
    }

    let visible = offset..offset + viewport;
    for hit in layout.hits.iter().filter(|h| visible.contains(&h.row)) {
        hits.push(HitBox {
            row: hit.row - offset,
            start_col: hit.start_col + PAGE_MARGIN,
            end_col: (hit.end_col + PAGE_MARGIN).min(cols),
            element: hit.element,
        });
    }
}
