//! Post overlay box.

use crate::ui::helpers::{position_cursor, write_line};
use crate::ui::layout::Layout;
use crate::ui::page::Overlay;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HitBox, HitMap};

/// Widest the overlay box gets, borders included.
pub const MAX_BOX_WIDTH: usize = 76;
const MIN_BOX_WIDTH: usize = 20;
const SIDE_MARGIN: usize = 4;

/// Placement of the overlay box inside the pane, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGeometry {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

impl BoxGeometry {
    /// Width available to the content: the box minus borders and padding.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(4)
    }

    /// Content rows that fit between the borders.
    #[must_use]
    pub const fn body_rows(&self) -> usize {
        self.height.saturating_sub(2)
    }
}

/// Box width for a pane `cols` wide.
#[must_use]
pub fn box_width(cols: usize) -> usize {
    cols.saturating_sub(SIDE_MARGIN * 2)
        .min(MAX_BOX_WIDTH)
        .max(MIN_BOX_WIDTH)
        .min(cols)
}

/// Centres a box holding `content_rows` lines in a `viewport` tall pane.
#[must_use]
pub fn place_box(content_rows: usize, viewport: usize, cols: usize) -> BoxGeometry {
    let width = box_width(cols);
    let height = (content_rows + 2).min(viewport);
    BoxGeometry {
        top: viewport.saturating_sub(height) / 2,
        left: cols.saturating_sub(width) / 2,
        width,
        height,
    }
}

/// Paints the overlay box and records hit boxes: the backdrop over the whole
/// viewport, then the content box, then the individual elements on top.
#[allow(clippy::too_many_arguments)]
pub fn render_overlay(
    out: &mut String,
    hits: &mut HitMap,
    layout: &Layout,
    geometry: BoxGeometry,
    scroll: usize,
    overlay: &Overlay,
    viewport: usize,
    theme: &Theme,
    cols: usize,
) {
    let border = Theme::fg(&theme.colors.overlay_border);
    let fill = theme.colors.overlay_bg.as_deref().map(Theme::bg).unwrap_or_default();
    let inner = geometry.inner_width();
    let BoxGeometry { top, left, width, .. } = geometry;

    position_cursor(out, top + 1, left + 1);
    out.push_str(&border);
    out.push_str(&fill);
    out.push('┌');
    out.push_str(&"─".repeat(width.saturating_sub(2)));
    out.push('┐');
    out.push_str(Theme::reset());

    for body_row in 0..geometry.body_rows() {
        position_cursor(out, top + 2 + body_row, left + 1);
        out.push_str(&border);
        out.push_str(&fill);
        out.push_str("│ ");
        out.push_str(Theme::reset());
        out.push_str(&fill);
        match layout.lines.get(scroll + body_row) {
            Some(line) => write_line(out, line, theme, inner),
            None => out.push_str(&" ".repeat(inner)),
        }
        out.push_str(&border);
        out.push_str(&fill);
        out.push_str(" │");
        out.push_str(Theme::reset());
    }

    position_cursor(out, top + geometry.height, left + 1);
    out.push_str(&border);
    out.push_str(&fill);
    out.push('└');
    out.push_str(&"─".repeat(width.saturating_sub(2)));
    out.push('┘');
    out.push_str(Theme::reset());

    hits.push_area(0..viewport, cols, overlay.backdrop);
    for row in top..top + geometry.height {
        hits.push(HitBox {
            row,
            start_col: left,
            end_col: left + width,
            element: overlay.content,
        });
    }

    let visible = scroll..scroll + geometry.body_rows();
    for hit in layout.hits.iter().filter(|h| visible.contains(&h.row)) {
        hits.push(HitBox {
            row: top + 1 + hit.row - scroll,
            start_col: left + 2 + hit.start_col,
            end_col: left + 2 + hit.end_col.min(inner),
            element: hit.element,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_is_centred_and_bounded() {
        let geometry = place_box(10, 30, 120);
        assert_eq!(geometry.width, MAX_BOX_WIDTH);
        assert_eq!(geometry.height, 12);
        assert_eq!(geometry.left, 22);
        assert_eq!(geometry.top, 9);
    }

    #[test]
    fn tall_content_is_clipped_to_the_viewport() {
        let geometry = place_box(100, 20, 60);
        assert_eq!(geometry.height, 20);
        assert_eq!(geometry.body_rows(), 18);
        assert_eq!(geometry.width, 52);
    }

    #[test]
    fn narrow_panes_keep_a_usable_box() {
        assert_eq!(box_width(24), 20);
        assert_eq!(box_width(12), 12);
    }
}
