//! Painters for the regions of a frame.
//!
//! - [`document`]: the scrolled page body
//! - [`overlay`]: the post overlay box drawn over the page
//! - [`footer`]: key hints under the bottom border
//!
//! Each painter appends to the frame buffer and records the hit boxes of what
//! it drew, translated to pane coordinates.

mod document;
mod footer;
mod overlay;

pub use document::{render_document, PAGE_MARGIN};
pub use footer::render_footer;
pub use overlay::{place_box, render_overlay, BoxGeometry};

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Draws a horizontal border across the pane at a 1-indexed `row` and
/// returns the next row.
pub fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}
