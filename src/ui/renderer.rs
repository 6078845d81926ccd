//! Top-level rendering coordinator.
//!
//! A frame is produced in three steps:
//!
//! 1. **Layout**: the page tree is flowed into lines at the pane width.
//! 2. **Scroll**: pending scroll requests are resolved against the fresh
//!    layout and the animation advances one step.
//! 3. **Paint**: the visible slice, the overlay box and the footer are
//!    written into a frame buffer, and the hit map is rebuilt for mouse
//!    input.
//!
//! # Frame layout
//!
//! ```text
//! rows 1..=viewport   page body (overlay box drawn on top)
//! row viewport+1      border
//! row viewport+2      key hints
//! ```

use crate::app::AppState;
use crate::ui::components::{self, PAGE_MARGIN};
use crate::ui::layout::{layout_document, layout_subtree, LayoutContext};
use crate::ui::viewmodel::HitMap;

/// Rows taken by the border and footer.
const CHROME_ROWS: usize = 2;

/// A painted frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// ANSI output for the whole pane.
    pub output: String,
    /// `true` while a smooth scroll still has frames to go.
    pub animating: bool,
}

/// Lays out and paints the page for a `rows` x `cols` pane.
///
/// Mutates `state` for the parts of rendering that depend on the pane size:
/// scroll resolution, overlay scroll clamping and the hit map used by the
/// next click.
pub fn render(state: &mut AppState, rows: usize, cols: usize) -> Frame {
    let _span = tracing::debug_span!("render", rows, cols).entered();

    let viewport = rows.saturating_sub(CHROME_ROWS);
    let width = cols.saturating_sub(PAGE_MARGIN * 2);
    let focused = state.focused_element();
    let ctx = LayoutContext {
        focused,
        highlight: &state.filter.state().search_term,
    };

    let document = layout_document(&state.page, width, ctx);
    state.scroll.resolve(&document.anchors, document.lines.len(), viewport);

    let mut output = String::new();
    let mut hits = HitMap::default();
    components::render_document(
        &mut output,
        &mut hits,
        &document,
        state.scroll.offset(),
        viewport,
        &state.theme,
        cols,
    );

    if let Some(overlay) = state.page.overlay().copied() {
        let inner = components::place_box(0, viewport, cols).inner_width();
        let content = layout_subtree(&state.page.tree, overlay.content, inner, ctx);
        let geometry = components::place_box(content.lines.len(), viewport, cols);

        let max_scroll = content.lines.len().saturating_sub(geometry.body_rows());
        state.overlay_scroll = state.overlay_scroll.min(max_scroll);

        components::render_overlay(
            &mut output,
            &mut hits,
            &content,
            geometry,
            state.overlay_scroll,
            &overlay,
            viewport,
            &state.theme,
            cols,
        );
    }

    let next_row = components::render_border(&mut output, viewport + 1, &state.theme.colors.border, cols);
    components::render_footer(&mut output, next_row, &state.footer_info(), &state.theme, cols);

    tracing::trace!(
        doc_rows = document.lines.len(),
        offset = state.scroll.offset(),
        hit_boxes = hits.len(),
        "frame painted"
    );
    state.hits = hits;

    Frame {
        output,
        animating: state.scroll.is_animating(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event, PageOptions};
    use crate::domain::PostId;
    use crate::store::PostStore;
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(PostStore::builtin().unwrap(), Theme::default(), PageOptions::default())
    }

    #[test]
    fn frame_contains_titles_and_hints() {
        let mut state = state();
        let frame = render(&mut state, 40, 100);
        assert!(frame.output.contains("Getting Started with Web Development"));
        assert!(frame.output.contains("/: search"));
        assert!(!frame.animating);
        assert!(!state.hits.is_empty());
    }

    #[test]
    fn clicking_a_painted_read_more_link_opens_the_post() {
        let mut state = state();
        render(&mut state, 60, 100);
        let link = state.page.read_more_links()[0];

        let (row, col) = (0..58)
            .flat_map(|row| (0..100).map(move |col| (row, col)))
            .find(|(row, col)| state.hits.hit(*row, *col) == Some(link))
            .unwrap();
        handle_event(&mut state, &Event::ClickAt { row, col }).unwrap();
        assert_eq!(state.page.overlay().map(|o| o.post), Some(PostId::new(1)));
    }

    #[test]
    fn overlay_backdrop_covers_the_page() {
        let mut state = state();
        state.open_post(PostId::new(2));
        render(&mut state, 40, 100);
        let overlay = *state.page.overlay().unwrap();

        assert_eq!(state.hits.hit(0, 0), Some(overlay.backdrop));
        let centre = state.hits.hit(19, 50);
        assert!(centre.is_some_and(|id| state.page.is_overlay_element(id)));
        assert_ne!(centre, Some(overlay.backdrop));
    }

    #[test]
    fn smooth_anchor_scroll_animates_across_frames() {
        let mut state = state();
        let about = state.page.tree.children(state.page.nav())[2];
        handle_event(&mut state, &Event::Click(about)).unwrap();

        let frame = render(&mut state, 12, 40);
        assert!(frame.animating);
        let mut frames = 1;
        while render(&mut state, 12, 40).animating {
            frames += 1;
            assert!(frames < 50);
        }
        assert!(state.scroll.offset() > 0);
    }

    #[test]
    fn overlay_scroll_is_clamped_to_content() {
        let mut state = state();
        state.open_post(PostId::new(1));
        state.scroll_by(500);
        render(&mut state, 10, 40);
        assert!(state.overlay_scroll < 20);
    }
}
