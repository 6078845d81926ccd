//! Vertical scrolling of the page viewport.
//!
//! Scroll requests name an element; the row it lands on is only known once
//! the page is laid out, so [`Scroll::resolve`] runs once per frame with the
//! fresh layout. Smooth scrolling closes a third of the remaining distance per
//! frame until the goal is reached.

use crate::ui::dom::ElementId;
use std::collections::HashMap;

/// How a scroll request reaches its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animated across frames.
    #[default]
    Smooth,
    /// Jumps in one frame.
    Instant,
}

impl ScrollBehavior {
    /// Parses a configuration value (`smooth` or `instant`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "smooth" => Some(Self::Smooth),
            "instant" | "auto" => Some(Self::Instant),
            _ => None,
        }
    }
}

/// Viewport scroll position.
#[derive(Debug, Clone, Default)]
pub struct Scroll {
    offset: usize,
    goal: usize,
    pending: Option<(ElementId, ScrollBehavior)>,
    reveal: Option<ElementId>,
    manual: isize,
}

impl Scroll {
    /// First document row shown in the viewport.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// `true` while a smooth scroll is still moving.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.offset != self.goal
    }

    /// Requests that `target` be scrolled to the top of the viewport.
    pub fn scroll_into_view(&mut self, target: ElementId, behavior: ScrollBehavior) {
        self.pending = Some((target, behavior));
    }

    /// Requests the minimal jump that makes `target` visible.
    pub fn reveal(&mut self, target: ElementId) {
        self.reveal = Some(target);
    }

    /// Scrolls by `delta` rows at once, cancelling any animation.
    pub fn scroll_by(&mut self, delta: isize) {
        self.manual += delta;
    }

    /// Applies pending requests against a fresh layout and advances one
    /// animation step.
    ///
    /// `anchors` maps elements to their first document row, `doc_rows` is the
    /// document height and `viewport` the number of visible rows. Requests for
    /// elements missing from the layout are dropped.
    pub fn resolve(&mut self, anchors: &HashMap<ElementId, usize>, doc_rows: usize, viewport: usize) {
        let max_offset = doc_rows.saturating_sub(viewport);

        if self.manual != 0 {
            let moved = self.offset.saturating_add_signed(self.manual).min(max_offset);
            self.offset = moved;
            self.goal = moved;
            self.manual = 0;
        }

        if let Some((target, behavior)) = self.pending.take() {
            match anchors.get(&target) {
                Some(row) => {
                    self.goal = (*row).min(max_offset);
                    if behavior == ScrollBehavior::Instant {
                        self.offset = self.goal;
                    }
                    tracing::debug!(row = *row, goal = self.goal, ?behavior, "scroll target resolved");
                }
                None => tracing::debug!("scroll target not laid out, ignoring"),
            }
        }

        if let Some(target) = self.reveal.take() {
            if let Some(row) = anchors.get(&target).copied() {
                if row < self.offset {
                    self.offset = row;
                } else if viewport > 0 && row >= self.offset + viewport {
                    self.offset = row + 1 - viewport;
                }
                self.offset = self.offset.min(max_offset);
                self.goal = self.offset;
            }
        }

        self.goal = self.goal.min(max_offset);
        self.offset = self.offset.min(max_offset);

        if self.offset != self.goal {
            let distance = self.goal.abs_diff(self.offset);
            let step = ((distance + 2) / 3).max(1);
            self.offset = if self.goal > self.offset {
                self.offset + step
            } else {
                self.offset - step
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dom::{Tag, ViewTree};

    fn anchors_with(rows: &[usize]) -> (Vec<ElementId>, HashMap<ElementId, usize>) {
        let mut tree = ViewTree::new();
        let ids: Vec<ElementId> = rows.iter().map(|_| tree.create(Tag::Div)).collect();
        let map = ids.iter().copied().zip(rows.iter().copied()).collect();
        (ids, map)
    }

    #[test]
    fn instant_request_jumps_in_one_frame() {
        let (ids, anchors) = anchors_with(&[0, 40]);
        let mut scroll = Scroll::default();
        scroll.scroll_into_view(ids[1], ScrollBehavior::Instant);
        scroll.resolve(&anchors, 100, 20);
        assert_eq!(scroll.offset(), 40);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn smooth_request_converges_over_frames() {
        let (ids, anchors) = anchors_with(&[0, 30]);
        let mut scroll = Scroll::default();
        scroll.scroll_into_view(ids[1], ScrollBehavior::Smooth);

        scroll.resolve(&anchors, 100, 20);
        assert_eq!(scroll.offset(), 10);
        assert!(scroll.is_animating());

        let mut frames = 1;
        while scroll.is_animating() {
            scroll.resolve(&anchors, 100, 20);
            frames += 1;
            assert!(frames < 50, "animation never settled");
        }
        assert_eq!(scroll.offset(), 30);
    }

    #[test]
    fn goal_is_clamped_to_document_end() {
        let (ids, anchors) = anchors_with(&[95]);
        let mut scroll = Scroll::default();
        scroll.scroll_into_view(ids[0], ScrollBehavior::Instant);
        scroll.resolve(&anchors, 100, 20);
        assert_eq!(scroll.offset(), 80);
    }

    #[test]
    fn unknown_target_is_ignored() {
        let (ids, mut anchors) = anchors_with(&[10, 20]);
        let stranger = ids[1];
        anchors.remove(&stranger);
        let mut scroll = Scroll::default();
        scroll.scroll_into_view(stranger, ScrollBehavior::Instant);
        scroll.resolve(&anchors, 100, 20);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn reveal_scrolls_just_enough() {
        let (ids, anchors) = anchors_with(&[25, 3]);
        let mut scroll = Scroll::default();
        scroll.reveal(ids[0]);
        scroll.resolve(&anchors, 100, 20);
        assert_eq!(scroll.offset(), 6);

        scroll.reveal(ids[1]);
        scroll.resolve(&anchors, 100, 20);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn manual_scroll_is_bounded() {
        let (_, anchors) = anchors_with(&[]);
        let mut scroll = Scroll::default();
        scroll.scroll_by(-5);
        scroll.resolve(&anchors, 30, 20);
        assert_eq!(scroll.offset(), 0);
        scroll.scroll_by(50);
        scroll.resolve(&anchors, 30, 20);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn behavior_parses_config_values() {
        assert_eq!(ScrollBehavior::parse("Smooth"), Some(ScrollBehavior::Smooth));
        assert_eq!(ScrollBehavior::parse("instant"), Some(ScrollBehavior::Instant));
        assert_eq!(ScrollBehavior::parse("wobbly"), None);
    }
}
