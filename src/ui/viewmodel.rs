//! View model types produced by layout and consumed by the painter.
//!
//! A page is laid out into [`Line`]s of styled [`Segment`]s plus the
//! [`HitBox`]es needed to map a mouse cell back to the element drawn there.
//! These types carry no behaviour beyond simple measurements.

use crate::ui::dom::ElementId;

/// Visual role of a segment; the painter maps each role to theme colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Page heading.
    Title,
    /// Post title.
    Heading,
    /// Date, author and category line.
    Meta,
    /// Post content and other running text.
    Body,
    /// Navigation and "read more" links.
    Link,
    /// Search input.
    Input,
    /// Category selector.
    Select,
    /// Overlay close affordance.
    Close,
    /// Empty-result message.
    Empty,
}

/// A run of text drawn in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub role: Role,
    /// Drawn with the selection colours.
    pub focused: bool,
    /// Character ranges `(start, end)` matching the search term.
    pub highlights: Vec<(usize, usize)>,
}

impl Segment {
    /// An unfocused segment without highlights.
    #[must_use]
    pub fn new(text: &str, role: Role) -> Self {
        Self {
            text: text.to_string(),
            role,
            focused: false,
            highlights: Vec::new(),
        }
    }

    /// Width in terminal cells, counting one cell per character.
    #[must_use]
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// One row of laid-out text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Leading blank cells.
    pub indent: usize,
    pub segments: Vec<Segment>,
}

impl Line {
    /// Display width in columns, indent included.
    #[must_use]
    pub fn width(&self) -> usize {
        self.indent + self.segments.iter().map(Segment::width).sum::<usize>()
    }

    /// Concatenated text without styling, mostly useful in tests.
    #[must_use]
    pub fn plain(&self) -> String {
        let mut out = " ".repeat(self.indent);
        for segment in &self.segments {
            out.push_str(&segment.text);
        }
        out
    }
}

/// Screen area occupied by an element. Rows and columns are zero-based;
/// `end_col` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitBox {
    pub row: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub element: ElementId,
}

/// Hit boxes of a painted frame, in paint order.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    boxes: Vec<HitBox>,
}

impl HitMap {
    /// Records a box painted on top of every box pushed before it.
    pub fn push(&mut self, hit: HitBox) {
        self.boxes.push(hit);
    }

    /// Adds a box covering `rows` full rows of width `cols`.
    pub fn push_area(&mut self, rows: std::ops::Range<usize>, cols: usize, element: ElementId) {
        for row in rows {
            self.push(HitBox {
                row,
                start_col: 0,
                end_col: cols,
                element,
            });
        }
    }

    /// The element painted last at `(row, col)`, i.e. the topmost one.
    #[must_use]
    pub fn hit(&self, row: usize, col: usize) -> Option<ElementId> {
        self.boxes
            .iter()
            .rev()
            .find(|b| b.row == row && (b.start_col..b.end_col).contains(&col))
            .map(|b| b.element)
    }

    /// Number of recorded boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown in place of an empty post list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl EmptyState {
    /// Shown when the filters leave no post to list.
    #[must_use]
    pub fn no_matches() -> Self {
        Self {
            message: "No posts found".to_string(),
            subtitle: "Try a different search or category.".to_string(),
        }
    }
}
