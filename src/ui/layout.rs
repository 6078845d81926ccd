//! Flow layout of the element tree into terminal lines.
//!
//! Block elements stack vertically and wrap their text to the available
//! width. Consecutive inline children (`a`, `span`, `input`, `select`) share a
//! line, separated by two spaces, or by ` | ` inside a `.meta` block. The
//! overlay subtree is skipped by [`layout_document`] and laid out on its own
//! by the renderer.

use crate::ui::dom::{Element, ElementId, Tag, ViewTree};
use crate::ui::page::{Page, ALL_CATEGORIES};
use crate::ui::viewmodel::{EmptyState, HitBox, Line, Role, Segment};
use std::collections::HashMap;

/// Per-frame inputs that affect styling but not structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutContext<'a> {
    /// Element with keyboard focus.
    pub focused: Option<ElementId>,
    /// Lower-cased search term to highlight; empty for none.
    pub highlight: &'a str,
}

/// Result of laying out a subtree. Rows are relative to the first line.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub lines: Vec<Line>,
    pub hits: Vec<HitBox>,
    /// First row of every laid-out element.
    pub anchors: HashMap<ElementId, usize>,
}

/// Lays out the page body, leaving out the overlay.
#[must_use]
pub fn layout_document(page: &Page, width: usize, ctx: LayoutContext<'_>) -> Layout {
    let skip = page.overlay().map(|overlay| overlay.backdrop);
    let mut flow = Flow::new(&page.tree, width, ctx, skip);
    flow.block(page.tree.root());
    flow.out
}

/// Lays out a single subtree, such as the overlay content box.
#[must_use]
pub fn layout_subtree(tree: &ViewTree, root: ElementId, width: usize, ctx: LayoutContext<'_>) -> Layout {
    let mut flow = Flow::new(tree, width, ctx, None);
    flow.block(root);
    flow.out
}

/// Character ranges where `term` occurs in `text`, ignoring case.
///
/// Returns nothing when lower-casing changes the character count, since the
/// ranges would no longer line up with the original text.
#[must_use]
pub fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    if term.is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    if lower.chars().count() != text.chars().count() {
        return Vec::new();
    }
    let term_chars = term.chars().count();
    lower
        .match_indices(term)
        .map(|(byte, _)| {
            let start = lower[..byte].chars().count();
            (start, start + term_chars)
        })
        .collect()
}

struct Flow<'a> {
    tree: &'a ViewTree,
    width: usize,
    ctx: LayoutContext<'a>,
    skip: Option<ElementId>,
    out: Layout,
}

impl<'a> Flow<'a> {
    fn new(tree: &'a ViewTree, width: usize, ctx: LayoutContext<'a>, skip: Option<ElementId>) -> Self {
        Self {
            tree,
            width: width.max(1),
            ctx,
            skip,
            out: Layout::default(),
        }
    }

    fn row(&self) -> usize {
        self.out.lines.len()
    }

    fn blank_line(&mut self) {
        self.out.lines.push(Line::default());
    }

    fn block(&mut self, id: ElementId) {
        if self.skip == Some(id) {
            return;
        }
        let tree = self.tree;
        let Some(element) = tree.element(id) else {
            return;
        };
        if element.tag == Tag::Option {
            return;
        }
        if element.tag.is_inline() {
            self.inline_run(&[id], "  ");
            return;
        }

        let row = self.row();
        self.out.anchors.entry(id).or_insert(row);

        if !element.text.is_empty() {
            self.text_block(id, element);
        }

        let separator = if element.has_class("meta") { " | " } else { "  " };
        let mut run = Vec::new();
        for child in tree.children(id) {
            if self.skip == Some(*child) {
                continue;
            }
            let inline = tree
                .element(*child)
                .is_some_and(|el| el.tag.is_inline());
            if inline {
                run.push(*child);
            } else {
                self.inline_run(&run, separator);
                run.clear();
                self.block(*child);
            }
        }
        self.inline_run(&run, separator);

        match element.tag {
            Tag::Main if element.children.is_empty() => self.empty_state(),
            Tag::Header | Tag::Nav | Tag::Article => self.blank_line(),
            _ => {}
        }
    }

    fn text_block(&mut self, id: ElementId, element: &Element) {
        let role = match element.tag {
            Tag::H1 => Role::Title,
            Tag::H2 => Role::Heading,
            _ => Role::Body,
        };
        let highlight = matches!(role, Role::Heading | Role::Body);

        for wrapped in textwrap::wrap(&element.text, self.width) {
            let mut segment = Segment::new(&wrapped, role);
            segment.focused = self.ctx.focused == Some(id);
            if highlight {
                segment.highlights = match_ranges(&wrapped, self.ctx.highlight);
            }
            self.out.hits.push(HitBox {
                row: self.row(),
                start_col: 0,
                end_col: self.width,
                element: id,
            });
            self.out.lines.push(Line {
                indent: 0,
                segments: vec![segment],
            });
        }
    }

    fn inline_run(&mut self, ids: &[ElementId], separator: &str) {
        if ids.is_empty() {
            return;
        }
        let tree = self.tree;
        let mut line = Line::default();

        for id in ids {
            let Some(element) = tree.element(*id) else {
                continue;
            };
            let mut segment = self.inline_segment(element);
            segment.focused = self.ctx.focused == Some(*id);

            let gap = if line.segments.is_empty() { 0 } else { separator.chars().count() };
            if !line.segments.is_empty() && line.width() + gap + segment.width() > self.width {
                self.out.lines.push(std::mem::take(&mut line));
            } else if gap > 0 {
                line.segments.push(Segment::new(separator, Role::Meta));
            }

            let start_col = line.width();
            let row = self.row();
            self.out.anchors.entry(*id).or_insert(row);
            self.out.hits.push(HitBox {
                row: self.row(),
                start_col,
                end_col: start_col + segment.width(),
                element: *id,
            });
            line.segments.push(segment);
        }

        self.out.lines.push(line);
    }

    fn inline_segment(&self, element: &Element) -> Segment {
        match element.tag {
            Tag::Input => {
                let value = element.attr("value").unwrap_or_default();
                if value.is_empty() {
                    let placeholder = element.attr("placeholder").unwrap_or_default();
                    Segment::new(&format!("[ {placeholder} ]"), Role::Meta)
                } else {
                    Segment::new(&format!("[ {value} ]"), Role::Input)
                }
            }
            Tag::Select => {
                let value = element.attr("value").unwrap_or_default();
                let label = element
                    .children
                    .iter()
                    .filter_map(|option| self.tree.element(*option))
                    .find(|option| option.attr("value") == Some(value))
                    .map_or(ALL_CATEGORIES, |option| option.text.as_str());
                Segment::new(&format!("< {label} >"), Role::Select)
            }
            Tag::Anchor => Segment::new(&element.text, Role::Link),
            _ if element.has_class("close") => Segment::new(&element.text, Role::Close),
            _ => Segment::new(&element.text, Role::Meta),
        }
    }

    fn empty_state(&mut self) {
        let empty = EmptyState::no_matches();
        self.out.lines.push(Line {
            indent: 2,
            segments: vec![Segment::new(&empty.message, Role::Empty)],
        });
        self.out.lines.push(Line {
            indent: 2,
            segments: vec![Segment::new(&empty.subtitle, Role::Meta)],
        });
        self.blank_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;
    use crate::store::PostStore;
    use crate::ui::page::NavLink;

    fn page() -> (Page, PostStore) {
        let store = PostStore::builtin().unwrap();
        let mut page = Page::new("Postboard", "Built with care.");
        page.setup_nav(&[NavLink::new("Home", "#home"), NavLink::new("About", "#about")]);
        page.setup_search_bar();
        page.setup_category_filter(store.categories());
        let posts: Vec<&Post> = store.all().iter().collect();
        page.render_list(&posts);
        (page, store)
    }

    fn plain(layout: &Layout) -> Vec<String> {
        layout.lines.iter().map(|l| l.plain().trim_end().to_string()).collect()
    }

    #[test]
    fn document_flows_heading_nav_posts_footer() {
        let (page, _) = page();
        let layout = layout_document(&page, 200, LayoutContext::default());
        let lines = plain(&layout);

        assert_eq!(lines[0], "Postboard");
        assert_eq!(lines[2], "Home  About  [ Search posts... ]  < All Categories >");
        assert!(lines.contains(&"Getting Started with Web Development".to_string()));
        assert!(lines.contains(&"Posted on: March 15, 2024 | Author: John Doe | Category: Web Development".to_string()));
        assert_eq!(lines.iter().filter(|l| *l == "Read More →").count(), 2);
        assert_eq!(lines.last().map(String::as_str), Some("Built with care."));
    }

    #[test]
    fn anchors_point_at_first_row_of_each_region() {
        let (page, _) = page();
        let layout = layout_document(&page, 200, LayoutContext::default());
        let footer_row = layout.anchors[&page.footer()];
        assert_eq!(plain(&layout)[footer_row], "Built with care.");
        let main_row = layout.anchors[&page.main()];
        assert_eq!(plain(&layout)[main_row], "Getting Started with Web Development");
    }

    #[test]
    fn inline_hit_boxes_cover_each_link() {
        let (page, _) = page();
        let layout = layout_document(&page, 200, LayoutContext::default());
        let about = page.tree.children(page.nav())[1];
        let hit = layout.hits.iter().find(|h| h.element == about).unwrap();
        assert_eq!((hit.row, hit.start_col, hit.end_col), (2, 6, 11));
    }

    #[test]
    fn inline_elements_anchor_at_the_row_they_share() {
        let (page, _) = page();
        let layout = layout_document(&page, 200, LayoutContext::default());
        let home = page.tree.children(page.nav())[0];
        assert_eq!(layout.anchors[&home], 2);
        assert_eq!(layout.anchors[&page.search_input().unwrap()], 2);

        for link in page.read_more_links() {
            let hit = layout.hits.iter().find(|h| h.element == link).unwrap();
            assert_eq!(layout.anchors[&link], hit.row);
        }
    }

    #[test]
    fn long_content_wraps_to_width() {
        let (page, _) = page();
        let layout = layout_document(&page, 30, LayoutContext::default());
        assert!(layout.lines.iter().all(|l| l.width() <= 30));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let (mut page, _) = page();
        page.render_list(&[]);
        let lines = plain(&layout_document(&page, 200, LayoutContext::default()));
        assert!(lines.iter().any(|l| l.trim() == "No posts found"));
    }

    #[test]
    fn overlay_is_left_out_of_the_document_flow() {
        let (mut page, store) = page();
        let before = layout_document(&page, 120, LayoutContext::default()).lines.len();
        let overlay = page.render_overlay(&store.all()[0]);
        let after = layout_document(&page, 120, LayoutContext::default());
        assert_eq!(after.lines.len(), before);

        let boxed = layout_subtree(&page.tree, overlay.content, 60, LayoutContext::default());
        assert_eq!(plain(&boxed)[0], "×");
        assert_eq!(plain(&boxed)[1], "Getting Started with Web Development");
    }

    #[test]
    fn search_term_is_highlighted_in_titles() {
        let (page, _) = page();
        let ctx = LayoutContext { focused: None, highlight: "future" };
        let layout = layout_document(&page, 200, ctx);
        let title = layout
            .lines
            .iter()
            .flat_map(|l| &l.segments)
            .find(|s| s.text == "The Future of Artificial Intelligence")
            .unwrap();
        assert_eq!(title.highlights, vec![(4, 10)]);
    }

    #[test]
    fn match_ranges_finds_every_occurrence() {
        assert_eq!(match_ranges("Dolor dolor", "dolor"), vec![(0, 5), (6, 11)]);
        assert!(match_ranges("anything", "").is_empty());
    }
}
