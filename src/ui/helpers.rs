//! Shared painting utilities.
//!
//! Everything here appends ANSI-styled text to a frame buffer rather than
//! printing, so a whole frame can be assembled, inspected in tests and
//! written to stdout in one go.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Line, Role, Segment};
use std::fmt::Write;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Colours and attributes for a role. Only the page title has a background.
fn role_style(role: Role, theme: &Theme) -> String {
    let colors = &theme.colors;
    match role {
        Role::Title => format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&colors.header_fg),
            colors.header_bg.as_deref().map(Theme::bg).unwrap_or_default()
        ),
        Role::Heading => format!("{}{}", Theme::bold(), Theme::fg(&colors.heading_fg)),
        Role::Meta => Theme::fg(&colors.text_dim),
        Role::Body => Theme::fg(&colors.text_normal),
        Role::Link => format!("{}{}", Theme::underline(), Theme::fg(&colors.link_fg)),
        Role::Input | Role::Select => Theme::fg(&colors.input_fg),
        Role::Close => format!("{}{}", Theme::bold(), Theme::fg(&colors.overlay_border)),
        Role::Empty => Theme::fg(&colors.empty_state_fg),
    }
}

/// Writes one segment in its role's style. Focused segments use the
/// selection colours and ignore highlights.
pub fn write_segment(out: &mut String, segment: &Segment, theme: &Theme) {
    if segment.focused {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
        out.push_str(&segment.text);
        out.push_str(Theme::reset());
        return;
    }

    let style = role_style(segment.role, theme);
    out.push_str(&style);
    write_highlighted(out, &segment.text, &segment.highlights, theme, &style);
    out.push_str(Theme::reset());
}

/// Writes `text` with the character ranges in `ranges` drawn in the match
/// colours, restoring `style` after each range.
pub fn write_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, style: &str) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(style);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Writes a laid-out line clipped to `width` cells, padding the rest with
/// blanks so stale content is overwritten.
pub fn write_line(out: &mut String, line: &Line, theme: &Theme, width: usize) {
    let mut used = line.indent.min(width);
    out.push_str(&" ".repeat(used));

    for segment in &line.segments {
        if used >= width {
            break;
        }
        let room = width - used;
        if segment.width() <= room {
            write_segment(out, segment, theme);
            used += segment.width();
        } else {
            let mut clipped = segment.clone();
            clipped.text = segment.text.chars().take(room).collect();
            write_segment(out, &clipped, theme);
            used = width;
        }
    }

    out.push_str(&" ".repeat(width - used));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn highlights_preserve_text() {
        let theme = Theme::default();
        let mut out = String::new();
        write_highlighted(&mut out, "The Future", &[(4, 10)], &theme, "");
        assert_eq!(strip_ansi(&out), "The Future");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn title_paints_the_header_background_when_set() {
        let mut theme = Theme::default();
        theme.colors.header_bg = None;
        let title = Segment::new("Postboard", Role::Title);

        let mut plain = String::new();
        write_segment(&mut plain, &title, &theme);
        assert!(!plain.contains("\u{1b}[48;2;"));

        theme.colors.header_bg = Some("#313244".to_string());
        let mut filled = String::new();
        write_segment(&mut filled, &title, &theme);
        assert!(filled.contains(&Theme::bg("#313244")));
        assert_eq!(strip_ansi(&filled), "Postboard");

        let mut body = String::new();
        write_segment(&mut body, &Segment::new("text", Role::Body), &theme);
        assert!(!body.contains(&Theme::bg("#313244")));
    }

    #[test]
    fn lines_are_clipped_and_padded_to_width() {
        let theme = Theme::default();
        let line = Line {
            indent: 2,
            segments: vec![Segment::new("Read More →", Role::Link)],
        };

        let mut narrow = String::new();
        write_line(&mut narrow, &line, &theme, 6);
        assert_eq!(strip_ansi(&narrow), "  Read");

        let mut wide = String::new();
        write_line(&mut wide, &line, &theme, 16);
        assert_eq!(strip_ansi(&wide), "  Read More →   ");
    }

    #[test]
    fn cursor_positions_are_one_indexed_escapes() {
        let mut out = String::new();
        position_cursor(&mut out, 3, 7);
        assert_eq!(out, "\u{1b}[3;7H");
    }
}
