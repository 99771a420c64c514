//! Key hint footer.
//!
//! Each view describes its keys as a hint string like
//! `"[j/k] move  [n] new"`; bracketed keys are highlighted.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;

/// Render a one-line hint footer.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &str) {
    frame.render_widget(Paragraph::new(Line::from(hint_spans(hints))), area);
}

fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(start) = rest.find('[') {
        let Some(len) = rest[start..].find(']') else {
            break;
        };
        if start > 0 {
            spans.push(Span::styled(rest[..start].to_string(), theme::muted()));
        }
        let end = start + len + 1;
        spans.push(Span::styled(rest[start..end].to_string(), theme::heading()));
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), theme::muted()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_spans_alternate() {
        let spans = hint_spans("[j/k] move  [n] new");
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["[j/k]", " move  ", "[n]", " new"]);
    }

    #[test]
    fn test_hint_spans_edge_cases() {
        assert!(hint_spans("").is_empty());
        assert_eq!(hint_spans("plain").len(), 1);
        assert_eq!(hint_spans("[unclosed").len(), 1);
    }
}
