use crate::ast::{PlainKind, RenderNode};

/// Classifies each line of unstructured text independently.
pub fn render_plain(text: &str) -> Vec<RenderNode> {
    text.lines()
        .map(|line| {
            let kind = classify(line);
            let text = match kind {
                PlainKind::Spacer => String::new(),
                _ => line.to_string(),
            };
            RenderNode::PlainLine { kind, text }
        })
        .collect()
}

pub fn classify(line: &str) -> PlainKind {
    if is_shouted_heading(line) {
        PlainKind::Heading
    } else if line.trim_start().starts_with('-') {
        PlainKind::ListLike
    } else if line.trim().is_empty() {
        PlainKind::Spacer
    } else {
        PlainKind::Text
    }
}

// "OVERVIEW", "TERMS & CONDITIONS": capitals, spaces and ampersands only.
fn is_shouted_heading(line: &str) -> bool {
    let mut chars = line.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    starts_upper
        && line.chars().count() > 3
        && chars.all(|ch| ch.is_uppercase() || ch == ' ' || ch == '\t' || ch == '&')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(kind: PlainKind, text: &str) -> RenderNode {
        RenderNode::PlainLine {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn one_node_per_line() {
        assert_eq!(
            render_plain("HELLO WORLD\n\n- item"),
            vec![
                line(PlainKind::Heading, "HELLO WORLD"),
                line(PlainKind::Spacer, ""),
                line(PlainKind::ListLike, "- item"),
            ]
        );
    }

    #[test]
    fn heading_needs_more_than_three_characters() {
        assert_eq!(classify("FAQ"), PlainKind::Text);
        assert_eq!(classify("FAQS"), PlainKind::Heading);
        assert_eq!(classify("R&D NOTES"), PlainKind::Heading);
        assert_eq!(classify("ÉTAT GÉNÉRAL"), PlainKind::Heading);
    }

    #[test]
    fn heading_rejects_digits_and_punctuation() {
        assert_eq!(classify("STEP 2"), PlainKind::Text);
        assert_eq!(classify("WARNING!"), PlainKind::Text);
        assert_eq!(classify(" LEADING SPACE"), PlainKind::Text);
        assert_eq!(classify("Mixed Case"), PlainKind::Text);
    }

    #[test]
    fn text_keeps_original_spacing() {
        assert_eq!(
            render_plain("   indented  \n\t-dash"),
            vec![
                line(PlainKind::Text, "   indented  "),
                line(PlainKind::ListLike, "\t-dash"),
            ]
        );
    }

    #[test]
    fn whitespace_only_line_is_spacer() {
        assert_eq!(render_plain(" \t "), vec![line(PlainKind::Spacer, "")]);
    }
}
