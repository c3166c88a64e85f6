//! Lists the custom mark spans in a raw markdown string without building a tree.

use serde::Serialize;

use super::kinds::{MarkTag, MarkType};
use super::scan::mark_regex;

/// One `<mark ...>` span found in raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedSpan {
    /// Inner text with markdown syntax kept.
    pub text: String,
    #[serde(rename = "type")]
    pub mark_type: MarkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "isInstructionToAI")]
    pub is_instruction_to_ai: bool,
}

/// Returns every complete mark span in `markdown`, in source order, keeping
/// only spans of type `filter` when one is given.
pub fn marked_text(markdown: &str, filter: Option<MarkType>) -> Vec<MarkedSpan> {
    mark_regex()
        .captures_iter(markdown)
        .filter_map(|caps| {
            let mark_type = MarkType::from_tag(caps.get(1)?.as_str())?;
            if filter.is_some_and(|wanted| wanted != mark_type) {
                return None;
            }
            let comment = caps
                .get(2)
                .map(|m| MarkTag::unescape_comment(m.as_str()));
            Some(MarkedSpan {
                text: caps.get(4).map_or_else(String::new, |m| m.as_str().to_string()),
                mark_type,
                comment,
                is_instruction_to_ai: caps.get(3).is_some_and(|m| m.as_str() == MarkTag::AI_YES),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"Intro <mark type="highlighted">**key**</mark> then
<mark type="comment" comment="tone &amp; style" ai-instructions="yes">rewrite me</mark>
and <mark type="read-only">fixed</mark>."#;

    #[test]
    fn finds_all_spans_in_order() {
        let spans = marked_text(SAMPLE, None);
        assert_eq!(
            spans,
            vec![
                MarkedSpan {
                    text: "**key**".to_string(),
                    mark_type: MarkType::Highlighted,
                    comment: None,
                    is_instruction_to_ai: false,
                },
                MarkedSpan {
                    text: "rewrite me".to_string(),
                    mark_type: MarkType::Comment,
                    comment: Some("tone & style".to_string()),
                    is_instruction_to_ai: true,
                },
                MarkedSpan {
                    text: "fixed".to_string(),
                    mark_type: MarkType::ReadOnly,
                    comment: None,
                    is_instruction_to_ai: false,
                },
            ]
        );
    }

    #[test]
    fn filters_by_type() {
        let spans = marked_text(SAMPLE, Some(MarkType::ReadOnly));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "fixed");
    }

    #[test]
    fn unterminated_mark_is_not_a_span() {
        assert!(marked_text(r#"<mark type="highlighted">open"#, None).is_empty());
    }

    #[test]
    fn serializes_with_document_attribute_names() {
        let span = MarkedSpan {
            text: "x".to_string(),
            mark_type: MarkType::Comment,
            comment: Some("c".to_string()),
            is_instruction_to_ai: false,
        };
        insta::assert_snapshot!(
            serde_json::to_string(&span).unwrap(),
            @r#"{"text":"x","type":"comment","comment":"c","isInstructionToAI":false}"#
        );
    }
}
