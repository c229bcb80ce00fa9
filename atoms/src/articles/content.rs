//! Article bodies are written in a small markdown-like dialect by the
//! editors: `##` headings (or `H2:` labels), `>` quotes, `-`/`•` and `1.`
//! lists, `---` dividers, and `**strong**`, `*em*`, `[label](href)` inline.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
    Quote { text: String },
    Divider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan {
    Text { text: String },
    Strong { text: String },
    Emphasis { text: String },
    Link { label: String, href: String },
}

static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.*)$").expect("Invalid markdown heading pattern"));

static LABELLED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^H([2-4]):\s*(.*)$").expect("Invalid heading label pattern"));

static HEADING_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^H[1-6]:\s*").expect("Invalid heading prefix pattern"));

static QUOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s*").expect("Invalid quote pattern"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•]\s+(.*)$").expect("Invalid bullet pattern"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").expect("Invalid numbered item pattern"));

// Precedence matters: `**` must be tried before `*`.
static INLINE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*.*?\*\*|\*.*?\*|\[.*?\]\(.*?\)").expect("Invalid inline token pattern")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("Invalid link pattern"));

struct PendingList {
    ordered: bool,
    items: Vec<String>,
}

fn flush_list(list: &mut Option<PendingList>, blocks: &mut Vec<ContentBlock>) {
    if let Some(pending) = list.take() {
        if !pending.items.is_empty() {
            blocks.push(ContentBlock::List {
                ordered: pending.ordered,
                items: pending.items,
            });
        }
    }
}

fn push_item(
    list: &mut Option<PendingList>,
    blocks: &mut Vec<ContentBlock>,
    ordered: bool,
    item: &str,
) {
    let continues = list.as_ref().is_some_and(|pending| pending.ordered == ordered);
    if !continues {
        flush_list(list, blocks);
        *list = Some(PendingList {
            ordered,
            items: Vec::new(),
        });
    }
    if let Some(pending) = list.as_mut() {
        pending.items.push(item.to_string());
    }
}

/// Split an article body into display blocks, one rule per trimmed line.
pub fn parse_article_content(raw: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut list: Option<PendingList> = None;

    for line in raw.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_list(&mut list, &mut blocks);
            continue;
        }

        if let Some(caps) = MARKDOWN_HEADING.captures(trimmed) {
            flush_list(&mut list, &mut blocks);
            blocks.push(ContentBlock::Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            });
            continue;
        }

        if let Some(caps) = LABELLED_HEADING.captures(trimmed) {
            flush_list(&mut list, &mut blocks);
            let level = caps[1].parse::<u8>().map_or(2, |l| l.clamp(2, 4));
            blocks.push(ContentBlock::Heading {
                level,
                text: HEADING_LABEL.replace(trimmed, "").trim().to_string(),
            });
            continue;
        }

        if trimmed.starts_with('>') {
            flush_list(&mut list, &mut blocks);
            blocks.push(ContentBlock::Quote {
                text: QUOTE_MARKER.replace(trimmed, "").trim().to_string(),
            });
            continue;
        }

        if let Some(caps) = UNORDERED_ITEM.captures(trimmed) {
            push_item(&mut list, &mut blocks, false, caps[1].trim());
            continue;
        }

        if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
            push_item(&mut list, &mut blocks, true, caps[2].trim());
            continue;
        }

        if trimmed == "---" {
            flush_list(&mut list, &mut blocks);
            blocks.push(ContentBlock::Divider);
            continue;
        }

        flush_list(&mut list, &mut blocks);
        blocks.push(ContentBlock::Paragraph {
            text: trimmed.to_string(),
        });
    }

    flush_list(&mut list, &mut blocks);
    blocks
}

/// Index and text of the first paragraph, shown as the article lead.
pub fn lead_paragraph(blocks: &[ContentBlock]) -> Option<(usize, &str)> {
    blocks.iter().enumerate().find_map(|(index, block)| match block {
        ContentBlock::Paragraph { text } => Some((index, text.as_str())),
        _ => None,
    })
}

fn classify_token(token: &str) -> InlineSpan {
    let len = token.len();
    if token.starts_with("**") && token.ends_with("**") {
        return InlineSpan::Strong {
            text: token.get(2..len.saturating_sub(2)).unwrap_or("").to_string(),
        };
    }
    if token.starts_with('*') && token.ends_with('*') {
        return InlineSpan::Emphasis {
            text: token.get(1..len.saturating_sub(1)).unwrap_or("").to_string(),
        };
    }
    if let Some(caps) = LINK.captures(token) {
        return InlineSpan::Link {
            label: caps[1].to_string(),
            href: caps[2].to_string(),
        };
    }
    InlineSpan::Text {
        text: token.to_string(),
    }
}

/// Split block text into inline spans, left to right.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in INLINE_TOKEN.find_iter(text) {
        if token.start() > cursor {
            spans.push(InlineSpan::Text {
                text: text[cursor..token.start()].to_string(),
            });
        }
        spans.push(classify_token(token.as_str()));
        cursor = token.end();
    }

    if cursor < text.len() {
        spans.push(InlineSpan::Text {
            text: text[cursor..].to_string(),
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> ContentBlock {
        ContentBlock::Heading {
            level,
            text: text.into(),
        }
    }

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph { text: text.into() }
    }

    fn list(ordered: bool, items: &[&str]) -> ContentBlock {
        ContentBlock::List {
            ordered,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_body_has_no_blocks() {
        assert!(parse_article_content("").is_empty());
        assert!(parse_article_content("\n   \n").is_empty());
    }

    #[test]
    fn markdown_headings_keep_their_level() {
        let blocks = parse_article_content("## การดูแล\n### อาหาร\n#### น้ำ\n# ไม่ใช่หัวข้อ\n##### ลึกเกิน");
        assert_eq!(
            blocks,
            vec![
                heading(2, "การดูแล"),
                heading(3, "อาหาร"),
                heading(4, "น้ำ"),
                paragraph("# ไม่ใช่หัวข้อ"),
                paragraph("##### ลึกเกิน"),
            ]
        );
    }

    #[test]
    fn labelled_headings_strip_the_label() {
        let blocks = parse_article_content("H2: วัคซีน\nh3:ตารางฉีด\nH5: ไม่รองรับ");
        assert_eq!(
            blocks,
            vec![
                heading(2, "วัคซีน"),
                heading(3, "ตารางฉีด"),
                paragraph("H5: ไม่รองรับ"),
            ]
        );
    }

    #[test]
    fn quotes_and_dividers() {
        let blocks = parse_article_content(">  อย่าทิ้งสัตว์\n---\n>ติดต่อเรา");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Quote {
                    text: "อย่าทิ้งสัตว์".into()
                },
                ContentBlock::Divider,
                ContentBlock::Quote {
                    text: "ติดต่อเรา".into()
                },
            ]
        );
    }

    #[test]
    fn consecutive_items_group_into_one_list() {
        let blocks = parse_article_content("- ข้าว\n• น้ำ\n-   ทราย");
        assert_eq!(blocks, vec![list(false, &["ข้าว", "น้ำ", "ทราย"])]);
    }

    #[test]
    fn switching_list_kind_starts_a_new_list() {
        let blocks = parse_article_content("- a\n1. one\n2) two\n- b");
        assert_eq!(
            blocks,
            vec![
                list(false, &["a"]),
                list(true, &["one", "two"]),
                list(false, &["b"]),
            ]
        );
    }

    #[test]
    fn blank_lines_and_other_blocks_end_a_list() {
        let blocks = parse_article_content("- a\n\n- b\nข้อความ\n1. c\n## หัวข้อ");
        assert_eq!(
            blocks,
            vec![
                list(false, &["a"]),
                list(false, &["b"]),
                paragraph("ข้อความ"),
                list(true, &["c"]),
                heading(2, "หัวข้อ"),
            ]
        );
    }

    #[test]
    fn bare_markers_are_paragraphs() {
        let blocks = parse_article_content("-\n1.\n--- \n----");
        assert_eq!(
            blocks,
            vec![
                paragraph("-"),
                paragraph("1."),
                ContentBlock::Divider,
                paragraph("----"),
            ]
        );
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let blocks = parse_article_content("## หัวข้อ\r\nเนื้อหา\r\n");
        assert_eq!(blocks, vec![heading(2, "หัวข้อ"), paragraph("เนื้อหา")]);
    }

    #[test]
    fn lead_is_first_paragraph() {
        let blocks = parse_article_content("## หัวข้อ\n- a\nย่อหน้าแรก\nย่อหน้าสอง");
        assert_eq!(lead_paragraph(&blocks), Some((2, "ย่อหน้าแรก")));
        assert_eq!(lead_paragraph(&[ContentBlock::Divider]), None);
    }

    #[test]
    fn inline_spans_in_order() {
        let spans = parse_inline("ให้ **น้ำสะอาด** และ *อาหาร* ดู [คู่มือ](https://petskub.app/guide) นะ");
        assert_eq!(
            spans,
            vec![
                InlineSpan::Text { text: "ให้ ".into() },
                InlineSpan::Strong {
                    text: "น้ำสะอาด".into()
                },
                InlineSpan::Text { text: " และ ".into() },
                InlineSpan::Emphasis {
                    text: "อาหาร".into()
                },
                InlineSpan::Text { text: " ดู ".into() },
                InlineSpan::Link {
                    label: "คู่มือ".into(),
                    href: "https://petskub.app/guide".into()
                },
                InlineSpan::Text { text: " นะ".into() },
            ]
        );
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(
            parse_inline("ไม่มีการจัดรูปแบบ"),
            vec![InlineSpan::Text {
                text: "ไม่มีการจัดรูปแบบ".into()
            }]
        );
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn unmatched_asterisk_stays_text() {
        assert_eq!(
            parse_inline("5 * 3"),
            vec![InlineSpan::Text { text: "5 * 3".into() }]
        );
    }

    #[test]
    fn blocks_serialize_with_type_tag() {
        let json = serde_json::to_value(heading(3, "x")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "heading", "level": 3, "text": "x"}));
        let json = serde_json::to_value(ContentBlock::Divider).unwrap();
        assert_eq!(json, serde_json::json!({"type": "divider"}));
    }
}
