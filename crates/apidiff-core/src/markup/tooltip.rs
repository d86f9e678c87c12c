//! Conversion of change descriptions into inline phrasing content.

use crate::html::{Content, HtmlTree};

/// Rewrite block-level list markup into inline equivalents
///
/// `ul`, `ol` and `li` become `span`s classed by their original tag, `br`
/// elements and raw line breaks are dropped, and every other node is kept.
pub fn to_inline(nodes: Vec<Content>) -> Vec<Content> {
    nodes.into_iter().filter_map(inline_node).collect()
}

fn inline_node(node: Content) -> Option<Content> {
    match node {
        Content::Text(text) => {
            let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
            (!text.is_empty()).then_some(Content::Text(text))
        }
        Content::Element(tree) if tree.tag == "br" => None,
        Content::Element(mut tree) => {
            if matches!(tree.tag.as_str(), "ul" | "ol" | "li") {
                let class = format!("tooltip-{}", tree.tag);
                tree.tag = "span".to_string();
                tree.set_attr("class", class);
            }
            tree.children = to_inline(std::mem::take(&mut tree.children));
            Some(Content::Element(tree))
        }
    }
}

/// Wrap inline content as a tooltip child
pub fn tooltip(nodes: Vec<Content>) -> HtmlTree {
    let mut span = HtmlTree::new("span").with_class("tooltip");
    span.children = to_inline(nodes);
    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render_all;
    use crate::markup::clean::clean;

    #[test]
    fn test_lists_become_inline() {
        let nodes = clean("Changed:\n<ul>\n<li>one</li><li>two<br>three</li></ul>").unwrap();
        let html = render_all(&to_inline(nodes));
        assert_eq!(
            html,
            "Changed:<span class=\"tooltip-ul\"><span class=\"tooltip-li\">one</span>\
             <span class=\"tooltip-li\">twothree</span></span>"
        );
    }

    #[test]
    fn test_other_tags_pass_through() {
        let nodes = clean("<code>x</code>").unwrap();
        assert_eq!(render_all(&to_inline(nodes)), "<code>x</code>");
    }
}
