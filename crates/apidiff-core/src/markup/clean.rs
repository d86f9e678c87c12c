//! Markup cleaning: tokenize an HTML fragment into a well-formed tree.
//!
//! Character references are decoded by the tokenizer; unrecognised named
//! references stay as literal text. Comments and doctypes are dropped, end
//! tags without a matching open element are ignored, and elements still
//! open at the end of input are closed.

use html5gum::{State, Token, Tokenizer};

use crate::errors::MarkupError;
use crate::html::{is_void, Content, HtmlTree};

/// Deepest element nesting accepted
pub const MAX_DEPTH: usize = 256;

fn push_text(children: &mut Vec<Content>, text: &str) {
    if text.is_empty() {
        return;
    }
    match children.last_mut() {
        Some(Content::Text(last)) => last.push_str(text),
        _ => children.push(Content::Text(text.to_string())),
    }
}

fn attach(stack: &mut [HtmlTree], roots: &mut Vec<Content>, element: HtmlTree) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Content::Element(element)),
        None => roots.push(Content::Element(element)),
    }
}

/// Parse an HTML fragment into its top-level nodes
///
/// # Errors
///
/// Returns `TooDeep` when nesting exceeds [`MAX_DEPTH`].
pub fn clean(input: &str) -> Result<Vec<Content>, MarkupError> {
    let mut tokenizer = Tokenizer::new(input);
    let mut stack: Vec<HtmlTree> = Vec::new();
    let mut roots: Vec<Content> = Vec::new();

    while let Some(token) = tokenizer.next() {
        let token = token.map_err(|err| MarkupError::Tokenizer {
            message: err.to_string(),
        })?;
        match token {
            Token::StartTag(tag) => {
                let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
                let mut element = HtmlTree::new(name.clone());
                for (key, value) in tag.attributes.iter() {
                    element.attrs.push((
                        String::from_utf8_lossy(key).to_ascii_lowercase(),
                        String::from_utf8_lossy(value).into_owned(),
                    ));
                }
                element.attrs.sort();

                if tag.self_closing || is_void(&name) {
                    attach(&mut stack, &mut roots, element);
                } else {
                    if stack.len() >= MAX_DEPTH {
                        return Err(MarkupError::TooDeep { limit: MAX_DEPTH });
                    }
                    match name.as_str() {
                        "script" | "style" => tokenizer.set_state(State::ScriptData),
                        "textarea" | "title" => tokenizer.set_state(State::RcData),
                        _ => {}
                    }
                    stack.push(element);
                }
            }
            Token::EndTag(tag) => {
                let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
                if let Some(index) = stack.iter().rposition(|e| e.tag == name) {
                    while stack.len() > index {
                        if let Some(element) = stack.pop() {
                            attach(&mut stack, &mut roots, element);
                        }
                    }
                }
            }
            Token::String(text) => {
                let text = String::from_utf8_lossy(&text);
                match stack.last_mut() {
                    Some(current) => push_text(&mut current.children, &text),
                    None => push_text(&mut roots, &text),
                }
            }
            Token::Comment(_) | Token::Doctype(_) | Token::Error(_) => {}
        }
    }

    while let Some(element) = stack.pop() {
        attach(&mut stack, &mut roots, element);
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render_all;

    #[test]
    fn test_well_formed_output() {
        let nodes = clean("<p>one<b>two</p>three").unwrap();
        assert_eq!(render_all(&nodes), "<p>one<b>two</b></p>three");
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let nodes = clean("a</i>b").unwrap();
        assert_eq!(nodes, vec![Content::text("ab")]);
    }

    #[test]
    fn test_entities_decoded() {
        let nodes = clean("a &amp; b &#60; &#x3E; &nosuchentity;").unwrap();
        assert_eq!(nodes, vec![Content::text("a & b < > &nosuchentity;")]);
    }

    #[test]
    fn test_comments_dropped() {
        let nodes = clean("x<!-- hidden -->y").unwrap();
        assert_eq!(nodes, vec![Content::text("xy")]);
    }

    #[test]
    fn test_void_elements() {
        let nodes = clean("a<br>b<img src=\"i.png\"/>").unwrap();
        assert_eq!(render_all(&nodes), "a<br>b<img src=\"i.png\">");
    }

    #[test]
    fn test_too_deep() {
        let input = "<span>".repeat(MAX_DEPTH + 1);
        assert_eq!(
            clean(&input).unwrap_err(),
            MarkupError::TooDeep { limit: MAX_DEPTH }
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(clean("").unwrap().is_empty());
    }
}
