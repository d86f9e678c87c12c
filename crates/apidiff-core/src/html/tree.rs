use super::{escape_attr, escape_text, is_void};

/// A node of an HTML content tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Element(HtmlTree),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&HtmlTree> {
        match self {
            Content::Element(tree) => Some(tree),
            Content::Text(_) => None,
        }
    }

    pub fn render(&self, out: &mut String) {
        match self {
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Element(tree) => tree.render(out),
        }
    }

    pub fn text_content(&self, out: &mut String) {
        match self {
            Content::Text(text) => out.push_str(text),
            Content::Element(tree) => {
                for child in &tree.children {
                    child.text_content(out);
                }
            }
        }
    }
}

impl From<HtmlTree> for Content {
    fn from(tree: HtmlTree) -> Self {
        Content::Element(tree)
    }
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTree {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Content>,
}

impl HtmlTree {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Content>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push(&mut self, child: impl Into<Content>) {
        self.children.push(child.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if is_void(&self.tag) {
            return;
        }
        for child in &self.children {
            child.render(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.text_content(&mut out);
        }
        out
    }
}

/// Render a sequence of nodes
pub fn render_all(nodes: &[Content]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.render(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_escapes() {
        let tree = HtmlTree::new("span")
            .with_attr("title", "a \"b\" <c>")
            .with_text("x < y & z");
        assert_eq!(
            tree.to_html(),
            "<span title=\"a &quot;b&quot; &lt;c&gt;\">x &lt; y &amp; z</span>"
        );
    }

    #[test]
    fn test_void_elements_have_no_close_tag() {
        let tree = HtmlTree::new("p").with_text("a").with_child(HtmlTree::new("br"));
        assert_eq!(tree.to_html(), "<p>a<br></p>");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut tree = HtmlTree::new("span").with_class("a");
        tree.set_attr("class", "b");
        assert_eq!(tree.class(), Some("b"));
        assert_eq!(tree.attrs.len(), 1);
    }
}
