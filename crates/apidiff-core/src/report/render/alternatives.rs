//! The two-alternative view: every distinct value of a position in instance
//! order, joined by arrows, with absence shown as `(missing)`.

use crate::grouping::group_by;
use crate::html::HtmlTree;
use crate::model::{ApiMap, ApiSet};

pub const MISSING: &str = "(missing)";

const ARROW: &str = " \u{2192} ";

/// Render the distinct values of `values`
///
/// A single shared value renders as plain text; otherwise each group becomes
/// one alternative titled with the instances holding it.
pub fn alternatives(apis: &ApiSet, values: &ApiMap<String>) -> HtmlTree {
    let groups = group_by(apis, values, String::clone);
    if let [only] = groups.as_slice() {
        let text = only.value.map(String::as_str).unwrap_or(MISSING);
        return HtmlTree::new("span").with_class("value").with_text(text);
    }

    let mut view = HtmlTree::new("span").with_class("alternatives");
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            view.push(HtmlTree::new("span").with_class("arrow").with_text(ARROW));
        }
        let (class, text) = match group.value {
            Some(value) => ("alternative", value.as_str()),
            None => ("alternative missing", MISSING),
        };
        view.push(
            HtmlTree::new("span")
                .with_class(class)
                .with_attr("title", apis.names_of(&group.apis))
                .with_text(text),
        );
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Api, ApiId};

    fn apis(n: usize) -> ApiSet {
        ApiSet::new((1..=n).map(|i| Api::new(format!("v{}", i), "")).collect()).unwrap()
    }

    #[test]
    fn test_missing_then_present() {
        let values: ApiMap<String> = [(ApiId(1), "@Deprecated".to_string())].into_iter().collect();
        let view = alternatives(&apis(2), &values);
        assert_eq!(view.text_content(), "(missing) \u{2192} @Deprecated");
        assert!(view.to_html().contains("title=\"v2\""));
    }

    #[test]
    fn test_same_value_is_plain() {
        let values: ApiMap<String> = [(ApiId(0), "int".to_string()), (ApiId(1), "int".to_string())]
            .into_iter()
            .collect();
        let view = alternatives(&apis(2), &values);
        assert_eq!(view.to_html(), "<span class=\"value\">int</span>");
    }

    #[test]
    fn test_three_way_groups_in_order() {
        let values: ApiMap<String> = [
            (ApiId(0), "a".to_string()),
            (ApiId(1), "b".to_string()),
            (ApiId(2), "a".to_string()),
        ]
        .into_iter()
        .collect();
        let view = alternatives(&apis(3), &values);
        assert_eq!(view.text_content(), "a \u{2192} b");
        assert!(view.to_html().contains("title=\"v1, v3\""));
    }
}
