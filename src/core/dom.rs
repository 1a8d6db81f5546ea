// src/core/dom.rs
//
// Parsed element tree plus the query surface the scrapers walk.
//
// A node is either a text leaf (tag_name == "text", content set) or a
// real element (content unset, children optional). Nodes are built once
// by core::parser and never mutated afterwards; every query below is a
// pure read over the subtree, self first, in document order.

/// Reserved tag name marking a text leaf.
pub const TEXT_TAG: &str = "text";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag_name: String,
    /// Insertion-ordered name→value pairs; absent when the tag had none.
    /// Duplicate names are collapsed at parse time (last wins).
    pub attributes: Option<Vec<(String, String)>>,
    /// Trimmed literal text; text leaves only.
    pub content: Option<String>,
    /// `class` attribute split on whitespace; empty when absent.
    pub class_list: Vec<String>,
    /// Raw `id` attribute value.
    pub id: Option<String>,
    /// Document-ordered nested nodes; absent rather than empty.
    pub children: Option<Vec<HtmlElement>>,
}

impl HtmlElement {
    pub fn text_node(content: &str) -> Self {
        Self {
            tag_name: s!(TEXT_TAG),
            attributes: None,
            content: Some(s!(content)),
            class_list: Vec::new(),
            id: None,
            children: None,
        }
    }

    /// Element node; `class_list` and `id` are derived here, once.
    pub fn tag(
        name: &str,
        attributes: Option<Vec<(String, String)>>,
        children: Option<Vec<HtmlElement>>,
    ) -> Self {
        let class_list = attributes
            .as_ref()
            .and_then(|attrs| attrs.iter().find(|(n, _)| n == "class"))
            .map(|(_, v)| v.split_whitespace().map(String::from).collect())
            .unwrap_or_default();
        let id = attributes
            .as_ref()
            .and_then(|attrs| attrs.iter().find(|(n, _)| n == "id"))
            .map(|(_, v)| v.clone());

        Self {
            tag_name: s!(name),
            attributes,
            content: None,
            class_list,
            id,
            children,
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.tag_name == TEXT_TAG
    }

    #[inline]
    fn child_slice(&self) -> &[HtmlElement] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Concatenated text of all descendant text leaves, document order.
    pub fn text(&self) -> String {
        if self.is_text() {
            return self.content.clone().unwrap_or_default();
        }
        let mut out = s!();
        for child in self.child_slice() {
            out.push_str(&child.text());
        }
        out
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First depth-first match, self before children.
    pub fn get_element_by_id(&self, id: &str) -> Option<&HtmlElement> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        for child in self.child_slice() {
            if let Some(found) = child.get_element_by_id(id) {
                return Some(found);
            }
        }
        None
    }

    pub fn get_elements_by_class_name(&self, name: &str) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        self.collect(&mut found, &|el| el.class_list.iter().any(|c| c == name));
        found
    }

    /// Case-sensitive exact tag match.
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        self.collect(&mut found, &|el| el.tag_name == name);
        found
    }

    /// Presence match when `value` is None, exact value match otherwise.
    pub fn get_elements_by_attribute(&self, name: &str, value: Option<&str>) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        self.collect(&mut found, &|el| match el.get_attribute(name) {
            Some(have) => value.is_none_or(|want| have == want),
            None => false,
        });
        found
    }

    /// Pre-order traversal shared by the collection queries.
    fn collect<'a>(&'a self, out: &mut Vec<&'a HtmlElement>, pred: &dyn Fn(&HtmlElement) -> bool) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_slice() {
            child.collect(out, pred);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Option<Vec<(String, String)>> {
        Some(pairs.iter().map(|(n, v)| (s!(*n), s!(*v))).collect())
    }

    fn sample() -> HtmlElement {
        // <div id="root" class="outer box">
        //   <span class="label">Hello</span>
        //   <div class="box" data-k="1"><span id="deep">World</span></div>
        // </div>
        HtmlElement::tag(
            "div",
            attrs(&[("id", "root"), ("class", "outer box")]),
            Some(vec![
                HtmlElement::tag(
                    "span",
                    attrs(&[("class", "label")]),
                    Some(vec![HtmlElement::text_node("Hello")]),
                ),
                HtmlElement::tag(
                    "div",
                    attrs(&[("class", "box"), ("data-k", "1")]),
                    Some(vec![HtmlElement::tag(
                        "span",
                        attrs(&[("id", "deep")]),
                        Some(vec![HtmlElement::text_node("World")]),
                    )]),
                ),
            ]),
        )
    }

    #[test]
    fn class_list_splits_on_whitespace() {
        let el = HtmlElement::tag("p", attrs(&[("class", "x y  z")]), None);
        assert_eq!(el.class_list, vec!["x", "y", "z"]);
    }

    #[test]
    fn text_concatenates_descendants_in_order() {
        assert_eq!(sample().text(), "HelloWorld");
        assert_eq!(HtmlElement::tag("br", None, None).text(), "");
    }

    #[test]
    fn get_attribute_absent_without_attributes() {
        assert_eq!(HtmlElement::text_node("x").get_attribute("class"), None);
        assert_eq!(sample().get_attribute("data-k"), None);
        assert_eq!(sample().get_attribute("id"), Some("root"));
    }

    #[test]
    fn by_id_self_first_then_depth_first() {
        let root = sample();
        assert_eq!(root.get_element_by_id("root").unwrap().tag_name, "div");
        assert_eq!(root.get_element_by_id("deep").unwrap().text(), "World");
        assert!(root.get_element_by_id("nope").is_none());
    }

    #[test]
    fn by_class_pre_order_self_included() {
        let root = sample();
        let boxes = root.get_elements_by_class_name("box");
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].id.as_deref(), Some("root")); // self before descendants
        assert_eq!(boxes[1].get_attribute("data-k"), Some("1"));
    }

    #[test]
    fn by_tag_exact_case_sensitive() {
        let root = sample();
        assert_eq!(root.get_elements_by_tag_name("span").len(), 2);
        assert_eq!(root.get_elements_by_tag_name("Span").len(), 0);
    }

    #[test]
    fn by_attribute_presence_and_value() {
        let root = sample();
        assert_eq!(root.get_elements_by_attribute("data-k", None).len(), 1);
        assert_eq!(root.get_elements_by_attribute("data-k", Some("1")).len(), 1);
        assert_eq!(root.get_elements_by_attribute("data-k", Some("2")).len(), 0);
        // root itself matches a presence query on class
        assert_eq!(root.get_elements_by_attribute("class", None).len(), 3);
    }
}
