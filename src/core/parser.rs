// src/core/parser.rs
//
// Best-effort structural HTML parser for scraping. Single forward pass,
// no error paths: malformed input degrades to "skip and continue" or
// "stop this subtree", never to a failed parse. Not a browser-grade
// parser — no entity grammar, no implied tags, no CSS selectors.

use super::dom::HtmlElement;

/* ---------------- Attribute parser ---------------- */

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Parse the raw attribute substring of a tag header into ordered
/// name→value pairs. Tokens are `name="value"` or a bare `name`
/// (stored with an empty value). Anything unrecognizable is skipped;
/// a duplicate name overwrites its earlier value.
pub fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    let bytes = raw.as_bytes();
    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if !is_name_byte(bytes[i]) {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < bytes.len() && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name = &raw[name_start..i];

        // Quoted value only; `name=` without a quote leaves the value
        // to be picked up as a separate bare token, matching the
        // forgiving token-by-token scan.
        let mut value = "";
        if bytes.get(i) == Some(&b'=') && bytes.get(i + 1) == Some(&b'"') {
            let v_start = i + 2;
            let mut j = v_start;
            while j < bytes.len() && bytes[j] != b'"' {
                j += 1;
            }
            if j < bytes.len() {
                value = &raw[v_start..j];
                i = j + 1;
            } else {
                // Unterminated quote: take the rest as the value.
                value = &raw[v_start..];
                i = bytes.len();
            }
        }

        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = s!(value), // last wins
            None => attrs.push((s!(name), s!(value))),
        }
    }

    attrs
}

/* ---------------- Tag scanner ---------------- */

/// A matched opening (or self-closing) tag header `<name ...>`.
struct TagHeader<'a> {
    name: &'a str,
    raw_attrs: &'a str,
    /// Byte length of the whole header including both angle brackets.
    len: usize,
    self_closing: bool,
}

/// Match a well-formed tag header at the start of `input` (which must
/// begin at a `<`). Returns None when the header cannot be matched, in
/// which case the caller advances one byte and resumes.
fn scan_tag_header(input: &str) -> Option<TagHeader<'_>> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    let mut i = 1usize;
    let name_start = i;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name_end = i;

    // Attribute list: repeats of whitespace+ name (="value")?
    let attrs_start = i;
    loop {
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j == i {
            break; // no separating whitespace: list ends
        }
        let an_start = j;
        while j < bytes.len() && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == an_start {
            break; // whitespace not followed by a name: leave for the tail
        }
        if bytes.get(j) == Some(&b'=') && bytes.get(j + 1) == Some(&b'"') {
            j += 2;
            while j < bytes.len() && bytes[j] != b'"' {
                j += 1;
            }
            if j >= bytes.len() {
                return None; // unterminated quoted value
            }
            j += 1;
        }
        i = j;
    }
    let attrs_end = i;

    // Tail: optional whitespace, optional '/', then '>'.
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let self_closing = bytes.get(i) == Some(&b'/');
    if self_closing {
        i += 1;
    }
    if bytes.get(i) != Some(&b'>') {
        return None;
    }

    Some(TagHeader {
        name: &input[name_start..name_end],
        raw_attrs: input[attrs_start..attrs_end].trim(),
        len: i + 1,
        self_closing,
    })
}

/* ---------------- Tree builder ---------------- */

/// Find the closing tag that truly matches an element of `name` whose
/// content starts at `from`, accounting for the same tag name nesting
/// inside itself. Returns the byte offset of the `</name>`.
///
/// Depth is tracked for this tag name only. A stray tag of a different
/// name inside the content cannot shift the boundary; that keeps the
/// scan linear per element and is good enough for scraping semi-stable
/// markup, but mismatched cross-name nesting goes undetected.
fn find_matching_close(html: &str, name: &str, from: usize) -> Option<usize> {
    let open_pat = format!("<{name}");
    let close_pat = format!("</{name}>");
    let mut depth = 1usize;
    let mut pos = from;

    while pos < html.len() {
        let next_close = html[pos..].find(&close_pat).map(|i| pos + i)?;
        let next_open = html[pos..].find(&open_pat).map(|i| pos + i);

        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + close_pat.len();
            }
        }
    }
    None
}

/// Parse an HTML fragment into its ordered forest of sibling nodes,
/// recursing into each element's matched content.
pub fn parse_fragment(html: &str) -> Vec<HtmlElement> {
    let mut elements = Vec::new();
    let mut cursor = 0usize;

    while cursor < html.len() {
        let Some(rel) = html[cursor..].find('<') else {
            // No tags left: trailing text, then done.
            let trailing = html[cursor..].trim();
            if !trailing.is_empty() {
                elements.push(HtmlElement::text_node(trailing));
            }
            break;
        };
        let tag_start = cursor + rel;

        // Text run before the tag.
        if tag_start > cursor {
            let text = html[cursor..tag_start].trim();
            if !text.is_empty() {
                elements.push(HtmlElement::text_node(text));
            }
        }

        // Stray closing tag: never a node, skip past its '>'.
        if html.as_bytes().get(tag_start + 1) == Some(&b'/') {
            cursor = match html[tag_start..].find('>') {
                Some(gt) => tag_start + gt + 1,
                None => html.len(),
            };
            continue;
        }

        let Some(header) = scan_tag_header(&html[tag_start..]) else {
            // Unparsable header: advance one byte, keep scanning.
            cursor = tag_start + 1;
            continue;
        };

        let attributes = match parse_attributes(header.raw_attrs) {
            attrs if attrs.is_empty() => None,
            attrs => Some(attrs),
        };

        if header.self_closing {
            elements.push(HtmlElement::tag(header.name, attributes, None));
            cursor = tag_start + header.len;
            continue;
        }

        let content_start = tag_start + header.len;
        let Some(close_start) = find_matching_close(html, header.name, content_start) else {
            // No closing tag anywhere: the fragment is truncated.
            // Stop this subtree rather than inventing siblings from
            // the broken tail.
            break;
        };

        let content = &html[content_start..close_start];
        let children = if content.trim().is_empty() {
            None
        } else {
            match parse_fragment(content) {
                kids if kids.is_empty() => None,
                kids => Some(kids),
            }
        };

        elements.push(HtmlElement::tag(header.name, attributes, children));
        cursor = close_start + header.name.len() + 3; // past "</name>"
    }

    elements
}

/* ---------------- Document parser ---------------- */

fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Strip one leading `<!doctype html>` declaration, case-insensitive.
fn strip_doctype(html: &str) -> &str {
    let trimmed = html.trim_start();
    let lower = to_lower(trimmed);
    let Some(rest) = lower.strip_prefix("<!doctype") else {
        return html;
    };
    let ws = rest.len() - rest.trim_start().len();
    if ws == 0 {
        return html;
    }
    let Some(after_html) = rest.trim_start().strip_prefix("html") else {
        return html;
    };
    let Some(after_gt) = after_html.trim_start().strip_prefix('>') else {
        return html;
    };
    // Map back onto the original string by consumed byte count.
    &trimmed[trimmed.len() - after_gt.len()..]
}

/// Substring between the first `<body ...>` and the last `</body>`,
/// case-insensitive. None when no body region exists.
fn body_content(html: &str) -> Option<&str> {
    let lower = to_lower(html);
    let open = lower.find("<body")?;
    let open_end = html[open..].find('>')? + open + 1;
    let close = lower.rfind("</body>")?;
    if close < open_end {
        return None;
    }
    Some(&html[open_end..close])
}

/// Entry point: one parsed document, a forest of top-level nodes with
/// document-wide queries merged across them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlDocument {
    pub elements: Vec<HtmlElement>,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        if html.trim().is_empty() {
            return Self { elements: Vec::new() };
        }
        let clean = strip_doctype(html);
        let fragment = body_content(clean).unwrap_or(clean);
        Self { elements: parse_fragment(fragment) }
    }

    /// Wrap an already-built node as a single-element document.
    pub fn from_element(element: HtmlElement) -> Self {
        Self { elements: vec![element] }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&HtmlElement> {
        self.elements.iter().find_map(|el| el.get_element_by_id(id))
    }

    pub fn get_elements_by_class_name(&self, name: &str) -> Vec<&HtmlElement> {
        self.elements
            .iter()
            .flat_map(|el| el.get_elements_by_class_name(name))
            .collect()
    }

    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<&HtmlElement> {
        self.elements
            .iter()
            .flat_map(|el| el.get_elements_by_tag_name(name))
            .collect()
    }

    pub fn get_elements_by_attribute(&self, name: &str, value: Option<&str>) -> Vec<&HtmlElement> {
        self.elements
            .iter()
            .flat_map(|el| el.get_elements_by_attribute(name, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_quoted_bare_and_duplicate() {
        let attrs = parse_attributes(r#"class="a b" disabled data-x="1" data-x="2""#);
        assert_eq!(
            attrs,
            vec![
                (s!("class"), s!("a b")),
                (s!("disabled"), s!()),
                (s!("data-x"), s!("2")), // last occurrence wins
            ]
        );
    }

    #[test]
    fn attributes_garbage_is_skipped_not_fatal() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("  = \" ' ").is_empty());
        // Unquoted value splits into two bare tokens, like the
        // token-by-token scan it mirrors.
        let attrs = parse_attributes("width=100");
        assert_eq!(attrs, vec![(s!("width"), s!()), (s!("100"), s!())]);
    }

    #[test]
    fn simple_element_round_trip() {
        let els = parse_fragment(r#"<p class="intro">content</p>"#);
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].tag_name, "p");
        assert_eq!(els[0].get_attribute("class"), Some("intro"));
        let kids = els[0].children.as_ref().unwrap();
        assert_eq!(kids.len(), 1);
        assert!(kids[0].is_text());
        assert_eq!(kids[0].content.as_deref(), Some("content"));
    }

    #[test]
    fn nested_same_name_matches_correct_close() {
        let els = parse_fragment(r#"<div class="outer"><div class="inner">x</div>y</div>"#);
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].class_list, vec!["outer"]);
        let kids = els[0].children.as_ref().unwrap();
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].class_list, vec!["inner"]);
        assert_eq!(kids[0].text(), "x");
        assert!(kids[1].is_text());
        assert_eq!(kids[1].content.as_deref(), Some("y"));
    }

    #[test]
    fn same_name_nesting_of_depth_three() {
        let els = parse_fragment("<ul><ul><ul>a</ul>b</ul>c</ul><ul>tail</ul>");
        assert_eq!(els.len(), 2);
        assert_eq!(els[0].text(), "abc");
        assert_eq!(els[1].text(), "tail");
    }

    #[test]
    fn self_closing_never_gets_children() {
        let els = parse_fragment(r#"<div><img src="a.png"/><br/></div>"#);
        let kids = els[0].children.as_ref().unwrap();
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].get_attribute("src"), Some("a.png"));
        assert!(kids[0].children.is_none());
        assert!(kids[1].children.is_none());
    }

    #[test]
    fn empty_content_leaves_children_unset() {
        let els = parse_fragment("<div>   </div>");
        assert_eq!(els.len(), 1);
        assert!(els[0].children.is_none());
    }

    #[test]
    fn text_runs_are_trimmed_and_whitespace_dropped() {
        let els = parse_fragment("  hello <b>x</b>\n   \n world  ");
        assert_eq!(els.len(), 3);
        assert_eq!(els[0].content.as_deref(), Some("hello"));
        assert_eq!(els[1].tag_name, "b");
        assert_eq!(els[2].content.as_deref(), Some("world"));
    }

    #[test]
    fn stray_closing_tag_is_skipped() {
        let els = parse_fragment("</div><p>ok</p>");
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].tag_name, "p");
    }

    #[test]
    fn unparsable_header_advances_one_char() {
        // "<3" is not a tag; the '<' is consumed as loose text territory
        // and the rest still parses.
        let els = parse_fragment("a <3 b <i>c</i>");
        assert_eq!(els.last().unwrap().tag_name, "i");
        assert_eq!(els.last().unwrap().text(), "c");
    }

    #[test]
    fn missing_close_truncates_without_hanging() {
        let els = parse_fragment("<p>a</p><div><span>text");
        // The well-formed sibling survives; the broken subtree is
        // dropped rather than guessed at.
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].tag_name, "p");
    }

    #[test]
    fn name_scoped_matching_ignores_cross_name_mismatch() {
        // The div/div pairing decides the boundary; the stray section
        // close inside is just skipped. Known, preserved limitation.
        let els = parse_fragment("<div><section></div></section>");
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].tag_name, "div");
    }

    #[test]
    fn doctype_and_body_extraction() {
        let doc = HtmlDocument::parse(
            "<!DOCTYPE html><html><head><title>t</title></head>\
             <body class=\"page\"><p>inner</p></body></html>",
        );
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].tag_name, "p");
        assert_eq!(doc.elements[0].text(), "inner");
    }

    #[test]
    fn no_body_parses_whole_string() {
        let doc = HtmlDocument::parse("<p>a</p><p>b</p>");
        assert_eq!(doc.elements.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        let doc = HtmlDocument::parse("   ");
        assert!(doc.elements.is_empty());
        assert!(doc.get_element_by_id("x").is_none());
        assert!(doc.get_elements_by_class_name("x").is_empty());
        assert!(doc.get_elements_by_tag_name("x").is_empty());
        assert!(doc.get_elements_by_attribute("x", None).is_empty());
    }

    #[test]
    fn document_queries_merge_across_top_level_siblings() {
        let doc = HtmlDocument::parse(
            r#"<div class="c" id="a">1</div><span class="c" id="a">2</span>"#,
        );
        let hits = doc.get_elements_by_class_name("c");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].tag_name, "div");
        // Duplicate ids: first in document order wins.
        assert_eq!(doc.get_element_by_id("a").unwrap().text(), "1");
    }

    #[test]
    fn parse_is_idempotent() {
        let input = r#"<div id="x"><p class="a b">t</p><img src="i.png"/></div>"#;
        assert_eq!(HtmlDocument::parse(input), HtmlDocument::parse(input));
    }

    #[test]
    fn from_element_wraps_single_node() {
        let el = HtmlElement::tag("div", None, None);
        let doc = HtmlDocument::from_element(el);
        assert_eq!(doc.get_elements_by_tag_name("div").len(), 1);
    }

    #[test]
    fn card_cross_reference_scenario() {
        let html = r#"
            <div id="acgs-anime-icons">
              <div class="acgs-card" id="card-42" weektoday="三" datetoday="0101"></div>
            </div>
            <div id="acgs-anime-list">
              <div acgs-bangumi-anime-id="42">
                <span class="entity_localized_name">Test Anime</span>
              </div>
            </div>
        "#;
        let doc = HtmlDocument::parse(html);
        let cards = doc.get_elements_by_class_name("acgs-card");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id.as_deref(), Some("card-42"));
        assert_eq!(cards[0].get_attribute("weektoday"), Some("三"));

        let entry = doc.get_elements_by_attribute("acgs-bangumi-anime-id", Some("42"));
        assert_eq!(entry.len(), 1);
        let title = &entry[0].get_elements_by_class_name("entity_localized_name");
        assert_eq!(title[0].text(), "Test Anime");
    }
}
