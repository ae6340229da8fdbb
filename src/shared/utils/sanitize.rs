//! Untrusted-markup handling for fetched news fragments.
//!
//! `sanitize_html` walks the fragment with the browser's tag tokenization
//! rules (quoted attribute values, `/` between attributes, raw-text elements)
//! and only ever cuts spans out: scripting elements, inline event handlers and
//! script URLs. Every other byte is copied through, so benign fragments come
//! back identical to what the server sent.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Dropped along with everything up to their end tag
const BLOCKED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "applet", "frame", "frameset", "base",
    "link", "meta",
];

// Content is text up to the matching end tag; an unclosed one runs to the end
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "xmp", "noembed", "noframes", "noscript", "title", "textarea",
];

// Attributes the browser may resolve as a navigable URL
const URL_ATTRIBUTES: &[&str] = &[
    "href", "src", "action", "formaction", "xlink:href", "poster", "background", "cite",
    "data", "codebase", "lowsrc", "dynsrc", "values", "to", "from",
];

const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

static CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|([a-zA-Z][a-zA-Z0-9]*));?")
        .expect("character reference pattern is valid")
});

struct Attribute<'a> {
    /// Start of the whitespace or `/` run in front of the name
    lead: usize,
    start: usize,
    end: usize,
    name: &'a str,
    value: Option<&'a str>,
}

struct Tag<'a> {
    name: &'a str,
    closing: bool,
    attributes: Vec<Attribute<'a>>,
    /// Index just past the closing `>`
    end: usize,
}

/// Remove active content from an HTML fragment.
pub fn sanitize_html(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    // input[..copied] is already in `out` or deliberately dropped
    let mut copied = 0;
    let mut i = 0;

    while let Some(offset) = input[i..].find('<') {
        let lt = i + offset;
        let next = bytes.get(lt + 1).copied();
        let after = bytes.get(lt + 2).copied();

        let opens_tag = match next {
            Some(b) if b.is_ascii_alphabetic() => true,
            Some(b'/') => after.is_some_and(|b| b.is_ascii_alphabetic()),
            _ => false,
        };

        if !opens_tag {
            i = match next {
                // Comments, doctypes and bogus comments end no earlier than the next `>`
                Some(b'!' | b'?' | b'/') => {
                    input[lt..].find('>').map_or(bytes.len(), |p| lt + p + 1)
                }
                _ => lt + 1,
            };
            continue;
        }

        let Some(tag) = parse_tag(input, lt) else {
            // A tag cut off by the end of input is never emitted
            out.push_str(&input[copied..lt]);
            copied = bytes.len();
            break;
        };

        if is_one_of(tag.name, BLOCKED_ELEMENTS) {
            out.push_str(&input[copied..lt]);
            copied = if tag.closing {
                tag.end
            } else {
                match find_end_tag(input, tag.end, tag.name) {
                    Some(close) => parse_tag(input, close).map_or(bytes.len(), |t| t.end),
                    None if is_one_of(tag.name, RAW_TEXT_ELEMENTS) => bytes.len(),
                    None => tag.end,
                }
            };
            i = copied;
            continue;
        }

        if let Some(cleaned) = clean_tag(input, lt, &tag) {
            out.push_str(&input[copied..lt]);
            out.push_str(&cleaned);
            copied = tag.end;
        }
        i = tag.end;

        // The browser ends a raw-text element at the first matching end tag,
        // even one that looks like it sits inside an attribute value.
        if !tag.closing && is_one_of(tag.name, RAW_TEXT_ELEMENTS) {
            if let Some(close) = find_end_tag(input, tag.end, tag.name) {
                out.push_str(&input[copied..tag.end]);
                out.push_str(&sanitize_html(&input[tag.end..close]));
                copied = close;
                i = close;
            }
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Tokenize the tag opening at `lt`. `None` when the input ends inside it.
fn parse_tag(input: &str, lt: usize) -> Option<Tag<'_>> {
    let bytes = input.as_bytes();
    let closing = bytes.get(lt + 1) == Some(&b'/');
    let name_start = lt + if closing { 2 } else { 1 };

    let mut i = name_start;
    while i < bytes.len() && !is_tag_delimiter(bytes[i]) {
        i += 1;
    }
    let name = &input[name_start..i];
    let mut attributes = Vec::new();

    loop {
        let lead = i;
        while i < bytes.len() && (is_space(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if *bytes.get(i)? == b'>' {
            return Some(Tag {
                name,
                closing,
                attributes,
                end: i + 1,
            });
        }

        // A leading `=` belongs to the name
        let start = i;
        i += 1;
        while i < bytes.len() && !is_tag_delimiter(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        let name_end = i;

        let mut j = i;
        while j < bytes.len() && is_space(bytes[j]) {
            j += 1;
        }
        let mut value = None;
        if bytes.get(j) == Some(&b'=') {
            j += 1;
            while j < bytes.len() && is_space(bytes[j]) {
                j += 1;
            }
            match *bytes.get(j)? {
                quote @ (b'"' | b'\'') => {
                    let close = j + 1 + input[j + 1..].find(quote as char)?;
                    value = Some(&input[j + 1..close]);
                    i = close + 1;
                }
                b'>' => {
                    value = Some("");
                    i = j;
                }
                _ => {
                    let value_start = j;
                    while j < bytes.len() && !is_space(bytes[j]) && bytes[j] != b'>' {
                        j += 1;
                    }
                    value = Some(&input[value_start..j]);
                    i = j;
                }
            }
        }

        attributes.push(Attribute {
            lead,
            start,
            end: i,
            name: &input[start..name_end],
            value,
        });
    }
}

/// Rebuild a tag without event handlers and with script URLs replaced by `#`.
/// `None` when nothing needed changing.
fn clean_tag(input: &str, lt: usize, tag: &Tag<'_>) -> Option<String> {
    let mut out = String::new();
    let mut copied = lt;

    for attribute in &tag.attributes {
        if is_event_handler(attribute.name) {
            out.push_str(&input[copied..attribute.lead]);
            copied = attribute.end;
        } else if is_one_of(attribute.name, URL_ATTRIBUTES)
            && attribute.value.is_some_and(is_script_url)
        {
            out.push_str(&input[copied..attribute.start]);
            out.push_str(attribute.name);
            out.push_str("=\"#\"");
            copied = attribute.end;
        }
    }

    (copied != lt).then(|| {
        out.push_str(&input[copied..tag.end]);
        out
    })
}

/// Position of the first `</name` that ends an element called `name`.
fn find_end_tag(input: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = from;
    while let Some(offset) = input[i..].find("</") {
        let at = i + offset;
        let name_end = at + 2 + name.len();
        if bytes
            .get(at + 2..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()))
            && bytes.get(name_end).is_none_or(|&b| is_tag_delimiter(b))
        {
            return Some(at);
        }
        i = at + 2;
    }
    None
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2
        && name
            .as_bytes()
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"on"))
}

fn is_script_url(value: &str) -> bool {
    let decoded = decode_char_refs(value);
    // URL parsing trims C0 controls and spaces and drops tabs and newlines
    let scheme: String = decoded
        .trim_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .take(16)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    SCRIPT_SCHEMES.iter().any(|s| scheme.starts_with(s))
}

fn decode_char_refs(value: &str) -> Cow<'_, str> {
    CHAR_REF.replace_all(value, |caps: &Captures| {
        let decoded = if let Some(hex) = caps.get(1) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32)
        } else if let Some(dec) = caps.get(2) {
            dec.as_str().parse().ok().and_then(char::from_u32)
        } else {
            named_char(&caps[3])
        };
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
}

// Only references that can spell out a URL scheme matter here
fn named_char(name: &str) -> Option<char> {
    match name {
        "colon" => Some(':'),
        "Tab" => Some('\t'),
        "NewLine" => Some('\n'),
        "amp" => Some('&'),
        "sol" => Some('/'),
        "lpar" => Some('('),
        "rpar" => Some(')'),
        _ => None,
    }
}

fn is_tag_delimiter(b: u8) -> bool {
    is_space(b) || b == b'/' || b == b'>'
}

fn is_space(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | 0x0C | b'\r' | b' ')
}

fn is_one_of(name: &str, list: &[&str]) -> bool {
    list.iter().any(|candidate| name.eq_ignore_ascii_case(candidate))
}

/// Escape a string so it renders as literal text.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_markup_is_unchanged() {
        let html = r#"<ul class="news"><li><a href="/n/1" title="One">Story &amp; more</a></li><li><img src="/a.png" alt=""></li></ul>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_script_elements_are_removed() {
        let html = "<p>Hi</p><script>alert(1)</script><p>Bye</p>";
        assert_eq!(sanitize_html(html), "<p>Hi</p><p>Bye</p>");
    }

    #[test]
    fn test_script_removal_is_case_insensitive_and_multiline() {
        let html = "<div><SCRIPT type=\"text/javascript\">\nsteal();\n</Script ></div>";
        assert_eq!(sanitize_html(html), "<div></div>");
    }

    #[test]
    fn test_unclosed_script_tag_is_dropped() {
        assert_eq!(sanitize_html("<p>x</p><script src=\"/evil.js\">"), "<p>x</p>");
    }

    #[test]
    fn test_event_handlers_are_stripped() {
        let html = r#"<img src="/a.png" onerror="alert(1)" alt="a"><div ONCLICK='go()'>x</div>"#;
        assert_eq!(sanitize_html(html), r#"<img src="/a.png" alt="a"><div>x</div>"#);
    }

    #[test]
    fn test_javascript_urls_are_neutralised() {
        let html = r#"<a href="javascript:alert(1)">x</a><a href='JavaScript:void(0)'>y</a>"#;
        assert_eq!(sanitize_html(html), r##"<a href="#">x</a><a href="#">y</a>"##);
    }

    #[test]
    fn test_text_mentioning_handlers_is_untouched() {
        let html = "<p>the onion = tasty</p>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_quoted_gt_does_not_end_the_tag() {
        let html = r#"<img src="x" alt=">" onerror="alert(1)">"#;
        assert_eq!(sanitize_html(html), r#"<img src="x" alt=">">"#);
    }

    #[test]
    fn test_slash_separates_attributes() {
        assert_eq!(
            sanitize_html(r#"<img/src="x"/onerror=alert(1)>"#),
            r#"<img/src="x">"#
        );
        assert_eq!(sanitize_html("<svg/onload=alert(1)>"), "<svg>");
    }

    #[test]
    fn test_slash_inside_unquoted_value_is_part_of_the_value() {
        // One `src` attribute whose value is `x/onerror=alert(1)`: no handler
        let html = "<img/src=x/onerror=alert(1)>";
        assert_eq!(sanitize_html(html), html);
        let tag = parse_tag(html, 0).unwrap();
        assert_eq!(tag.attributes.len(), 1);
        assert_eq!(tag.attributes[0].value, Some("x/onerror=alert(1)"));
    }

    #[test]
    fn test_encoded_javascript_urls_are_neutralised() {
        for html in [
            r#"<a href="&#106;avascript:alert(1)">x</a>"#,
            r#"<a href="&#x6A;avascript:alert(1)">x</a>"#,
            r#"<a href="javascript&colon;alert(1)">x</a>"#,
            r#"<a href="java&Tab;script:alert(1)">x</a>"#,
            "<a href=\" \u{1}java\nscript:alert(1)\">x</a>",
        ] {
            assert_eq!(sanitize_html(html), r##"<a href="#">x</a>"##, "{html}");
        }
    }

    #[test]
    fn test_raw_text_element_ends_at_first_end_tag() {
        let html = r#"<title><img alt="</title><img src=x onerror=alert(1)>"></title>"#;
        assert_eq!(
            sanitize_html(html),
            r#"<title></title><img src=x>"></title>"#
        );
    }

    #[test]
    fn test_comments_are_kept() {
        let html = "<!-- edition 42 --><p>x</p>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_truncated_tag_is_dropped() {
        assert_eq!(sanitize_html(r#"<p>x</p><img src="a" onerror="#), "<p>x</p>");
    }

    #[test]
    fn test_non_url_attributes_keep_their_text() {
        let html = r#"<abbr title="javascript: the good parts">JS</abbr>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<p class="x">Tom & Jerry's</p>"#),
            "&lt;p class=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/p&gt;"
        );
    }
}
