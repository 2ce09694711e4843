//! Allow-list HTML sanitizer for markup coming from the card catalog.
//!
//! Tags are rewritten from scratch: only allow-listed tags survive, and only with
//! allow-listed attributes. Script-capable blocks are removed with their content,
//! any other unknown tag is unwrapped. Text between tags is escaped.

use std::sync::LazyLock;

use cardcompare_common::sanitize::Sanitizer;
use regex::{Captures, Regex};

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "b", "strong", "i", "em", "u", "ul", "ol", "li", "span", "div", "a", "h3", "h4",
    "h5", "h6", "small", "sup", "sub", "table", "thead", "tbody", "tr", "td", "th",
];

const ALLOWED_ATTRIBUTES: &[&str] = &["href", "target", "rel", "class", "title"];

/// Removed together with everything they enclose.
const DENIED_BLOCKS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "form", "input", "button", "textarea",
    "select", "noscript", "template", "svg", "math",
];

const SAFE_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// `<!-->` and `<!--->` close themselves; an unterminated comment runs to the end.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(?:-?>|.*?(?:-->|$))").expect("valid comment regex"));

static DENIED_BLOCK_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DENIED_BLOCKS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("valid denied block regex")
        })
        .collect()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>").expect("valid tag regex")
});

/// A tag opener that never reaches its `>`.
static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!?][^<]*").expect("valid fragment regex"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attribute regex")
});

static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid strip regex"));

/// The sanitizer used for every markup field.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListSanitizer;

impl Sanitizer for AllowListSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        sanitize_markup(raw)
    }
}

pub fn sanitize_markup(raw: &str) -> String {
    let mut text: String = COMMENT_RE.replace_all(raw, "").into_owned();

    // Nested tricks like `<scr<script></script>ipt>` need more than one pass.
    loop {
        let before: usize = text.len();
        for re in DENIED_BLOCK_RES.iter() {
            text = re.replace_all(&text, "").into_owned();
        }
        if text.len() == before {
            break;
        }
    }

    let mut out: String = String::with_capacity(text.len());
    let mut last: usize = 0;
    for caps in TAG_RE.captures_iter(&text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&escape_text(&drop_fragments(&text[last..whole.start()])));
        out.push_str(&rewrite_tag(&caps));
        last = whole.end();
    }
    out.push_str(&escape_text(&drop_fragments(&text[last..])));
    out
}

/// Text between complete tags holds no tag, so any `<name` left in it is a
/// broken tag and goes away with its attributes.
fn drop_fragments(text: &str) -> String {
    FRAGMENT_RE.replace_all(text, "").into_owned()
}

/// Plain text of a markup string: tags dropped, common entities decoded.
pub fn strip_markup(markup: &str) -> String {
    STRIP_RE
        .replace_all(markup, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn rewrite_tag(caps: &Captures) -> String {
    let closing: bool = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let name: String = caps
        .get(2)
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return String::new();
    }
    if closing {
        return format!("</{name}>");
    }

    let raw_attrs: &str = caps.get(3).map_or("", |m| m.as_str());
    let mut attrs: Vec<(String, String)> = parse_attributes(raw_attrs)
        .into_iter()
        .filter(|(key, value)| keep_attribute(&name, key, value))
        .collect();

    if name == "a" && attrs.iter().any(|(key, _)| key == "target") {
        attrs.retain(|(key, _)| key != "rel");
        attrs.push(("rel".to_string(), "noopener noreferrer".to_string()));
    }

    let mut tag: String = format!("<{name}");
    for (key, value) in attrs {
        tag.push_str(&format!(" {key}=\"{}\"", escape_attribute(&value)));
    }
    tag.push('>');
    tag
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let key: String = caps.get(1)?.as_str().to_ascii_lowercase();
            let value: String = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Some((key, value))
        })
        .collect()
}

fn keep_attribute(tag: &str, key: &str, value: &str) -> bool {
    if !ALLOWED_ATTRIBUTES.contains(&key) {
        return false;
    }
    match key {
        "href" => tag == "a" && is_safe_url(value),
        "target" => tag == "a",
        _ => true,
    }
}

pub fn is_safe_url(url: &str) -> bool {
    let url: String = url.trim().to_ascii_lowercase();
    SAFE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
