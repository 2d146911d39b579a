//! HTML 清洗 - 业务能力层
//!
//! 服务端返回的 redline HTML 一律视为不可信输入，渲染前必须经过 [`sanitize_html`]。
//!
//! 清洗分两步：
//! 1. 反复移除脚本类元素、危险标签和注释，直到结果不再变化
//! 2. 按白名单重建每个标签，只输出白名单内的标签和属性，其余文本中的 `<` 一律转义

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 连同内容一起移除的元素
const STRIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "form", "textarea",
    "select", "frameset", "applet", "svg", "math",
];

/// 只移除标签本身的元素（含自闭合/孤立标签）
const STRIPPED_TAGS: &str =
    "script|style|iframe|object|embed|noscript|template|form|textarea|select|frameset|frame|applet|svg|math|link|meta|base";

/// redline 预览允许输出的标签
const ALLOWED_TAGS: &[&str] = &[
    "p", "span", "div", "br", "b", "strong", "i", "em", "u", "s", "del", "ins", "sub", "sup",
    "mark", "ul", "ol", "li", "table", "thead", "tbody", "tr", "td", "th", "h1", "h2", "h3",
    "h4", "h5", "h6", "blockquote", "pre", "code", "a",
];

/// 所有允许标签通用的属性
const ALLOWED_ATTRS: &[&str] = &["class", "title"];

/// 链接允许的协议，没有协议的相对地址也允许
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

static ELEMENT_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STRIPPED_ELEMENTS
        .iter()
        .filter_map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</\s*{tag}\s*>")).ok())
        .collect()
});

static STRAY_TAGS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"(?is)</?\s*(?:{STRIPPED_TAGS})\b[^>]*>")).ok());

static MARKUP_DECLARATIONS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<![^>]*>|<\?[^>]*>").ok());

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([a-zA-Z][a-zA-Z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#).ok()
});

// `/` 与空白一样是属性分隔符
static ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).ok()
});

static CHAR_REF: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|([a-zA-Z]+));?").ok()
});

/// 清洗服务端返回的 HTML 片段
pub fn sanitize_html(html: &str) -> String {
    rebuild_tags(&strip_dangerous_markup(html))
}

/// 移除危险元素直到不动点，拼接后重新出现的标签也会被处理
fn strip_dangerous_markup(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let mut next = current.clone();
        for re in ELEMENT_BLOCKS.iter() {
            next = re.replace_all(&next, "").into_owned();
        }
        for re in [STRAY_TAGS.as_ref(), MARKUP_DECLARATIONS.as_ref()]
            .into_iter()
            .flatten()
        {
            next = re.replace_all(&next, "").into_owned();
        }

        // 每轮有变化时长度严格减少，循环必然结束
        if next == current {
            return current;
        }
        current = next;
    }
}

fn rebuild_tags(html: &str) -> String {
    let Some(tag_re) = TAG.as_ref() else {
        return escape_text(html);
    };

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in tag_re.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&escape_text(&html[last..whole.start()]));
        last = whole.end();

        let name = caps[2].to_ascii_lowercase();
        if !ALLOWED_TAGS.contains(&name.as_str()) {
            continue;
        }
        if !caps[1].is_empty() {
            out.push_str(&format!("</{}>", name));
            continue;
        }

        out.push('<');
        out.push_str(&name);
        out.push_str(&rebuild_attrs(&name, &caps[3]));
        out.push('>');
    }
    out.push_str(&escape_text(&html[last..]));
    out
}

fn rebuild_attrs(tag: &str, raw: &str) -> String {
    let Some(attr_re) = ATTR.as_ref() else {
        return String::new();
    };

    let mut out = String::new();
    for caps in attr_re.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());

        let keep = if ALLOWED_ATTRS.contains(&name.as_str()) {
            true
        } else {
            tag == "a" && name == "href" && is_safe_url(value)
        };
        if keep {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
    }
    out
}

/// 判断链接是否安全：先解码字符引用并去掉空白与控制字符，再检查协议
fn is_safe_url(value: &str) -> bool {
    let decoded = decode_char_refs(value);
    let normalized: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find([':', '/', '?', '#']) {
        Some(i) if normalized[i..].starts_with(':') => ALLOWED_SCHEMES.contains(&&normalized[..i]),
        _ => true,
    }
}

fn decode_char_refs(value: &str) -> String {
    let Some(re) = CHAR_REF.as_ref() else {
        return value.to_string();
    };

    re.replace_all(value, |caps: &Captures| {
        let code = if let Some(dec) = caps.get(1) {
            dec.as_str().parse::<u32>().ok()
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16).ok()
        } else {
            None
        };
        if let Some(c) = code.and_then(char::from_u32) {
            return c.to_string();
        }

        let named = caps.get(3).map_or("", |m| m.as_str());
        match named {
            "colon" => ":".to_string(),
            "Tab" => "\t".to_string(),
            "NewLine" => "\n".to_string(),
            "amp" => "&".to_string(),
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            "sol" => "/".to_string(),
            _ => caps[0].to_string(),
        }
    })
    .into_owned()
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
