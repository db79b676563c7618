//! Regex helpers for the handful of structural edits made to rendered markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>").expect("anchor pattern compiles"));
static HREF_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("href pattern compiles")
});
static MAIN_NAV_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<([a-z][a-z0-9-]*)\b[^>]*\bclass\s*=\s*(?:"(?:[^"]*\s)?main-nav(?:\s[^"]*)?"|'(?:[^']*\s)?main-nav(?:\s[^']*)?')[^>]*>"#,
    )
    .expect("nav pattern compiles")
});
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(/?)([A-Za-z][A-Za-z0-9-]*)\b[^>]*?(/?)>").expect("tag name pattern compiles")
});
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b([^>]*)>(.*?)</li>").expect("li pattern compiles"));
static ANCHOR_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("anchor text compiles"));
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern compiles"));
static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("style pattern compiles")
});
static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("hidden pattern compiles"));
static ITEM_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="([^"]*)"(\s+data-item="(\d+)")"#).expect("item pattern compiles")
});
static TOGGLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-toggle="(\d+)""#).expect("toggle pattern compiles")
});

/// The `href` of every anchor in document order; `None` for anchors without one.
pub fn anchor_hrefs(html: &str) -> Vec<Option<String>> {
    ANCHOR_TAG
        .captures_iter(html)
        .map(|caps| {
            HREF_ATTR.captures(&caps[1]).and_then(|href| {
                href.get(1)
                    .or_else(|| href.get(2))
                    .map(|m| m.as_str().to_string())
            })
        })
        .collect()
}

/// Markup with all tags removed.
pub fn text_content(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Hides the list items of every `.main-nav` element whose first link text,
/// trimmed, is one of `labels`. Already hidden items are left alone.
pub fn hide_nav_entries(html: &str, labels: &[String]) -> String {
    if labels.is_empty() {
        return html.to_string();
    }
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    while let Some(open) = MAIN_NAV_OPEN.captures_at(html, cursor) {
        let Some(tag) = open.get(0) else {
            break;
        };
        let Some((inner_end, close_end)) = closing_tag(html, &open[1], tag.end()) else {
            break;
        };
        out.push_str(&html[cursor..tag.end()]);
        out.push_str(&hide_items(&html[tag.end()..inner_end], labels));
        out.push_str(&html[inner_end..close_end]);
        cursor = close_end;
    }
    out.push_str(&html[cursor..]);
    out
}

/// Start and end of the tag closing the `name` element opened before `from`.
fn closing_tag(html: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    for caps in ANY_TAG.captures_iter(&html[from..]) {
        if !caps[2].eq_ignore_ascii_case(name) {
            continue;
        }
        let tag = caps.get(0)?;
        if &caps[1] == "/" {
            depth -= 1;
            if depth == 0 {
                return Some((from + tag.start(), from + tag.end()));
            }
        } else if &caps[3] != "/" {
            depth += 1;
        }
    }
    None
}

fn hide_items(html: &str, labels: &[String]) -> String {
    LIST_ITEM
        .replace_all(html, |item: &Captures| {
            let label = ANCHOR_TEXT
                .captures(&item[2])
                .map(|anchor| text_content(&anchor[1]).trim().to_string());
            match label {
                Some(label) if labels.iter().any(|wanted| *wanted == label) => {
                    format!("<li{}>{}</li>", hidden_attrs(&item[1]), &item[2])
                }
                _ => item[0].to_string(),
            }
        })
        .into_owned()
}

/// Adds `display: none` to an attribute list, merging into an existing `style`.
fn hidden_attrs(attrs: &str) -> String {
    if !STYLE_ATTR.is_match(attrs) {
        return format!(r#"{attrs} style="display: none""#);
    }
    STYLE_ATTR
        .replace(attrs, |style: &Captures| {
            let existing = style
                .get(1)
                .or_else(|| style.get(2))
                .map_or("", |m| m.as_str())
                .trim()
                .trim_end_matches(';')
                .trim_end();
            if HIDDEN_STYLE.is_match(existing) {
                style[0].to_string()
            } else if existing.is_empty() {
                r#"style="display: none""#.to_string()
            } else {
                format!(r#"style="{existing}; display: none""#)
            }
        })
        .into_owned()
}

/// Indices of every accordion header (`data-toggle="N"`) in the markup.
pub fn accordion_headers(html: &str) -> Vec<usize> {
    TOGGLE_ATTR
        .captures_iter(html)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Toggles `class` on every tag tagged `data-item="{item}"`.
pub fn toggle_item_class(html: &str, item: usize, class: &str) -> String {
    ITEM_CLASS
        .replace_all(html, |caps: &Captures| {
            if !is_item(caps, item) {
                return caps[0].to_string();
            }
            let mut classes: Vec<&str> = caps[1].split_whitespace().collect();
            if let Some(pos) = classes.iter().position(|existing| *existing == class) {
                classes.remove(pos);
            } else {
                classes.push(class);
            }
            format!(r#"class="{}"{}"#, classes.join(" "), &caps[2])
        })
        .into_owned()
}

/// Class lists of the tags tagged `data-item="{item}"`.
pub fn item_classes(html: &str, item: usize) -> Vec<Vec<String>> {
    ITEM_CLASS
        .captures_iter(html)
        .filter(|caps| is_item(caps, item))
        .map(|caps| caps[1].split_whitespace().map(str::to_string).collect())
        .collect()
}

fn is_item(caps: &Captures, item: usize) -> bool {
    caps[3].parse::<usize>().is_ok_and(|index| index == item)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r##"<header>
<nav class="main-nav">
  <ul>
    <li><a href="index.html">INICIO</a></li>
    <li class="nav-item"><a href="laboratorios.html"> LABORATORIOS </a></li>
    <li><a href="agencias.html">AGENCIAS DE EXTENSIÓN</a></li>
    <li><a href="#">CONTACTO</a></li>
  </ul>
</nav>
</header>"##;

    #[test]
    fn anchors_are_listed_in_order() {
        let hrefs = anchor_hrefs(r#"<a href="a.html">A</a><a name="x">B</a><a class='c' href='mailto:x@y.z'>C</a>"#);
        assert_eq!(
            hrefs,
            vec![Some("a.html".into()), None, Some("mailto:x@y.z".into())]
        );
    }

    #[test]
    fn nav_entries_are_hidden_by_trimmed_label() {
        let labels = vec!["LABORATORIOS".to_string(), "AGENCIAS DE EXTENSIÓN".to_string()];
        let html = hide_nav_entries(HEADER, &labels);
        assert!(html.contains(r#"<li class="nav-item" style="display: none"><a href="laboratorios.html">"#));
        assert!(html.contains(r#"<li style="display: none"><a href="agencias.html">"#));
        assert!(html.contains(r#"<li><a href="index.html">INICIO</a></li>"#));
        assert_eq!(html.matches("display: none").count(), 2);
        assert_eq!(hide_nav_entries(&html, &labels), html);
    }

    #[test]
    fn list_items_outside_main_nav_are_untouched() {
        let labels = vec!["LABORATORIOS".to_string()];
        let html = r#"<ul><li><a href="x">LABORATORIOS</a></li></ul>"#;
        assert_eq!(hide_nav_entries(html, &labels), html);
    }

    #[test]
    fn item_class_toggles_on_panel_and_icon() {
        let html = r#"<div class="service-details" data-item="1"></div><i class="fas fa-chevron-down" data-item="1"></i><div class="service-details" data-item="2"></div>"#;
        let opened = toggle_item_class(html, 1, "active");
        assert_eq!(
            item_classes(&opened, 1),
            vec![
                vec!["service-details".to_string(), "active".to_string()],
                vec!["fas".to_string(), "fa-chevron-down".to_string(), "active".to_string()],
            ]
        );
        assert_eq!(item_classes(&opened, 2), vec![vec!["service-details".to_string()]]);

        let closed = toggle_item_class(&opened, 1, "active");
        assert_eq!(closed, html);
    }

    #[test]
    fn accordion_headers_are_indexed() {
        let html = r#"<div class="service-name" data-toggle="0"></div><div class="service-name" data-toggle="1"></div>"#;
        assert_eq!(accordion_headers(html), vec![0, 1]);
    }

    #[test]
    fn any_main_nav_element_is_trimmed() {
        let labels = vec!["LABORATORIOS".to_string()];
        let div = r#"<div class="menu main-nav"><ul><li><a href="l.html">LABORATORIOS</a></li></ul></div>"#;
        assert_eq!(
            hide_nav_entries(div, &labels),
            r#"<div class="menu main-nav"><ul><li style="display: none"><a href="l.html">LABORATORIOS</a></li></ul></div>"#
        );

        let quoted = "<nav class='main-nav'><ul><li><a href='l.html'>LABORATORIOS</a></li></ul></nav>";
        assert!(hide_nav_entries(quoted, &labels).contains(r#"<li style="display: none">"#));

        let lookalike = r#"<nav class="main-nav-footer"><ul><li><a href="l.html">LABORATORIOS</a></li></ul></nav>"#;
        assert_eq!(hide_nav_entries(lookalike, &labels), lookalike);
    }

    #[test]
    fn nested_containers_do_not_end_the_nav_early() {
        let labels = vec!["AGENCIAS".to_string()];
        let html = r#"<div class="main-nav"><div class="inner"><ul><li><a href="a.html">AGENCIAS</a></li></ul></div></div><ul><li><a href="b.html">AGENCIAS</a></li></ul>"#;
        let hidden = hide_nav_entries(html, &labels);
        assert_eq!(hidden.matches("display: none").count(), 1);
        assert!(hidden.ends_with(r#"<ul><li><a href="b.html">AGENCIAS</a></li></ul>"#));
    }

    #[test]
    fn existing_style_is_merged() {
        let labels = vec!["LABORATORIOS".to_string()];
        let html = r#"<nav class="main-nav"><ul><li style="color:red;"><a href="l.html">LABORATORIOS</a></li></ul></nav>"#;
        let hidden = hide_nav_entries(html, &labels);
        assert!(hidden.contains(r#"<li style="color:red; display: none"><a href="l.html">"#));
        assert_eq!(hidden.matches("style=").count(), 1);
        assert_eq!(hide_nav_entries(&hidden, &labels), hidden);
    }

    #[test]
    fn item_class_ignores_longer_indices() {
        let html = r#"<div class="service-details" data-item="1"></div><div class="service-details" data-item="10"></div>"#;
        let opened = toggle_item_class(html, 1, "active");
        assert_eq!(item_classes(&opened, 10), vec![vec!["service-details".to_string()]]);
        assert_eq!(item_classes(&opened, 1)[0].last().map(String::as_str), Some("active"));
    }
}
