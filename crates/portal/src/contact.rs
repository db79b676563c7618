//! Turns free-text contact strings into `mailto:` links.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

/// An email with an optional label, e.g. `Ventas: ventas@acme.com`.
static CONTACT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<label>[A-Za-z0-9_\sñÑáéíóúÁÉÍÓÚüÜ.-]*[\s:-]+)?(?P<email>[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+)",
    )
    .expect("contact pattern compiles")
});

/// Characters `encodeURIComponent` leaves as they are.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SUBJECT_PREFIX: &str = "Consulta sobre servicio: ";
const SEPARATOR: &str = " - ";

/// One email extracted from a contact string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactLink {
    pub label: Option<String>,
    pub email: String,
}

impl ContactLink {
    pub fn text(&self) -> String {
        match &self.label {
            Some(label) => format!("{label}: {}", self.email),
            None => self.email.clone(),
        }
    }

    pub fn href(&self, topic: &str) -> String {
        format!(
            "mailto:{}?subject={}",
            self.email,
            encode_uri_component(&format!("{SUBJECT_PREFIX}{topic}"))
        )
    }

    pub fn to_html(&self, topic: &str) -> String {
        format!(
            r#"<a href="{}" class="email-link">{}</a>"#,
            self.href(topic),
            self.text()
        )
    }
}

/// Extracts every labelled or bare email in `contact`, in order of appearance.
pub fn parse_contacts(contact: &str) -> Vec<ContactLink> {
    CONTACT_PATTERN
        .captures_iter(contact)
        .filter_map(|caps| {
            let email = caps.name("email")?.as_str().to_string();
            let label = caps
                .name("label")
                .map(|m| {
                    m.as_str()
                        .trim_matches(|ch: char| ch.is_whitespace() || ch == ':' || ch == '-')
                        .to_string()
                })
                .filter(|label| !label.is_empty());
            Some(ContactLink { label, email })
        })
        .collect()
}

/// Renders `contact` as `mailto:` links whose subject names `topic`.
///
/// Empty input renders nothing; text without any email is returned unchanged.
pub fn format_contact(contact: &str, topic: &str) -> String {
    if contact.is_empty() {
        return String::new();
    }
    let links = parse_contacts(contact);
    if links.is_empty() {
        return contact.to_string();
    }
    links
        .iter()
        .map(|link| link.to_html(topic))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Percent-encodes everything outside the URI-component unreserved set.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}
