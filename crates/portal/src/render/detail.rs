use serde::Serialize;

use super::{DETAIL, Renderer};
use crate::accordion::setup_accordion;
use crate::contact::format_contact;
use crate::error::PortalError;
use crate::links::setup_anchor_links;
use crate::page::{Page, selectors};
use crate::record::{Descripcion, Detail, DetailView, Summary};

#[derive(Serialize)]
struct DetailItem<'a> {
    title: &'a str,
    list: Option<&'a [String]>,
    paragraph: Option<&'a str>,
    responsible: Option<&'a str>,
    contact: Option<String>,
}

#[derive(Serialize)]
struct DetailPage<'a> {
    heading: &'a str,
    lead: String,
    items: Vec<DetailItem<'a>>,
}

impl<'a> DetailItem<'a> {
    fn new(detail: &'a Detail) -> Self {
        let (list, paragraph) = match &detail.descripcion {
            Some(Descripcion::List(items)) => (Some(items.as_slice()), None),
            Some(Descripcion::Text(text)) if !text.is_empty() => (None, Some(text.as_str())),
            _ => (None, None),
        };
        Self {
            title: &detail.titulo,
            list,
            paragraph,
            responsible: detail.responsable.as_deref().filter(|r| !r.is_empty()),
            contact: contact_line(detail),
        }
    }
}

/// Email links followed by the phone annotation; `None` when neither exists.
fn contact_line(detail: &Detail) -> Option<String> {
    let emails = format_contact(detail.contacto.as_deref().unwrap_or_default(), &detail.titulo);
    let phone = detail
        .telefono
        .as_deref()
        .filter(|phone| !phone.is_empty())
        .map(|phone| format!(r#"<span class="phone-number">Tel: {phone}</span>"#));

    match (emails.is_empty(), phone) {
        (true, None) => None,
        (true, Some(phone)) => Some(phone),
        (false, None) => Some(emails),
        (false, Some(phone)) => Some(format!("{emails} {phone}")),
    }
}

/// Renders the full detail view of `record` into the detail container.
/// Returns false when the page has no detail container.
pub fn render_detail<R: DetailView>(
    page: &mut Page,
    renderer: &Renderer,
    record: &R,
) -> Result<bool, PortalError> {
    if !page.exists(selectors::DETAILS) {
        return Ok(false);
    }
    let context = DetailPage {
        heading: record.heading(),
        lead: record.lead().map(Descripcion::text).unwrap_or_default(),
        items: record.details().iter().map(DetailItem::new).collect(),
    };
    let html = renderer.render(DETAIL, &context)?;
    page.set_inner_html(selectors::DETAILS, html);

    let items = setup_accordion(page);
    setup_anchor_links(page);
    tracing::debug!(id = record.id(), items, "rendered detail view");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accordion::{click_accordion, is_expanded};
    use crate::record::Entry;

    fn entry() -> Entry {
        Entry {
            id: "suelos".into(),
            titulo: "Suelos".into(),
            descripcion: Some(Descripcion::Text("Catalogo".into())),
            page_titulo: Some("Laboratorio de Suelos".into()),
            page_descripcion: None,
            imagen: None,
            detalles: vec![
                Detail {
                    titulo: "Fertilidad".into(),
                    descripcion: Some(Descripcion::List(vec!["pH".into(), "Fósforo".into()])),
                    responsable: Some("Ing. Pérez".into()),
                    contacto: Some("Ventas: ventas@acme.com".into()),
                    telefono: Some("4455".into()),
                },
                Detail {
                    titulo: "Texturas".into(),
                    descripcion: Some(Descripcion::Text("Arena y limo".into())),
                    ..Detail::default()
                },
            ],
        }
    }

    fn entity_page() -> Page {
        Page::parse("laboratorio_template.html?id=suelos")
            .unwrap()
            .with_mount(selectors::DETAILS)
    }

    #[test]
    fn detail_view_renders_items() {
        let mut page = entity_page();
        let renderer = Renderer::new().unwrap();
        assert!(render_detail(&mut page, &renderer, &entry()).unwrap());

        let html = page.inner_html(selectors::DETAILS).unwrap();
        assert!(html.contains(r#"<h2 class="section-title">Laboratorio de Suelos</h2>"#));
        assert!(html.contains(r#"<p class="description">Catalogo</p>"#));
        assert!(html.contains("<ul><li>pH</li><li>Fósforo</li></ul>"));
        assert!(html.contains("<p>Arena y limo</p>"));
        assert!(html.contains(
            r#"<p class="detail-responsible"><strong>Responsable:</strong> Ing. Pérez</p>"#
        ));
        assert!(html.contains(r#"class="email-link">Ventas: ventas@acme.com</a> <span class="phone-number">Tel: 4455</span></p>"#));
        assert_eq!(html.matches("detail-contact").count(), 1);
        assert_eq!(html.matches("detail-responsible").count(), 1);
    }

    #[test]
    fn detail_view_wires_accordion() {
        let mut page = entity_page();
        let renderer = Renderer::new().unwrap();
        render_detail(&mut page, &renderer, &entry()).unwrap();

        assert_eq!(click_accordion(&mut page, 1), Some(true));
        assert!(is_expanded(&page, 1));
        assert!(!is_expanded(&page, 0));
    }

    #[test]
    fn contact_line_handles_phone_only_and_pass_through() {
        let phone_only = Detail {
            telefono: Some("123".into()),
            ..Detail::default()
        };
        assert_eq!(
            contact_line(&phone_only).as_deref(),
            Some(r#"<span class="phone-number">Tel: 123</span>"#)
        );

        let plain = Detail {
            contacto: Some("llame al 555-1234".into()),
            ..Detail::default()
        };
        assert_eq!(contact_line(&plain).as_deref(), Some("llame al 555-1234"));
        assert_eq!(contact_line(&Detail::default()), None);
    }

    #[test]
    fn missing_container_is_reported() {
        let mut page = Page::parse("index.html").unwrap();
        let renderer = Renderer::new().unwrap();
        assert!(!render_detail(&mut page, &renderer, &entry()).unwrap());
    }
}
