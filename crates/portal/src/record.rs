use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Origin catalog of a record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tipo {
    Laboratorios,
    Agencias,
    Servicios,
}

impl Tipo {
    /// Catalog lookup order used when an id is resolved across all catalogs.
    pub const PRIORITY: [Tipo; 3] = [Tipo::Laboratorios, Tipo::Agencias, Tipo::Servicios];

    pub fn as_str(self) -> &'static str {
        match self {
            Tipo::Laboratorios => "laboratorios",
            Tipo::Agencias => "agencias",
            Tipo::Servicios => "servicios",
        }
    }
}

impl fmt::Display for Tipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free text that the data files store either as one string or as a list of strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Descripcion {
    Text(String),
    List(Vec<String>),
}

impl Descripcion {
    /// Flattened text; list entries are joined with a single space.
    pub fn text(&self) -> String {
        match self {
            Descripcion::Text(text) => text.clone(),
            Descripcion::List(items) => items.join(" "),
        }
    }

    /// Individual text segments, one per list entry.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Descripcion::Text(text) => vec![text.as_str()],
            Descripcion::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Descripcion::Text(text) => text.is_empty(),
            Descripcion::List(items) => items.is_empty(),
        }
    }
}

/// One concrete offering nested in a catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Detail {
    #[serde(default)]
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<Descripcion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacto: Option<String>,
    #[serde(
        rename = "Teléfono",
        alias = "telefono",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub telefono: Option<String>,
}

/// Field set shared by every catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<Descripcion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_descripcion: Option<Descripcion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    #[serde(default)]
    pub detalles: Vec<Detail>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Laboratory(pub Entry);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Agency(pub Entry);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Service(pub Entry);

/// Summary fields used by card and list views.
pub trait Summary {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&Descripcion>;
    fn image(&self) -> Option<&str>;
}

/// Fields consumed by the detail view.
pub trait DetailView: Summary {
    fn heading(&self) -> &str;
    fn lead(&self) -> Option<&Descripcion>;
    fn details(&self) -> &[Detail];
}

impl Summary for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.titulo
    }

    fn description(&self) -> Option<&Descripcion> {
        self.descripcion.as_ref()
    }

    fn image(&self) -> Option<&str> {
        self.imagen.as_deref()
    }
}

impl DetailView for Entry {
    fn heading(&self) -> &str {
        match self.page_titulo.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.titulo,
        }
    }

    fn lead(&self) -> Option<&Descripcion> {
        match &self.page_descripcion {
            Some(desc) if !desc.is_empty() => Some(desc),
            _ => self.descripcion.as_ref(),
        }
    }

    fn details(&self) -> &[Detail] {
        &self.detalles
    }
}

/// A catalog record tagged with the catalog it was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Laboratory(Laboratory),
    Agency(Agency),
    Service(Service),
}

impl Record {
    pub fn new(tipo: Tipo, entry: Entry) -> Self {
        match tipo {
            Tipo::Laboratorios => Record::Laboratory(Laboratory(entry)),
            Tipo::Agencias => Record::Agency(Agency(entry)),
            Tipo::Servicios => Record::Service(Service(entry)),
        }
    }

    pub fn tipo(&self) -> Tipo {
        match self {
            Record::Laboratory(_) => Tipo::Laboratorios,
            Record::Agency(_) => Tipo::Agencias,
            Record::Service(_) => Tipo::Servicios,
        }
    }

    pub fn entry(&self) -> &Entry {
        match self {
            Record::Laboratory(Laboratory(entry))
            | Record::Agency(Agency(entry))
            | Record::Service(Service(entry)) => entry,
        }
    }
}

impl Summary for Record {
    fn id(&self) -> &str {
        self.entry().id()
    }

    fn title(&self) -> &str {
        self.entry().title()
    }

    fn description(&self) -> Option<&Descripcion> {
        self.entry().description()
    }

    fn image(&self) -> Option<&str> {
        self.entry().image()
    }
}

impl DetailView for Record {
    fn heading(&self) -> &str {
        self.entry().heading()
    }

    fn lead(&self) -> Option<&Descripcion> {
        self.entry().lead()
    }

    fn details(&self) -> &[Detail] {
        self.entry().details()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
