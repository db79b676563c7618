use crate::record::{Entry, Record, Summary, Tipo};

/// The three catalogs of one load cycle, each record tagged with its origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogs {
    laboratorios: Vec<Record>,
    agencias: Vec<Record>,
    servicios: Vec<Record>,
}

impl Catalogs {
    pub fn new(laboratorios: Vec<Entry>, agencias: Vec<Entry>, servicios: Vec<Entry>) -> Self {
        Self {
            laboratorios: tag(Tipo::Laboratorios, laboratorios),
            agencias: tag(Tipo::Agencias, agencias),
            servicios: tag(Tipo::Servicios, servicios),
        }
    }

    pub fn laboratorios(&self) -> &[Record] {
        &self.laboratorios
    }

    pub fn agencias(&self) -> &[Record] {
        &self.agencias
    }

    pub fn servicios(&self) -> &[Record] {
        &self.servicios
    }

    pub fn catalog(&self, tipo: Tipo) -> &[Record] {
        match tipo {
            Tipo::Laboratorios => &self.laboratorios,
            Tipo::Agencias => &self.agencias,
            Tipo::Servicios => &self.servicios,
        }
    }

    /// Resolves `id` across catalogs in [`Tipo::PRIORITY`] order; the first match wins.
    pub fn find(&self, id: &str) -> Option<&Record> {
        Tipo::PRIORITY
            .iter()
            .find_map(|tipo| self.catalog(*tipo).iter().find(|record| record.id() == id))
    }

    /// Laboratories, then agencies, then services.
    pub fn corpus(&self) -> Vec<Record> {
        Tipo::PRIORITY
            .iter()
            .flat_map(|tipo| self.catalog(*tipo).iter().cloned())
            .collect()
    }
}

fn tag(tipo: Tipo, entries: Vec<Entry>) -> Vec<Record> {
    entries
        .into_iter()
        .map(|entry| Record::new(tipo, entry))
        .collect()
}
