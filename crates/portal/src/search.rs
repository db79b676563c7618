//! Fuzzy search over the combined catalogs.
//!
//! Every record contributes its title, its description and, for each nested
//! detail, the title, description and responsible party. Text is compared
//! lowercased and without diacritics. A field scores in `0.0..=1.0` (lower is
//! better) as the best of two measures:
//!
//! * approximate substring distance: the fewest edits needed to find the
//!   query anywhere in the field, divided by the query length;
//! * `SkimMatcherV2` subsequence score relative to the query's self-match.
//!
//! Neither depends on where in the field the match occurs. A record scores
//! as its best field; records above the threshold are dropped.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::record::{Descripcion, DetailView, Record, Summary};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    /// Highest accepted score; 0.0 requires an exact match, 1.0 accepts anything.
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { threshold: 0.4 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SearchHit<'a> {
    pub record: &'a Record,
    pub score: f64,
}

struct Indexed {
    record: Record,
    fields: Vec<Vec<char>>,
}

pub struct SearchIndex {
    entries: Vec<Indexed>,
    matcher: SkimMatcherV2,
    options: SearchOptions,
}

impl SearchIndex {
    pub fn build(records: Vec<Record>, options: SearchOptions) -> Self {
        let entries = records
            .into_iter()
            .map(|record| Indexed {
                fields: searchable_fields(&record)
                    .into_iter()
                    .filter(|field| !field.trim().is_empty())
                    .map(|field| normalize(&field).chars().collect())
                    .collect(),
                record,
            })
            .collect();
        Self {
            entries,
            matcher: SkimMatcherV2::default().ignore_case(),
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Ranked matches for `query`, best first; ties keep corpus order.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = normalize(query.trim());
        if query.is_empty() {
            return Vec::new();
        }
        let pattern: Vec<char> = query.chars().collect();
        let self_score = self
            .matcher
            .fuzzy_match(&query, &query)
            .unwrap_or(1)
            .max(1) as f64;

        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = entry
                    .fields
                    .iter()
                    .map(|field| self.field_score(field, &pattern, &query, self_score))
                    .fold(1.0_f64, f64::min);
                (score <= self.options.threshold).then_some(SearchHit {
                    record: &entry.record,
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        tracing::debug!(query = %query, hits = hits.len(), "search completed");
        hits
    }

    fn field_score(&self, field: &[char], pattern: &[char], query: &str, self_score: f64) -> f64 {
        let edits = approximate_distance(pattern, field) as f64 / pattern.len() as f64;
        let text: String = field.iter().collect();
        let subsequence = self
            .matcher
            .fuzzy_match(&text, query)
            .map(|score| 1.0 - (score as f64 / self_score).clamp(0.0, 1.0))
            .unwrap_or(1.0);
        edits.min(subsequence).clamp(0.0, 1.0)
    }
}

fn searchable_fields(record: &Record) -> Vec<String> {
    let mut fields = vec![record.title().to_string()];
    fields.extend(segments(record.description()));
    for detail in record.details() {
        fields.push(detail.titulo.clone());
        fields.extend(segments(detail.descripcion.as_ref()));
        if let Some(responsable) = &detail.responsable {
            fields.push(responsable.clone());
        }
    }
    fields
}

fn segments(description: Option<&Descripcion>) -> Vec<String> {
    description
        .map(|desc| desc.segments().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Lowercases and strips diacritics (`Análisis` → `analisis`).
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase()
}

/// Fewest insertions, deletions or substitutions needed to make `pattern`
/// occur somewhere in `text`.
fn approximate_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }
    let mut previous: Vec<usize> = (0..=m).collect();
    let mut current = vec![0; m + 1];
    let mut best = m;
    for &ch in text {
        current[0] = 0;
        for i in 1..=m {
            let substitution = previous[i - 1] + usize::from(pattern[i - 1] != ch);
            current[i] = substitution.min(previous[i] + 1).min(current[i - 1] + 1);
        }
        best = best.min(current[m]);
        std::mem::swap(&mut previous, &mut current);
    }
    best
}
