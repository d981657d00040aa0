//! Field extraction from rendered detail pages.
//!
//! Extraction never fails once the selectors compile: a selector that
//! matches nothing yields [`SENTINEL`] for its field.

use std::cell::OnceCell;

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarvestError, Result};
use crate::table::{Record, SENTINEL};

/// Separator used to join list-field items.
pub const LIST_SEPARATOR: &str = "; ";

/// How an FAQ question is recognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMatch {
    /// Exact question text. `{name}` is replaced by the page's identity value.
    Exact(String),
    /// Every keyword must occur in the question, ignoring case.
    Keywords(Vec<String>),
}

impl QuestionMatch {
    pub fn keywords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keywords(words.into_iter().map(Into::into).collect())
    }

    fn matches(&self, question: &str, identity: Option<&str>) -> bool {
        match self {
            Self::Exact(template) => match identity {
                Some(name) => question == template.replace("{name}", name),
                None => question == template,
            },
            Self::Keywords(words) => {
                let question = question.to_lowercase();
                !words.is_empty() && words.iter().all(|w| question.contains(&w.to_lowercase()))
            }
        }
    }
}

/// Extraction rule for one output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRule {
    /// Text of the first element matching the selector.
    Text(String),
    /// Texts of every matching element, joined with [`LIST_SEPARATOR`].
    List(String),
    /// Value of the technical-details row with this header.
    Detail(String),
    /// Answer of the first FAQ entry whose question matches.
    Faq(QuestionMatch),
}

/// A named output field and its extraction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

/// Page structure shared by the detail and FAQ rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Rows of the key/value details table.
    pub details_row: String,
    pub details_key: String,
    pub details_value: String,
    /// One expandable question/answer section.
    pub faq_section: String,
    pub faq_question: String,
    pub faq_answer: String,
    /// Field whose value substitutes `{name}` in exact FAQ questions.
    pub identity_field: String,
}

#[derive(Debug, Clone)]
enum CompiledRule {
    Text(Selector),
    List(Selector),
    Detail(String),
    Faq(QuestionMatch),
}

#[derive(Debug, Clone)]
struct CompiledLayout {
    details_row: Selector,
    details_key: Selector,
    details_value: Selector,
    faq_section: Selector,
    faq_question: Selector,
    faq_answer: Selector,
    identity_field: String,
}

/// Ordered key → value pairs lifted out of a repeated page section.
///
/// Built once per page, then queried by exact key. A repeated key keeps its
/// first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: IndexMap<String, String>,
}

impl SectionMap {
    fn parse(
        root: &Html,
        container: &Selector,
        key: &Selector,
        value: &Selector,
    ) -> Self {
        let mut entries = IndexMap::new();
        for section in root.select(container) {
            let k = section.select(key).next().map(element_text);
            let v = section.select(value).next().map(element_text);
            if let (Some(k), Some(v)) = (k, v) {
                entries.insert(k, v);
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turns detail-page markup into one [`Record`] with a fixed field set.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    fields: Vec<(String, CompiledRule)>,
    layout: CompiledLayout,
}

impl FieldExtractor {
    /// Compile every selector up front so extraction itself cannot fail.
    pub fn new(fields: &[FieldSpec], layout: &PageLayout) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|spec| {
                let rule = match &spec.rule {
                    FieldRule::Text(sel) => CompiledRule::Text(compile(sel)?),
                    FieldRule::List(sel) => CompiledRule::List(compile(sel)?),
                    FieldRule::Detail(key) => CompiledRule::Detail(key.clone()),
                    FieldRule::Faq(q) => CompiledRule::Faq(q.clone()),
                };
                Ok((spec.name.clone(), rule))
            })
            .collect::<Result<Vec<_>>>()?;

        let layout = CompiledLayout {
            details_row: compile(&layout.details_row)?,
            details_key: compile(&layout.details_key)?,
            details_value: compile(&layout.details_value)?,
            faq_section: compile(&layout.faq_section)?,
            faq_question: compile(&layout.faq_question)?,
            faq_answer: compile(&layout.faq_answer)?,
            identity_field: layout.identity_field.clone(),
        };

        Ok(Self { fields, layout })
    }

    /// Declared field names, in output order.
    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Extract one record. Every declared field is present in the result.
    pub fn extract(&self, html: &str) -> Record {
        let document = Html::parse_document(html);
        let details: OnceCell<SectionMap> = OnceCell::new();

        let mut record = Record::new();
        let mut deferred = Vec::new();

        for (name, rule) in &self.fields {
            let value = match rule {
                CompiledRule::Text(sel) => document.select(sel).next().map(element_text),
                CompiledRule::List(sel) => {
                    let items: Vec<String> = document.select(sel).map(element_text).collect();
                    (!items.is_empty()).then(|| items.join(LIST_SEPARATOR))
                }
                CompiledRule::Detail(key) => details
                    .get_or_init(|| self.details(&document))
                    .get(key)
                    .map(str::to_string),
                CompiledRule::Faq(question) => {
                    // Resolved once the identity field is known.
                    deferred.push((name, question));
                    None
                }
            };
            record.set(name.as_str(), value.unwrap_or_else(|| SENTINEL.to_string()));
        }

        if !deferred.is_empty() {
            let faq = self.faq(&document);
            let identity = record
                .get(&self.layout.identity_field)
                .filter(|v| *v != SENTINEL)
                .map(str::to_string);
            for (name, question) in deferred {
                let answer = faq
                    .iter()
                    .find(|(q, _)| question.matches(q, identity.as_deref()))
                    .map(|(_, a)| a.to_string());
                if answer.is_none() {
                    debug!("No FAQ entry for field {}", name);
                }
                record.set(name.as_str(), answer.unwrap_or_else(|| SENTINEL.to_string()));
            }
        }

        record
    }

    /// Key → value pairs from the technical-details table.
    pub fn details(&self, document: &Html) -> SectionMap {
        SectionMap::parse(
            document,
            &self.layout.details_row,
            &self.layout.details_key,
            &self.layout.details_value,
        )
    }

    /// Question → answer pairs from the FAQ sections.
    pub fn faq(&self, document: &Html) -> SectionMap {
        SectionMap::parse(
            document,
            &self.layout.faq_section,
            &self.layout.faq_question,
            &self.layout.faq_answer,
        )
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| HarvestError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Element text, trimmed, with runs of whitespace collapsed to single spaces.
///
/// Text nodes are concatenated as-is first, so inline markup never
/// introduces a separator.
fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
