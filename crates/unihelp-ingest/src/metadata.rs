//! Heuristic metadata tagging.
//!
//! Three independent single-pass scans over normalized text: document type,
//! date and department. Patterns are compiled once from a [`Vocabulary`] so
//! locale terms can be swapped without touching the matching logic. A scan
//! that finds nothing leaves the fallback value in place.

use crate::error::IngestResult;
use regex::Regex;
use unihelp_config::Vocabulary;
use unihelp_core::HeuristicTags;

/// Extracts document type, date and department tags from text.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    document_type: Option<Regex>,
    dates: Vec<Regex>,
    department: Option<Regex>,
}

impl MetadataExtractor {
    /// Compile the patterns for a vocabulary.
    pub fn new(vocabulary: &Vocabulary) -> IngestResult<Self> {
        let document_type = match alternation(&vocabulary.document_types, r"\s+", false) {
            Some(terms) => Some(Regex::new(&format!(r"(?i)\b(?:{})\b", terms))?),
            None => None,
        };

        let mut dates = vec![
            Regex::new(r"\b[0-9]{2}/[0-9]{2}/[0-9]{4}\b")?,
            Regex::new(r"\b[0-9]{2}-[0-9]{2}-[0-9]{4}\b")?,
        ];
        if let Some(months) = alternation(&vocabulary.month_names, r"\s+", false) {
            dates.push(Regex::new(&format!(
                r"(?i)\b[0-9]{{1,2}}\s+(?:{})\s+[0-9]{{4}}\b",
                months
            ))?);
        }

        let department = match alternation(&vocabulary.department_prefixes, r"[ \t]+", true) {
            Some(prefixes) => Some(Regex::new(&format!(
                r"(?im)^[ \t]*((?:{})[ \t]*[^\s,][^\r\n,]*)",
                prefixes
            ))?),
            None => None,
        };

        Ok(Self {
            document_type,
            dates,
            department,
        })
    }

    /// Tag `text`. Never fails; unmatched fields keep their fallback.
    pub fn extract(&self, text: &str) -> HeuristicTags {
        let mut tags = HeuristicTags::default();

        if let Some(m) = self.document_type.as_ref().and_then(|re| re.find(text)) {
            tags.document_type = capitalize(m.as_str());
        }

        tags.date = self
            .dates
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| m.as_str().to_string());

        if let Some(caps) = self.department.as_ref().and_then(|re| re.captures(text)) {
            if let Some(m) = caps.get(1) {
                tags.department = m.as_str().trim().to_string();
            }
        }

        tags
    }
}

/// Build a regex alternation from vocabulary terms, longest first so a
/// longer term wins over its own prefix at the same position.
///
/// Spaces inside a term match `gap`. With `trailing_boundary`, terms that end
/// in a word character must also end on a word boundary.
fn alternation(terms: &[String], gap: &str, trailing_boundary: bool) -> Option<String> {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return None;
    }
    terms.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

    let parts: Vec<String> = terms
        .into_iter()
        .map(|term| {
            let words: Vec<String> = term.split_whitespace().map(regex::escape).collect();
            let pattern = words.join(gap);
            let ends_in_word = term
                .chars()
                .last()
                .map(|c| c.is_alphanumeric() || c == '_')
                .unwrap_or(false);
            if trailing_boundary && ends_in_word {
                format!(r"{}\b", pattern)
            } else {
                pattern
            }
        })
        .collect();

    Some(parts.join("|"))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
