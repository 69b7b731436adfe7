//! Locale vocabularies for metadata heuristics.

use serde::{Deserialize, Serialize};

/// Terms the metadata heuristics search for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Words that name an administrative document type.
    pub document_types: Vec<String>,
    /// Month names, in calendar order.
    pub month_names: Vec<String>,
    /// Line-leading phrases that introduce a department or unit name.
    pub department_prefixes: Vec<String>,
}

impl Vocabulary {
    /// Look up a built-in preset by locale code.
    pub fn for_locale(locale: &str) -> Option<Self> {
        match locale.to_lowercase().as_str() {
            "en" | "english" => Some(Self::english()),
            "fr" | "french" => Some(Self::french()),
            _ => None,
        }
    }

    pub fn english() -> Self {
        Self {
            document_types: strings(&[
                "Decision",
                "Ruling",
                "Minutes",
                "Notice",
                "Circular",
                "Memorandum",
            ]),
            month_names: strings(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            department_prefixes: strings(&[
                "Department of",
                "Department for",
                "Department's",
                "Faculty of",
                "Service of",
                "Service for",
                "Office of",
            ]),
        }
    }

    pub fn french() -> Self {
        Self {
            document_types: strings(&[
                "Arrêté",
                "Décision",
                "Procès-verbal",
                "PV",
                "Note d'information",
                "Avis",
                "Circulaire",
            ]),
            month_names: strings(&[
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ]),
            department_prefixes: strings(&[
                "Département de l'",
                "Département des",
                "Département du",
                "Département de",
                "Département d'",
                "Faculté de l'",
                "Faculté des",
                "Faculté du",
                "Faculté de",
                "Faculté d'",
                "Service de l'",
                "Service des",
                "Service du",
                "Service de",
                "Service d'",
            ]),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
