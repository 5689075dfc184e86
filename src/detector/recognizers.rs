//! Per-category recognizers
//!
//! One recognizer per entity category, each owning its compiled patterns.
//! Recognizers are independent: they scan the raw text without looking at
//! each other's matches, so overlapping spans across categories (and within
//! the person category) are possible by design. Only exact duplicates are
//! removed, downstream of the scan.

use super::lexicon::{word_alternation, Lexicons};
use super::Recognizer;
use crate::error::Result;
use crate::models::{DetectedEntity, EntityKind};
use regex::Regex;

/// Letters allowed after the leading capital in name-shaped words
const NAME_TAIL: &str = r"[a-zéèêëàâäôöùûüç'\-]+";

/// Collect non-blank matches of one pattern as entities
fn push_matches(re: &Regex, kind: EntityKind, text: &str, out: &mut Vec<DetectedEntity>) {
    for found in re.find_iter(text) {
        if found.as_str().trim().is_empty() {
            continue;
        }
        out.push(DetectedEntity::new(
            kind,
            found.as_str(),
            found.start(),
            found.end(),
        ));
    }
}

/// Email recognizer: `local@domain.tld` shape
pub struct EmailRecognizer {
    pattern: Regex,
}

impl EmailRecognizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")?,
        })
    }
}

impl Recognizer for EmailRecognizer {
    fn kind(&self) -> EntityKind {
        EntityKind::Email
    }

    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>) {
        push_matches(&self.pattern, EntityKind::Email, text, out);
    }
}

/// Phone recognizer: French national format, `0` or `+33` prefix, four
/// two-digit groups with optional space/dot/hyphen separators
pub struct PhoneRecognizer {
    pattern: Regex,
}

impl PhoneRecognizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"(?:\+33|0)[1-9](?:[ .\-]?[0-9]{2}){4}")?,
        })
    }
}

impl Recognizer for PhoneRecognizer {
    fn kind(&self) -> EntityKind {
        EntityKind::Phone
    }

    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>) {
        push_matches(&self.pattern, EntityKind::Phone, text, out);
    }
}

/// Structured-identifier recognizer
///
/// Three shapes, no checksum validation: a simplified IBAN, a payment-card
/// grouping, and an approximate French social security number.
pub struct IdentifierRecognizer {
    patterns: Vec<Regex>,
}

impl IdentifierRecognizer {
    pub fn new() -> Result<Self> {
        let patterns = vec![
            // IBAN simplifié
            Regex::new(r"FR[0-9]{2}(?:\s?[0-9]{4}){5}")?,
            // carte bancaire
            Regex::new(r"(?:[0-9]{4}[ \-]?){3}[0-9]{4}")?,
            // n° de sécu approximatif
            Regex::new(r"[12][0-9]{2}(?:\s?[0-9]{2}){4}\s?[0-9]{3}")?,
        ];
        Ok(Self { patterns })
    }
}

impl Recognizer for IdentifierRecognizer {
    fn kind(&self) -> EntityKind {
        EntityKind::Identifier
    }

    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>) {
        for pattern in &self.patterns {
            push_matches(pattern, EntityKind::Identifier, text, out);
        }
    }
}

/// Company recognizer: known-company lexicon plus a capitalized phrase
/// closed by a legal-form marker
pub struct CompanyRecognizer {
    known: Regex,
    legal_form: Regex,
}

impl CompanyRecognizer {
    pub fn new(lexicons: &Lexicons) -> Result<Self> {
        let forms: Vec<String> = lexicons
            .company
            .legal_forms
            .iter()
            .map(|form| regex::escape(form))
            .collect();
        let legal_form = Regex::new(&format!(
            r"(?:[A-Z][\w'\-]+(?:\s+[A-Z][\w'\-]+)*)\s+(?:{})",
            forms.join("|")
        ))?;
        Ok(Self {
            known: Regex::new(&word_alternation(&lexicons.company.known))?,
            legal_form,
        })
    }
}

impl Recognizer for CompanyRecognizer {
    fn kind(&self) -> EntityKind {
        EntityKind::Company
    }

    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>) {
        push_matches(&self.known, EntityKind::Company, text, out);
        push_matches(&self.legal_form, EntityKind::Company, text, out);
    }
}

/// Location recognizer: city lexicon plus a street-type prefix followed by
/// a capitalized phrase running to the next comma or line break
pub struct LocationRecognizer {
    cities: Regex,
    street: Regex,
}

impl LocationRecognizer {
    pub fn new(lexicons: &Lexicons) -> Result<Self> {
        let prefixes: Vec<String> = lexicons
            .location
            .street_prefixes
            .iter()
            .map(|prefix| regex::escape(prefix))
            .collect();
        let street = Regex::new(&format!(r"(?:{})\s+[A-Z][^,\n]+", prefixes.join("|")))?;
        Ok(Self {
            cities: Regex::new(&word_alternation(&lexicons.location.cities))?,
            street,
        })
    }
}

impl Recognizer for LocationRecognizer {
    fn kind(&self) -> EntityKind {
        EntityKind::Location
    }

    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>) {
        push_matches(&self.cities, EntityKind::Location, text, out);
        push_matches(&self.street, EntityKind::Location, text, out);
    }
}

/// Person recognizer: first-name lexicon plus a two-word capitalized shape
///
/// Both patterns fire independently. A lexicon name followed by a
/// capitalized word is detected twice with different spans ("Paul" and
/// "Paul Martin"); the duplicates differ, so neither is removed downstream.
pub struct PersonRecognizer {
    first_names: Regex,
    full_name: Regex,
}

impl PersonRecognizer {
    pub fn new(lexicons: &Lexicons) -> Result<Self> {
        Ok(Self {
            first_names: Regex::new(&word_alternation(&lexicons.person.first_names))?,
            full_name: Regex::new(&format!(r"\b[A-Z]{NAME_TAIL}\s+[A-Z]{NAME_TAIL}"))?,
        })
    }
}

impl Recognizer for PersonRecognizer {
    fn kind(&self) -> EntityKind {
        EntityKind::Person
    }

    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>) {
        push_matches(&self.first_names, EntityKind::Person, text, out);
        push_matches(&self.full_name, EntityKind::Person, text, out);
    }
}
