//! PII detection
//!
//! Detection is a pure scan: each enabled recognizer runs over the raw
//! text, candidates are concatenated in recognizer registration order,
//! exact duplicates are dropped, and the result is sorted by span start.

pub mod lexicon;
pub mod recognizers;

use crate::config::EnabledKinds;
use crate::error::Result;
use crate::models::{DetectedEntity, EntityKind};
use lexicon::Lexicons;
use recognizers::{
    CompanyRecognizer, EmailRecognizer, IdentifierRecognizer, LocationRecognizer,
    PersonRecognizer, PhoneRecognizer,
};
use std::collections::HashSet;
use tracing::debug;

/// Trait for per-category recognizer implementations
pub trait Recognizer: Send + Sync {
    /// Category this recognizer produces
    fn kind(&self) -> EntityKind;

    /// Scan raw text and append candidate entities
    fn scan(&self, text: &str, out: &mut Vec<DetectedEntity>);
}

/// The full set of recognizers, in registration order
///
/// Registration order is the tie-break for candidates starting at the same
/// offset: email, phone, identifier, company, location, person.
pub struct DetectorSet {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl DetectorSet {
    /// Build all recognizers against a lexicon registry
    pub fn new(lexicons: &Lexicons) -> Result<Self> {
        let recognizers: Vec<Box<dyn Recognizer>> = vec![
            Box::new(EmailRecognizer::new()?),
            Box::new(PhoneRecognizer::new()?),
            Box::new(IdentifierRecognizer::new()?),
            Box::new(CompanyRecognizer::new(lexicons)?),
            Box::new(LocationRecognizer::new(lexicons)?),
            Box::new(PersonRecognizer::new(lexicons)?),
        ];
        Ok(Self { recognizers })
    }

    /// Detect PII entities in a text
    ///
    /// Disabled categories are skipped entirely, not filtered after the
    /// fact. Returns entities sorted by start offset ascending; exact
    /// duplicates (same kind, same span) are removed, first wins.
    pub fn detect(&self, text: &str, enabled: &EnabledKinds) -> Vec<DetectedEntity> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for recognizer in &self.recognizers {
            if !enabled.allows(recognizer.kind()) {
                continue;
            }
            recognizer.scan(text, &mut candidates);
        }

        let entities = dedup_entities(candidates);
        debug!(
            text_len = text.len(),
            entities = entities.len(),
            "detection pass complete"
        );
        entities
    }
}

/// Remove exact-duplicate spans and sort by start offset
///
/// Identity is the `(kind, start, end)` triple; the first occurrence wins.
/// Overlapping but distinct spans are kept: resolving them is out of scope
/// for detection.
fn dedup_entities(candidates: Vec<DetectedEntity>) -> Vec<DetectedEntity> {
    let mut seen: HashSet<(EntityKind, usize, usize)> = HashSet::new();
    let mut entities: Vec<DetectedEntity> = candidates
        .into_iter()
        .filter(|entity| seen.insert((entity.kind, entity.start, entity.end)))
        .collect();
    // Stable sort keeps recognizer registration order on equal starts
    entities.sort_by_key(|entity| entity.start);
    entities
}
