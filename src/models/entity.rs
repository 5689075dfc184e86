//! Entity data models
//!
//! A detected entity carries a half-open `[start, end)` byte-offset span
//! into the original text. Two identity notions coexist:
//! - `(kind, start, end)` is the identity used for exact-duplicate removal,
//! - the normalized value (trimmed, lowercased) is the identity used for
//!   replacement coherence across occurrences and re-detection passes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Entity category enumeration
///
/// Closed set of categories the detectors can produce. Serialized in
/// lowercase to stay interchangeable with entity lists persisted by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Person names (lexicon first names, two-word capitalized shapes)
    Person,
    /// Company names (known-company lexicon, legal-form suffix shapes)
    Company,
    /// Locations (city lexicon, street-prefix shapes)
    Location,
    /// Email addresses
    Email,
    /// French phone numbers
    Phone,
    /// Structured identifiers (IBAN-like, card-like, social-security-like)
    Identifier,
}

impl EntityKind {
    /// All kinds, in detector registration order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Email,
        EntityKind::Phone,
        EntityKind::Identifier,
        EntityKind::Company,
        EntityKind::Location,
        EntityKind::Person,
    ];

    /// Human-readable label for the `Labels` replacement style
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "Personne",
            Self::Company => "Entreprise",
            Self::Location => "Lieu",
            Self::Email => "Email",
            Self::Phone => "Téléphone",
            Self::Identifier => "Identifiant",
        }
    }

    /// Lowercase identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Company => "company",
            Self::Location => "location",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Identifier => "identifier",
        }
    }
}

/// Replacement style selecting the synthetic-value generator family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementStyle {
    /// Realistic French-sounding values
    #[default]
    French,
    /// Like `French` with gender-neutral first names
    Neutral,
    /// Generic numbered labels ("Personne 1", "Email 2", ...)
    Labels,
}

/// Entity produced by automatic detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedEntity {
    /// Unique id, assigned at detection time
    pub id: String,
    /// Entity category
    pub kind: EntityKind,
    /// Raw substring of the original text
    pub value: String,
    /// Span start (byte offset, inclusive)
    pub start: usize,
    /// Span end (byte offset, exclusive)
    pub end: usize,
}

impl DetectedEntity {
    /// Create a new detected entity with a fresh id
    pub fn new(kind: EntityKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    /// Exact span signature used to match entities across re-detection
    /// passes when the text has not shifted
    pub fn signature(&self) -> String {
        format!("{}:{}:{}", self.start, self.end, self.value)
    }
}

/// Entity carrying an assigned replacement
///
/// Manual entities (added by direct user selection rather than detection)
/// may have no span; they are applied by literal substring substitution
/// instead of offset splicing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizedEntity {
    /// Unique id, carried over from detection or assigned at creation
    pub id: String,
    /// Entity category
    pub kind: EntityKind,
    /// Raw text the replacement stands for
    pub value: String,
    /// Span start; `None` for span-less manual entities
    pub start: Option<usize>,
    /// Span end; `None` for span-less manual entities
    pub end: Option<usize>,
    /// Replacement string substituted into the anonymized text
    pub replacement: String,
    /// Whether the entity was added manually rather than detected
    #[serde(default)]
    pub manual: bool,
}

impl AnonymizedEntity {
    /// Build from a detected entity and an assigned replacement
    pub fn from_detected(entity: &DetectedEntity, replacement: impl Into<String>) -> Self {
        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            value: entity.value.clone(),
            start: Some(entity.start),
            end: Some(entity.end),
            replacement: replacement.into(),
            manual: false,
        }
    }

    /// Create a span-less manual entity
    pub fn manual(
        kind: EntityKind,
        value: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            value: value.into(),
            start: None,
            end: None,
            replacement: replacement.into(),
            manual: true,
        }
    }

    /// Valid splice span, if any
    ///
    /// Returns `None` for span-less entities and for inverted spans, which
    /// are excluded from the splice phase of reconstruction.
    pub fn span(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some((start, end)),
            _ => None,
        }
    }

    /// Whether the entity has no coordinates at all and must be applied by
    /// literal substring substitution
    pub fn is_spanless(&self) -> bool {
        self.start.is_none() || self.end.is_none()
    }

    /// Exact span signature; `None` for span-less entities
    pub fn signature(&self) -> Option<String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(format!("{}:{}:{}", start, end, self.value)),
            _ => None,
        }
    }
}

/// Normalized form of an entity value, the key for replacement coherence
pub fn normalize_value(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Per-pass counters backing the `Labels` replacement style
///
/// Threaded explicitly through generation calls; counters reset with each
/// new context, so label numbering restarts on every assignment pass.
#[derive(Debug, Clone, Default)]
pub struct ReplacementContext {
    counters: HashMap<EntityKind, usize>,
}

impl ReplacementContext {
    /// Create a fresh context with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the counter for a kind (1-based)
    pub fn bump(&mut self, kind: EntityKind) -> usize {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }
}
