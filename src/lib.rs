// Masque - Local PII detection and anonymization
// Copyright (c) 2026 Masque Contributors
// Licensed under the MIT License

//! # Masque - Local PII Detection and Anonymization
//!
//! Masque is a local, stateless pipeline that finds personal and
//! organizational identifiers in French free-form text (names, companies,
//! locations, emails, phone numbers, structured identifiers) and rewrites
//! the text with consistent synthetic replacements. Detection is
//! heuristic, lexicon- and regex-based, and explicitly approximate: there
//! is no ML entity recognition and no guarantee of exhaustive coverage.
//!
//! ## Architecture
//!
//! Data flows one way through four stages:
//!
//! - [`detector`] - per-category recognizers producing candidate spans,
//!   plus exact-duplicate removal
//! - [`assigner`] - stable replacement assignment, one replacement per
//!   distinct normalized value, merged with prior state
//! - [`renderer`] - span splicing and literal substitution producing the
//!   anonymized text
//! - [`generator`] - style-specific synthetic value factories
//!
//! The [`engine::Engine`] facade owns the compiled tables and runs the
//! whole pipeline; the free functions below run the same stages against a
//! process-wide default table set.
//!
//! ## Quick Start
//!
//! ```
//! let text = "Paul discute avec Paul.";
//! let detected = masque::detect_pii(text, None);
//! let entities = masque::assign_replacements(&detected, masque::AssignOptions::default());
//! // Both occurrences of the same value share one replacement
//! assert_eq!(entities[0].replacement, entities[1].replacement);
//! let anonymized = masque::anonymize_text(text, &entities);
//! assert_ne!(anonymized, text);
//! ```
//!
//! ## State Threading
//!
//! The pipeline holds no entity state between invocations. Callers keep
//! the previous [`AnonymizedEntity`] list and pass it back in, which keeps
//! replacements stable across re-detection: a value seen before receives
//! the same replacement even after the text shifted, and an unchanged span
//! keeps user edits to its kind and replacement.
//!
//! ```
//! use masque::AssignOptions;
//!
//! let first = masque::assign_replacements(&masque::detect_pii("Paul écrit.", None), AssignOptions::default());
//! let second = masque::assign_replacements(
//!     &masque::detect_pii("Paul répond.", None),
//!     AssignOptions { previous: &first, ..AssignOptions::default() },
//! );
//! assert_eq!(first[0].replacement, second[0].replacement);
//! ```
//!
//! ## Logging
//!
//! Masque emits structured `tracing` events at debug level (detection
//! counts, pass summaries). Subscribe with `tracing-subscriber` to see
//! them.

pub mod assigner;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod generator;
pub mod models;
pub mod renderer;

pub use config::{EnabledKinds, EngineConfig};
pub use engine::{AnonymizationPass, Engine};
pub use error::{MasqueError, Result};
pub use models::{
    normalize_value, AnonymizedEntity, DetectedEntity, EntityKind, ReplacementContext,
    ReplacementStyle,
};

use detector::lexicon::Lexicons;
use detector::DetectorSet;
use generator::ReplacementGenerator;
use std::sync::LazyLock;

// Process-wide default tables, built once on first use. The embedded
// lexicon document and its patterns are fixed at compile time, so failing
// to build them is a programming error, not a runtime condition.
static DEFAULT_LEXICONS: LazyLock<Lexicons> =
    LazyLock::new(|| Lexicons::embedded().expect("embedded lexicon tables are valid"));

static DEFAULT_DETECTORS: LazyLock<DetectorSet> =
    LazyLock::new(|| DetectorSet::new(&DEFAULT_LEXICONS).expect("built-in patterns compile"));

/// Options for [`assign_replacements`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignOptions<'a> {
    /// Entities from the previous pass, whose replacements are preserved
    pub previous: &'a [AnonymizedEntity],
    /// Replacement style for freshly generated values
    pub style: ReplacementStyle,
}

/// Detect PII entities in a text
///
/// `enabled` switches categories off; `None` enables everything. Returns
/// entities sorted by start offset, exact duplicates removed. Pure: the
/// same text and switches always yield the same spans (entity ids aside).
pub fn detect_pii(text: &str, enabled: Option<&EnabledKinds>) -> Vec<DetectedEntity> {
    let default_kinds = EnabledKinds::default();
    DEFAULT_DETECTORS.detect(text, enabled.unwrap_or(&default_kinds))
}

/// Assign replacements to detected entities
///
/// Reuses replacements from `options.previous` wherever the exact span
/// signature or the normalized value persists; generates fresh values
/// otherwise. Uses thread-local entropy; for reproducible output build an
/// [`Engine`] with a seed instead.
pub fn assign_replacements(
    detected: &[DetectedEntity],
    options: AssignOptions<'_>,
) -> Vec<AnonymizedEntity> {
    let generator = ReplacementGenerator::new(&DEFAULT_LEXICONS);
    assigner::assign_replacements(
        detected,
        options.previous,
        options.style,
        &generator,
        &mut rand::thread_rng(),
    )
}

/// Apply an entity list to a text, producing the anonymized output
pub fn anonymize_text(text: &str, entities: &[AnonymizedEntity]) -> String {
    renderer::anonymize_text(text, entities)
}

/// Generate a single synthetic replacement value
///
/// Exposed for manual entity creation and per-entity regeneration. With
/// the `Labels` style, pass a [`ReplacementContext`] to get deterministic
/// per-kind numbering within a pass.
pub fn generate_replacement_value(
    kind: EntityKind,
    style: ReplacementStyle,
    context: Option<&mut ReplacementContext>,
) -> String {
    let generator = ReplacementGenerator::new(&DEFAULT_LEXICONS);
    generator.generate(kind, style, context, &mut rand::thread_rng())
}
