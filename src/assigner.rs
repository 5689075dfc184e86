//! Replacement assignment
//!
//! Maps detected entities to replacement strings while keeping prior
//! assignments stable across re-detection. Two lookups are built from the
//! previous pass:
//! - exact span signature (`start:end:value`) -> previous entity, which
//!   preserves user edits to kind/replacement when the text has not shifted;
//! - normalized value -> replacement, which keeps a value's replacement
//!   when the text was edited and the span moved.

use crate::generator::ReplacementGenerator;
use crate::models::{
    normalize_value, AnonymizedEntity, DetectedEntity, ReplacementContext, ReplacementStyle,
};
use rand::Rng;
use std::collections::HashMap;
use tracing::trace;

/// Assign replacements to detected entities
///
/// Output preserves input order. The `manual` flag carries over from a
/// signature-matched previous entity and defaults to false otherwise;
/// span-less manual entities are merged back by the caller, never emitted
/// here. Within one call, two entities with equal normalized values always
/// end with equal replacements, even when their kinds differ.
pub fn assign_replacements<R: Rng + ?Sized>(
    detected: &[DetectedEntity],
    previous: &[AnonymizedEntity],
    style: ReplacementStyle,
    generator: &ReplacementGenerator<'_>,
    rng: &mut R,
) -> Vec<AnonymizedEntity> {
    let mut by_signature: HashMap<String, &AnonymizedEntity> = HashMap::new();
    for entity in previous {
        if let Some(signature) = entity.signature() {
            by_signature.entry(signature).or_insert(entity);
        }
    }

    // Empty replacements count as absent: malformed previous data falls
    // back to fresh generation.
    let mut by_value: HashMap<String, String> = HashMap::new();
    for entity in previous {
        if !entity.replacement.is_empty() {
            by_value.insert(normalize_value(&entity.value), entity.replacement.clone());
        }
    }

    let mut context = ReplacementContext::new();

    detected
        .iter()
        .map(|entity| {
            let matched = by_signature.get(&entity.signature()).copied();
            let normalized = normalize_value(&entity.value);
            let kind = matched.map(|prev| prev.kind).unwrap_or(entity.kind);

            let replacement = matched
                .map(|prev| prev.replacement.clone())
                .filter(|replacement| !replacement.is_empty())
                .or_else(|| by_value.get(&normalized).cloned())
                .unwrap_or_else(|| {
                    let fresh = generator.generate(kind, style, Some(&mut context), rng);
                    trace!(kind = kind.as_str(), "generated fresh replacement");
                    fresh
                });
            by_value.insert(normalized, replacement.clone());

            AnonymizedEntity {
                id: entity.id.clone(),
                kind,
                value: entity.value.clone(),
                start: Some(entity.start),
                end: Some(entity.end),
                replacement,
                manual: matched.map(|prev| prev.manual).unwrap_or(false),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::lexicon::Lexicons;
    use crate::models::EntityKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixtures() -> (Lexicons, StdRng) {
        (Lexicons::embedded().unwrap(), StdRng::seed_from_u64(1))
    }

    fn person(value: &str, start: usize) -> DetectedEntity {
        DetectedEntity::new(EntityKind::Person, value, start, start + value.len())
    }

    #[test]
    fn test_equal_values_share_replacement() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let detected = vec![person("Paul", 0), person("Paul", 18)];
        let assigned = assign_replacements(
            &detected,
            &[],
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].replacement, assigned[1].replacement);
    }

    #[test]
    fn test_normalization_ignores_case_and_whitespace() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let detected = vec![person("Paul", 0), person(" paul ", 20)];
        let assigned = assign_replacements(
            &detected,
            &[],
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned[0].replacement, assigned[1].replacement);
    }

    #[test]
    fn test_previous_replacement_survives_span_shift() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let previous = vec![AnonymizedEntity {
            id: "prev".to_string(),
            kind: EntityKind::Person,
            value: "Paul".to_string(),
            start: Some(3),
            end: Some(7),
            replacement: "Julien Leroy".to_string(),
            manual: false,
        }];
        // Same value, different span (text was edited upstream)
        let detected = vec![person("Paul", 10)];
        let assigned = assign_replacements(
            &detected,
            &previous,
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned[0].replacement, "Julien Leroy");
        // Kind comes from the current detection on a value-only match
        assert_eq!(assigned[0].kind, EntityKind::Person);
    }

    #[test]
    fn test_signature_match_reuses_kind_and_manual_flag() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        // User reclassified the span as a company and edited the value
        let previous = vec![AnonymizedEntity {
            id: "prev".to_string(),
            kind: EntityKind::Company,
            value: "Paul".to_string(),
            start: Some(0),
            end: Some(4),
            replacement: "Studio Nova Conseil".to_string(),
            manual: true,
        }];
        let detected = vec![person("Paul", 0)];
        let assigned = assign_replacements(
            &detected,
            &previous,
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned[0].kind, EntityKind::Company);
        assert_eq!(assigned[0].replacement, "Studio Nova Conseil");
        assert!(assigned[0].manual);
    }

    #[test]
    fn test_empty_previous_replacement_regenerates() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let previous = vec![AnonymizedEntity {
            id: "prev".to_string(),
            kind: EntityKind::Person,
            value: "Paul".to_string(),
            start: Some(0),
            end: Some(4),
            replacement: String::new(),
            manual: false,
        }];
        let detected = vec![person("Paul", 0)];
        let assigned = assign_replacements(
            &detected,
            &previous,
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert!(!assigned[0].replacement.is_empty());
    }

    #[test]
    fn test_spanless_previous_seeds_value_map() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let previous = vec![AnonymizedEntity::manual(
            EntityKind::Person,
            "Paul",
            "Personne Mystère",
        )];
        let detected = vec![person("Paul", 5)];
        let assigned = assign_replacements(
            &detected,
            &previous,
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned[0].replacement, "Personne Mystère");
        // The value matched, not the signature: not flagged manual here
        assert!(!assigned[0].manual);
    }

    #[test]
    fn test_labels_style_numbers_within_pass() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let detected = vec![
            person("Paul", 0),
            person("Claire", 10),
            DetectedEntity::new(EntityKind::Email, "a@b.fr", 20, 26),
        ];
        let assigned = assign_replacements(
            &detected,
            &[],
            ReplacementStyle::Labels,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned[0].replacement, "Personne 1");
        assert_eq!(assigned[1].replacement, "Personne 2");
        assert_eq!(assigned[2].replacement, "Email 1");
    }

    #[test]
    fn test_output_preserves_input_order() {
        let (lexicons, mut rng) = fixtures();
        let generator = ReplacementGenerator::new(&lexicons);
        let detected = vec![person("Claire", 4), person("Paul", 0)];
        let assigned = assign_replacements(
            &detected,
            &[],
            ReplacementStyle::French,
            &generator,
            &mut rng,
        );
        assert_eq!(assigned[0].value, "Claire");
        assert_eq!(assigned[1].value, "Paul");
    }
}
