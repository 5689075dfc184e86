//! Text reconstruction
//!
//! Two-phase rendering. Phase 1 splices coordinate-bearing entities into
//! the text by span; phase 2 applies span-less manual entities as literal
//! replace-all passes in list order. Later manual entities may re-match
//! text produced by earlier substitutions; that cascade is accepted
//! behavior. Overlapping spans are spliced blindly in sorted order and can
//! produce overlapping output; resolving them is explicitly not attempted.

use crate::models::AnonymizedEntity;

/// Produce the anonymized text for an entity list
///
/// Entities with a valid span are sorted by start ascending and spliced;
/// entities without coordinates are applied afterwards by exact substring
/// substitution. Entities with coordinates but an inverted span are
/// skipped. Out-of-range or mid-character offsets contribute nothing
/// rather than panicking.
pub fn anonymize_text(text: &str, entities: &[AnonymizedEntity]) -> String {
    if text.is_empty() {
        return String::new();
    }
    if entities.is_empty() {
        return text.to_string();
    }

    let mut spanned: Vec<(usize, usize, &str)> = entities
        .iter()
        .filter_map(|entity| {
            entity
                .span()
                .map(|(start, end)| (start, end, entity.replacement.as_str()))
        })
        .collect();
    spanned.sort_by_key(|&(start, _, _)| start);

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for (start, end, replacement) in spanned {
        output.push_str(slice_clamped(text, cursor, start));
        output.push_str(replacement);
        cursor = end;
    }
    output.push_str(slice_clamped(text, cursor, text.len()));

    for entity in entities.iter().filter(|entity| entity.is_spanless()) {
        if entity.value.is_empty() {
            continue;
        }
        output = output.replace(&entity.value, &entity.replacement);
    }

    output
}

/// Slice with end clamped to the text length
///
/// An inverted or fully out-of-range window yields the empty string, as
/// does a window cutting through a multi-byte character (possible only
/// with stale caller-supplied offsets).
fn slice_clamped(text: &str, from: usize, to: usize) -> &str {
    let to = to.min(text.len());
    if from >= to {
        return "";
    }
    text.get(from..to).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnonymizedEntity, DetectedEntity, EntityKind};

    fn spanned(value: &str, start: usize, end: usize, replacement: &str) -> AnonymizedEntity {
        AnonymizedEntity::from_detected(
            &DetectedEntity::new(EntityKind::Person, value, start, end),
            replacement,
        )
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(anonymize_text("", &[spanned("a", 0, 1, "b")]), "");
    }

    #[test]
    fn test_no_entities_returns_text_unchanged() {
        assert_eq!(anonymize_text("Bonjour Paul", &[]), "Bonjour Paul");
    }

    #[test]
    fn test_single_splice() {
        let text = "Bonjour Paul, ça va ?";
        let entities = vec![spanned("Paul", 8, 12, "Lucas")];
        assert_eq!(anonymize_text(text, &entities), "Bonjour Lucas, ça va ?");
    }

    #[test]
    fn test_multiple_splices_sorted_by_start() {
        let text = "Paul et Claire";
        // Deliberately out of order
        let entities = vec![
            spanned("Claire", 8, 14, "Nadia"),
            spanned("Paul", 0, 4, "Yanis"),
        ];
        assert_eq!(anonymize_text(text, &entities), "Yanis et Nadia");
    }

    #[test]
    fn test_manual_entity_literal_substitution() {
        let text = "Paul aide Paul.";
        let entities = vec![AnonymizedEntity::manual(
            EntityKind::Person,
            "Paul",
            "Personne Mystère",
        )];
        assert_eq!(
            anonymize_text(text, &entities),
            "Personne Mystère aide Personne Mystère."
        );
    }

    #[test]
    fn test_manual_entities_apply_in_list_order() {
        // The second manual entity re-matches text the first produced;
        // cascading is the documented behavior.
        let text = "alpha";
        let entities = vec![
            AnonymizedEntity::manual(EntityKind::Identifier, "alpha", "beta"),
            AnonymizedEntity::manual(EntityKind::Identifier, "beta", "gamma"),
        ];
        assert_eq!(anonymize_text(text, &entities), "gamma");
    }

    #[test]
    fn test_spliced_and_manual_combined() {
        // "à" is two bytes; "Lyon" starts at byte 15
        let text = "Paul habite à Lyon";
        let entities = vec![
            spanned("Lyon", 15, 19, "Nantes"),
            AnonymizedEntity::manual(EntityKind::Person, "Paul", "Alex Petit"),
        ];
        assert_eq!(anonymize_text(text, &entities), "Alex Petit habite à Nantes");
    }

    #[test]
    fn test_inverted_span_is_skipped() {
        let mut entity = spanned("Paul", 0, 4, "X");
        entity.start = Some(4);
        entity.end = Some(0);
        assert_eq!(anonymize_text("Paul.", &[entity]), "Paul.");
    }

    #[test]
    fn test_out_of_range_span_does_not_panic() {
        let entity = spanned("zzz", 100, 120, "X");
        let out = anonymize_text("court", &[entity]);
        assert_eq!(out, "courtX");
    }

    #[test]
    fn test_overlapping_spans_splice_blindly() {
        // "Paul Martin" with both a full-name span and a lexicon span on
        // "Paul": both are applied, output is duplicated by design.
        let text = "Paul Martin";
        let entities = vec![
            spanned("Paul", 0, 4, "Léa"),
            spanned("Paul Martin", 0, 11, "Théo Dubois"),
        ];
        let out = anonymize_text(text, &entities);
        assert_eq!(out, "LéaThéo Dubois");
    }
}
