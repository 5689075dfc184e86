//! Synthetic replacement value generation
//!
//! Style-specific factories for replacement values. Randomness is injected:
//! every generation call takes an explicit `Rng`, so production callers pass
//! an entropy-seeded generator while tests pass a fixed-seed one. The
//! `Labels` style draws its numbering from an explicit per-pass counter
//! context instead of hidden state.

use crate::detector::lexicon::Lexicons;
use crate::models::{EntityKind, ReplacementContext, ReplacementStyle};
use rand::seq::SliceRandom;
use rand::Rng;

/// Replacement value factory bound to a lexicon registry
pub struct ReplacementGenerator<'a> {
    lexicons: &'a Lexicons,
}

impl<'a> ReplacementGenerator<'a> {
    pub fn new(lexicons: &'a Lexicons) -> Self {
        Self { lexicons }
    }

    /// Generate a synthetic replacement value
    ///
    /// With the `Labels` style the counter context makes output
    /// deterministic ("Personne 1", "Personne 2", ...); without a context a
    /// random number in `1..=50` is used instead. The other styles are
    /// random by construction.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        kind: EntityKind,
        style: ReplacementStyle,
        context: Option<&mut ReplacementContext>,
        rng: &mut R,
    ) -> String {
        if style == ReplacementStyle::Labels {
            let number = match context {
                Some(ctx) => ctx.bump(kind),
                None => rng.gen_range(1..=50),
            };
            return format!("{} {}", kind.label(), number);
        }

        match kind {
            EntityKind::Person => self.person_name(style, rng),
            EntityKind::Company => self.company_name(rng),
            EntityKind::Location => pick(&self.lexicons.location.cities, rng).to_string(),
            EntityKind::Email => {
                let name = self.person_name(style, rng);
                let local = slugify(&name.replace(' ', "."));
                format!("{local}@exemple.com")
            }
            EntityKind::Phone => self.phone_number(rng),
            EntityKind::Identifier => identifier(rng),
        }
    }

    fn person_name<R: Rng + ?Sized>(&self, style: ReplacementStyle, rng: &mut R) -> String {
        let first = if style == ReplacementStyle::Neutral {
            pick(&self.lexicons.person.neutral_first_names, rng)
        } else {
            pick(&self.lexicons.person.first_names, rng)
        };
        let last = pick(&self.lexicons.person.last_names, rng);
        format!("{first} {last}")
    }

    fn company_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!(
            "{} {} {}",
            pick(&self.lexicons.company.prefixes, rng),
            pick(&self.lexicons.company.cores, rng),
            pick(&self.lexicons.company.suffixes, rng)
        )
    }

    fn phone_number<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut digits = pick(&self.lexicons.phone.prefixes, rng).to_string();
        for _ in 0..8 {
            digits.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
        // Group in pairs: "0612345678" -> "06 12 34 56 78"
        digits
            .as_bytes()
            .chunks(2)
            .map(|pair| std::str::from_utf8(pair).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// IBAN-shaped synthetic identifier, no checksum
fn identifier<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut groups = Vec::with_capacity(4);
    for _ in 0..4 {
        let mut group = String::with_capacity(4);
        for _ in 0..4 {
            group.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
        groups.push(group);
    }
    format!(
        "FR{}{} {}",
        rng.gen_range(0..10u8),
        rng.gen_range(0..10u8),
        groups.join(" ")
    )
}

fn pick<'a, R: Rng + ?Sized>(list: &'a [String], rng: &mut R) -> &'a str {
    list.choose(rng).map(String::as_str).unwrap_or("")
}

/// Lowercase ASCII slug of a name fragment
///
/// Folds French diacritics, drops anything that is not alphanumeric,
/// `_`, `.`, `-`, or whitespace, then collapses whitespace runs to dots.
fn slugify(value: &str) -> String {
    let folded: String = value.chars().map(fold_diacritic).collect();
    let mut out = String::with_capacity(folded.len());
    let mut in_whitespace = false;
    for ch in folded.trim().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('.');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Î' | 'Ï' => 'I',
        'Ô' | 'Ö' => 'O',
        'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        _ => ch,
    }
}
