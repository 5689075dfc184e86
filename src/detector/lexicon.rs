//! Lexicon tables for detection and generation
//!
//! Word lists are loaded once from an embedded TOML document (or a
//! user-supplied file) and shared read-only for the program's lifetime.
//! Detection lists are matched whole-word and case-sensitive; generation
//! lists feed the `french`/`neutral` replacement styles.

use crate::error::{MasqueError, Result};
use serde::Deserialize;
use std::path::Path;

/// Person name tables
#[derive(Debug, Clone, Deserialize)]
pub struct PersonLexicon {
    /// Detection lexicon and `french`-style generation pool
    pub first_names: Vec<String>,
    /// Generation pool for last names
    pub last_names: Vec<String>,
    /// Generation pool for the `neutral` style
    pub neutral_first_names: Vec<String>,
}

/// Company name tables
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyLexicon {
    /// Known-company detection lexicon
    pub known: Vec<String>,
    /// Legal-form markers closing the syntactic company pattern
    pub legal_forms: Vec<String>,
    /// Generation pool: leading word
    pub prefixes: Vec<String>,
    /// Generation pool: core word
    pub cores: Vec<String>,
    /// Generation pool: trailing word
    pub suffixes: Vec<String>,
}

/// Location tables
#[derive(Debug, Clone, Deserialize)]
pub struct LocationLexicon {
    /// City detection lexicon and generation pool
    pub cities: Vec<String>,
    /// Street-type words opening the syntactic address pattern
    pub street_prefixes: Vec<String>,
}

/// Phone tables
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneLexicon {
    /// Two-digit French dialing prefixes used for generation
    pub prefixes: Vec<String>,
}

/// Immutable lexicon registry, built once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicons {
    pub person: PersonLexicon,
    pub company: CompanyLexicon,
    pub location: LocationLexicon,
    pub phone: PhoneLexicon,
}

impl Lexicons {
    /// Load lexicon tables from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            MasqueError::Lexicon(format!(
                "Failed to read lexicon file {}: {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse lexicon tables from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let lexicons: Lexicons = toml::from_str(content)?;
        lexicons.validate()?;
        Ok(lexicons)
    }

    /// Built-in French lexicon tables
    pub fn embedded() -> Result<Self> {
        let default_toml = include_str!("../../lexicons/fr.toml");
        Self::from_toml(default_toml)
    }

    /// Reject empty tables so generation never draws from an empty pool
    fn validate(&self) -> Result<()> {
        let tables: [(&str, &[String]); 10] = [
            ("person.first_names", &self.person.first_names),
            ("person.last_names", &self.person.last_names),
            ("person.neutral_first_names", &self.person.neutral_first_names),
            ("company.known", &self.company.known),
            ("company.legal_forms", &self.company.legal_forms),
            ("company.prefixes", &self.company.prefixes),
            ("company.cores", &self.company.cores),
            ("company.suffixes", &self.company.suffixes),
            ("location.cities", &self.location.cities),
            ("phone.prefixes", &self.phone.prefixes),
        ];
        for (name, table) in tables {
            if table.is_empty() {
                return Err(MasqueError::Lexicon(format!("Empty lexicon table: {name}")));
            }
        }
        if self.location.street_prefixes.is_empty() {
            return Err(MasqueError::Lexicon(
                "Empty lexicon table: location.street_prefixes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Build a whole-word alternation regex source from a word list
///
/// Words are escaped, so lexicon entries are matched literally even when
/// they contain regex metacharacters.
pub fn word_alternation(words: &[String]) -> String {
    let escaped: Vec<String> = words.iter().map(|word| regex::escape(word)).collect();
    format!(r"\b(?:{})\b", escaped.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_lexicons_load() {
        let lexicons = Lexicons::embedded().unwrap();
        assert!(lexicons.person.first_names.contains(&"Paul".to_string()));
        assert!(lexicons.location.cities.contains(&"Paris".to_string()));
        assert!(lexicons.company.known.contains(&"Orange".to_string()));
    }

    #[test]
    fn test_empty_table_rejected() {
        let content = r#"
            [person]
            first_names = []
            last_names = ["Martin"]
            neutral_first_names = ["Alex"]
            [company]
            known = ["Orange"]
            legal_forms = ["SARL"]
            prefixes = ["Studio"]
            cores = ["Nova"]
            suffixes = ["Conseil"]
            [location]
            cities = ["Paris"]
            street_prefixes = ["Rue"]
            [phone]
            prefixes = ["06"]
        "#;
        let err = Lexicons::from_toml(content).unwrap_err();
        assert!(err.to_string().contains("person.first_names"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = Lexicons::from_toml("person = 12").unwrap_err();
        assert!(matches!(err, MasqueError::Lexicon(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_str!("../../lexicons/fr.toml").as_bytes())
            .unwrap();
        let lexicons = Lexicons::from_file(file.path()).unwrap();
        assert!(!lexicons.location.street_prefixes.is_empty());
    }

    #[test]
    fn test_word_alternation_escapes_metacharacters() {
        let words = vec!["A.B".to_string(), "C+D".to_string()];
        let source = word_alternation(&words);
        let re = regex::Regex::new(&source).unwrap();
        assert!(re.is_match("voir A.B ici"));
        assert!(!re.is_match("AxB"));
    }
}
