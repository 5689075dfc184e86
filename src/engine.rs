//! Anonymization engine
//!
//! The [`Engine`] owns the compiled lexicons and recognizers, the
//! configured style, and the random source, and orchestrates the pipeline:
//! detect -> assign -> render. Each stage stays available on its own so a
//! caller can hold entity lists between passes (re-detection on every
//! keystroke with stable replacements).
//!
//! # Examples
//!
//! ```
//! use masque::config::EngineConfig;
//! use masque::engine::Engine;
//!
//! # fn example() -> masque::error::Result<()> {
//! let mut engine = Engine::new(EngineConfig::default())?;
//! let pass = engine.anonymize("Contactez Paul sur paul@exemple.fr", &[]);
//! assert!(!pass.text.contains("paul@exemple.fr"));
//! # Ok(())
//! # }
//! ```

use crate::assigner::assign_replacements;
use crate::config::EngineConfig;
use crate::detector::lexicon::Lexicons;
use crate::detector::DetectorSet;
use crate::error::Result;
use crate::generator::ReplacementGenerator;
use crate::models::{
    AnonymizedEntity, DetectedEntity, EntityKind, ReplacementContext, ReplacementStyle,
};
use crate::renderer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Result of one full anonymization pass
#[derive(Debug, Clone)]
pub struct AnonymizationPass {
    /// Anonymized text
    pub text: String,
    /// Entities with their assigned replacements, in start order
    pub entities: Vec<AnonymizedEntity>,
}

/// Stateless pipeline over owned, immutable tables
///
/// The engine holds no entity state between calls: everything the caller
/// wants preserved across passes is threaded back in as `previous`
/// entities. Only the random source mutates.
pub struct Engine {
    config: EngineConfig,
    lexicons: Lexicons,
    detectors: DetectorSet,
    rng: StdRng,
}

impl Engine {
    /// Create an engine from a configuration
    ///
    /// Loads the lexicon tables (embedded, or from `lexicon_file` when
    /// set) and compiles all detection patterns once.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for reproducible generation
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let lexicons = match config.lexicon_file {
            Some(ref path) => Lexicons::from_file(path)?,
            None => Lexicons::embedded()?,
        };
        let detectors = DetectorSet::new(&lexicons)?;
        Ok(Self {
            config,
            lexicons,
            detectors,
            rng,
        })
    }

    /// Detect PII entities in a text, honoring the configured switches
    pub fn detect(&self, text: &str) -> Vec<DetectedEntity> {
        self.detectors.detect(text, &self.config.enabled)
    }

    /// Assign replacements to detected entities, reusing previous
    /// assignments wherever span or normalized value persists
    pub fn assign(
        &mut self,
        detected: &[DetectedEntity],
        previous: &[AnonymizedEntity],
    ) -> Vec<AnonymizedEntity> {
        let generator = ReplacementGenerator::new(&self.lexicons);
        assign_replacements(
            detected,
            previous,
            self.config.style,
            &generator,
            &mut self.rng,
        )
    }

    /// Apply an entity list to a text
    pub fn render(&self, text: &str, entities: &[AnonymizedEntity]) -> String {
        renderer::anonymize_text(text, entities)
    }

    /// Run the full pipeline: detect, assign against `previous`, merge the
    /// span-less manual entities from `previous` back in, render
    ///
    /// Manual entities survive every refresh until the caller drops them;
    /// automatic re-detection never regenerates or discards them.
    pub fn anonymize(&mut self, text: &str, previous: &[AnonymizedEntity]) -> AnonymizationPass {
        let detected = self.detect(text);
        let mut entities = self.assign(&detected, previous);
        entities.extend(
            previous
                .iter()
                .filter(|entity| entity.manual && entity.is_spanless())
                .cloned(),
        );
        let text = self.render(text, &entities);
        debug!(entities = entities.len(), "anonymization pass complete");
        AnonymizationPass { text, entities }
    }

    /// Generate a single replacement value with the configured style
    ///
    /// Exposed for manual entity creation and per-entity regeneration.
    pub fn generate_value(
        &mut self,
        kind: EntityKind,
        context: Option<&mut ReplacementContext>,
    ) -> String {
        let generator = ReplacementGenerator::new(&self.lexicons);
        generator.generate(kind, self.config.style, context, &mut self.rng)
    }

    /// Configured replacement style
    pub fn style(&self) -> ReplacementStyle {
        self.config.style
    }

    /// Change the replacement style for subsequent passes
    pub fn set_style(&mut self, style: ReplacementStyle) {
        self.config.style = style;
    }

    /// Mutable access to the per-category switches
    pub fn enabled_mut(&mut self) -> &mut crate::config::EnabledKinds {
        &mut self.config.enabled
    }
}
