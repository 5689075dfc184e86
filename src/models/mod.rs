//! Entity data models

pub mod entity;

pub use entity::{
    normalize_value, AnonymizedEntity, DetectedEntity, EntityKind, ReplacementContext,
    ReplacementStyle,
};
