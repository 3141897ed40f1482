//! Label Normalizer Adapter
//!
//! Implements `NameNormalizer` for plain single labels: lowercases and rejects
//! anything outside letters, digits and `-`. Deployments that need full
//! Unicode normalization plug their own implementation into the port.

use crate::domain::NormalizationError;
use crate::ports::outbound::NameNormalizer;

/// Lowercasing single-label normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelNormalizer;

impl NameNormalizer for LabelNormalizer {
    fn normalize(&self, raw: &str) -> Result<String, NormalizationError> {
        if raw.is_empty() {
            return Err(NormalizationError::Empty);
        }

        let mut out = String::with_capacity(raw.len());
        for (position, character) in raw.chars().enumerate() {
            if !(character.is_alphanumeric() || character == '-') {
                return Err(NormalizationError::DisallowedCharacter {
                    character,
                    position,
                });
            }
            out.extend(character.to_lowercase());
        }
        Ok(out)
    }
}
