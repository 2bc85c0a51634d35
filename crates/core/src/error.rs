//! Error types for effect construction and ticking.

use thiserror::Error;

use crate::types::EffectKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("countdown must start above zero seconds, got {0}")]
    NonPositiveCountdown(i64),

    #[error("{} effect failed on tick {index}: {message}", .kind.as_str())]
    Tick {
        kind: EffectKind,
        index: u64,
        message: String,
    },
}

impl EffectError {
    /// Convenience for custom effects that fail mid-run.
    pub fn tick(kind: EffectKind, index: u64, message: impl Into<String>) -> Self {
        EffectError::Tick {
            kind,
            index,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            EffectError::NonPositiveCountdown(-3).to_string(),
            "countdown must start above zero seconds, got -3"
        );
        assert_eq!(
            EffectError::tick(EffectKind::Custom, 4, "boom").to_string(),
            "custom effect failed on tick 4: boom"
        );
    }
}
