//! Glitch effect: transient, reversible character corruption.
//!
//! The effect snapshots the region when it begins. Every tick corrupts the
//! *current* content (so corruption compounds), and teardown writes the
//! snapshot back for every stop reason. Corrupting and restoring are separate
//! steps; restoration never depends on whether anything was corrupted.

use crate::effect::Effect;
use crate::error::EffectError;
use crate::rng::RandomSource;
use crate::surface::Surface;
use crate::types::{
    EffectKind, StopReason, TickControl, CORRUPTION_PROBABILITY, GLITCH_ALPHABET,
    GLITCH_DURATION_MS, GLITCH_TICK_MS,
};

/// Corruption settings. Fixed in practice, exposed for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchParams {
    /// Per-character substitution probability.
    pub probability: f64,
    /// Substitutes, drawn uniformly.
    pub alphabet: Vec<char>,
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            probability: CORRUPTION_PROBABILITY,
            alphabet: GLITCH_ALPHABET.to_vec(),
        }
    }
}

/// Produce one corrupted frame of `text`.
///
/// Newlines are kept so the region's line layout holds while glitching.
pub fn corrupt<R: RandomSource + ?Sized>(text: &str, params: &GlitchParams, rng: &mut R) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch != '\n' && !params.alphabet.is_empty() && rng.chance(params.probability) {
            let pick = rng.next_below(params.alphabet.len() as u32) as usize;
            out.push(params.alphabet[pick]);
        } else {
            out.push(ch);
        }
    }
    out
}

pub struct Glitch<R> {
    rng: R,
    params: GlitchParams,
    duration_ms: u32,
    interval_ms: u32,
    snapshot: Option<String>,
}

impl<R: RandomSource + Send> Glitch<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            params: GlitchParams::default(),
            duration_ms: GLITCH_DURATION_MS,
            interval_ms: GLITCH_TICK_MS,
            snapshot: None,
        }
    }

    /// How long the region stays corrupted.
    ///
    /// Rounded up to whole ticks: restoration happens on the first tick at or
    /// past `ms`, so 120 ms at a 50 ms interval restores at 150 ms.
    pub fn with_duration_ms(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn with_interval_ms(mut self, ms: u32) -> Self {
        self.interval_ms = ms;
        self
    }

    pub fn with_params(mut self, params: GlitchParams) -> Self {
        self.params = params;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Content captured when the effect began.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl<R: RandomSource + Send> Effect for Glitch<R> {
    fn kind(&self) -> EffectKind {
        EffectKind::Glitch
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn begin(&mut self, surface: &mut dyn Surface) {
        self.snapshot = Some(surface.content().to_string());
    }

    fn tick(&mut self, index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError> {
        let elapsed = (index + 1).saturating_mul(self.interval_ms.max(1) as u64);
        if elapsed >= self.duration_ms as u64 {
            return Ok(TickControl::Stop);
        }

        let frame = corrupt(surface.content(), &self.params, &mut self.rng);
        surface.set_content(&frame);
        surface.request_redraw();
        Ok(TickControl::Continue)
    }

    fn end(&mut self, surface: &mut dyn Surface, _reason: StopReason) {
        if let Some(original) = self.snapshot.take() {
            surface.set_content(&original);
            surface.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::surface::TextBuffer;

    struct Always;

    impl RandomSource for Always {
        fn next_u32(&mut self) -> u32 {
            0
        }
    }

    #[test]
    fn corrupt_with_certain_probability_replaces_every_char_but_newlines() {
        let params = GlitchParams {
            probability: 1.0,
            alphabet: vec!['#'],
        };
        assert_eq!(corrupt("ab\ncd", &params, &mut Always), "##\n##");
    }

    #[test]
    fn corrupt_with_zero_probability_is_identity() {
        let params = GlitchParams {
            probability: 0.0,
            ..GlitchParams::default()
        };
        let mut rng = SimpleRng::new(3);
        assert_eq!(corrupt("Operator", &params, &mut rng), "Operator");
    }

    #[test]
    fn corrupt_only_uses_the_alphabet() {
        let params = GlitchParams {
            probability: 1.0,
            ..GlitchParams::default()
        };
        let mut rng = SimpleRng::new(11);
        let out = corrupt("xxxxxxxxxxxxxxxxxxxx", &params, &mut rng);
        assert!(out.chars().all(|c| GLITCH_ALPHABET.contains(&c)), "{out}");
    }

    #[test]
    fn same_seed_same_frames() {
        let params = GlitchParams::default();
        let text = "Accessing mainframe... Bypassing firewall...";
        let a = corrupt(text, &params, &mut SimpleRng::new(42));
        let b = corrupt(text, &params, &mut SimpleRng::new(42));
        assert_eq!(a, b);
        assert_eq!(a.chars().count(), text.chars().count());
    }

    #[test]
    fn stops_once_duration_elapses() {
        let mut glitch = Glitch::new(SimpleRng::new(1)).with_duration_ms(100);
        let mut buf = TextBuffer::with_content("signal");
        glitch.begin(&mut buf);
        assert_eq!(glitch.tick(0, &mut buf), Ok(TickControl::Continue));
        assert_eq!(glitch.tick(1, &mut buf), Ok(TickControl::Stop));
    }

    #[test]
    fn duration_rounds_up_to_whole_ticks() {
        let mut glitch = Glitch::new(SimpleRng::new(1))
            .with_interval_ms(50)
            .with_duration_ms(120);
        let mut buf = TextBuffer::with_content("signal");
        glitch.begin(&mut buf);
        // Ticks land at 50, 100 and 150 ms; the one at 150 ends the effect.
        assert_eq!(glitch.tick(0, &mut buf), Ok(TickControl::Continue));
        assert_eq!(glitch.tick(1, &mut buf), Ok(TickControl::Continue));
        assert_eq!(glitch.tick(2, &mut buf), Ok(TickControl::Stop));
    }

    #[test]
    fn end_restores_snapshot_for_every_reason() {
        for reason in [StopReason::Completed, StopReason::Cancelled, StopReason::Failed] {
            let params = GlitchParams {
                probability: 1.0,
                alphabet: vec!['@'],
            };
            let mut glitch = Glitch::new(Always).with_params(params);
            let mut buf = TextBuffer::with_content("pristine");
            glitch.begin(&mut buf);
            glitch.tick(0, &mut buf).unwrap();
            assert_eq!(buf.content(), "@@@@@@@@");
            glitch.end(&mut buf, reason);
            assert_eq!(buf.content(), "pristine");
        }
    }

    #[test]
    fn corruption_compounds_on_current_content() {
        // The second frame starts from the first frame, not the snapshot.
        let params = GlitchParams {
            probability: 1.0,
            alphabet: vec!['#'],
        };
        let mut glitch = Glitch::new(Always).with_params(params);
        let mut buf = TextBuffer::with_content("ab");
        glitch.begin(&mut buf);
        glitch.tick(0, &mut buf).unwrap();
        buf.set_content("##z");
        glitch.tick(1, &mut buf).unwrap();
        assert_eq!(buf.content(), "###");
        assert_eq!(glitch.snapshot(), Some("ab"));
    }
}
