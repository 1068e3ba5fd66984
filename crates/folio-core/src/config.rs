#![forbid(unsafe_code)]

//! Interaction tunables.
//!
//! Every constant the page animates with lives here. Defaults reproduce the
//! shipped page; a host may override any subset from JSON (missing fields keep
//! their defaults).

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub dock: DockConfig,
    pub typewriter: TypewriterConfig,
    pub stagger: StaggerConfig,
    pub carousel: CarouselConfig,
}

impl FolioConfig {
    /// Decode and validate a JSON override.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        let config: Self = serde_json::from_str(json).map_err(|e| FolioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break an invariant of the state machines.
    pub fn validate(&self) -> Result<(), FolioError> {
        for (name, threshold) in [
            ("reveal.fade_threshold", self.reveal.fade_threshold),
            ("reveal.timeline_threshold", self.reveal.timeline_threshold),
            ("reveal.words_threshold", self.reveal.words_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(FolioError::Config(format!(
                    "{name} must be within [0, 1], got {threshold}"
                )));
            }
        }
        if !(self.dock.radius_px > 0.0) {
            return Err(FolioError::Config(format!(
                "dock.radius_px must be positive, got {}",
                self.dock.radius_px
            )));
        }
        if !(self.dock.max_scale >= 1.0) {
            return Err(FolioError::Config(format!(
                "dock.max_scale must be at least 1, got {}",
                self.dock.max_scale
            )));
        }
        if !(self.dock.base_rem > 0.0) {
            return Err(FolioError::Config(format!(
                "dock.base_rem must be positive, got {}",
                self.dock.base_rem
            )));
        }
        if !self.parallax.divisor.is_finite() || self.parallax.divisor == 0.0 {
            return Err(FolioError::Config(format!(
                "parallax.divisor must be finite and non-zero, got {}",
                self.parallax.divisor
            )));
        }
        let tw = &self.typewriter;
        if tw.phrases.is_empty() {
            return Err(FolioError::Config("typewriter.phrases is empty".into()));
        }
        if let Some(i) = tw.phrases.iter().position(|p| p.text.is_empty()) {
            return Err(FolioError::Config(format!(
                "typewriter.phrases[{i}].text is empty"
            )));
        }
        if tw.type_interval_ms == 0
            || tw.delete_interval_ms == 0
            || tw.pause_after_type_ms == 0
            || tw.pause_after_delete_ms == 0
        {
            return Err(FolioError::Config(
                "typewriter intervals and pauses must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Scroll reveal thresholds and the fade-in pre-reveal look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub fade_threshold: f64,
    pub timeline_threshold: f64,
    pub words_threshold: f64,
    /// Initial downward offset of fade-in targets, in px.
    pub fade_offset_px: f64,
    pub fade_duration_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fade_threshold: 0.1,
            timeline_threshold: 0.2,
            words_threshold: 0.5,
            fade_offset_px: 20.0,
            fade_duration_ms: 600,
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

/// Hero parallax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Pointer offset from the viewport centre is divided by this.
    pub divisor: f64,
    /// Per-layer multiplier applied on top of `data-speed`.
    pub amplification: f64,
    pub reset_ms: u64,
    /// Minimum spacing between processed moves; zero disables the gate.
    pub min_move_interval_ms: u64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            divisor: 100.0,
            amplification: 50.0,
            reset_ms: 500,
            min_move_interval_ms: 0,
        }
    }
}

impl ParallaxConfig {
    #[must_use]
    pub const fn reset(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }

    #[must_use]
    pub const fn min_move_interval(&self) -> Duration {
        Duration::from_millis(self.min_move_interval_ms)
    }
}

/// Icon dock magnification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub base_rem: f64,
    pub max_scale: f64,
    pub radius_px: f64,
    pub reset_ms: u64,
    pub color_transition_ms: u64,
    pub min_move_interval_ms: u64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            base_rem: 3.0,
            max_scale: 1.8,
            radius_px: 150.0,
            reset_ms: 300,
            color_transition_ms: 200,
            min_move_interval_ms: 0,
        }
    }
}

impl DockConfig {
    #[must_use]
    pub const fn reset(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }

    #[must_use]
    pub const fn color_transition(&self) -> Duration {
        Duration::from_millis(self.color_transition_ms)
    }

    #[must_use]
    pub const fn min_move_interval(&self) -> Duration {
        Duration::from_millis(self.min_move_interval_ms)
    }
}

/// One typewriter sentence and the emoji shown beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    pub emoji: String,
    /// CSS animation class applied to the emoji.
    pub animation: String,
}

impl Phrase {
    pub fn new(text: impl Into<String>, emoji: impl Into<String>, animation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emoji: emoji.into(),
            animation: animation.into(),
        }
    }
}

/// Typewriter timing and phrase list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub type_interval_ms: u64,
    pub delete_interval_ms: u64,
    pub pause_after_type_ms: u64,
    pub pause_after_delete_ms: u64,
    pub startup_delay_ms: u64,
    pub emoji_fade_ms: u64,
    pub phrases: Vec<Phrase>,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_interval_ms: 100,
            delete_interval_ms: 50,
            pause_after_type_ms: 2000,
            pause_after_delete_ms: 500,
            startup_delay_ms: 3000,
            emoji_fade_ms: 300,
            phrases: vec![
                Phrase::new("Hello, I'm Devin De Silva", "\u{1F44B}", "emoji-wave"),
                Phrase::new("A Mobile Application Developer", "\u{1F4BB}", "emoji-bounce"),
                Phrase::new("Based in London, UK", "\u{1F4CD}", "emoji-pop"),
            ],
        }
    }
}

impl TypewriterConfig {
    #[must_use]
    pub const fn type_interval(&self) -> Duration {
        Duration::from_millis(self.type_interval_ms)
    }

    #[must_use]
    pub const fn delete_interval(&self) -> Duration {
        Duration::from_millis(self.delete_interval_ms)
    }

    #[must_use]
    pub const fn pause_after_type(&self) -> Duration {
        Duration::from_millis(self.pause_after_type_ms)
    }

    #[must_use]
    pub const fn pause_after_delete(&self) -> Duration {
        Duration::from_millis(self.pause_after_delete_ms)
    }

    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    #[must_use]
    pub const fn emoji_fade(&self) -> Duration {
        Duration::from_millis(self.emoji_fade_ms)
    }
}

/// Word-stagger text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub word_delay_ms: u64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self { word_delay_ms: 100 }
    }
}

impl StaggerConfig {
    #[must_use]
    pub const fn word_delay(&self) -> Duration {
        Duration::from_millis(self.word_delay_ms)
    }
}

/// Project carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Gap between cards, added to the measured card width.
    pub gap_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { gap_px: 32.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_shipped_page() {
        let config = FolioConfig::default();
        assert_eq!(config.reveal.fade_threshold, 0.1);
        assert_eq!(config.reveal.timeline_threshold, 0.2);
        assert_eq!(config.reveal.words_threshold, 0.5);
        assert_eq!(config.dock.radius_px, 150.0);
        assert_eq!(config.dock.max_scale, 1.8);
        assert_eq!(config.typewriter.startup_delay(), Duration::from_secs(3));
        assert_eq!(config.typewriter.phrases.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FolioConfig::from_json(r#"{ "dock": { "max_scale": 2.0 } }"#)
            .expect("valid override");
        assert_eq!(config.dock.max_scale, 2.0);
        assert_eq!(config.dock.radius_px, 150.0);
        assert_eq!(config.reveal, RevealConfig::default());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = FolioConfig::from_json(r#"{ "reveal": { "fade_threshold": 1.5 } }"#)
            .expect_err("threshold above 1");
        assert!(matches!(err, FolioError::Config(msg) if msg.contains("fade_threshold")));
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        let err = FolioConfig::from_json(r#"{ "typewriter": { "phrases": [] } }"#)
            .expect_err("no phrases");
        assert_eq!(err, FolioError::Config("typewriter.phrases is empty".into()));
    }

    #[test]
    fn zero_pauses_and_blank_phrases_are_rejected() {
        let err = FolioConfig::from_json(
            r#"{"typewriter":{"pause_after_type_ms":0,"pause_after_delete_ms":0,
                "phrases":[{"text":"","emoji":"A","animation":"x"}]}}"#,
        )
        .expect_err("cycle would never advance");
        assert_eq!(
            err,
            FolioError::Config("typewriter.phrases[0].text is empty".into())
        );

        let err = FolioConfig::from_json(r#"{"typewriter":{"pause_after_delete_ms":0}}"#)
            .expect_err("zero pause");
        assert!(matches!(err, FolioError::Config(msg) if msg.contains("pauses")));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        for json in [
            r#"{"parallax":{"divisor":0}}"#,
            r#"{"dock":{"base_rem":0}}"#,
            r#"{"dock":{"base_rem":-1.5}}"#,
        ] {
            assert!(
                matches!(FolioConfig::from_json(json), Err(FolioError::Config(_))),
                "{json}"
            );
        }

        let mut config = FolioConfig::default();
        config.parallax.divisor = f64::INFINITY;
        assert!(config.validate().is_err());
        config.parallax.divisor = f64::NAN;
        assert!(config.validate().is_err());
        config.parallax.divisor = -100.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            FolioConfig::from_json("{"),
            Err(FolioError::Config(_))
        ));
    }
}
