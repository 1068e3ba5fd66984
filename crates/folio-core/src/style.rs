#![forbid(unsafe_code)]

//! CSS value formatting.
//!
//! Every inline-style string the page writes goes through here so the exact
//! text (`translateX(12.5px)`, `width 0.3s ease`) is produced in one place.

use core::fmt;
use core::time::Duration;

/// Timing function for a CSS transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Ease,
    EaseOut,
}

impl Easing {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Ease => "ease",
            Self::EaseOut => "ease-out",
        }
    }
}

/// One `property duration easing` clause of a transition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionItem {
    pub property: &'static str,
    pub duration: Duration,
    pub easing: Easing,
}

/// A CSS `transition` value. An empty list renders as `none`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    items: Vec<TransitionItem>,
}

impl Transition {
    /// `transition: none`.
    #[must_use]
    pub const fn none() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a clause.
    #[must_use]
    pub fn with(mut self, property: &'static str, duration: Duration, easing: Easing) -> Self {
        self.items.push(TransitionItem {
            property,
            duration,
            easing,
        });
        self
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str("none");
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{} {} {}",
                item.property,
                seconds(item.duration),
                item.easing.as_css()
            )?;
        }
        Ok(())
    }
}

/// Format a duration as CSS seconds with no float noise: 300ms → `0.3s`.
#[must_use]
pub fn seconds(d: Duration) -> String {
    let ms = d.as_millis();
    let whole = ms / 1000;
    let frac = ms % 1000;
    if frac == 0 {
        return format!("{whole}s");
    }
    let frac = format!("{frac:03}");
    format!("{whole}.{}s", frac.trim_end_matches('0'))
}

/// Format a CSS number. Negative zero prints as `0`.
#[must_use]
pub fn number(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}

/// `translateX(<x>px) translateY(<y>px)`.
#[must_use]
pub fn translate(x: f64, y: f64) -> String {
    format!("translateX({}px) translateY({}px)", number(x), number(y))
}

/// `<v>rem`.
#[must_use]
pub fn rem(v: f64) -> String {
    format!("{}rem", number(v))
}

/// Escape text for interpolation into HTML content or a quoted attribute.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seconds_have_no_float_noise() {
        assert_eq!(seconds(Duration::from_millis(300)), "0.3s");
        assert_eq!(seconds(Duration::from_millis(0)), "0s");
        assert_eq!(seconds(Duration::from_millis(50)), "0.05s");
        assert_eq!(seconds(Duration::from_millis(1200)), "1.2s");
        assert_eq!(seconds(Duration::from_secs(2)), "2s");
    }

    #[test]
    fn transition_lists_render_like_css() {
        let t = Transition::none()
            .with("width", Duration::from_millis(300), Easing::Ease)
            .with("height", Duration::from_millis(300), Easing::Ease);
        assert_eq!(t.to_string(), "width 0.3s ease, height 0.3s ease");
        assert_eq!(Transition::none().to_string(), "none");
    }

    #[test]
    fn translate_drops_negative_zero() {
        assert_eq!(translate(-0.0, 0.0), "translateX(0px) translateY(0px)");
        assert_eq!(translate(12.5, -3.0), "translateX(12.5px) translateY(-3px)");
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">R&D's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
    }
}
