#![forbid(unsafe_code)]

//! Magnifying icon dock.
//!
//! While the pointer is over the dock, every icon is sized by its horizontal
//! distance to the pointer using a half-cosine falloff:
//!
//! ```text
//! scale(d) = 1 + (max - 1) * cos(d / r * π/2)   for d < r
//! scale(d) = 1                                  otherwise
//! ```
//!
//! so the icon under the pointer is `max` times its base size and the effect
//! fades out smoothly at radius `r`.
//!
//! On leave the icons shrink back with a short width/height transition. Once
//! that transition has run, the transition list is swapped to colour-only so
//! the next hover sizes snap while colour changes still animate. The swap is
//! a timed step: the host calls [`Dock::advance`] when
//! [`Dock::next_deadline`] is reached.

use core::f64::consts::FRAC_PI_2;
use core::time::Duration;

use crate::clock::PointerThrottle;
use crate::config::DockConfig;
use crate::dom::{DomOp, Target};
use crate::style::{self, Easing, Transition};

/// Scale factor for an icon `distance` px from the pointer.
#[must_use]
pub fn magnification(distance: f64, max_scale: f64, radius: f64) -> f64 {
    let distance = distance.abs();
    if !(distance < radius) {
        return 1.0;
    }
    let curve = (distance / radius * FRAC_PI_2).cos();
    1.0 + (max_scale - 1.0) * curve
}

/// Dock controller for one `.social-deck`.
#[derive(Debug, Clone)]
pub struct Dock {
    config: DockConfig,
    icons: usize,
    scales: Vec<f64>,
    pending_swap: Option<Duration>,
    throttle: PointerThrottle,
}

impl Dock {
    #[must_use]
    pub fn new(config: DockConfig, icons: usize) -> Self {
        let throttle = PointerThrottle::new(config.min_move_interval());
        Self {
            config,
            icons,
            scales: vec![1.0; icons],
            pending_swap: None,
            throttle,
        }
    }

    #[must_use]
    pub const fn icon_count(&self) -> usize {
        self.icons
    }

    /// Last applied scale per icon.
    #[must_use]
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Pointer entered: drop every transition for immediate sizing.
    pub fn pointer_enter(&mut self) -> Vec<DomOp> {
        self.pending_swap = None;
        self.throttle.reset();
        let none = Transition::none().to_string();
        (0..self.icons)
            .map(|i| DomOp::style(Target::DockIcon(i), "transition", none.clone()))
            .collect()
    }

    /// Pointer at client x `pointer_x`; `centers[i]` is icon `i`'s current
    /// horizontal centre in the same coordinate space.
    pub fn pointer_move(&mut self, pointer_x: f64, centers: &[f64], now: Duration) -> Vec<DomOp> {
        if !self.throttle.admit(now) {
            return Vec::new();
        }
        let mut ops = Vec::with_capacity(self.icons * 2);
        for (i, center) in centers.iter().take(self.icons).enumerate() {
            let scale = magnification(
                pointer_x - center,
                self.config.max_scale,
                self.config.radius_px,
            );
            self.scales[i] = scale;
            let size = style::rem(self.config.base_rem * scale);
            ops.push(DomOp::style(Target::DockIcon(i), "width", size.clone()));
            ops.push(DomOp::style(Target::DockIcon(i), "height", size));
        }
        ops
    }

    /// Pointer left at host time `now`: shrink back and schedule the
    /// transition swap.
    pub fn pointer_leave(&mut self, now: Duration) -> Vec<DomOp> {
        let reset = self.config.reset();
        let base = style::rem(self.config.base_rem);
        let transition = Transition::none()
            .with("width", reset, Easing::Ease)
            .with("height", reset, Easing::Ease)
            .to_string();
        let mut ops = Vec::with_capacity(self.icons * 3);
        for i in 0..self.icons {
            self.scales[i] = 1.0;
            ops.push(DomOp::style(Target::DockIcon(i), "width", base.clone()));
            ops.push(DomOp::style(Target::DockIcon(i), "height", base.clone()));
            ops.push(DomOp::style(Target::DockIcon(i), "transition", transition.clone()));
        }
        self.pending_swap = Some(now.saturating_add(reset));
        ops
    }

    #[must_use]
    pub const fn next_deadline(&self) -> Option<Duration> {
        self.pending_swap
    }

    /// Run the colour-transition swap if it is due.
    pub fn advance(&mut self, now: Duration) -> Vec<DomOp> {
        match self.pending_swap {
            Some(due) if due <= now => {
                self.pending_swap = None;
                let fade = self.config.color_transition();
                let transition = Transition::none()
                    .with("color", fade, Easing::Ease)
                    .with("background-color", fade, Easing::Ease)
                    .to_string();
                (0..self.icons)
                    .map(|i| DomOp::style(Target::DockIcon(i), "transition", transition.clone()))
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemorySurface, Surface};
    use pretty_assertions::assert_eq;

    const MAX: f64 = 1.8;
    const RADIUS: f64 = 150.0;

    #[test]
    fn full_scale_under_the_pointer() {
        assert_eq!(magnification(0.0, MAX, RADIUS), MAX);
    }

    #[test]
    fn unit_scale_at_and_beyond_radius() {
        assert_eq!(magnification(150.0, MAX, RADIUS), 1.0);
        assert_eq!(magnification(400.0, MAX, RADIUS), 1.0);
        assert_eq!(magnification(-150.0, MAX, RADIUS), 1.0);
    }

    #[test]
    fn falloff_is_symmetric() {
        assert_eq!(magnification(-40.0, MAX, RADIUS), magnification(40.0, MAX, RADIUS));
    }

    #[test]
    fn move_sizes_icons_from_base() {
        let mut dock = Dock::new(DockConfig::default(), 2);
        let mut surface = MemorySurface::new();
        surface.apply_all(&dock.pointer_move(100.0, &[100.0, 400.0], Duration::ZERO));
        assert_eq!(surface.style(&Target::DockIcon(0), "width"), Some("5.4rem"));
        assert_eq!(surface.style(&Target::DockIcon(0), "height"), Some("5.4rem"));
        assert_eq!(surface.style(&Target::DockIcon(1), "width"), Some("3rem"));
        assert_eq!(dock.scales(), &[1.8, 1.0]);
    }

    #[test]
    fn leave_then_swap_to_colour_transition() {
        let mut dock = Dock::new(DockConfig::default(), 1);
        let mut surface = MemorySurface::new();
        let t0 = Duration::from_millis(1_000);
        surface.apply_all(&dock.pointer_leave(t0));
        assert_eq!(surface.style(&Target::DockIcon(0), "width"), Some("3rem"));
        assert_eq!(
            surface.style(&Target::DockIcon(0), "transition"),
            Some("width 0.3s ease, height 0.3s ease")
        );
        assert_eq!(dock.next_deadline(), Some(Duration::from_millis(1_300)));

        assert!(dock.advance(Duration::from_millis(1_299)).is_empty());
        surface.apply_all(&dock.advance(Duration::from_millis(1_300)));
        assert_eq!(
            surface.style(&Target::DockIcon(0), "transition"),
            Some("color 0.2s ease, background-color 0.2s ease")
        );
        assert_eq!(dock.next_deadline(), None);
    }

    #[test]
    fn enter_cancels_pending_swap() {
        let mut dock = Dock::new(DockConfig::default(), 1);
        dock.pointer_leave(Duration::ZERO);
        let ops = dock.pointer_enter();
        assert_eq!(ops, vec![DomOp::style(Target::DockIcon(0), "transition", "none")]);
        assert_eq!(dock.next_deadline(), None);
        assert!(dock.advance(Duration::from_secs(5)).is_empty());
    }
}
