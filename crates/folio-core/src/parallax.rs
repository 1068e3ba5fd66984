#![forbid(unsafe_code)]

//! Mouse parallax for the hero section.
//!
//! The pointer's offset from the viewport centre yields a base displacement;
//! each layer moves by that displacement times its own `data-speed` and a
//! fixed amplification. Leaving the hero snaps every layer home with a short
//! eased transition; entering removes the transition so tracking is immediate.

use core::time::Duration;

use crate::clock::PointerThrottle;
use crate::config::ParallaxConfig;
use crate::dom::{DomOp, Target};
use crate::style::{self, Easing, Transition};

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Parse a `data-speed` attribute. Non-numeric or non-finite values are rejected.
#[must_use]
pub fn parse_speed(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Base displacement for a pointer at `page` inside `viewport`.
#[must_use]
pub fn base_displacement(page: Point, viewport: Viewport, divisor: f64) -> Point {
    Point::new(
        (viewport.width - page.x * 2.0) / divisor,
        (viewport.height - page.y * 2.0) / divisor,
    )
}

#[derive(Debug, Clone, PartialEq)]
struct Layer {
    target: Target,
    speed: f64,
    offset: Point,
}

/// Parallax controller for one hero region.
#[derive(Debug, Clone)]
pub struct Parallax {
    config: ParallaxConfig,
    layers: Vec<Layer>,
    throttle: PointerThrottle,
}

impl Parallax {
    #[must_use]
    pub fn new(config: ParallaxConfig) -> Self {
        let throttle = PointerThrottle::new(config.min_move_interval());
        Self {
            config,
            layers: Vec::new(),
            throttle,
        }
    }

    /// Register a layer with the raw `data-speed` value. Returns `false` and
    /// skips the layer when the value does not parse.
    pub fn add_layer(&mut self, target: Target, raw_speed: &str) -> bool {
        let Some(speed) = parse_speed(raw_speed) else {
            tracing::debug!(?target, raw_speed, "ignoring parallax layer with bad speed");
            return false;
        };
        self.layers.push(Layer {
            target,
            speed,
            offset: Point::ZERO,
        });
        true
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Current displacement of each layer, in registration order.
    pub fn offsets(&self) -> impl Iterator<Item = (&Target, Point)> + '_ {
        self.layers.iter().map(|l| (&l.target, l.offset))
    }

    /// Pointer entered the hero: movement should apply instantly.
    pub fn pointer_enter(&mut self) -> Vec<DomOp> {
        self.throttle.reset();
        let none = Transition::none().to_string();
        self.layers
            .iter()
            .map(|l| DomOp::style(l.target.clone(), "transition", none.clone()))
            .collect()
    }

    /// Pointer moved to `page` (document coordinates) at host time `now`.
    pub fn pointer_move(&mut self, page: Point, viewport: Viewport, now: Duration) -> Vec<DomOp> {
        if !self.throttle.admit(now) {
            return Vec::new();
        }
        let base = base_displacement(page, viewport, self.config.divisor);
        let gain = self.config.amplification;
        let mut ops = Vec::with_capacity(self.layers.len());
        for layer in &mut self.layers {
            layer.offset = Point::new(base.x * layer.speed * gain, base.y * layer.speed * gain);
            ops.push(DomOp::style(
                layer.target.clone(),
                "transform",
                style::translate(layer.offset.x, layer.offset.y),
            ));
        }
        ops
    }

    /// Pointer left the hero: every layer eases back to the origin.
    pub fn pointer_leave(&mut self) -> Vec<DomOp> {
        let transition = Transition::none()
            .with("transform", self.config.reset(), Easing::EaseOut)
            .to_string();
        let mut ops = Vec::with_capacity(self.layers.len() * 2);
        for layer in &mut self.layers {
            layer.offset = Point::ZERO;
            ops.push(DomOp::style(
                layer.target.clone(),
                "transform",
                style::translate(0.0, 0.0),
            ));
            ops.push(DomOp::style(layer.target.clone(), "transition", transition.clone()));
        }
        ops
    }
}
