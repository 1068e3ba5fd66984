#![forbid(unsafe_code)]

//! Project carousel paging.

use crate::config::CarouselConfig;
use crate::dom::{DomOp, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Scrolls the slider one card at a time.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    config: CarouselConfig,
}

impl Carousel {
    #[must_use]
    pub const fn new(config: CarouselConfig) -> Self {
        Self { config }
    }

    /// Horizontal distance for one page given the measured card width.
    #[must_use]
    pub fn stride(&self, card_width: f64) -> f64 {
        card_width.max(0.0) + self.config.gap_px
    }

    pub fn step(&self, direction: Direction, card_width: f64) -> DomOp {
        let stride = self.stride(card_width);
        let left = match direction {
            Direction::Prev => -stride,
            Direction::Next => stride,
        };
        DomOp::ScrollBy {
            target: Target::Slider,
            left,
            smooth: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_adds_the_gap() {
        let carousel = Carousel::default();
        assert_eq!(carousel.stride(320.0), 352.0);
        assert_eq!(
            carousel.step(Direction::Prev, 320.0),
            DomOp::ScrollBy {
                target: Target::Slider,
                left: -352.0,
                smooth: true
            }
        );
    }
}
