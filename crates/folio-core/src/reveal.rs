#![forbid(unsafe_code)]

//! One-shot scroll reveal.
//!
//! [`RevealOnce`] tracks a set of targets for one intersection observer.
//! Each target gets its pre-reveal look the moment it is enrolled, switches
//! to its final look the first time enough of it is on screen, and is then
//! dropped from observation for good.
//!
//! # Invariants
//!
//! 1. A target is activated at most once, however many entries arrive for it.
//! 2. Enrolling a target twice is a no-op.
//! 3. Instances are independent: each owns its threshold, action and targets.

use std::collections::BTreeSet;

use crate::dom::{DomOp, Target};
use crate::style::{self, Easing, Transition};

/// Intersection ratios are computed from rounded layout boxes; an entry that
/// fired for crossing the threshold may report a ratio a hair under it.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Visual mutations applied around a reveal.
pub trait RevealAction {
    /// Applied synchronously at enrolment, before observation starts.
    fn pre_reveal(&self, target: &Target, ops: &mut Vec<DomOp>);

    /// Applied once, on the first qualifying intersection.
    fn activate(&self, target: &Target, ops: &mut Vec<DomOp>);
}

/// One observer entry as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub target: Target,
    /// Visible fraction of the target's area, `0.0..=1.0`.
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl Intersection {
    #[must_use]
    pub fn new(target: Target, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            target,
            ratio,
            is_intersecting,
        }
    }
}

/// Result of feeding observer entries to a [`RevealOnce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevealOutcome {
    pub ops: Vec<DomOp>,
    /// Targets the host must stop observing.
    pub unobserve: Vec<Target>,
}

impl RevealOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.unobserve.is_empty()
    }
}

/// A reveal-once observation set.
#[derive(Debug, Clone)]
pub struct RevealOnce<A> {
    threshold: f64,
    action: A,
    observed: Vec<Target>,
    revealed: BTreeSet<Target>,
}

impl<A: RevealAction> RevealOnce<A> {
    #[must_use]
    pub fn new(threshold: f64, action: A) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            action,
            observed: Vec::new(),
            revealed: BTreeSet::new(),
        }
    }

    /// Start observing `target`. Returns its pre-reveal ops, or nothing if it
    /// is already enrolled or already revealed.
    pub fn enroll(&mut self, target: Target) -> Vec<DomOp> {
        let mut ops = Vec::new();
        if self.observed.contains(&target) || self.revealed.contains(&target) {
            return ops;
        }
        self.action.pre_reveal(&target, &mut ops);
        self.observed.push(target);
        ops
    }

    /// Feed one observer callback's entries.
    pub fn on_intersections(&mut self, entries: &[Intersection]) -> RevealOutcome {
        let mut outcome = RevealOutcome::default();
        for entry in entries {
            if !self.qualifies(entry) {
                continue;
            }
            let Some(pos) = self.observed.iter().position(|t| *t == entry.target) else {
                continue;
            };
            let target = self.observed.remove(pos);
            self.action.activate(&target, &mut outcome.ops);
            tracing::trace!(?target, ratio = entry.ratio, "revealed");
            outcome.unobserve.push(target.clone());
            self.revealed.insert(target);
        }
        outcome
    }

    fn qualifies(&self, entry: &Intersection) -> bool {
        entry.is_intersecting && entry.ratio + RATIO_TOLERANCE >= self.threshold
    }

    #[must_use]
    pub fn is_observing(&self, target: &Target) -> bool {
        self.observed.contains(target)
    }

    #[must_use]
    pub fn is_revealed(&self, target: &Target) -> bool {
        self.revealed.contains(target)
    }
}

/// Fade-and-rise: hidden and shifted down until revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeIn {
    pub offset_px: f64,
    pub duration: core::time::Duration,
}

impl RevealAction for FadeIn {
    fn pre_reveal(&self, target: &Target, ops: &mut Vec<DomOp>) {
        let transition = Transition::none()
            .with("opacity", self.duration, Easing::EaseOut)
            .with("transform", self.duration, Easing::EaseOut);
        ops.push(DomOp::style(target.clone(), "opacity", "0"));
        ops.push(DomOp::style(
            target.clone(),
            "transform",
            format!("translateY({}px)", style::number(self.offset_px)),
        ));
        ops.push(DomOp::style(target.clone(), "transition", transition.to_string()));
    }

    fn activate(&self, target: &Target, ops: &mut Vec<DomOp>) {
        ops.push(DomOp::style(target.clone(), "opacity", "1"));
        ops.push(DomOp::style(target.clone(), "transform", "translateY(0)"));
    }
}

/// Adds a class on reveal; the stylesheet owns both looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReveal {
    pub class: &'static str,
}

impl RevealAction for ClassReveal {
    fn pre_reveal(&self, _target: &Target, _ops: &mut Vec<DomOp>) {}

    fn activate(&self, target: &Target, ops: &mut Vec<DomOp>) {
        ops.push(DomOp::add_class(target.clone(), self.class));
    }
}

/// Marks every word span of a staggered block visible at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordsVisible {
    pub words: usize,
}

impl RevealAction for WordsVisible {
    fn pre_reveal(&self, _target: &Target, _ops: &mut Vec<DomOp>) {}

    fn activate(&self, _target: &Target, ops: &mut Vec<DomOp>) {
        ops.extend((0..self.words).map(|i| DomOp::add_class(Target::Word(i), "visible")));
    }
}
