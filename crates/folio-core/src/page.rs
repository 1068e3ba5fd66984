#![forbid(unsafe_code)]

//! Whole-page controller.
//!
//! [`Page`] owns one instance of every feature the host found anchors for and
//! routes [`PageEvent`]s to them. Like a step program it is host-driven: the
//! host reports events and time, and applies the returned ops.
//!
//! 1. Describe what exists in a [`PageLayout`] and call [`Page::new`]; apply
//!    the returned initial ops before the first paint.
//! 2. Forward DOM events through [`Page::handle`].
//! 3. Arm a timer for [`Page::next_deadline`]; when it fires call
//!    [`Page::advance`].
//! 4. When [`Page::needs_animation_frame`] is set, request a frame and
//!    forward it as [`PageEvent::AnimationFrame`].
//!
//! A feature whose anchors are missing is simply absent; events aimed at it
//! are ignored.

use core::time::Duration;

use bitflags::bitflags;

use crate::carousel::{Carousel, Direction};
use crate::clock::{DeterministicClock, earliest};
use crate::config::FolioConfig;
use crate::dock::Dock;
use crate::dom::{DomOp, Target};
use crate::modal::{ModalClick, ModalController, ModalState};
use crate::nav::NavMenu;
use crate::parallax::{Parallax, Point, Viewport};
use crate::project::ProjectCatalog;
use crate::reveal::{ClassReveal, FadeIn, Intersection, RevealOnce};
use crate::stagger::StaggeredText;
use crate::typewriter::Typewriter;

bitflags! {
    /// Features wired on this page.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        const NAV        = 1 << 0;
        const ANCHORS    = 1 << 1;
        const FADE_IN    = 1 << 2;
        const TIMELINE   = 1 << 3;
        const PARALLAX   = 1 << 4;
        const DOCK       = 1 << 5;
        const CAROUSEL   = 1 << 6;
        const MODAL      = 1 << 7;
        const TYPEWRITER = 1 << 8;
        const STAGGER    = 1 << 9;
    }
}

/// Anchors the host found in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// `.nav-toggle` and `.nav-links` both present.
    pub nav: bool,
    /// At least one `a[href^="#"]`.
    pub anchors: bool,
    /// Number of fade-in cards.
    pub fade_in: usize,
    /// Number of timeline items.
    pub timeline: usize,
    /// `data-speed` values of the hero layers, if the hero exists.
    pub hero_layers: Option<Vec<String>>,
    /// Icon count, if the dock exists.
    pub dock_icons: Option<usize>,
    /// Slider and both buttons present.
    pub carousel: bool,
    /// Modal container present.
    pub modal: bool,
    /// Typewriter text and emoji elements present.
    pub typewriter: bool,
    /// Text of the staggered block, if present.
    pub stagger_text: Option<String>,
}

/// Which intersection observer an entry batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    FadeIn,
    Timeline,
    Stagger,
}

/// Host-reported input.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    NavToggle,
    /// In-page link followed; `section` is the resolved element id.
    Anchor { section: Option<String> },
    Intersections {
        observer: ObserverKind,
        entries: Vec<Intersection>,
    },
    HeroEnter,
    HeroMove { page: Point, viewport: Viewport },
    HeroLeave,
    DockEnter,
    /// `centers[i]` is icon `i`'s horizontal centre, client coordinates.
    DockMove { pointer_x: f64, centers: Vec<f64> },
    DockLeave,
    Carousel { direction: Direction, card_width: f64 },
    Modal(ModalClick),
    /// `KeyboardEvent.key`.
    Key(String),
    AnimationFrame,
}

/// What the host must do after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageUpdate {
    pub ops: Vec<DomOp>,
    pub unobserve: Vec<(ObserverKind, Target)>,
}

impl PageUpdate {
    fn ops(ops: Vec<DomOp>) -> Self {
        Self {
            ops,
            unobserve: Vec::new(),
        }
    }
}

/// Every feature of the page behind one host-facing API.
#[derive(Debug)]
pub struct Page {
    clock: DeterministicClock,
    features: Features,
    nav: Option<NavMenu>,
    fade_in: Option<RevealOnce<FadeIn>>,
    timeline: Option<RevealOnce<ClassReveal>>,
    parallax: Option<Parallax>,
    dock: Option<Dock>,
    carousel: Option<Carousel>,
    modal: Option<ModalController>,
    typewriter: Option<Typewriter>,
    stagger: Option<StaggeredText>,
}

impl Page {
    /// Wire every feature `layout` has anchors for, at host time `now`.
    /// Returns the page and the ops establishing initial visual state.
    #[must_use]
    pub fn new(
        config: &FolioConfig,
        catalog: ProjectCatalog,
        layout: &PageLayout,
        now: Duration,
    ) -> (Self, Vec<DomOp>) {
        let mut clock = DeterministicClock::new();
        clock.set(now);
        let mut features = Features::empty();
        let mut ops = Vec::new();

        let nav = (layout.nav || layout.anchors).then(NavMenu::new);
        features.set(Features::NAV, layout.nav);
        features.set(Features::ANCHORS, layout.anchors);

        let fade_in = (layout.fade_in > 0).then(|| {
            let mut reveal = RevealOnce::new(
                config.reveal.fade_threshold,
                FadeIn {
                    offset_px: config.reveal.fade_offset_px,
                    duration: config.reveal.fade_duration(),
                },
            );
            for i in 0..layout.fade_in {
                ops.extend(reveal.enroll(Target::FadeIn(i)));
            }
            features |= Features::FADE_IN;
            reveal
        });

        let timeline = (layout.timeline > 0).then(|| {
            let mut reveal =
                RevealOnce::new(config.reveal.timeline_threshold, ClassReveal { class: "visible" });
            for i in 0..layout.timeline {
                ops.extend(reveal.enroll(Target::Timeline(i)));
            }
            features |= Features::TIMELINE;
            reveal
        });

        let parallax = layout.hero_layers.as_ref().map(|speeds| {
            let mut parallax = Parallax::new(config.parallax.clone());
            for (i, speed) in speeds.iter().enumerate() {
                parallax.add_layer(Target::HeroLayer(i), speed);
            }
            features |= Features::PARALLAX;
            parallax
        });

        let dock = layout.dock_icons.filter(|n| *n > 0).map(|n| {
            features |= Features::DOCK;
            Dock::new(config.dock.clone(), n)
        });

        let carousel = layout.carousel.then(|| {
            features |= Features::CAROUSEL;
            Carousel::new(config.carousel.clone())
        });

        let modal = layout.modal.then(|| {
            features |= Features::MODAL;
            ModalController::new(catalog)
        });

        let typewriter = (layout.typewriter && !config.typewriter.phrases.is_empty()).then(|| {
            let mut tw = Typewriter::new(config.typewriter.clone());
            ops.extend(tw.start(now));
            features |= Features::TYPEWRITER;
            tw
        });

        let stagger = layout.stagger_text.as_deref().map(|text| {
            let (stagger, init) = StaggeredText::new(
                text,
                config.stagger.word_delay(),
                config.reveal.words_threshold,
            );
            ops.extend(init);
            features |= Features::STAGGER;
            stagger
        });

        tracing::info!(features = ?features, "page wired");
        let page = Self {
            clock,
            features,
            nav,
            fade_in,
            timeline,
            parallax,
            dock,
            carousel,
            modal,
            typewriter,
            stagger,
        };
        (page, ops)
    }

    #[must_use]
    pub const fn features(&self) -> Features {
        self.features
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Modal state, or `Closed` when the page has no modal.
    #[must_use]
    pub fn modal_state(&self) -> ModalState {
        self.modal
            .as_ref()
            .map_or(ModalState::Closed, |m| m.state().clone())
    }

    #[must_use]
    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    #[must_use]
    pub fn parallax(&self) -> Option<&Parallax> {
        self.parallax.as_ref()
    }

    #[must_use]
    pub fn dock(&self) -> Option<&Dock> {
        self.dock.as_ref()
    }

    #[must_use]
    pub fn stagger(&self) -> Option<&StaggeredText> {
        self.stagger.as_ref()
    }

    /// Record host time without running timers.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Route one event at the current host time.
    pub fn handle(&mut self, event: PageEvent) -> PageUpdate {
        let now = self.clock.now();
        match event {
            PageEvent::NavToggle => match (&mut self.nav, self.features.contains(Features::NAV)) {
                (Some(nav), true) => PageUpdate::ops(nav.toggle()),
                _ => PageUpdate::default(),
            },
            PageEvent::Anchor { section } => self
                .nav
                .as_mut()
                .map(|nav| PageUpdate::ops(nav.follow_anchor(section.as_deref())))
                .unwrap_or_default(),
            PageEvent::Intersections { observer, entries } => {
                self.on_intersections(observer, &entries)
            }
            PageEvent::HeroEnter => self.with_parallax(Parallax::pointer_enter),
            PageEvent::HeroMove { page, viewport } => {
                self.with_parallax(|p| p.pointer_move(page, viewport, now))
            }
            PageEvent::HeroLeave => self.with_parallax(Parallax::pointer_leave),
            PageEvent::DockEnter => self.with_dock(Dock::pointer_enter),
            PageEvent::DockMove { pointer_x, centers } => {
                self.with_dock(|d| d.pointer_move(pointer_x, &centers, now))
            }
            PageEvent::DockLeave => self.with_dock(|d| d.pointer_leave(now)),
            PageEvent::Carousel {
                direction,
                card_width,
            } => self
                .carousel
                .as_ref()
                .map(|c| PageUpdate::ops(vec![c.step(direction, card_width)]))
                .unwrap_or_default(),
            PageEvent::Modal(click) => self
                .modal
                .as_mut()
                .map(|m| PageUpdate::ops(m.on_click(click)))
                .unwrap_or_default(),
            PageEvent::Key(key) => self
                .modal
                .as_mut()
                .map(|m| PageUpdate::ops(m.on_key(&key)))
                .unwrap_or_default(),
            PageEvent::AnimationFrame => self
                .typewriter
                .as_mut()
                .map(|tw| PageUpdate::ops(tw.animation_frame()))
                .unwrap_or_default(),
        }
    }

    fn on_intersections(&mut self, observer: ObserverKind, entries: &[Intersection]) -> PageUpdate {
        let outcome = match observer {
            ObserverKind::FadeIn => self.fade_in.as_mut().map(|r| r.on_intersections(entries)),
            ObserverKind::Timeline => self.timeline.as_mut().map(|r| r.on_intersections(entries)),
            ObserverKind::Stagger => self
                .stagger
                .as_mut()
                .map(|s| s.reveal_mut().on_intersections(entries)),
        };
        let Some(outcome) = outcome else {
            return PageUpdate::default();
        };
        PageUpdate {
            ops: outcome.ops,
            unobserve: outcome
                .unobserve
                .into_iter()
                .map(|t| (observer, t))
                .collect(),
        }
    }

    fn with_parallax(&mut self, f: impl FnOnce(&mut Parallax) -> Vec<DomOp>) -> PageUpdate {
        self.parallax
            .as_mut()
            .map(|p| PageUpdate::ops(f(p)))
            .unwrap_or_default()
    }

    fn with_dock(&mut self, f: impl FnOnce(&mut Dock) -> Vec<DomOp>) -> PageUpdate {
        self.dock
            .as_mut()
            .map(|d| PageUpdate::ops(f(d)))
            .unwrap_or_default()
    }

    /// Earliest host time at which [`advance`](Self::advance) has work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        earliest(
            self.dock.as_ref().and_then(Dock::next_deadline),
            self.typewriter.as_ref().and_then(Typewriter::next_deadline),
        )
    }

    #[must_use]
    pub fn needs_animation_frame(&self) -> bool {
        self.typewriter
            .as_ref()
            .is_some_and(Typewriter::needs_animation_frame)
    }

    /// Move host time to `now` and run every timer due.
    pub fn advance(&mut self, now: Duration) -> Vec<DomOp> {
        self.clock.set(now);
        let now = self.clock.now();
        let mut ops = Vec::new();
        if let Some(dock) = &mut self.dock {
            ops.extend(dock.advance(now));
        }
        if let Some(tw) = &mut self.typewriter {
            ops.extend(tw.advance(now));
        }
        ops
    }

    /// Restart the typewriter from its first phrase.
    pub fn start_typewriter(&mut self) -> Vec<DomOp> {
        let now = self.clock.now();
        self.typewriter
            .as_mut()
            .map(|tw| tw.start(now))
            .unwrap_or_default()
    }

    /// Cancel the typewriter's timers.
    pub fn stop_typewriter(&mut self) -> Vec<DomOp> {
        self.typewriter
            .as_mut()
            .map(Typewriter::stop)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::builtin().expect("builtin catalog")
    }

    #[test]
    fn empty_layout_wires_nothing() {
        let (page, ops) = Page::new(
            &FolioConfig::default(),
            catalog(),
            &PageLayout::default(),
            Duration::ZERO,
        );
        assert!(ops.is_empty());
        assert_eq!(page.features(), Features::empty());
        assert_eq!(page.next_deadline(), None);
    }

    #[test]
    fn events_for_missing_features_are_ignored() {
        let (mut page, _) = Page::new(
            &FolioConfig::default(),
            catalog(),
            &PageLayout::default(),
            Duration::ZERO,
        );
        for event in [
            PageEvent::NavToggle,
            PageEvent::HeroLeave,
            PageEvent::DockLeave,
            PageEvent::Modal(ModalClick::Card("finance".into())),
            PageEvent::Key("Escape".into()),
            PageEvent::AnimationFrame,
        ] {
            assert_eq!(page.handle(event), PageUpdate::default());
        }
        assert_eq!(page.modal_state(), ModalState::Closed);
    }

    #[test]
    fn anchors_without_toggle_still_scroll() {
        let layout = PageLayout {
            anchors: true,
            ..PageLayout::default()
        };
        let (mut page, _) = Page::new(&FolioConfig::default(), catalog(), &layout, Duration::ZERO);
        assert!(page.handle(PageEvent::NavToggle).ops.is_empty());
        let update = page.handle(PageEvent::Anchor {
            section: Some("projects".into()),
        });
        assert_eq!(update.ops.len(), 1);
    }

    #[test]
    fn unobserve_is_tagged_with_its_observer() {
        let layout = PageLayout {
            timeline: 2,
            ..PageLayout::default()
        };
        let (mut page, _) = Page::new(&FolioConfig::default(), catalog(), &layout, Duration::ZERO);
        let update = page.handle(PageEvent::Intersections {
            observer: ObserverKind::Timeline,
            entries: vec![Intersection::new(Target::Timeline(1), 0.3, true)],
        });
        assert_eq!(
            update.unobserve,
            vec![(ObserverKind::Timeline, Target::Timeline(1))]
        );
        // The fade-in observer does not exist on this page.
        let update = page.handle(PageEvent::Intersections {
            observer: ObserverKind::FadeIn,
            entries: vec![Intersection::new(Target::FadeIn(0), 1.0, true)],
        });
        assert_eq!(update, PageUpdate::default());
    }

    #[test]
    fn dock_and_typewriter_deadlines_merge() {
        let layout = PageLayout {
            dock_icons: Some(3),
            typewriter: true,
            ..PageLayout::default()
        };
        let (mut page, _) = Page::new(&FolioConfig::default(), catalog(), &layout, Duration::ZERO);
        assert_eq!(page.next_deadline(), Some(Duration::from_secs(3)));
        page.set_time(Duration::from_millis(100));
        page.handle(PageEvent::DockLeave);
        assert_eq!(page.next_deadline(), Some(Duration::from_millis(400)));
        let ops = page.advance(Duration::from_millis(400));
        assert_eq!(ops.len(), 3);
        assert_eq!(page.next_deadline(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn stop_and_start_typewriter() {
        let layout = PageLayout {
            typewriter: true,
            ..PageLayout::default()
        };
        let (mut page, _) = Page::new(&FolioConfig::default(), catalog(), &layout, Duration::ZERO);
        page.stop_typewriter();
        assert_eq!(page.next_deadline(), None);
        page.set_time(Duration::from_secs(10));
        assert_eq!(page.start_typewriter().len(), 3);
        assert_eq!(page.next_deadline(), Some(Duration::from_secs(13)));
    }
}
