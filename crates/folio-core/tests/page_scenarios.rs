//! End-to-end page scenarios driven through `Page` and `MemorySurface`.

use core::time::Duration;

use folio_core::carousel::Direction;
use folio_core::modal::{ModalClick, ModalState};
use folio_core::parallax::{Point, Viewport};
use folio_core::reveal::Intersection;
use folio_core::typewriter::TypewriterPhase;
use folio_core::{
    DomOp, Features, FolioConfig, MemorySurface, ObserverKind, Page, PageEvent, PageLayout,
    ProjectCatalog, Surface, Target,
};
use pretty_assertions::assert_eq;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn full_layout() -> PageLayout {
    PageLayout {
        nav: true,
        anchors: true,
        fade_in: 3,
        timeline: 2,
        hero_layers: Some(vec!["0.5".into(), "-0.25".into()]),
        dock_icons: Some(4),
        carousel: true,
        modal: true,
        typewriter: true,
        stagger_text: Some("Let's build something great".into()),
    }
}

fn boot(layout: &PageLayout) -> (Page, MemorySurface) {
    let catalog = ProjectCatalog::builtin().expect("builtin catalog");
    let (page, ops) = Page::new(&FolioConfig::default(), catalog, layout, Duration::ZERO);
    let mut surface = MemorySurface::new();
    surface.apply_all(&ops);
    (page, surface)
}

fn dispatch(page: &mut Page, surface: &mut MemorySurface, event: PageEvent) {
    let update = page.handle(event);
    surface.apply_all(&update.ops);
}

#[test]
fn full_layout_wires_every_feature() {
    let (page, _) = boot(&full_layout());
    assert_eq!(page.features(), Features::all());
}

#[test]
fn fade_in_card_reveals_once_on_first_intersection() {
    let (mut page, mut surface) = boot(&full_layout());
    let card = Target::FadeIn(1);
    assert_eq!(surface.style(&card, "opacity"), Some("0"));
    assert_eq!(
        surface.style(&card, "transform"),
        Some("translateY(20px)")
    );
    assert_eq!(
        surface.style(&card, "transition"),
        Some("opacity 0.6s ease-out, transform 0.6s ease-out")
    );

    // Barely visible, below the 0.1 threshold.
    let update = page.handle(PageEvent::Intersections {
        observer: ObserverKind::FadeIn,
        entries: vec![Intersection::new(card.clone(), 0.05, true)],
    });
    assert!(update.ops.is_empty());

    let update = page.handle(PageEvent::Intersections {
        observer: ObserverKind::FadeIn,
        entries: vec![Intersection::new(card.clone(), 0.4, true)],
    });
    surface.apply_all(&update.ops);
    assert_eq!(update.unobserve, vec![(ObserverKind::FadeIn, card.clone())]);
    assert_eq!(surface.style(&card, "opacity"), Some("1"));
    assert_eq!(surface.style(&card, "transform"), Some("translateY(0)"));

    // Scrolling away and back changes nothing.
    let applied = surface.applied();
    let update = page.handle(PageEvent::Intersections {
        observer: ObserverKind::FadeIn,
        entries: vec![
            Intersection::new(card.clone(), 0.0, false),
            Intersection::new(card, 1.0, true),
        ],
    });
    surface.apply_all(&update.ops);
    assert_eq!(surface.applied(), applied);

    // Other cards are untouched.
    assert_eq!(surface.style(&Target::FadeIn(0), "opacity"), Some("0"));
}

#[test]
fn timeline_items_get_visible_class() {
    let (mut page, mut surface) = boot(&full_layout());
    assert!(surface.element(&Target::Timeline(0)).is_none());
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Intersections {
            observer: ObserverKind::Timeline,
            entries: vec![Intersection::new(Target::Timeline(0), 0.25, true)],
        },
    );
    assert!(surface.has_class(&Target::Timeline(0), "visible"));
    assert!(!surface.has_class(&Target::Timeline(1), "visible"));
}

#[test]
fn nav_toggle_then_anchor_closes_menu() {
    let (mut page, mut surface) = boot(&full_layout());
    dispatch(&mut page, &mut surface, PageEvent::NavToggle);
    assert!(surface.has_class(&Target::NavLinks, "active"));

    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Anchor {
            section: Some("experience".into()),
        },
    );
    assert!(!surface.has_class(&Target::NavLinks, "active"));
    assert_eq!(
        surface.attribute(&Target::NavToggle, "aria-expanded"),
        Some("false")
    );
    assert_eq!(
        surface.scrolls().last(),
        Some(&DomOp::ScrollIntoView {
            target: Target::Section("experience".into()),
            smooth: true,
        })
    );
}

#[test]
fn parallax_follows_pointer_and_resets_to_zero() {
    let (mut page, mut surface) = boot(&full_layout());
    dispatch(&mut page, &mut surface, PageEvent::HeroEnter);
    assert_eq!(
        surface.style(&Target::HeroLayer(0), "transition"),
        Some("none")
    );

    // Base displacement (1000 - 0) / 100 = 10, (600 - 0) / 100 = 6.
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::HeroMove {
            page: Point::new(0.0, 0.0),
            viewport: Viewport::new(1000.0, 600.0),
        },
    );
    assert_eq!(
        surface.style(&Target::HeroLayer(0), "transform"),
        Some("translateX(250px) translateY(150px)")
    );
    assert_eq!(
        surface.style(&Target::HeroLayer(1), "transform"),
        Some("translateX(-125px) translateY(-75px)")
    );

    dispatch(&mut page, &mut surface, PageEvent::HeroLeave);
    for i in 0..2 {
        assert_eq!(
            surface.style(&Target::HeroLayer(i), "transform"),
            Some("translateX(0px) translateY(0px)")
        );
        assert_eq!(
            surface.style(&Target::HeroLayer(i), "transition"),
            Some("transform 0.5s ease-out")
        );
    }
}

#[test]
fn dock_magnifies_then_settles_after_leave() {
    let (mut page, mut surface) = boot(&full_layout());
    let centers = vec![100.0, 200.0, 300.0, 400.0];
    dispatch(&mut page, &mut surface, PageEvent::DockEnter);
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::DockMove {
            pointer_x: 100.0,
            centers,
        },
    );
    assert_eq!(
        surface.style(&Target::DockIcon(0), "width"),
        Some("5.4rem")
    );
    assert_eq!(surface.style(&Target::DockIcon(3), "width"), Some("3rem"));
    let dock = page.dock().expect("dock wired");
    assert_eq!(dock.icon_count(), 4);
    assert_eq!(dock.scales()[0], 1.8);

    page.set_time(ms(1000));
    dispatch(&mut page, &mut surface, PageEvent::DockLeave);
    assert_eq!(surface.style(&Target::DockIcon(0), "width"), Some("3rem"));
    assert_eq!(
        surface.style(&Target::DockIcon(0), "transition"),
        Some("width 0.3s ease, height 0.3s ease")
    );
    assert_eq!(page.next_deadline(), Some(ms(1300)));

    surface.apply_all(&page.advance(ms(1300)));
    assert_eq!(
        surface.style(&Target::DockIcon(2), "transition"),
        Some("color 0.2s ease, background-color 0.2s ease")
    );
}

#[test]
fn carousel_scrolls_by_card_plus_gap() {
    let (mut page, mut surface) = boot(&full_layout());
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Carousel {
            direction: Direction::Next,
            card_width: 300.0,
        },
    );
    assert_eq!(
        surface.scrolls(),
        &[DomOp::ScrollBy {
            target: Target::Slider,
            left: 332.0,
            smooth: true,
        }]
    );
}

#[test]
fn modal_open_and_close_restore_scroll() {
    let (mut page, mut surface) = boot(&full_layout());
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Modal(ModalClick::Card("finance".into())),
    );
    assert_eq!(page.modal_state().project_id(), Some("finance"));
    assert_eq!(surface.text(&Target::ModalTitle), "Finance Tracker App");
    assert!(surface.has_class(&Target::Modal, "active"));
    assert_eq!(surface.style(&Target::Body, "overflow"), Some("hidden"));

    dispatch(&mut page, &mut surface, PageEvent::Key("Enter".into()));
    assert!(page.modal_state().is_open());

    dispatch(&mut page, &mut surface, PageEvent::Key("Escape".into()));
    assert_eq!(page.modal_state(), ModalState::Closed);
    assert!(!surface.has_class(&Target::Modal, "active"));
    assert_eq!(surface.style(&Target::Body, "overflow"), None);
}

#[test]
fn modal_ignores_unknown_project() {
    let (mut page, mut surface) = boot(&full_layout());
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Modal(ModalClick::Card("does-not-exist".into())),
    );
    assert_eq!(page.modal_state(), ModalState::Closed);
    assert!(!surface.has_class(&Target::Modal, "active"));
}

#[test]
fn modal_overlay_closes_but_content_does_not() {
    let (mut page, mut surface) = boot(&full_layout());
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Modal(ModalClick::Card("social".into())),
    );
    dispatch(&mut page, &mut surface, PageEvent::Modal(ModalClick::Elsewhere));
    assert!(page.modal_state().is_open());
    dispatch(&mut page, &mut surface, PageEvent::Modal(ModalClick::Overlay));
    assert!(!page.modal_state().is_open());
}

#[test]
fn typewriter_cycles_to_second_phrase() {
    let (mut page, mut surface) = boot(&full_layout());
    let first = "Hello, I'm Devin De Silva";
    assert_eq!(surface.text(&Target::TypewriterText), first);
    assert_eq!(surface.text(&Target::TypewriterEmoji), "👋");

    let tw = page.typewriter().expect("typewriter wired");
    let cursor = tw.cursor();
    assert_eq!(
        (cursor.phrase_index, cursor.char_index, cursor.is_deleting),
        (0, first.len(), false)
    );

    surface.apply_all(&page.advance(ms(3000)));
    let tw = page.typewriter().expect("typewriter wired");
    assert!(tw.cursor().is_deleting);
    assert_eq!(tw.phase(), TypewriterPhase::Deleting);

    let done = ms(3000 + 50 * first.len() as u64);
    surface.apply_all(&page.advance(done));
    let cursor = page.typewriter().expect("typewriter wired").cursor();
    assert_eq!((cursor.phrase_index, cursor.char_index), (1, 0));
    assert_eq!(surface.text(&Target::TypewriterText), "");
    assert!(surface.has_class(&Target::TypewriterEmoji, "switching"));

    // Emoji swaps after the fade, then settles on the next frame.
    surface.apply_all(&page.advance(done + ms(300)));
    assert_eq!(surface.text(&Target::TypewriterEmoji), "💻");
    assert!(page.needs_animation_frame());
    dispatch(&mut page, &mut surface, PageEvent::AnimationFrame);
    assert!(!surface.has_class(&Target::TypewriterEmoji, "switching"));
    assert!(surface.has_class(&Target::TypewriterEmoji, "emoji-bounce"));

    // Pause after delete, then typing resumes.
    surface.apply_all(&page.advance(done + ms(500)));
    assert_eq!(surface.text(&Target::TypewriterText), "A");
}

#[test]
fn stopped_typewriter_stays_still() {
    let (mut page, mut surface) = boot(&full_layout());
    surface.apply_all(&page.stop_typewriter());
    assert_eq!(page.next_deadline(), None);
    assert!(page.advance(ms(60_000)).is_empty());
    assert_eq!(
        surface.text(&Target::TypewriterText),
        "Hello, I'm Devin De Silva"
    );
}

#[test]
fn stagger_words_are_revealed_together() {
    let (mut page, mut surface) = boot(&full_layout());
    let words = page.stagger().expect("stagger wired").words().len();
    assert_eq!(words, 4);
    assert_eq!(
        surface.style(&Target::Word(3), "animation-delay"),
        Some("0.3s")
    );
    let update = page.handle(PageEvent::Intersections {
        observer: ObserverKind::Stagger,
        entries: vec![Intersection::new(Target::StaggerBlock, 0.5, true)],
    });
    surface.apply_all(&update.ops);
    for i in 0..words {
        assert!(surface.has_class(&Target::Word(i), "visible"));
    }
    assert_eq!(
        update.unobserve,
        vec![(ObserverKind::Stagger, Target::StaggerBlock)]
    );
}

#[test]
fn features_are_independent() {
    let layout = PageLayout {
        modal: true,
        ..PageLayout::default()
    };
    let (mut page, mut surface) = boot(&layout);
    assert_eq!(page.features(), Features::MODAL);
    dispatch(&mut page, &mut surface, PageEvent::HeroLeave);
    dispatch(
        &mut page,
        &mut surface,
        PageEvent::Modal(ModalClick::Card("health".into())),
    );
    assert!(page.modal_state().is_open());
    assert!(surface.element(&Target::HeroLayer(0)).is_none());
}
