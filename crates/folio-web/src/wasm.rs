#![forbid(unsafe_code)]

//! Browser binding for [`folio_core::Page`].
//!
//! Owns the only [`Surface`] that touches a live document, translates DOM
//! events into [`PageEvent`]s, and drives the page clock with a single
//! re-armed `setTimeout` plus `requestAnimationFrame` on demand.

use core::time::Duration;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::carousel::Direction;
use folio_core::modal::ModalClick;
use folio_core::nav::fragment_id;
use folio_core::parallax::{Point, Viewport};
use folio_core::reveal::Intersection;
use folio_core::{
    DomOp, FolioConfig, FolioError, ObserverKind, Page, PageEvent, PageLayout, Surface, Target,
};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, Performance,
    ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Window,
};

use crate::overrides::{load_catalog, load_config};
use crate::selectors;

type Shared = Rc<RefCell<Host>>;

thread_local! {
    static HOST: RefCell<Option<Shared>> = const { RefCell::new(None) };
}

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Some(error_fn) = error.dyn_ref::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(location) = info.location() {
                format!(
                    "folio panic at {}:{}:{}: {info}",
                    location.file(),
                    location.line(),
                    location.column()
                )
            } else {
                format!("folio panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Maps symbolic targets onto live elements.
struct DomSurface {
    document: Document,
    elements: HashMap<Target, HtmlElement>,
}

impl DomSurface {
    fn new(document: Document) -> Self {
        Self {
            document,
            elements: HashMap::new(),
        }
    }

    fn register(&mut self, target: Target, element: HtmlElement) {
        self.elements.insert(target, element);
    }

    fn resolve(&self, target: &Target) -> Option<HtmlElement> {
        if let Target::Section(id) = target {
            return self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        }
        self.elements.get(target).cloned()
    }

    fn try_apply(&mut self, op: &DomOp) -> Result<(), JsValue> {
        let Some(el) = self.resolve(op.target()) else {
            tracing::debug!(element = ?op.target(), "op for unbound element dropped");
            return Ok(());
        };
        match op {
            DomOp::SetStyle {
                property, value, ..
            } => el.style().set_property(property, value)?,
            DomOp::ClearStyle { property, .. } => {
                el.style().remove_property(property)?;
            }
            DomOp::AddClass { class, .. } => el.class_list().add_1(class)?,
            DomOp::RemoveClass { class, .. } => el.class_list().remove_1(class)?,
            DomOp::SetClassName { value, .. } => el.set_class_name(value),
            DomOp::SetAttribute { name, value, .. } => el.set_attribute(name, value)?,
            DomOp::SetText { text, .. } => el.set_text_content(Some(text.as_str())),
            DomOp::SetHtml { html, .. } => el.set_inner_html(html),
            DomOp::AppendChild {
                child,
                tag,
                class,
                text,
                ..
            } => {
                let node = self.document.create_element(tag)?;
                node.set_class_name(class);
                node.set_text_content(Some(text.as_str()));
                el.append_child(&node)?;
                if let Ok(node) = node.dyn_into::<HtmlElement>() {
                    self.register(child.clone(), node);
                }
            }
            DomOp::ScrollIntoView { smooth, .. } => {
                let options = ScrollIntoViewOptions::new();
                if *smooth {
                    options.set_behavior(ScrollBehavior::Smooth);
                }
                el.scroll_into_view_with_scroll_into_view_options(&options);
            }
            DomOp::ScrollBy { left, smooth, .. } => {
                let options = ScrollToOptions::new();
                options.set_left(*left);
                if *smooth {
                    options.set_behavior(ScrollBehavior::Smooth);
                }
                el.scroll_by_with_scroll_to_options(&options);
            }
        }
        Ok(())
    }
}

impl Surface for DomSurface {
    fn apply(&mut self, op: &DomOp) {
        if let Err(err) = self.try_apply(op) {
            tracing::warn!(element = ?op.target(), ?err, "dom op failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

struct Watched {
    observer: IntersectionObserver,
    targets: Vec<(Target, Element)>,
}

struct Host {
    window: Window,
    performance: Option<Performance>,
    page: Page,
    surface: DomSurface,
    observers: HashMap<ObserverKind, Watched>,
    on_timer: Option<Function>,
    on_frame: Option<Function>,
    /// Armed `setTimeout` handle and the deadline it was armed for.
    timer: Option<(i32, Duration)>,
    frame_pending: bool,
}

impl Host {
    fn now(&self) -> Duration {
        let ms = self
            .performance
            .as_ref()
            .map_or_else(js_sys::Date::now, Performance::now);
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }

    fn unobserve(&self, kind: ObserverKind, target: &Target) {
        let Some(watched) = self.observers.get(&kind) else {
            return;
        };
        if let Some((_, el)) = watched.targets.iter().find(|(t, _)| t == target) {
            watched.observer.unobserve(el);
        }
    }

    /// Keep exactly one timeout armed for the page's next deadline.
    fn arm_timer(&mut self) {
        let deadline = self.page.next_deadline();
        if let (Some((_, armed)), Some(due)) = (self.timer, deadline)
            && armed == due
        {
            return;
        }
        if let Some((handle, _)) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let (Some(due), Some(callback)) = (deadline, &self.on_timer) else {
            return;
        };
        // Round up so the timeout never fires before the deadline.
        let delay = due.saturating_sub(self.now()).as_micros().div_ceil(1000);
        let delay = i32::try_from(delay).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay)
        {
            Ok(handle) => self.timer = Some((handle, due)),
            Err(err) => tracing::warn!(?err, "setTimeout failed"),
        }
    }

    fn arm_frame(&mut self) {
        if self.frame_pending || !self.page.needs_animation_frame() {
            return;
        }
        let Some(callback) = &self.on_frame else {
            return;
        };
        match self.window.request_animation_frame(callback) {
            Ok(_) => self.frame_pending = true,
            Err(err) => tracing::warn!(?err, "requestAnimationFrame failed"),
        }
    }

    fn reschedule(&mut self) {
        self.arm_timer();
        self.arm_frame();
    }
}

fn with_host<R>(host: &Shared, f: impl FnOnce(&mut Host) -> R) -> Option<R> {
    match host.try_borrow_mut() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            tracing::debug!("re-entrant callback dropped");
            None
        }
    }
}

fn dispatch(host: &Shared, event: PageEvent) {
    with_host(host, |h| {
        let now = h.now();
        h.page.set_time(now);
        let update = h.page.handle(event);
        h.surface.apply_all(&update.ops);
        for (kind, target) in &update.unobserve {
            h.unobserve(*kind, target);
        }
        h.reschedule();
    });
}

fn on_timer(host: &Shared) {
    with_host(host, |h| {
        h.timer = None;
        let now = h.now();
        let ops = h.page.advance(now);
        h.surface.apply_all(&ops);
        h.reschedule();
    });
}

fn on_frame(host: &Shared) {
    let requested = with_host(host, |h| std::mem::replace(&mut h.frame_pending, false));
    if requested == Some(true) {
        dispatch(host, PageEvent::AnimationFrame);
    }
}

// ---------------------------------------------------------------------------
// Binding helpers
// ---------------------------------------------------------------------------

fn query(root: &Document, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn query_all(root: &Document, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(|list| {
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn embedded_json(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id).and_then(|el| el.text_content())
}

/// Attach `handler` for `kind` on `target` for the life of the page.
fn listen<E>(
    target: &EventTarget,
    kind: &str,
    host: &Shared,
    handler: impl Fn(&Shared, E) + 'static,
) -> Result<(), JsValue>
where
    E: JsCast + 'static,
{
    let host = Rc::clone(host);
    let callback = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(&host, event);
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Log and carry on: one feature failing to bind leaves the others working.
fn report(feature: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        let error = FolioError::Binding(feature);
        tracing::warn!(%error, js = ?err, "feature skipped");
    }
}

fn observe(
    host: &Shared,
    kind: ObserverKind,
    threshold: f64,
    targets: Vec<(Target, Element)>,
) -> Result<Watched, JsValue> {
    let shared = Rc::clone(host);
    let lookup = targets.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
        let entries: Vec<Intersection> = entries
            .iter()
            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let el = entry.target();
                lookup.iter().find(|(_, e)| *e == el).map(|(target, _)| {
                    Intersection::new(
                        target.clone(),
                        entry.intersection_ratio(),
                        entry.is_intersecting(),
                    )
                })
            })
            .collect();
        if !entries.is_empty() {
            dispatch(&shared, PageEvent::Intersections { observer: kind, entries });
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    for (_, el) in &targets {
        observer.observe(el);
    }
    Ok(Watched { observer, targets })
}

fn indexed(elements: &[HtmlElement], make: impl Fn(usize) -> Target) -> Vec<(Target, Element)> {
    elements
        .iter()
        .enumerate()
        .map(|(i, el)| (make(i), Element::from(el.clone())))
        .collect()
}

// ---------------------------------------------------------------------------
// Boot
// ---------------------------------------------------------------------------

/// Elements found during discovery, kept for listener binding.
struct Anchors {
    nav_toggle: Option<HtmlElement>,
    in_page: Vec<HtmlElement>,
    fade_in: Vec<HtmlElement>,
    timeline: Vec<HtmlElement>,
    hero: Option<HtmlElement>,
    dock: Option<HtmlElement>,
    dock_icons: Vec<HtmlElement>,
    prev: Option<HtmlElement>,
    next: Option<HtmlElement>,
    cards: Vec<HtmlElement>,
    modal: Option<HtmlElement>,
    modal_close: Option<HtmlElement>,
    stagger: Option<HtmlElement>,
}

fn discover(document: &Document, surface: &mut DomSurface) -> (PageLayout, Anchors) {
    let mut layout = PageLayout::default();

    let nav_toggle = query(document, selectors::NAV_TOGGLE);
    let nav_links = query(document, selectors::NAV_LINKS);
    if let (Some(toggle), Some(links)) = (&nav_toggle, &nav_links) {
        layout.nav = true;
        surface.register(Target::NavToggle, toggle.clone());
        surface.register(Target::NavLinks, links.clone());
    }
    let in_page = query_all(document, selectors::IN_PAGE_ANCHORS);
    layout.anchors = !in_page.is_empty();

    let fade_in = query_all(document, selectors::FADE_IN);
    for (i, el) in fade_in.iter().enumerate() {
        surface.register(Target::FadeIn(i), el.clone());
    }
    layout.fade_in = fade_in.len();

    let timeline = query_all(document, selectors::TIMELINE_ITEMS);
    for (i, el) in timeline.iter().enumerate() {
        surface.register(Target::Timeline(i), el.clone());
    }
    layout.timeline = timeline.len();

    let hero = query(document, selectors::HERO);
    if hero.is_some() {
        let layers = query_all(document, selectors::HERO_LAYERS);
        let speeds = layers
            .iter()
            .enumerate()
            .map(|(i, el)| {
                surface.register(Target::HeroLayer(i), el.clone());
                el.get_attribute(selectors::HERO_SPEED_ATTR).unwrap_or_default()
            })
            .collect();
        layout.hero_layers = Some(speeds);
    }

    let dock = query(document, selectors::DOCK);
    let dock_icons = if dock.is_some() {
        query_all(document, selectors::DOCK_ICONS)
    } else {
        Vec::new()
    };
    if dock.is_some() {
        for (i, el) in dock_icons.iter().enumerate() {
            surface.register(Target::DockIcon(i), el.clone());
        }
        layout.dock_icons = Some(dock_icons.len());
    }

    let slider = query(document, selectors::SLIDER);
    let prev = query(document, selectors::PREV_BUTTON);
    let next = query(document, selectors::NEXT_BUTTON);
    if let (Some(slider), Some(_), Some(_)) = (&slider, &prev, &next) {
        layout.carousel = true;
        surface.register(Target::Slider, slider.clone());
    }

    let cards = query_all(document, selectors::PROJECT_CARDS);
    let modal = query(document, selectors::MODAL);
    let modal_close = query(document, selectors::MODAL_CLOSE);
    if let Some(modal) = &modal {
        layout.modal = true;
        surface.register(Target::Modal, modal.clone());
        for (target, sel) in [
            (Target::ModalTitle, selectors::MODAL_TITLE),
            (Target::ModalTags, selectors::MODAL_TAGS),
            (Target::ModalImage, selectors::MODAL_IMAGE),
            (Target::ModalLinks, selectors::MODAL_LINKS),
            (Target::ModalDescription, selectors::MODAL_DESCRIPTION),
        ] {
            if let Some(el) = query(document, sel) {
                surface.register(target, el);
            }
        }
        if let Some(body) = document.body() {
            surface.register(Target::Body, body);
        }
    }

    let tw_text = query(document, selectors::TYPEWRITER_TEXT);
    let tw_emoji = query(document, selectors::TYPEWRITER_EMOJI);
    if let (Some(text), Some(emoji)) = (tw_text, tw_emoji) {
        layout.typewriter = true;
        surface.register(Target::TypewriterText, text);
        surface.register(Target::TypewriterEmoji, emoji);
    }

    let stagger = query(document, selectors::STAGGER_TEXT);
    if let Some(block) = &stagger {
        layout.stagger_text = Some(block.text_content().unwrap_or_default());
        surface.register(Target::StaggerBlock, block.clone());
    }

    let anchors = Anchors {
        nav_toggle,
        in_page,
        fade_in,
        timeline,
        hero,
        dock,
        dock_icons,
        prev,
        next,
        cards,
        modal,
        modal_close,
        stagger,
    };
    (layout, anchors)
}

fn bind_nav(host: &Shared, document: &Document, anchors: &Anchors) {
    if let Some(toggle) = &anchors.nav_toggle {
        report(
            "nav toggle",
            listen(toggle, "click", host, |host, _: Event| {
                dispatch(host, PageEvent::NavToggle);
            }),
        );
    }
    for link in &anchors.in_page {
        let document = document.clone();
        let link_el = link.clone();
        report(
            "anchor",
            listen(link, "click", host, move |host, event: Event| {
                event.prevent_default();
                let href = link_el.get_attribute("href").unwrap_or_default();
                let section = fragment_id(&href)
                    .filter(|id| document.get_element_by_id(id).is_some())
                    .map(str::to_string);
                dispatch(host, PageEvent::Anchor { section });
            }),
        );
    }
}

fn bind_parallax(host: &Shared, window: &Window, hero: &HtmlElement) -> Result<(), JsValue> {
    listen(hero, "mouseenter", host, |host, _: Event| {
        dispatch(host, PageEvent::HeroEnter);
    })?;
    let window = window.clone();
    listen(hero, "mousemove", host, move |host, event: MouseEvent| {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let viewport = Viewport::new(dim(window.inner_width()), dim(window.inner_height()));
        let page = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
        dispatch(host, PageEvent::HeroMove { page, viewport });
    })?;
    listen(hero, "mouseleave", host, |host, _: Event| {
        dispatch(host, PageEvent::HeroLeave);
    })
}

fn bind_dock(host: &Shared, deck: &HtmlElement, icons: &[HtmlElement]) -> Result<(), JsValue> {
    listen(deck, "mouseenter", host, |host, _: Event| {
        dispatch(host, PageEvent::DockEnter);
    })?;
    let icons = icons.to_vec();
    listen(deck, "mousemove", host, move |host, event: MouseEvent| {
        let centers = icons
            .iter()
            .map(|icon| {
                let rect = icon.get_bounding_client_rect();
                rect.left() + rect.width() / 2.0
            })
            .collect();
        dispatch(
            host,
            PageEvent::DockMove {
                pointer_x: f64::from(event.client_x()),
                centers,
            },
        );
    })?;
    listen(deck, "mouseleave", host, |host, _: Event| {
        dispatch(host, PageEvent::DockLeave);
    })
}

fn bind_carousel(
    host: &Shared,
    document: &Document,
    prev: &HtmlElement,
    next: &HtmlElement,
) -> Result<(), JsValue> {
    for (button, direction) in [(prev, Direction::Prev), (next, Direction::Next)] {
        let document = document.clone();
        listen(button, "click", host, move |host, _: Event| {
            let card_width = query(&document, selectors::PROJECT_CARDS)
                .map_or(0.0, |card| f64::from(card.offset_width()));
            dispatch(
                host,
                PageEvent::Carousel {
                    direction,
                    card_width,
                },
            );
        })?;
    }
    Ok(())
}

fn bind_modal(host: &Shared, document: &Document, anchors: &Anchors) -> Result<(), JsValue> {
    let Some(modal) = &anchors.modal else {
        return Ok(());
    };
    for card in &anchors.cards {
        let card_el = card.clone();
        listen(card, "click", host, move |host, _: Event| {
            if let Some(id) = card_el.get_attribute(selectors::PROJECT_ID_ATTR) {
                dispatch(host, PageEvent::Modal(ModalClick::Card(id)));
            }
        })?;
    }
    if let Some(close) = &anchors.modal_close {
        listen(close, "click", host, |host, _: Event| {
            dispatch(host, PageEvent::Modal(ModalClick::CloseButton));
        })?;
    }
    let overlay: EventTarget = modal.clone().into();
    listen(modal, "click", host, move |host, event: Event| {
        let click = if event.target().as_ref() == Some(&overlay) {
            ModalClick::Overlay
        } else {
            ModalClick::Elsewhere
        };
        dispatch(host, PageEvent::Modal(click));
    })?;
    listen(document, "keydown", host, |host, event: KeyboardEvent| {
        dispatch(host, PageEvent::Key(event.key()));
    })
}

fn bind_observers(host: &Shared, config: &FolioConfig, anchors: &Anchors) {
    let mut plans = Vec::with_capacity(3);
    if !anchors.fade_in.is_empty() {
        plans.push((
            ObserverKind::FadeIn,
            config.reveal.fade_threshold,
            indexed(&anchors.fade_in, Target::FadeIn),
        ));
    }
    if !anchors.timeline.is_empty() {
        plans.push((
            ObserverKind::Timeline,
            config.reveal.timeline_threshold,
            indexed(&anchors.timeline, Target::Timeline),
        ));
    }
    if let Some(block) = &anchors.stagger {
        plans.push((
            ObserverKind::Stagger,
            config.reveal.words_threshold,
            vec![(Target::StaggerBlock, Element::from(block.clone()))],
        ));
    }
    for (kind, threshold, targets) in plans {
        match observe(host, kind, threshold, targets) {
            Ok(watched) => {
                host.borrow_mut().observers.insert(kind, watched);
            }
            Err(err) => {
                let error = FolioError::Binding("intersection observer");
                tracing::warn!(%error, ?kind, js = ?err, "reveal skipped");
            }
        }
    }
}

fn bind_clock(host: &Shared) {
    let shared = Rc::clone(host);
    let timer = Closure::wrap(Box::new(move || on_timer(&shared)) as Box<dyn FnMut()>);
    let shared = Rc::clone(host);
    let frame = Closure::wrap(Box::new(move |_: f64| on_frame(&shared)) as Box<dyn FnMut(f64)>);
    {
        let mut h = host.borrow_mut();
        h.on_timer = Some(timer.as_ref().unchecked_ref::<Function>().clone());
        h.on_frame = Some(frame.as_ref().unchecked_ref::<Function>().clone());
    }
    timer.forget();
    frame.forget();
}

fn boot(window: &Window, document: &Document) -> Result<(), JsValue> {
    if HOST.with(|slot| slot.borrow().is_some()) {
        return Ok(());
    }

    let config = load_config(embedded_json(document, selectors::CONFIG_ID).as_deref());
    let catalog = load_catalog(embedded_json(document, selectors::PROJECT_DATA_ID).as_deref());

    let mut surface = DomSurface::new(document.clone());
    let (layout, anchors) = discover(document, &mut surface);

    let performance = window.performance();
    let now_ms = performance.as_ref().map_or(0.0, Performance::now);
    let (page, init) = Page::new(
        &config,
        catalog,
        &layout,
        Duration::from_secs_f64(now_ms.max(0.0) / 1000.0),
    );
    surface.apply_all(&init);

    let host: Shared = Rc::new(RefCell::new(Host {
        window: window.clone(),
        performance,
        page,
        surface,
        observers: HashMap::new(),
        on_timer: None,
        on_frame: None,
        timer: None,
        frame_pending: false,
    }));
    HOST.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&host)));

    bind_nav(&host, document, &anchors);
    bind_observers(&host, &config, &anchors);
    if let Some(hero) = &anchors.hero {
        report("parallax", bind_parallax(&host, window, hero));
    }
    if let Some(deck) = &anchors.dock {
        report("dock", bind_dock(&host, deck, &anchors.dock_icons));
    }
    if let (true, Some(prev), Some(next)) = (layout.carousel, &anchors.prev, &anchors.next) {
        report("carousel", bind_carousel(&host, document, prev, next));
    }
    report("modal", bind_modal(&host, document, &anchors));
    bind_clock(&host);

    let features = host.borrow().page.features();
    tracing::info!(?features, "folio bound");
    host.borrow_mut().reschedule();
    Ok(())
}

/// Module entry point: bind once the document is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    install_panic_hook();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return boot(&window, &document);
    }
    let win = window.clone();
    let doc = document.clone();
    let on_ready = Closure::wrap(Box::new(move |_: Event| {
        if let Err(err) = boot(&win, &doc) {
            console_error(&format!("folio boot failed: {err:?}"));
        }
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn current_host() -> Option<Shared> {
    HOST.with(|slot| slot.borrow().clone())
}

/// Cancel the typewriter's pending timers. The text stays as it is.
#[wasm_bindgen(js_name = stopTypewriter)]
pub fn stop_typewriter() {
    let Some(host) = current_host() else {
        return;
    };
    with_host(&host, |h| {
        let ops = h.page.stop_typewriter();
        h.surface.apply_all(&ops);
        h.reschedule();
    });
}

/// Restart the typewriter from its first phrase.
#[wasm_bindgen(js_name = startTypewriter)]
pub fn start_typewriter() {
    let Some(host) = current_host() else {
        return;
    };
    with_host(&host, |h| {
        let now = h.now();
        h.page.set_time(now);
        let ops = h.page.start_typewriter();
        h.surface.apply_all(&ops);
        h.reschedule();
    });
}
