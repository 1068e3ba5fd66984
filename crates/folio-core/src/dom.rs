#![forbid(unsafe_code)]

//! DOM mutation vocabulary.
//!
//! State machines in this crate never touch a document. They return
//! [`DomOp`] values addressed to symbolic [`Target`]s, and a [`Surface`]
//! applies them. The WASM host maps targets onto live elements; tests use
//! [`MemorySurface`], which keeps just enough element state to assert on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Symbolic handle for an element the page mutates.
///
/// Indexed variants count elements in document order within their group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Body,
    NavToggle,
    NavLinks,
    /// In-page section resolved from an anchor fragment (without `#`).
    Section(String),
    FadeIn(usize),
    Timeline(usize),
    HeroLayer(usize),
    DockIcon(usize),
    Slider,
    Modal,
    ModalTitle,
    ModalTags,
    ModalImage,
    ModalLinks,
    ModalDescription,
    TypewriterText,
    TypewriterEmoji,
    StaggerBlock,
    Word(usize),
}

/// A single visual mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp {
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    ClearStyle {
        target: Target,
        property: &'static str,
    },
    AddClass {
        target: Target,
        class: &'static str,
    },
    RemoveClass {
        target: Target,
        class: &'static str,
    },
    /// Replace the full class list.
    SetClassName { target: Target, value: String },
    SetAttribute {
        target: Target,
        name: &'static str,
        value: String,
    },
    SetText { target: Target, text: String },
    SetHtml { target: Target, html: String },
    /// Create `<tag class=class>text</tag>` under `parent` and register it as `child`.
    AppendChild {
        parent: Target,
        child: Target,
        tag: &'static str,
        class: &'static str,
        text: String,
    },
    ScrollIntoView { target: Target, smooth: bool },
    ScrollBy {
        target: Target,
        left: f64,
        smooth: bool,
    },
}

impl DomOp {
    pub fn style(target: Target, property: &'static str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property,
            value: value.into(),
        }
    }

    pub fn add_class(target: Target, class: &'static str) -> Self {
        Self::AddClass { target, class }
    }

    pub fn remove_class(target: Target, class: &'static str) -> Self {
        Self::RemoveClass { target, class }
    }

    pub fn attr(target: Target, name: &'static str, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            target,
            name,
            value: value.into(),
        }
    }

    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Self::SetText {
            target,
            text: text.into(),
        }
    }

    pub fn html(target: Target, html: impl Into<String>) -> Self {
        Self::SetHtml {
            target,
            html: html.into(),
        }
    }

    /// The element this op mutates.
    #[must_use]
    pub fn target(&self) -> &Target {
        match self {
            Self::SetStyle { target, .. }
            | Self::ClearStyle { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetClassName { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::SetText { target, .. }
            | Self::SetHtml { target, .. }
            | Self::ScrollIntoView { target, .. }
            | Self::ScrollBy { target, .. } => target,
            Self::AppendChild { parent, .. } => parent,
        }
    }
}

/// Anything that can apply [`DomOp`]s.
pub trait Surface {
    fn apply(&mut self, op: &DomOp);

    fn apply_all(&mut self, ops: &[DomOp]) {
        for op in ops {
            self.apply(op);
        }
    }
}

/// Recorded state of one element in a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub styles: BTreeMap<&'static str, String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<&'static str, String>,
    pub text: String,
    pub html: Option<String>,
    pub children: Vec<Target>,
    pub tag: Option<&'static str>,
}

/// In-memory element model.
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: HashMap<Target, ElementState>,
    scrolls: Vec<DomOp>,
    applied: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(&self, target: &Target) -> Option<&ElementState> {
        self.elements.get(target)
    }

    #[must_use]
    pub fn style(&self, target: &Target, property: &str) -> Option<&str> {
        self.elements
            .get(target)
            .and_then(|el| el.styles.get(property))
            .map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, target: &Target, class: &str) -> bool {
        self.elements
            .get(target)
            .is_some_and(|el| el.classes.contains(class))
    }

    #[must_use]
    pub fn attribute(&self, target: &Target, name: &str) -> Option<&str> {
        self.elements
            .get(target)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    #[must_use]
    pub fn text(&self, target: &Target) -> &str {
        self.elements.get(target).map_or("", |el| el.text.as_str())
    }

    #[must_use]
    pub fn html(&self, target: &Target) -> Option<&str> {
        self.elements.get(target).and_then(|el| el.html.as_deref())
    }

    /// Scroll ops in the order they were applied.
    #[must_use]
    pub fn scrolls(&self) -> &[DomOp] {
        &self.scrolls
    }

    /// Total number of ops applied so far.
    #[must_use]
    pub const fn applied(&self) -> usize {
        self.applied
    }

    fn entry(&mut self, target: &Target) -> &mut ElementState {
        self.elements.entry(target.clone()).or_default()
    }
}

impl Surface for MemorySurface {
    fn apply(&mut self, op: &DomOp) {
        self.applied += 1;
        match op {
            DomOp::SetStyle {
                target,
                property,
                value,
            } => {
                self.entry(target).styles.insert(*property, value.clone());
            }
            DomOp::ClearStyle { target, property } => {
                self.entry(target).styles.remove(property);
            }
            DomOp::AddClass { target, class } => {
                self.entry(target).classes.insert((*class).to_string());
            }
            DomOp::RemoveClass { target, class } => {
                self.entry(target).classes.remove(*class);
            }
            DomOp::SetClassName { target, value } => {
                self.entry(target).classes = value.split_whitespace().map(str::to_string).collect();
            }
            DomOp::SetAttribute {
                target,
                name,
                value,
            } => {
                self.entry(target).attributes.insert(*name, value.clone());
            }
            DomOp::SetText { target, text } => {
                let el = self.entry(target);
                el.text = text.clone();
                el.html = None;
                el.children.clear();
            }
            DomOp::SetHtml { target, html } => {
                let el = self.entry(target);
                el.html = Some(html.clone());
                el.children.clear();
            }
            DomOp::AppendChild {
                parent,
                child,
                tag,
                class,
                text,
            } => {
                self.entry(parent).children.push(child.clone());
                let el = self.entry(child);
                el.tag = Some(*tag);
                el.classes.insert((*class).to_string());
                el.text = text.clone();
            }
            DomOp::ScrollIntoView { .. } | DomOp::ScrollBy { .. } => {
                self.scrolls.push(op.clone());
            }
        }
    }
}
