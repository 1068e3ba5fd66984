#![forbid(unsafe_code)]

//! Project-detail modal.
//!
//! The modal is either closed or showing one project. Opening looks the id up
//! in the [`ProjectCatalog`]; unknown ids are ignored. Content rendering is a
//! pure function of the record ([`ModalView::render`]) so it can be checked
//! without a surface.

use crate::dom::{DomOp, Target};
use crate::project::{ProjectCatalog, ProjectRecord};
use crate::style::escape_html;

/// Whether the modal is showing, and which project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(String),
}

impl ModalState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::Open(id) => Some(id),
            Self::Closed => None,
        }
    }
}

/// Where a click landed, as far as the modal cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalClick {
    /// A project card carrying `data-id`.
    Card(String),
    /// The explicit close control.
    CloseButton,
    /// The backdrop itself, not the dialog content.
    Overlay,
    /// Anywhere else, including inside the dialog content.
    Elsewhere,
}

/// Rendered content slots of the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub tags_html: String,
    pub image_html: String,
    pub links_html: String,
    pub description_html: String,
}

impl ModalView {
    #[must_use]
    pub fn render(record: &ProjectRecord) -> Self {
        let tags_html = record
            .tags
            .iter()
            .map(|tag| format!("<span>{}</span>", escape_html(tag)))
            .collect();

        let image_html = match (&record.image, record.is_placeholder) {
            (Some(src), false) => format!(
                r#"<img src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(&record.title)
            ),
            _ => placeholder_html(record.placeholder_text.as_deref().unwrap_or(&record.title)),
        };

        let links_html = record
            .links
            .iter()
            .map(|(platform, url)| {
                format!(
                    concat!(
                        r#"<a href="{url}" target="_blank" class="modal-btn btn-outline" aria-label="{aria}">"#,
                        r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="currentColor" style="margin-right: 0.5rem;">"#,
                        r#"<path d="{path}"/></svg>{label}</a>"#
                    ),
                    url = escape_html(url),
                    aria = platform.aria_label(),
                    path = platform.icon_path(),
                    label = platform.label(),
                )
            })
            .collect();

        Self {
            title: record.title.clone(),
            tags_html,
            image_html,
            links_html,
            description_html: record.description.clone(),
        }
    }

    fn into_ops(self) -> Vec<DomOp> {
        vec![
            DomOp::text(Target::ModalTitle, self.title),
            DomOp::html(Target::ModalTags, self.tags_html),
            DomOp::html(Target::ModalImage, self.image_html),
            DomOp::html(Target::ModalLinks, self.links_html),
            DomOp::html(Target::ModalDescription, self.description_html),
        ]
    }
}

fn placeholder_html(text: &str) -> String {
    format!(
        concat!(
            r#"<div class="img-placeholder" style="width: 100%; height: 100%; background: linear-gradient(135deg, var(--bg-secondary), var(--bg-card)); display: flex; align-items: center; justify-content: center;">"#,
            r#"<span style="font-size: 1.5rem; font-weight: 700; color: rgba(255,255,255,0.2);">{}</span>"#,
            "</div>"
        ),
        escape_html(text)
    )
}

/// Open/close lifecycle of the modal plus the page scroll lock.
#[derive(Debug, Clone)]
pub struct ModalController {
    catalog: ProjectCatalog,
    state: ModalState,
}

impl ModalController {
    #[must_use]
    pub fn new(catalog: ProjectCatalog) -> Self {
        Self {
            catalog,
            state: ModalState::Closed,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    /// Show project `id`. Unknown ids leave everything untouched.
    pub fn open(&mut self, id: &str) -> Vec<DomOp> {
        let Some(record) = self.catalog.get(id) else {
            tracing::debug!(id, "no project with this id; modal stays as is");
            return Vec::new();
        };
        let mut ops = ModalView::render(record).into_ops();
        ops.push(DomOp::add_class(Target::Modal, "active"));
        ops.push(DomOp::style(Target::Body, "overflow", "hidden"));
        tracing::debug!(id, "modal opened");
        self.state = ModalState::Open(id.to_string());
        ops
    }

    /// Hide the modal and release the scroll lock. No-op when closed.
    pub fn close(&mut self) -> Vec<DomOp> {
        if !self.state.is_open() {
            return Vec::new();
        }
        self.state = ModalState::Closed;
        tracing::debug!("modal closed");
        vec![
            DomOp::remove_class(Target::Modal, "active"),
            DomOp::ClearStyle {
                target: Target::Body,
                property: "overflow",
            },
        ]
    }

    pub fn on_click(&mut self, click: ModalClick) -> Vec<DomOp> {
        match click {
            ModalClick::Card(id) => self.open(&id),
            ModalClick::CloseButton | ModalClick::Overlay => self.close(),
            ModalClick::Elsewhere => Vec::new(),
        }
    }

    /// Keyboard handler; `key` is the DOM `KeyboardEvent.key` value.
    pub fn on_key(&mut self, key: &str) -> Vec<DomOp> {
        if key == "Escape" {
            self.close()
        } else {
            Vec::new()
        }
    }
}
