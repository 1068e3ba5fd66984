#![forbid(unsafe_code)]

//! Mobile navigation menu and in-page anchors.

use crate::dom::{DomOp, Target};

const CLOSE_GLYPH: &str = "&times;";
const MENU_GLYPH: &str = "&#9776;";
/// Hamburger restored after following an anchor, sized for the closed bar.
const MENU_GLYPH_SPAN: &str = r#"<span style="font-size: 1.5rem;">&#9776;</span>"#;

/// Extract the element id from an in-page `href` (`#about` → `about`).
/// A bare `#` names nothing.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Open/closed state of the collapsible nav.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    expanded: bool,
}

impl NavMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Toggle button clicked.
    pub fn toggle(&mut self) -> Vec<DomOp> {
        self.expanded = !self.expanded;
        let (links, glyph) = if self.expanded {
            (DomOp::add_class(Target::NavLinks, "active"), CLOSE_GLYPH)
        } else {
            (DomOp::remove_class(Target::NavLinks, "active"), MENU_GLYPH)
        };
        vec![
            DomOp::attr(Target::NavToggle, "aria-expanded", self.expanded.to_string()),
            links,
            DomOp::html(Target::NavToggle, glyph),
        ]
    }

    /// In-page link clicked. `section` is the id of the element the fragment
    /// resolved to, or `None` if it resolved to nothing.
    pub fn follow_anchor(&mut self, section: Option<&str>) -> Vec<DomOp> {
        let Some(id) = section else {
            return Vec::new();
        };
        let mut ops = Vec::with_capacity(4);
        if self.expanded {
            self.expanded = false;
            ops.push(DomOp::remove_class(Target::NavLinks, "active"));
            ops.push(DomOp::attr(Target::NavToggle, "aria-expanded", "false"));
            ops.push(DomOp::html(Target::NavToggle, MENU_GLYPH_SPAN));
        }
        ops.push(DomOp::ScrollIntoView {
            target: Target::Section(id.to_string()),
            smooth: true,
        });
        ops
    }
}
