#![forbid(unsafe_code)]

//! DOM selector contract.
//!
//! Every element the page binds to is found through one of these. A selector
//! that matches nothing disables the feature that needs it.

pub const NAV_TOGGLE: &str = ".nav-toggle";
pub const NAV_LINKS: &str = ".nav-links";
pub const IN_PAGE_ANCHORS: &str = r##"a[href^="#"]"##;

pub const FADE_IN: &str = ".project-card, .skill-card, .about-text";
pub const TIMELINE_ITEMS: &str = ".timeline-item";

pub const HERO: &str = ".hero-section";
/// Matched anywhere in the document, not only under [`HERO`].
pub const HERO_LAYERS: &str = "[data-speed]";
pub const HERO_SPEED_ATTR: &str = "data-speed";

pub const DOCK: &str = ".social-deck";
/// Matched anywhere in the document, not only under [`DOCK`].
pub const DOCK_ICONS: &str = ".social-icon";

pub const SLIDER: &str = ".projects-slider";
pub const PREV_BUTTON: &str = ".prev-btn";
pub const NEXT_BUTTON: &str = ".next-btn";
/// Cards open the modal; the first one's width is the carousel stride.
pub const PROJECT_CARDS: &str = ".project-card";
pub const PROJECT_ID_ATTR: &str = "data-id";

pub const MODAL: &str = "#project-modal";
pub const MODAL_CLOSE: &str = ".modal-close";
pub const MODAL_TITLE: &str = "#modal-title";
pub const MODAL_TAGS: &str = "#modal-tags";
pub const MODAL_IMAGE: &str = "#modal-image-container";
pub const MODAL_LINKS: &str = "#modal-links";
pub const MODAL_DESCRIPTION: &str = "#modal-description";

pub const TYPEWRITER_TEXT: &str = "#typewriter-text";
pub const TYPEWRITER_EMOJI: &str = "#typewriter-emoji";

pub const STAGGER_TEXT: &str = ".animate-text";

/// Element id of an optional `application/json` script replacing the
/// built-in project table.
pub const PROJECT_DATA_ID: &str = "project-data";
/// Element id of an optional `application/json` script overriding
/// [`FolioConfig`](folio_core::FolioConfig) fields.
pub const CONFIG_ID: &str = "folio-config";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_selectors_match_their_ids() {
        for sel in [
            MODAL,
            MODAL_TITLE,
            MODAL_TAGS,
            MODAL_IMAGE,
            MODAL_LINKS,
            MODAL_DESCRIPTION,
            TYPEWRITER_TEXT,
            TYPEWRITER_EMOJI,
        ] {
            assert!(sel.starts_with('#'), "{sel}");
            assert!(!sel.contains(' '), "{sel}");
        }
        assert!(!PROJECT_DATA_ID.starts_with('#'));
        assert!(!CONFIG_ID.starts_with('#'));
    }

    #[test]
    fn layer_and_icon_selectors_are_not_scoped() {
        for sel in [HERO_LAYERS, DOCK_ICONS] {
            assert!(!sel.contains(' '), "{sel}");
            assert!(!sel.contains('>'), "{sel}");
        }
        assert!(!HERO_LAYERS.contains(HERO));
        assert!(!DOCK_ICONS.contains(DOCK));
    }

    #[test]
    fn anchor_selector_is_prefix_match() {
        assert_eq!(IN_PAGE_ANCHORS, "a[href^=\"#\"]");
    }
}
