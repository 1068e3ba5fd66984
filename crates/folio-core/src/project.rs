#![forbid(unsafe_code)]

//! Static project table backing the detail modal.
//!
//! The table is a JSON object keyed by project id. The shipped table is
//! embedded at build time; a host page may supply its own copy.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FolioError;

const BUILTIN_PROJECTS: &str = include_str!("../data/projects.json");

/// External platform a project links out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Github,
    PlayStore,
    AppStore,
}

impl Platform {
    /// Render order of link buttons.
    pub const ALL: [Self; 3] = [Self::Github, Self::PlayStore, Self::AppStore];

    /// Visible button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::PlayStore => "Play Store",
            Self::AppStore => "App Store",
        }
    }

    #[must_use]
    pub const fn aria_label(self) -> &'static str {
        match self {
            Self::Github => "View Source on GitHub",
            Self::PlayStore => "Download on Play Store",
            Self::AppStore => "Download on App Store",
        }
    }

    /// SVG path data for the 24×24 button icon.
    #[must_use]
    pub const fn icon_path(self) -> &'static str {
        match self {
            Self::Github => {
                "M12 0c-6.626 0-12 5.373-12 12 0 5.302 3.438 9.8 8.207 11.387.599.111.793-.261.793-.577v-2.234c-3.338.726-4.033-1.416-4.033-1.416-.546-1.387-1.333-1.756-1.333-1.756-1.089-.745.083-.729.083-.729 1.205.084 1.839 1.237 1.839 1.237 1.07 1.834 2.807 1.304 3.492.997.107-.775.418-1.305.762-1.604-2.665-.305-5.467-1.334-5.467-5.931 0-1.311.469-2.381 1.236-3.221-.124-.303-.535-1.524.117-3.176 0 0 1.008-.322 3.301 1.23.957-.266 1.983-.399 3.003-.404 1.02.005 2.047.138 3.006.404 2.291-1.552 3.297-1.23 3.297-1.23.653 1.653.242 2.874.118 3.176.77.84 1.235 1.911 1.235 3.221 0 4.609-2.807 5.624-5.479 5.921.43.372.823 1.102.823 2.222v3.293c0 .319.192.694.801.576 4.765-1.589 8.199-6.086 8.199-11.386 0-6.627-5.373-12-12-12z"
            }
            Self::PlayStore => {
                "M3.609 1.814L13.792 12 3.61 22.186a.996.996 0 0 1-.61-.92V2.734a.996.996 0 0 1 .609-.92zm11.565 11.564l1.848 1.848-6.9 3.978-2.614-2.614 7.666-3.212zm-4.32-4.32L8.24 6.444l6.9 3.979-1.848 1.847-2.438-3.212zm11.234.66l-4.524 2.611L15.93 12l1.634-1.634 4.524 2.61a.995.995 0 0 1 .001 1.699z"
            }
            Self::AppStore => {
                "M18.71 19.5c-.83 1.24-1.71 2.45-3.05 2.47-1.34.03-1.77-.79-3.29-.79-1.53 0-2 .77-3.27.82-1.31.05-2.3-1.32-3.14-2.53C4.25 17 2.94 12.45 4.7 9.39c.87-1.52 2.43-2.48 4.12-2.51 1.28-.02 2.5.87 3.29.87.78 0 2.26-1.07 3.81-.91.65.03 2.47.26 3.64 1.98-.09.06-2.17 1.28-2.15 3.81.03 3.02 2.65 4.03 2.68 4.04-.03.07-.42 1.44-1.38 2.83M13 3.5c.68-.83 1.14-1.99 1.01-3.15-1.02.05-2.29.69-3.02 1.55-.63.75-1.18 1.95-1.02 3.09 1.14.09 2.33-.64 3.03-1.49z"
            }
        }
    }
}

/// Outbound links of a project. Absent entries produce no button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playstore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appstore: Option<String>,
}

impl ProjectLinks {
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&str> {
        let url = match platform {
            Platform::Github => &self.github,
            Platform::PlayStore => &self.playstore,
            Platform::AppStore => &self.appstore,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }

    /// Populated links in render order.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, &str)> + '_ {
        Platform::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|url| (p, url)))
    }
}

/// One entry of the project table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Filled from the table key.
    #[serde(skip)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_placeholder: bool,
    #[serde(default)]
    pub placeholder_text: Option<String>,
    /// Trusted markup, rendered verbatim.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: ProjectLinks,
}

fn non_empty<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(de)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Read-only id → record mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    records: BTreeMap<String, ProjectRecord>,
}

impl ProjectCatalog {
    /// The table shipped with the page.
    pub fn builtin() -> Result<Self, FolioError> {
        Self::from_json(BUILTIN_PROJECTS)
    }

    /// Decode a JSON object keyed by project id.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        let mut records: BTreeMap<String, ProjectRecord> =
            serde_json::from_str(json).map_err(|e| FolioError::Catalog(e.to_string()))?;
        for (id, record) in &mut records {
            record.id.clone_from(id);
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }
}
