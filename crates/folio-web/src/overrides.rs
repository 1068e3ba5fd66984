#![forbid(unsafe_code)]

//! Page-embedded data overrides.
//!
//! The page may carry JSON in `<script>` elements to replace the project
//! table or tune the interactions. Bad JSON never breaks the page: it is
//! logged and the built-in value is used.

use folio_core::{FolioConfig, ProjectCatalog};

/// Config from the embedded script text, or defaults.
#[must_use]
pub fn load_config(embedded: Option<&str>) -> FolioConfig {
    let Some(json) = embedded.map(str::trim).filter(|s| !s.is_empty()) else {
        return FolioConfig::default();
    };
    match FolioConfig::from_json(json) {
        Ok(config) => {
            tracing::debug!("using embedded config");
            config
        }
        Err(err) => {
            tracing::warn!(%err, "ignoring embedded config");
            FolioConfig::default()
        }
    }
}

/// Project table from the embedded script text, or the built-in table.
#[must_use]
pub fn load_catalog(embedded: Option<&str>) -> ProjectCatalog {
    if let Some(json) = embedded.map(str::trim).filter(|s| !s.is_empty()) {
        match ProjectCatalog::from_json(json) {
            Ok(catalog) => {
                tracing::debug!(projects = catalog.len(), "using embedded project data");
                return catalog;
            }
            Err(err) => tracing::warn!(%err, "ignoring embedded project data"),
        }
    }
    ProjectCatalog::builtin().unwrap_or_else(|err| {
        tracing::error!(%err, "built-in project data is invalid; modal disabled");
        ProjectCatalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_or_blank_uses_defaults() {
        assert_eq!(load_config(None), FolioConfig::default());
        assert_eq!(load_config(Some("  \n")), FolioConfig::default());
        assert_eq!(load_catalog(None).len(), 4);
    }

    #[test]
    fn bad_json_falls_back() {
        assert_eq!(load_config(Some("{ nope")), FolioConfig::default());
        assert_eq!(load_catalog(Some("[1, 2]")).len(), 4);
    }

    #[test]
    fn embedded_values_win() {
        let config = load_config(Some(r#"{"carousel": {"gap_px": 16}}"#));
        assert_eq!(config.carousel.gap_px, 16.0);

        let catalog = load_catalog(Some(
            r#"{"demo": {"title": "Demo", "tags": [], "description": "<p>d</p>", "links": {}}}"#,
        ));
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["demo"]);
    }
}
