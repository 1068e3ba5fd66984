#![forbid(unsafe_code)]

//! Error type shared by the folio crates.

/// Errors raised while loading page data or binding to the host.
///
/// None of these are fatal to the page: callers log them and fall back to
/// built-in data or skip the affected feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// The project table could not be decoded.
    Catalog(String),
    /// The interaction config could not be decoded or failed validation.
    Config(String),
    /// A host binding (listener, observer, timer) could not be installed.
    Binding(&'static str),
}

impl core::fmt::Display for FolioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Catalog(msg) => write!(f, "project catalog: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Binding(what) => write!(f, "binding failed: {what}"),
        }
    }
}

impl std::error::Error for FolioError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_part() {
        assert_eq!(
            FolioError::Catalog("eof".into()).to_string(),
            "project catalog: eof"
        );
        assert_eq!(
            FolioError::Binding("hero mousemove").to_string(),
            "binding failed: hero mousemove"
        );
    }
}
