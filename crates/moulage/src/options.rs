//! Transform options.

use std::path::Path;

use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

/// Build mode, decided once per transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Keep runtime prop types and inject component names.
    #[default]
    Development,
    /// Collapse props to a name list and skip name injection.
    Production,
}

impl BuildMode {
    /// Map a `NODE_ENV` value. Anything but `"production"` is development.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    #[inline]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Macro transform options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroOptions {
    /// Build mode.
    #[serde(default)]
    pub mode: BuildMode,

    /// Path of the file being transformed. Drives the source type and the
    /// name of default-exported components.
    #[serde(default)]
    pub filename: Option<String>,

    /// Quote injected strings with single quotes.
    #[serde(default)]
    pub single_quote: bool,

    /// Exact module specifiers treated as the macro module. When empty, any
    /// specifier ending in `/macro` or `.macro` qualifies.
    #[serde(default)]
    pub import_sources: Vec<String>,
}

impl MacroOptions {
    pub fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_single_quote(mut self, single_quote: bool) -> Self {
        self.single_quote = single_quote;
        self
    }

    pub fn with_import_source(mut self, source: impl Into<String>) -> Self {
        self.import_sources.push(source.into());
        self
    }

    /// Source type used to parse the input. Defaults to TSX.
    pub fn source_type(&self) -> SourceType {
        self.filename
            .as_deref()
            .and_then(|filename| SourceType::from_path(filename).ok())
            .unwrap_or_else(SourceType::tsx)
    }

    /// File name without directory and extension.
    pub fn file_stem(&self) -> Option<&str> {
        let filename = self.filename.as_deref()?;
        Path::new(filename).file_stem()?.to_str()
    }

    /// Whether `specifier` names the macro module.
    pub fn is_macro_source(&self, specifier: &str) -> bool {
        if !self.import_sources.is_empty() {
            return self.import_sources.iter().any(|source| source == specifier);
        }

        let trimmed = specifier
            .strip_suffix(".cjs")
            .or_else(|| specifier.strip_suffix(".js"))
            .unwrap_or(specifier);
        trimmed.ends_with("/macro") || trimmed.ends_with(".macro")
    }

    /// Cheap pre-parse check. `false` means no macro import can be present.
    pub fn may_import_macros(&self, source: &str) -> bool {
        let haystack = source.as_bytes();
        if self.import_sources.is_empty() {
            return memchr::memmem::find(haystack, b"macro").is_some();
        }
        self.import_sources
            .iter()
            .any(|needle| memchr::memmem::find(haystack, needle.as_bytes()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mode_from_node_env() {
        assert_eq!(
            BuildMode::from_node_env(Some("production")),
            BuildMode::Production
        );
        assert_eq!(
            BuildMode::from_node_env(Some("development")),
            BuildMode::Development
        );
        assert_eq!(BuildMode::from_node_env(Some("test")), BuildMode::Development);
        assert_eq!(BuildMode::from_node_env(None), BuildMode::Development);
    }

    #[test]
    fn test_macro_source_convention() {
        let options = MacroOptions::default();
        assert!(options.is_macro_source("vue-jsx.macro"));
        assert!(options.is_macro_source("./lib/macro"));
        assert!(options.is_macro_source("vue-jsx.macro.js"));
        assert!(options.is_macro_source("pkg/macro.cjs"));
        assert!(!options.is_macro_source("vue"));
        assert!(!options.is_macro_source("macro"));
        assert!(!options.is_macro_source("./macros"));
        assert!(!options.is_macro_source("pkg/macro.ts"));
    }

    #[test]
    fn test_explicit_import_sources() {
        let options = MacroOptions::default().with_import_source("@app/vue-macros");
        assert!(options.is_macro_source("@app/vue-macros"));
        assert!(!options.is_macro_source("vue-jsx.macro"));
        assert!(options.may_import_macros("import { component } from '@app/vue-macros'"));
        assert!(!options.may_import_macros("import { component } from 'vue-jsx.macro'"));
    }

    #[test]
    fn test_source_type_from_filename() {
        assert!(MacroOptions::default().source_type().is_typescript());
        assert!(MacroOptions::default().source_type().is_jsx());

        let js = MacroOptions::default().with_filename("src/Widget.jsx");
        assert!(!js.source_type().is_typescript());
        assert!(js.source_type().is_jsx());
    }

    #[test]
    fn test_file_stem() {
        let options = MacroOptions::default().with_filename("src/components/widget.jsx");
        assert_eq!(options.file_stem(), Some("widget"));
        assert_eq!(MacroOptions::default().file_stem(), None);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: MacroOptions = serde_json::from_str(
            r#"{ "mode": "production", "singleQuote": true, "importSources": ["x.macro"] }"#,
        )
        .unwrap();
        assert_eq!(options.mode, BuildMode::Production);
        assert!(options.single_quote);
        assert_eq!(options.import_sources, vec!["x.macro".to_string()]);
        assert_eq!(options.filename, None);

        let defaults: MacroOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults.mode, BuildMode::Development);
        assert!(!defaults.single_quote);
    }
}
