//! Shared configuration loader for the zim tools.
//!
//! `defaults/zim.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and
//! command line settings on top of those defaults via [`Loader`] before deserializing
//! into [`ZimConfig`], then turn it into the option records the parser and dumpers take.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use zim_babel::{DocumentType, DumpOptions, LinkHeuristics, ParseOptions};

const DEFAULT_TOML: &str = include_str!("../defaults/zim.default.toml");

/// Top-level configuration consumed by zim applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ZimConfig {
    pub parsing: ParsingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub legacy_indented_verbatim: bool,
    pub links: LinkHeuristics,
}

/// Knobs shared by every dumper. Each format reads the ones that apply to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    pub document_type: DocumentType,
    pub line_numbers: bool,
    pub standalone: bool,
    pub file_output: bool,
    #[serde(default)]
    pub interwiki: BTreeMap<String, String>,
}

impl ZimConfig {
    /// Parse options for a page body. Callers reading page files set `file_input`.
    pub fn to_parse_options(&self) -> ParseOptions {
        ParseOptions {
            links: self.parsing.links,
            legacy_indented_verbatim: self.parsing.legacy_indented_verbatim,
            file_input: false,
        }
    }

    pub fn to_dump_options(&self) -> DumpOptions {
        DumpOptions {
            document_type: self.export.document_type,
            base_dir: self.export.base_dir.clone(),
            line_numbers: self.export.line_numbers,
            standalone: self.export.standalone,
            file_output: self.export.file_output,
            interwiki: self.export.interwiki.clone(),
        }
    }
}

/// Export settings given on the command line. `None` and `false` leave the layered
/// value alone, so a flag can switch a setting on but never off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOverrides {
    pub base_dir: Option<String>,
    pub document_type: Option<String>,
    pub standalone: bool,
    pub line_numbers: bool,
    pub file_output: bool,
}

/// Builds a [`ZimConfig`] from the embedded defaults, then user files, then overrides.
/// Later layers win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, such as a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply the export flags that were given. Document types are checked when the
    /// configuration is built.
    pub fn with_export_overrides(self, overrides: &ExportOverrides) -> Result<Self, ConfigError> {
        let mut loader = self;
        if let Some(dir) = &overrides.base_dir {
            loader = loader.set_override("export.base_dir", dir.as_str())?;
        }
        if let Some(kind) = &overrides.document_type {
            loader = loader.set_override("export.document_type", kind.as_str())?;
        }
        for (set, key) in [
            (overrides.standalone, "export.standalone"),
            (overrides.line_numbers, "export.line_numbers"),
            (overrides.file_output, "export.file_output"),
        ] {
            if set {
                loader = loader.set_override(key, true)?;
            }
        }
        Ok(loader)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ZimConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ZimConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.parsing.legacy_indented_verbatim);
        assert_eq!(config.parsing.links, LinkHeuristics::default());
        assert_eq!(config.export.document_type, DocumentType::Report);
        assert_eq!(config.export.base_dir, None);
        assert!(config.export.interwiki.contains_key("wp"));
    }

    #[test]
    fn defaults_match_option_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.to_parse_options(), ParseOptions::default());

        let dump = config.to_dump_options();
        assert_eq!(dump.document_type, DocumentType::Report);
        assert!(!dump.standalone);
        assert!(!dump.line_numbers);
        assert!(!dump.file_output);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("export.document_type", "book")
            .expect("override to apply")
            .set_override("export.standalone", true)
            .expect("override to apply")
            .set_override("parsing.links.camel_case", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.export.document_type, DocumentType::Book);
        assert!(config.export.standalone);
        assert!(config.to_parse_options().links.camel_case);
        assert!(config.to_parse_options().links.urls);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[export]\nbase_dir = \"/notes\"\nline_numbers = true\n\n[export.interwiki]\ngh = \"https://github.com/{{NAME}}\""
        )
        .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let dump = config.to_dump_options();
        assert_eq!(dump.base_dir, Some(PathBuf::from("/notes")));
        assert!(dump.line_numbers);
        assert_eq!(dump.document_type, DocumentType::Report);
        assert_eq!(
            dump.interwiki.get("gh").map(String::as_str),
            Some("https://github.com/{NAME}")
        );
        assert!(dump.interwiki.contains_key("wp"));
    }

    #[test]
    fn export_overrides_switch_settings_on() {
        let overrides = ExportOverrides {
            base_dir: Some("/srv/notes".into()),
            document_type: Some("article".into()),
            line_numbers: true,
            ..ExportOverrides::default()
        };
        let dump = Loader::new()
            .set_override("export.standalone", true)
            .expect("override to apply")
            .with_export_overrides(&overrides)
            .expect("overrides to apply")
            .build()
            .expect("config to build")
            .to_dump_options();
        assert_eq!(dump.base_dir, Some(PathBuf::from("/srv/notes")));
        assert_eq!(dump.document_type, DocumentType::Article);
        assert!(dump.line_numbers);
        assert!(dump.standalone);
        assert!(!dump.file_output);
    }

    #[test]
    fn empty_export_overrides_keep_defaults() {
        let config = Loader::new()
            .with_export_overrides(&ExportOverrides::default())
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.export.document_type, DocumentType::Report);
        assert_eq!(config.export.base_dir, None);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/zim.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/zim.toml")
            .build()
            .expect("config to build");
        assert!(!config.export.standalone);
    }

    #[test]
    fn rejects_unknown_document_type() {
        let result = Loader::new()
            .set_override("export.document_type", "memoir")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
