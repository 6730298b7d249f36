// src/config.rs

//! Shim configuration
//!
//! Only two things are configurable: which delegate program runs, and which
//! package each shim queries. Mapping tables and dispatch strategies are
//! fixed. Sources, lowest precedence first:
//!
//! 1. Built-in defaults (`pkg-config`, each shim's own package)
//! 2. TOML file from `$CONFSHIM_CONFIG`, or `<config dir>/confshim/config.toml`
//! 3. `$PKG_CONFIG` for the delegate program, split on whitespace into the
//!    program and leading arguments (`PKG_CONFIG="pkg-config --static"`)
//!
//! ```toml
//! [delegate]
//! program = "/usr/bin/pkgconf"
//!
//! [shims.gpgme-config]
//! package = "gpgme"
//! ```

use crate::delegate::DEFAULT_PROGRAM;
use crate::error::{Error, Result};
use crate::shim::ShimKind;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CONFSHIM_CONFIG";

/// Environment variable overriding the delegate program
pub const PKG_CONFIG_ENV: &str = "PKG_CONFIG";

/// On-disk configuration file layout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    delegate: DelegateSection,
    #[serde(default)]
    shims: BTreeMap<String, ShimSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DelegateSection {
    program: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShimSection {
    package: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    program: String,
    program_args: Vec<String>,
    packages: HashMap<ShimKind, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            program_args: Vec::new(),
            packages: HashMap::new(),
        }
    }
}

impl Config {
    /// Delegate program name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the translated flags on every delegate call
    pub fn program_args(&self) -> &[String] {
        &self.program_args
    }

    /// Package queried by a shim
    pub fn package(&self, kind: ShimKind) -> &str {
        self.packages
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(kind.definition().default_package)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: format!("failed to read: {}", e),
        })?;
        Self::from_toml(&content, path)
    }

    /// Parse configuration from TOML text; `path` is used in error messages
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        let invalid = |message: String| Error::Config {
            path: path.to_path_buf(),
            message,
        };

        let file: ConfigFile = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let mut config = Self::default();

        if let Some(program) = file.delegate.program {
            if program.trim().is_empty() {
                return Err(invalid("delegate.program must not be empty".to_string()));
            }
            config.program = program;
            config.program_args.clear();
        }

        for (name, section) in file.shims {
            let kind: ShimKind = name
                .parse()
                .map_err(|_| invalid(format!("unknown shim '{}'", name)))?;

            if let Some(package) = section.package {
                if package.trim().is_empty() {
                    return Err(invalid(format!("shims.{}.package must not be empty", name)));
                }
                config.packages.insert(kind, package);
            }
        }

        Ok(config)
    }

    /// Apply a `$PKG_CONFIG`-style program override; empty values are ignored
    ///
    /// The value is word-split on whitespace the way autoconf expands
    /// `$PKG_CONFIG`: the first word is the program, the rest are passed
    /// ahead of the translated flags.
    pub fn with_program_override(mut self, program: Option<String>) -> Self {
        let Some(value) = program else {
            return self;
        };
        let mut words = value.split_whitespace().map(str::to_string);
        if let Some(first) = words.next() {
            debug!("Delegate program overridden: {}", value);
            self.program = first;
            self.program_args = words.collect();
        }
        self
    }

    /// Combine the configuration sources
    ///
    /// `explicit` must exist when given; `default_path` is skipped if absent.
    pub fn resolve(
        explicit: Option<PathBuf>,
        default_path: Option<PathBuf>,
        program_override: Option<String>,
    ) -> Result<Self> {
        let config = match (explicit, default_path) {
            (Some(path), _) => {
                debug!("Loading config from {}", path.display());
                Self::load(&path)?
            }
            (None, Some(path)) if path.is_file() => {
                debug!("Loading config from {}", path.display());
                Self::load(&path)?
            }
            _ => Self::default(),
        };

        Ok(config.with_program_override(program_override))
    }

    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let program = std::env::var(PKG_CONFIG_ENV).ok();
        Self::resolve(explicit, default_config_path(), program)
    }
}

/// `<user config dir>/confshim/config.toml`, if the platform has one
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("confshim").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<Config> {
        Config::from_toml(content, Path::new("test.toml"))
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.program(), "pkg-config");
        assert_eq!(config.package(ShimKind::GpgmeConfig), "gpgme");
        assert_eq!(config.package(ShimKind::GpgErrorConfig), "gpg-error");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse(
            r#"
[delegate]
program = "/usr/bin/pkgconf"

[shims.gpgme-config]
package = "gpgme-pthread"
"#,
        )
        .unwrap();

        assert_eq!(config.program(), "/usr/bin/pkgconf");
        assert_eq!(config.package(ShimKind::GpgmeConfig), "gpgme-pthread");
        assert_eq!(config.package(ShimKind::GpgErrorConfig), "gpg-error");
    }

    #[test]
    fn test_unknown_shim_rejected() {
        let err = parse("[shims.libgcrypt-config]\npackage = \"libgcrypt\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown shim 'libgcrypt-config'"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse("[delegate]\npath = \"pkgconf\"\n").is_err());
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(parse("[delegate]\nprogram = \"\"\n").is_err());
        assert!(parse("[shims.gpgme-config]\npackage = \" \"\n").is_err());
    }

    #[test]
    fn test_program_override() {
        let config = Config::default().with_program_override(Some("pkgconf".to_string()));
        assert_eq!(config.program(), "pkgconf");

        let config = Config::default().with_program_override(Some(String::new()));
        assert_eq!(config.program(), "pkg-config");

        let config = Config::default().with_program_override(None);
        assert_eq!(config.program(), "pkg-config");
        assert!(config.program_args().is_empty());
    }

    #[test]
    fn test_program_override_is_word_split() {
        let config =
            Config::default().with_program_override(Some("  pkg-config   --static ".to_string()));
        assert_eq!(config.program(), "pkg-config");
        assert_eq!(config.program_args(), ["--static"]);

        let config = Config::default().with_program_override(Some("   ".to_string()));
        assert_eq!(config.program(), "pkg-config");
        assert!(config.program_args().is_empty());
    }

    #[test]
    fn test_resolve_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[delegate]\nprogram = \"from-file\"").unwrap();

        let config = Config::resolve(Some(file.path().to_path_buf()), None, None).unwrap();
        assert_eq!(config.program(), "from-file");

        // environment wins over the file
        let config = Config::resolve(
            Some(file.path().to_path_buf()),
            None,
            Some("from-env".to_string()),
        )
        .unwrap();
        assert_eq!(config.program(), "from-env");
    }

    #[test]
    fn test_resolve_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::resolve(Some(missing), None, None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_resolve_missing_default_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("confshim").join("config.toml");
        let config = Config::resolve(None, Some(missing), None).unwrap();
        assert_eq!(config, Config::default());
    }
}
