// src/config.rs
use crate::error::AppError;
use crate::types::{Namespace, ValidationError};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable naming the namespace source file when `--config` is absent.
pub const SOURCE_FILE_ENV: &str = "PRELOADER_SOURCE_FILE";

/// Which page, per namespace, new pages are preloaded from.
///
/// Read-only once built. Namespaces without an entry get no preload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceSourceMap {
    sources: BTreeMap<Namespace, String>,
}

impl NamespaceSourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, namespace: Namespace, page: impl Into<String>) -> Self {
        self.sources.insert(namespace, page.into());
        self
    }

    pub fn source_for(&self, namespace: Namespace) -> Option<&str> {
        self.sources.get(&namespace).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Namespace, &str)> {
        self.sources.iter().map(|(ns, page)| (*ns, page.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Entries of `other` win over entries already present.
    pub fn merge(mut self, other: NamespaceSourceMap) -> Self {
        self.sources.extend(other.sources);
        self
    }

    /// Parses a JSON object keyed by namespace number:
    /// `{"2": "Project:PreloadTemplate", "-1": "..."}`.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, AppError> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| AppError::InvalidConfiguration {
                origin: origin.to_string(),
                reason: e.to_string(),
            })?;

        raw.into_iter()
            .map(|(key, page)| -> Result<(Namespace, String), AppError> {
                let namespace = key.parse::<Namespace>()?;
                Ok((namespace, page))
            })
            .collect()
    }

    /// Loads the map from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        let map = Self::from_json_str(&json, &path.display().to_string())?;
        log::debug!(
            "Loaded {} preload source(s) from {}",
            map.len(),
            path.display()
        );
        Ok(map)
    }

    /// Parses one `NS=PAGE` command-line entry.
    pub fn parse_entry(entry: &str) -> Result<(Namespace, String), ValidationError> {
        let (namespace, page) =
            entry
                .split_once('=')
                .ok_or_else(|| ValidationError::InvalidSourceEntry {
                    entry: entry.to_string(),
                    reason: "expected NS=PAGE".to_string(),
                })?;
        let namespace = namespace
            .parse::<Namespace>()
            .map_err(|e| ValidationError::InvalidSourceEntry {
                entry: entry.to_string(),
                reason: e.to_string(),
            })?;
        Ok((namespace, page.to_string()))
    }
}

impl FromIterator<(Namespace, String)> for NamespaceSourceMap {
    fn from_iter<I: IntoIterator<Item = (Namespace, String)>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Namespace number of the page being created (e.g. 0, 2, -1)
    #[arg(allow_hyphen_values = true)]
    pub namespace: String,

    /// Text the edit form would otherwise start with
    #[arg(long, default_value = "")]
    pub proposed: String,

    /// JSON file mapping namespace numbers to source pages (or $PRELOADER_SOURCE_FILE)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Extra NS=PAGE source entry; overrides the config file (repeatable)
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Directory holding page files
    #[arg(short = 'd', long, conflicts_with = "api_url")]
    pub pages_dir: Option<String>,

    /// api.php endpoint of a remote wiki
    #[arg(short = 'a', long)]
    pub api_url: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where source pages are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Directory(PathBuf),
    WikiApi(Url),
}

/// Resolved preloader configuration, validated and ready to run.
#[derive(Debug, Clone)]
pub struct PreloaderConfig {
    pub namespace: Namespace,
    pub proposed_text: String,
    pub sources: NamespaceSourceMap,
    pub store: StoreLocation,
    pub verbose: bool,
}

impl PreloaderConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var(SOURCE_FILE_ENV).ok())
            .map(PathBuf::from);
        Self::resolve_with(cli, config_path)
    }

    /// Resolution with the source file already located; `cli.config` is ignored.
    fn resolve_with(
        cli: CommandLineInput,
        config_path: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let namespace = cli.namespace.parse::<Namespace>()?;

        let file_sources = match config_path {
            Some(path) => NamespaceSourceMap::load(&path)?,
            None => NamespaceSourceMap::new(),
        };
        let flag_sources = cli
            .sources
            .iter()
            .map(|entry| NamespaceSourceMap::parse_entry(entry))
            .collect::<Result<NamespaceSourceMap, _>>()?;
        let sources = file_sources.merge(flag_sources);

        let store = match (cli.pages_dir, cli.api_url) {
            (Some(dir), _) => StoreLocation::Directory(PathBuf::from(dir)),
            (None, Some(url)) => {
                let url = Url::parse(&url).map_err(|e| AppError::InvalidConfiguration {
                    origin: "--api-url".to_string(),
                    reason: format!("{}: {}", url, e),
                })?;
                StoreLocation::WikiApi(url)
            }
            (None, None) => {
                return Err(AppError::MissingConfiguration(
                    "one of --pages-dir or --api-url is required".to_string(),
                ))
            }
        };

        Ok(PreloaderConfig {
            namespace,
            proposed_text: cli.proposed,
            sources,
            store,
            verbose: cli.verbose,
        })
    }
}
