//! Handlers behind each CLI subcommand. They return values instead of
//! printing so the binary decides where output goes.

use omniform_mapping::{
    AutoMapOptions, FileStore, Mapping, MappingError, MappingRepository, PersistenceError,
    RowData, SelectorValueMap, apply_mapping, auto_map, generate_mapping,
};
use omniform_scanner::{DomScanner, HtmlDocument, RegistryView, ScanOptions};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read CSV headers from {path}: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("No mapping found for id `{0}`")]
    MappingNotFound(String),

    #[error("No headers found in {0}")]
    NoHeaders(PathBuf),
}

/// Flag overrides applied on top of the configured scan options.
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    pub include_embedded_documents: bool,
    pub exclude_shadow_boundaries: bool,
    pub max_depth: Option<usize>,
    pub blacklist_selectors: Vec<String>,
}

impl ScanOverrides {
    pub fn apply(self, mut options: ScanOptions) -> ScanOptions {
        if self.include_embedded_documents {
            options.include_embedded_documents = true;
        }
        if self.exclude_shadow_boundaries {
            options.include_shadow_boundaries = false;
        }
        if self.max_depth.is_some() {
            options.max_depth = self.max_depth;
        }
        options.blacklist_selectors.extend(self.blacklist_selectors);
        options
    }
}

pub async fn read_text(path: &Path) -> Result<String, CommandError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: path.to_path_buf(),
            source,
        })
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let content = read_text(path).await?;
    serde_json::from_str(&content).map_err(|source| CommandError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Scan HTML markup and return the serializable registry view.
pub fn scan_markup(markup: &str, options: &ScanOptions) -> RegistryView {
    let document = HtmlDocument::parse(markup);
    let mut scanner = DomScanner::new(options.clone());
    scanner.scan(&document);
    info!(
        documents = document.document_count(),
        entries = scanner.registry().len(),
        "Scanned markup"
    );
    scanner.to_view()
}

/// Selectors of a scan view, best score first.
pub fn ranked_selectors(view: &RegistryView) -> Vec<String> {
    let mut entries: Vec<_> = view.values().collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.selector.cmp(&b.selector)));
    entries.into_iter().map(|e| e.selector.clone()).collect()
}

/// Column names from the header row of CSV content. Blank header cells are
/// dropped.
pub fn parse_header_line(content: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

    Ok(reader
        .headers()?
        .iter()
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect())
}

pub async fn read_headers_file(path: &Path) -> Result<Vec<String>, CommandError> {
    let headers = parse_header_line(&read_text(path).await?).map_err(|source| {
        CommandError::Csv {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if headers.is_empty() {
        return Err(CommandError::NoHeaders(path.to_path_buf()));
    }
    Ok(headers)
}

pub fn auto_map_selectors(
    selectors: &[String],
    headers: &[String],
    options: &AutoMapOptions,
) -> Mapping {
    let mapping = auto_map(selectors, headers, options);
    info!(
        selectors = selectors.len(),
        headers = headers.len(),
        mapped = mapping.len(),
        scorer = options.scorer.name(),
        "Auto-mapped selectors"
    );
    mapping
}

pub fn generate(selectors: &[String], columns: &[String]) -> Result<Mapping, CommandError> {
    Ok(generate_mapping(selectors, columns)?)
}

pub fn repository(dir: &Path) -> MappingRepository<FileStore> {
    MappingRepository::new(FileStore::new(dir))
}

/// Read a mapping file and save it under `id`.
pub async fn save_mapping_file(
    repo: &MappingRepository<FileStore>,
    id: &str,
    file: &Path,
) -> Result<Mapping, CommandError> {
    let mapping: Mapping = read_json(file).await?;
    repo.save_mapping(id, &mapping).await?;
    Ok(mapping)
}

pub async fn load_mapping(
    repo: &MappingRepository<FileStore>,
    id: &str,
) -> Result<Mapping, CommandError> {
    repo.load_mapping(id)
        .await?
        .ok_or_else(|| CommandError::MappingNotFound(id.to_string()))
}

/// Resolve a stored mapping against a JSON row object.
pub async fn apply_mapping_to_row(
    repo: &MappingRepository<FileStore>,
    id: &str,
    row_file: &Path,
) -> Result<SelectorValueMap, CommandError> {
    let mapping = load_mapping(repo, id).await?;
    let row: RowData = read_json(row_file).await?;
    Ok(apply_mapping(&mapping, &row))
}
