//! Startup data: the character catalog and the translation table
//!
//! Both documents are fetched concurrently and must both succeed before the
//! library exists. Any failure is a single fatal [`StartupDataError`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogError, CharacterRecord, Library};
use crate::i18n::TranslationTable;
use crate::state::DataSources;

/// Fixed failure text shown instead of any view. Never localized.
pub const STARTUP_FAILURE_MESSAGE: &str = "Data Load Err";

pub fn failure_message(detail: &str) -> String {
    format!("{STARTUP_FAILURE_MESSAGE}: {detail}")
}

#[derive(thiserror::Error, Debug)]
pub enum StartupDataError {
    #[error("cannot read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },
    #[error("request for {location} failed: {source}")]
    Http {
        location: String,
        source: reqwest::Error,
    },
    #[error("{location} answered {status}")]
    Status {
        location: String,
        status: reqwest::StatusCode,
    },
    #[error("{location} is malformed: {source}")]
    Parse {
        location: String,
        source: serde_json::Error,
    },
    #[error("invalid data: {0}")]
    Invalid(#[from] CatalogError),
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn characters(&self) -> Result<Vec<CharacterRecord>, StartupDataError>;

    async fn translations(&self) -> Result<TranslationTable, StartupDataError>;
}

/// Loads documents from file paths or http(s) URLs.
#[derive(Clone, Debug)]
pub struct SourceProvider {
    sources: DataSources,
    client: reqwest::Client,
}

impl SourceProvider {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            client: reqwest::Client::new(),
        }
    }

    async fn document<T: DeserializeOwned>(&self, location: &str) -> Result<T, StartupDataError> {
        let bytes = if is_remote(location) {
            self.fetch(location).await?
        } else {
            tokio::fs::read(location)
                .await
                .map_err(|source| StartupDataError::Io {
                    location: location.to_string(),
                    source,
                })?
        };
        serde_json::from_slice(&bytes).map_err(|source| StartupDataError::Parse {
            location: location.to_string(),
            source,
        })
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>, StartupDataError> {
        let http = |source| StartupDataError::Http {
            location: location.to_string(),
            source,
        };
        let response = self.client.get(location).send().await.map_err(http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StartupDataError::Status {
                location: location.to_string(),
                status,
            });
        }
        let body = response.bytes().await.map_err(http)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl DataProvider for SourceProvider {
    async fn characters(&self) -> Result<Vec<CharacterRecord>, StartupDataError> {
        self.document(&self.sources.characters).await
    }

    async fn translations(&self) -> Result<TranslationTable, StartupDataError> {
        self.document(&self.sources.translations).await
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches both documents jointly and validates them into a [`Library`].
pub async fn load_library(provider: &dyn DataProvider) -> Result<Library, StartupDataError> {
    let (characters, translations) =
        tokio::try_join!(provider.characters(), provider.translations())?;
    let library = Library::new(characters, translations)?;
    tracing::info!(
        characters = library.characters().len(),
        languages = library.translations().languages().count(),
        "library loaded"
    );
    Ok(library)
}
