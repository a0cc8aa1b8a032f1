//! Access to the static content store: the catalog JSON plus one raw
//! markdown body per article, fetched over plain GET.

use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;
use url::Url;

use crate::catalog::{Article, Catalog};
use crate::error::FetchError;

/// Monotonically increasing per-article-fetch token. A completed fetch is
/// applied only while its token is still the latest one issued, so a slow
/// response can never overwrite a newer request's result.
pub type RequestToken = u64;

/// Completion events sent back to the UI thread.
#[derive(Debug)]
pub enum Event {
    CatalogLoaded(Result<Catalog, FetchError>),
    ArticleLoaded {
        token: RequestToken,
        filename: String,
        result: Result<String, FetchError>,
    },
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    client: Client,
    base_url: Url,
    catalog_file: String,
}

impl ContentStore {
    /// `base_url` is the directory-like root the catalog file and article
    /// bodies live under. A missing trailing slash would make `Url::join`
    /// drop the last path segment, so it is added here.
    pub fn new(client: Client, mut base_url: Url, catalog_file: impl Into<String>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client,
            base_url,
            catalog_file: catalog_file.into(),
        }
    }

    fn resource_url(&self, name: &str) -> Result<Url, FetchError> {
        Ok(self.base_url.join(name)?)
    }

    /// Fetches and parses the catalog resource. Non-success statuses and
    /// malformed JSON are both load failures; the caller keeps an empty
    /// catalog and shows the error inline.
    pub async fn load_catalog(&self) -> Result<Catalog, FetchError> {
        let url = self.resource_url(&self.catalog_file)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let records: Vec<Article> = serde_json::from_slice(&bytes)?;
        Ok(Catalog::from_records(records))
    }

    /// Fetches one raw article body by its content-store key.
    pub async fn load_article(&self, filename: &str) -> Result<String, FetchError> {
        let url = self.resource_url(filename)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    pub fn spawn_catalog_load(&self, runtime: &Handle, updates: mpsc::Sender<Event>) {
        let store = self.clone();
        runtime.spawn(async move {
            let result = store.load_catalog().await;
            if updates.send(Event::CatalogLoaded(result)).await.is_err() {
                warn!("update receiver dropped");
            }
        });
    }

    pub fn spawn_article_load(
        &self,
        runtime: &Handle,
        filename: String,
        token: RequestToken,
        updates: mpsc::Sender<Event>,
    ) {
        let store = self.clone();
        runtime.spawn(async move {
            let result = store.load_article(&filename).await;
            let event = Event::ArticleLoaded {
                token,
                filename,
                result,
            };
            if updates.send(event).await.is_err() {
                warn!("update receiver dropped");
            }
        });
    }
}
