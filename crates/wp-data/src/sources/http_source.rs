use std::sync::Arc;
use async_trait::async_trait;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;

use crate::config::LoaderConfig;
use crate::schema::population_schema;
use crate::sources::csv_source::parse_population_csv;
use crate::DataError;

/// Population table downloaded from a URL serving the CSV export
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    config: LoaderConfig,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            config: LoaderConfig::default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw file; non-success statuses are errors
    async fn fetch(&self) -> Result<Vec<u8>, DataError> {
        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        tracing::debug!("Downloaded {} bytes from {}", bytes.len(), self.url);
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl wp_core::data::PopulationSource for HttpSource {
    fn schema(&self) -> Arc<Schema> {
        population_schema()
    }

    async fn load(&self) -> anyhow::Result<RecordBatch> {
        tracing::info!("Fetching population table from {}", self.url);

        let body = self.fetch().await?;
        let config = self.config.clone();
        let (batch, _report) = tokio::task::spawn_blocking(move || {
            parse_population_csv(body.as_slice(), &config)
        })
        .await
        .map_err(DataError::from)??;

        Ok(batch)
    }

    fn source_name(&self) -> &str {
        self.url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.url)
    }
}
