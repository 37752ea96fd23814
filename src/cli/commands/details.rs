use anyhow::{Context, Result};
use compute::details::details_page;
use model::fixtures::Dataset;
use tracing::{debug, info};
use validator::Validate;

use crate::config::AppConfig;
use crate::handlers::details::DetailsRequest;
use crate::remote::RemoteClient;

/// Fetches the detail table for a selection and prints one page as JSON.
pub async fn details(config: &AppConfig, request: &DetailsRequest) -> Result<()> {
    request.validate()?;

    let dataset =
        Dataset::load(config.fixtures_dir.as_deref()).context("Failed to load dataset")?;
    let query = request.to_query(&dataset.taxonomy)?;
    debug!("Resolved details query: {:?}", query);

    let remote = RemoteClient::new(&config.remote_base_url, config.request_timeout())?;
    let response = remote.get_details(&query).await?;
    info!("Fetched {} products from {}", response.len(), remote.base_url());

    let page = details_page(&response, &request.search, request.page, request.per_page)?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
