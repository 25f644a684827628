use crate::balancer::TokenService;
use crate::entity::TokenTable;
use crate::sheets::WorksheetProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// First cell written
pub const ANCHOR: &str = "A1";

/// Where the token list goes
#[derive(Debug, Clone)]
pub struct SyncTarget {
    pub chain: String,
    pub spreadsheet_name: String,
    pub worksheet_name: String,
}

impl SyncTarget {
    pub fn new(chain: &str, spreadsheet_name: &str, worksheet_name: &str) -> Self {
        Self {
            chain: chain.to_string(),
            spreadsheet_name: spreadsheet_name.to_string(),
            worksheet_name: worksheet_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub tokens: usize,
    pub rows_written: usize,
}

#[async_trait]
pub trait TokenListInteractor: Send + Sync {
    /// Fetch the token list and overwrite the target worksheet with it
    async fn sync_token_list(&self, target: &SyncTarget) -> Result<SyncReport>;
}

pub struct TokenListInteractorImpl {
    token_service: Arc<dyn TokenService + Send + Sync>,
    worksheet_provider: Arc<dyn WorksheetProvider + Send + Sync>,
}

impl TokenListInteractorImpl {
    pub fn new(
        token_service: Arc<dyn TokenService + Send + Sync>,
        worksheet_provider: Arc<dyn WorksheetProvider + Send + Sync>,
    ) -> Self {
        Self {
            token_service,
            worksheet_provider,
        }
    }
}

#[async_trait]
impl TokenListInteractor for TokenListInteractorImpl {
    async fn sync_token_list(&self, target: &SyncTarget) -> Result<SyncReport> {
        let tokens = self
            .token_service
            .get_tokens(&target.chain)
            .await
            .context("Failed to fetch token list")?;
        info!("Data fetched successfully from the API.");

        let table = TokenTable::from_records(tokens);

        let worksheet = self
            .worksheet_provider
            .open_worksheet(&target.spreadsheet_name, &target.worksheet_name)
            .await?;

        // Clear first so a shorter list leaves no stale rows behind
        worksheet.clear().await?;
        let rows_written = worksheet
            .update_values(ANCHOR, table.to_values())
            .await?;

        info!(
            "Wrote {} tokens to '{}' / '{}'",
            table.len(),
            target.spreadsheet_name,
            worksheet.title()
        );

        Ok(SyncReport {
            tokens: table.len(),
            rows_written,
        })
    }
}
