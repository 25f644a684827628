use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use std::path::PathBuf;

use crate::sheets::client::SheetsClient;
use crate::sheets::credentials::ServiceAccount;
use crate::sheets::worksheet::Worksheet;
use crate::sheets::Config;

/// Opens worksheets by spreadsheet name and tab title
#[async_trait]
pub trait WorksheetProvider: Send + Sync {
    async fn open_worksheet(
        &self,
        spreadsheet_name: &str,
        worksheet_name: &str,
    ) -> Result<Box<dyn Worksheet>>;
}

/// Provider authenticating with a service account key file
pub struct GoogleSheetsProvider {
    http_client: Client,
    service_account_file: PathBuf,
    config: Config,
}

impl GoogleSheetsProvider {
    pub fn new(http_client: Client, service_account_file: PathBuf, config: Config) -> Self {
        Self {
            http_client,
            service_account_file,
            config,
        }
    }
}

#[async_trait]
impl WorksheetProvider for GoogleSheetsProvider {
    async fn open_worksheet(
        &self,
        spreadsheet_name: &str,
        worksheet_name: &str,
    ) -> Result<Box<dyn Worksheet>> {
        let account = ServiceAccount::from_file(&self.service_account_file)?;

        let client =
            SheetsClient::authorize(self.http_client.clone(), &account, self.config.clone())
                .await?;

        let spreadsheet = client
            .open(spreadsheet_name)
            .await
            .with_context(|| format!("Failed to open spreadsheet '{}'", spreadsheet_name))?;
        info!("Opened spreadsheet '{}' ({})", spreadsheet.title(), spreadsheet.id());

        let worksheet = spreadsheet.worksheet_by_title(worksheet_name).await?;

        Ok(Box::new(worksheet))
    }
}
