use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Method;
use serde_json::Value;

use crate::sheets::client::{endpoint, SheetsClient};
use crate::sheets::models::{SheetProperties, UpdateValuesResponse, ValueRange};
use crate::utils::{anchored_range, sheet_range};

/// A single tab of a spreadsheet that rows can be written to
#[async_trait]
pub trait Worksheet: Send + Sync {
    fn title(&self) -> &str;

    /// Remove every value on the worksheet
    async fn clear(&self) -> Result<()>;

    /// Write `values` row by row starting at the `anchor` cell, overwriting
    /// whatever the range held. Returns the number of rows written.
    async fn update_values(&self, anchor: &str, values: Vec<Vec<Value>>) -> Result<usize>;
}

/// Worksheet backed by the Sheets v4 values API
pub struct GoogleWorksheet {
    client: SheetsClient,
    spreadsheet_id: String,
    properties: SheetProperties,
}

impl GoogleWorksheet {
    pub fn new(client: SheetsClient, spreadsheet_id: String, properties: SheetProperties) -> Self {
        Self {
            client,
            spreadsheet_id,
            properties,
        }
    }

    fn values_url(&self, range: &str) -> Result<reqwest::Url> {
        endpoint(
            &self.client.config().sheets_api_url,
            &["spreadsheets", self.spreadsheet_id.as_str(), "values", range],
        )
    }
}

#[async_trait]
impl Worksheet for GoogleWorksheet {
    fn title(&self) -> &str {
        &self.properties.title
    }

    async fn clear(&self) -> Result<()> {
        let range = format!("{}:clear", sheet_range(self.title()));
        let url = self.values_url(&range)?;

        let _: Value = self
            .client
            .request(Method::POST, url, Some(&serde_json::json!({})))
            .await
            .with_context(|| format!("Failed to clear worksheet '{}'", self.title()))?;

        debug!("Cleared worksheet '{}'", self.title());
        Ok(())
    }

    async fn update_values(&self, anchor: &str, values: Vec<Vec<Value>>) -> Result<usize> {
        let range = anchored_range(self.title(), anchor);
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRange {
            range,
            major_dimension: "ROWS",
            values,
        };

        let response: UpdateValuesResponse = self
            .client
            .request(Method::PUT, url, Some(&body))
            .await
            .with_context(|| format!("Failed to write worksheet '{}'", self.title()))?;

        info!(
            "Updated {} rows ({} cells) on '{}'",
            response.updated_rows,
            response.updated_cells,
            self.title()
        );

        Ok(response.updated_rows)
    }
}
