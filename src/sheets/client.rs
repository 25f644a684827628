// src/sheets/client.rs
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity::SyncError;
use crate::sheets::credentials::ServiceAccount;
use crate::sheets::models::{DriveFileList, SpreadsheetMetadata, SPREADSHEET_MIME_TYPE};
use crate::sheets::worksheet::GoogleWorksheet;
use crate::sheets::Config;

/// Authorized client for the Sheets and Drive REST APIs
#[derive(Clone)]
pub struct SheetsClient {
    http_client: Client,
    access_token: String,
    config: Config,
}

impl SheetsClient {
    /// Exchange the service account key for an access token
    pub async fn authorize(
        http_client: Client,
        account: &ServiceAccount,
        config: Config,
    ) -> Result<Self> {
        let token = account
            .fetch_access_token(&http_client, &config.scope())
            .await
            .context("Failed to authorize with Google")?;

        info!(
            "Authorized with Google Sheets API as {} (token valid for {}s)",
            account.client_email, token.expires_in
        );

        Ok(Self {
            http_client,
            access_token: token.access_token,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the spreadsheet named `title` among the files visible to the account
    pub async fn open(&self, title: &str) -> Result<Spreadsheet> {
        let mut url = endpoint(&self.config.drive_api_url, &["files"])?;
        url.query_pairs_mut()
            .append_pair("q", &spreadsheet_query(title))
            .append_pair("fields", "files(id,name)")
            .append_pair("supportsAllDrives", "true")
            .append_pair("includeItemsFromAllDrives", "true");

        let listing: DriveFileList = self.request(Method::GET, url, None::<&()>).await?;

        let file = listing.files.into_iter().next().ok_or_else(|| {
            error!("Spreadsheet '{}' is not shared with the service account", title);
            SyncError::SpreadsheetNotFound(title.to_string())
        })?;

        Ok(Spreadsheet {
            client: self.clone(),
            id: file.id,
            title: file.name,
        })
    }

    /// Send an authorized request and decode the JSON reply
    pub(crate) async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(&self.access_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(SyncError::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Google API error [{}]: {}", status, body);
            return Err(SyncError::Sheets { status, body }.into());
        }

        let value = response
            .json::<T>()
            .await
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;

        Ok(value)
    }
}

/// Handle on one spreadsheet
pub struct Spreadsheet {
    client: SheetsClient,
    id: String,
    title: String,
}

impl Spreadsheet {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Look a worksheet up by its exact tab title
    pub async fn worksheet_by_title(&self, title: &str) -> Result<GoogleWorksheet> {
        let mut url = endpoint(
            &self.client.config().sheets_api_url,
            &["spreadsheets", self.id.as_str()],
        )?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties");

        let metadata: SpreadsheetMetadata =
            self.client.request(Method::GET, url, None::<&()>).await?;

        let properties = metadata.find_sheet(title).ok_or_else(|| {
            error!("Worksheet '{}' not found in '{}'", title, self.title);
            SyncError::WorksheetNotFound(format!("{} in {}", title, self.title))
        })?;
        debug!("Found worksheet '{}' (gid {})", properties.title, properties.sheet_id);

        Ok(GoogleWorksheet::new(
            self.client.clone(),
            self.id.clone(),
            properties.clone(),
        ))
    }
}

/// Append path segments to an API base URL, percent-encoding each one
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid API url: {}", base))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("API url cannot be a base: {}", base))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Drive search expression matching a spreadsheet by exact name
pub fn spreadsheet_query(title: &str) -> String {
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}
