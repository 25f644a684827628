#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Balancer API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Balancer API returned errors: {0}")]
    GraphQl(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("Google authorization failed: {0}")]
    Authorization(String),

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Google Sheets API error ({status}): {body}")]
    Sheets { status: u16, body: String },
}
