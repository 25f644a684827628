pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";

/// Google Sheets access configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Sheets v4 API
    pub sheets_api_url: String,

    /// Base URL of the Drive v3 API, used to look spreadsheets up by name
    pub drive_api_url: String,

    /// OAuth scopes requested for the service account
    pub scopes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            drive_api_url: DEFAULT_DRIVE_API_URL.to_string(),
            scopes: vec![
                "https://www.googleapis.com/auth/spreadsheets".to_string(),
                "https://www.googleapis.com/auth/drive.readonly".to_string(),
            ],
        }
    }
}

impl Config {
    /// Scopes joined the way the token endpoint expects them
    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }
}
