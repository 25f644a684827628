pub const DEFAULT_API_URL: &str = "https://api-v3.balancer.fi";

/// Balancer API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint of the Balancer v3 API
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
