#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub chain: String,                             // Chain the token lives on (e.g. "MAINNET")
    pub symbol: String,                            // Token symbol
    pub name: String,                              // Full token name
    pub decimals: u8,                              // Number of decimal places
    pub underlying_token_address: Option<String>,  // Wrapped/underlying asset, if any
    pub address: String,                           // Token contract address
    pub website_url: Option<String>,               // Project website
    pub is_erc4626: bool,                          // Whether the token is an ERC-4626 vault
    pub priority: i64,                             // Listing priority on the Balancer UI
    pub rate_provider_address: Option<String>,     // Price rate provider contract
    pub rate_provider_reviewed: Option<bool>,      // Whether the rate provider was reviewed
    pub erc4626_review_summary: Option<String>,    // ERC-4626 review outcome
}
