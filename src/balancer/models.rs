use serde::{Deserialize, Serialize};

use crate::entity::TokenRecord;

pub const TOKEN_LIST_QUERY: &str = r#"
query TokenList($chains: [GqlChain!]) {
  tokenGetTokens(chains: $chains) {
    chain
    symbol
    name
    decimals
    underlyingTokenAddress
    address
    websiteUrl
    priceRateProviderData {
      address
      reviewed
    }
    isErc4626
    erc4626ReviewData {
      summary
    }
    priority
  }
}
"#;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct TokenListVariables<'a> {
    pub chains: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListData {
    pub token_get_tokens: Vec<BalancerToken>,
}

// Token as returned by `tokenGetTokens`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancerToken {
    pub chain: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub underlying_token_address: Option<String>,
    pub address: String,
    pub website_url: Option<String>,
    pub price_rate_provider_data: Option<PriceRateProviderData>,
    pub is_erc4626: bool,
    pub erc4626_review_data: Option<Erc4626ReviewData>,
    pub priority: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceRateProviderData {
    pub address: Option<String>,
    pub reviewed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Erc4626ReviewData {
    pub summary: Option<String>,
}

impl From<BalancerToken> for TokenRecord {
    fn from(token: BalancerToken) -> Self {
        let (rate_provider_address, rate_provider_reviewed) = match token.price_rate_provider_data {
            Some(data) => (data.address, data.reviewed),
            None => (None, None),
        };

        Self {
            chain: token.chain,
            symbol: token.symbol,
            name: token.name,
            decimals: token.decimals,
            underlying_token_address: token.underlying_token_address,
            address: token.address,
            website_url: token.website_url,
            is_erc4626: token.is_erc4626,
            priority: token.priority,
            rate_provider_address,
            rate_provider_reviewed,
            erc4626_review_summary: token.erc4626_review_data.and_then(|data| data.summary),
        }
    }
}
