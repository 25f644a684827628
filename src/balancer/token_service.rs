// src/balancer/token_service.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;

use crate::balancer::models::{
    GraphQlRequest, GraphQlResponse, TokenListData, TokenListVariables, TOKEN_LIST_QUERY,
};
use crate::balancer::Config;
use crate::entity::{SyncError, TokenRecord};

/// Source of the token list
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Fetch every token listed on `chain`, in API order
    async fn get_tokens(&self, chain: &str) -> Result<Vec<TokenRecord>>;
}

/// Token list backed by the Balancer v3 GraphQL API
pub struct BalancerTokenService {
    http_client: Client,
    config: Config,
}

impl BalancerTokenService {
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl TokenService for BalancerTokenService {
    async fn get_tokens(&self, chain: &str) -> Result<Vec<TokenRecord>> {
        info!("Fetching {} token list from {}", chain, self.config.api_url);

        let request = GraphQlRequest {
            query: TOKEN_LIST_QUERY,
            variables: TokenListVariables {
                chains: vec![chain],
            },
        };

        let response = self
            .http_client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach Balancer API: {}", e);
                SyncError::Http(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(SyncError::Http)
            .context("Failed to read Balancer API response")?;

        if !status.is_success() {
            error!("Query failed with code {}. {}", status.as_u16(), body);
            return Err(SyncError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let tokens = parse_token_list(&body)?;
        info!("Fetched {} tokens from the Balancer API", tokens.len());

        Ok(tokens)
    }
}

/// Parse a `tokenGetTokens` GraphQL response body into token records
pub fn parse_token_list(body: &str) -> Result<Vec<TokenRecord>> {
    let response: GraphQlResponse<TokenListData> = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse token list response: {}", e);
        SyncError::MalformedResponse(e.to_string())
    })?;

    if !response.errors.is_empty() {
        let messages = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SyncError::GraphQl(messages).into());
    }

    let data = response
        .data
        .ok_or_else(|| SyncError::MalformedResponse("response has no data".to_string()))?;

    Ok(data
        .token_get_tokens
        .into_iter()
        .map(TokenRecord::from)
        .collect())
}
