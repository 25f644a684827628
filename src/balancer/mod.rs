// src/balancer/mod.rs
pub mod config;
pub mod models;
pub mod token_service;

pub use config::Config;
pub use models::{BalancerToken, GraphQlRequest, GraphQlResponse, TOKEN_LIST_QUERY};
pub use token_service::{parse_token_list, BalancerTokenService, TokenService};
