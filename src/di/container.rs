use std::sync::Arc;

use reqwest::Client;

use crate::balancer::token_service::{BalancerTokenService, TokenService};
use crate::interactor::{TokenListInteractor, TokenListInteractorImpl};
use crate::settings::Settings;
use crate::sheets::provider::{GoogleSheetsProvider, WorksheetProvider};

/// ServiceContainer wires the fetch and write services from settings
pub struct ServiceContainer {
    token_service: Arc<dyn TokenService + Send + Sync>,
    worksheet_provider: Arc<dyn WorksheetProvider + Send + Sync>,
}

impl ServiceContainer {
    pub fn new(settings: &Settings) -> Self {
        // One connection pool shared by every API
        let http_client = Client::new();

        let token_service = Arc::new(BalancerTokenService::new(
            http_client.clone(),
            settings.balancer_config(),
        )) as Arc<dyn TokenService + Send + Sync>;

        let worksheet_provider = Arc::new(GoogleSheetsProvider::new(
            http_client,
            settings.service_account_file.clone(),
            settings.sheets_config(),
        )) as Arc<dyn WorksheetProvider + Send + Sync>;

        Self {
            token_service,
            worksheet_provider,
        }
    }

    pub fn token_service(&self) -> Arc<dyn TokenService + Send + Sync> {
        self.token_service.clone()
    }

    pub fn worksheet_provider(&self) -> Arc<dyn WorksheetProvider + Send + Sync> {
        self.worksheet_provider.clone()
    }

    pub fn token_list_interactor(&self) -> Arc<dyn TokenListInteractor> {
        Arc::new(TokenListInteractorImpl::new(
            self.token_service(),
            self.worksheet_provider(),
        ))
    }
}
