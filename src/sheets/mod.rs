// src/sheets/mod.rs
pub mod client;
pub mod config;
pub mod credentials;
pub mod models;
pub mod provider;
pub mod worksheet;

pub use client::{SheetsClient, Spreadsheet};
pub use config::Config;
pub use credentials::{AccessToken, ServiceAccount};
pub use provider::{GoogleSheetsProvider, WorksheetProvider};
pub use worksheet::{GoogleWorksheet, Worksheet};
