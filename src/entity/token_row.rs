use serde_json::Value;
use std::collections::HashMap;

use super::TokenRecord;

/// Column headers in the order cells are written to the worksheet.
pub const COLUMNS: [&str; 14] = [
    "chain",
    "symbol",
    "name",
    "decimals",
    "underlyingTokenAddress",
    "address",
    "websiteUrl",
    "isErc4626",
    "priority",
    "rateProviderAddress",
    "rateProviderReviewed",
    "erc4626ReviewSummary",
    "underlyingIsErc4626",
    "underlyingSymbol",
];

/// A token record flattened for the sheet, with the underlying token resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub record: TokenRecord,
    pub underlying_is_erc4626: bool,
    pub underlying_symbol: Option<String>,
}

impl TokenRow {
    /// Cell values in `COLUMNS` order. Missing values become empty strings.
    pub fn cells(&self) -> Vec<Value> {
        let r = &self.record;

        vec![
            Value::from(r.chain.as_str()),
            Value::from(r.symbol.as_str()),
            Value::from(r.name.as_str()),
            Value::from(r.decimals),
            optional_text(&r.underlying_token_address),
            Value::from(r.address.as_str()),
            optional_text(&r.website_url),
            Value::from(r.is_erc4626),
            Value::from(r.priority),
            optional_text(&r.rate_provider_address),
            r.rate_provider_reviewed
                .map(Value::from)
                .unwrap_or_else(empty_cell),
            optional_text(&r.erc4626_review_summary),
            Value::from(self.underlying_is_erc4626),
            optional_text(&self.underlying_symbol),
        ]
    }
}

fn optional_text(value: &Option<String>) -> Value {
    value.as_deref().map(Value::from).unwrap_or_else(empty_cell)
}

fn empty_cell() -> Value {
    Value::String(String::new())
}

/// The full worksheet payload: one row per fetched token, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    rows: Vec<TokenRow>,
}

impl TokenTable {
    /// Flattens the records and resolves each one's underlying token against
    /// the same list. When an address appears more than once the last record
    /// wins.
    pub fn from_records(records: Vec<TokenRecord>) -> Self {
        let by_address: HashMap<&str, &TokenRecord> = records
            .iter()
            .map(|record| (record.address.as_str(), record))
            .collect();

        let resolved: Vec<(bool, Option<String>)> = records
            .iter()
            .map(|record| {
                let underlying = record
                    .underlying_token_address
                    .as_deref()
                    .and_then(|address| by_address.get(address));

                match underlying {
                    Some(token) => (token.is_erc4626, Some(token.symbol.clone())),
                    None => (false, None),
                }
            })
            .collect();

        let rows = records
            .into_iter()
            .zip(resolved)
            .map(|(record, (underlying_is_erc4626, underlying_symbol))| TokenRow {
                record,
                underlying_is_erc4626,
                underlying_symbol,
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[TokenRow] {
        &self.rows
    }

    /// Number of data rows, not counting the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row followed by every data row, ready for a values update.
    pub fn to_values(&self) -> Vec<Vec<Value>> {
        let header = COLUMNS.iter().map(|column| Value::from(*column)).collect();

        std::iter::once(header)
            .chain(self.rows.iter().map(TokenRow::cells))
            .collect()
    }
}
