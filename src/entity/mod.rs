mod sync_error;
mod token_record;
mod token_row;

pub use sync_error::SyncError;
pub use token_record::TokenRecord;
pub use token_row::{TokenRow, TokenTable, COLUMNS};
