pub mod token_list_interactor;

pub use token_list_interactor::{
    SyncReport, SyncTarget, TokenListInteractor, TokenListInteractorImpl, ANCHOR,
};
