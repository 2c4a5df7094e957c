//! Account entity, request builders, response parsers and orchestration.

pub mod builder;
mod facade;
mod model;
pub mod parser;
mod service;

pub use model::{Account, AccountOptions, AllAccountsOptions};
pub use service::AccountService;
