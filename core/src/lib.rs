pub mod catalog;
pub mod estimate;
pub mod filter;
pub mod models;
pub mod session;
pub mod shopping;
