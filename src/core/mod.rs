pub mod context;
pub mod disambiguate;
pub mod error;
pub mod filter;
pub mod imports;
pub mod rewrite;
pub mod synthesize;
pub mod types;
