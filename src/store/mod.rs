//! Remote collaborator clients and table stores

pub mod auth;
pub mod catalog;
pub mod quotes;
pub mod storage;
pub mod supabase;

pub use auth::AuthClient;
pub use catalog::CatalogStore;
pub use quotes::QuoteStore;
pub use storage::StorageClient;
pub use supabase::SupabaseClient;
