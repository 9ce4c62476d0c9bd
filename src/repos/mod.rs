pub mod error;
pub mod memory;
pub mod store;
pub mod user_repo;

pub use error::{RepoError, RepoResult};
pub use memory::InMemoryUserStore;
pub use store::{CredentialStore, Role, UserRecord, UserStore};
pub use user_repo::PgUserStore;
