//! Domain ports and supporting types for the hexagonal boundary.

mod filter_repository;
mod storage_error;
mod user_repository;

#[cfg(test)]
pub use filter_repository::MockFilterRepository;
pub use filter_repository::FilterRepository;
pub use storage_error::StorageError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
