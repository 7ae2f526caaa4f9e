//! Persistence adapters implementing the user repository port.
//!
//! Adapters only translate between storage and domain types. Uniqueness and
//! revision checks live here so services can rely on them.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
