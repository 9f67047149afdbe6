//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_repository;
mod jwt_token_verifier;
mod postgres_rbac_repository;

pub use in_memory_access_repository::InMemoryAccessRepository;
pub use jwt_token_verifier::JwtTokenVerifier;
pub use postgres_rbac_repository::PostgresRbacRepository;
