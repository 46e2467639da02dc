#[cfg(feature = "orm")]
/// This module provides a SeaORM entity manager and repository.
pub mod orm;

#[cfg(feature = "mongodb")]
/// This module provides a MongoDB document manager and repository.
pub mod mongodb;
