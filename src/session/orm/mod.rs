/// ORM entity manager and repository implementation.
pub mod orm_manager;

pub use orm_manager::{OrmEntityManager, OrmEntityManagerBuilder, OrmRepository};
