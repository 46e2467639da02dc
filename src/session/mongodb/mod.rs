/// This module contains the MongoDB document manager and repository.
pub mod mongodb_manager;

pub use mongodb_manager::{MongodbDocumentManager, MongodbDocumentManagerBuilder, MongodbRepository};
