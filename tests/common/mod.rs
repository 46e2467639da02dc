#![allow(dead_code)]

pub mod memory;
pub mod mocks;

use serde::Deserialize;

/// Blog post used across integration tests.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub title: String,
    pub author: String,
    pub email: String,
    pub published: bool,
}
