use rand::distr::{Alphanumeric, SampleString};

pub mod factory;

pub mod fixture;

pub mod initializer;

pub mod options;

pub mod populator;

pub mod session;

/// Generates a random name consisting of alphanumeric characters.
///
/// # Returns
///
/// A `String` containing the generated random name.
fn build_name() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 8)
}
