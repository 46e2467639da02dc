use std::{
    cell::OnceCell,
    time::{Duration, Instant},
};

use log::{error, info};
use serde_json::Value;
use uuid::Uuid;

use crate::PopulationError;

use super::{
    build_name,
    initializer::InitializerOutcome,
    options::PopulateOptionsBuilder,
    populator::{PopulateResult, Populator},
    session::ObjectRepository,
};

/// Type alias for fixture loading results.
type LoadResult<T> = Result<T, PopulationError>;

/// Convenience wrapper handed to every [`Fixture`].
///
/// It owns the [`Populator`] used by the fixtures, created on first use unless
/// one was set with [`DataFixture::set_populator`].
#[derive(Debug, Default)]
pub struct DataFixture {
    populator: OnceCell<Populator>,
}

impl DataFixture {
    pub fn new() -> Self {
        Self {
            populator: OnceCell::new(),
        }
    }

    /// Populates `repository` with `count` objects, using default options and
    /// the given constructor arguments.
    ///
    /// # Parameters
    /// - `repository`: The repository to populate
    /// - `count`: Number of objects to populate
    /// - `initializer`: Fills in each object; returning `false` skips it
    /// - `constructor_args`: Passed as-is to the repository's constructor
    pub fn populate<T, F, O>(
        &self,
        repository: &dyn ObjectRepository<T>,
        count: usize,
        initializer: F,
        constructor_args: Vec<Value>,
    ) -> PopulateResult
    where
        F: FnMut(&mut T) -> O,
        O: InitializerOutcome,
    {
        let options = PopulateOptionsBuilder::new()
            .constructor_args(constructor_args)
            .build();

        self.populator()
            .populate(repository, count, initializer, &options)
    }

    pub fn set_populator(&mut self, populator: Populator) {
        self.populator = OnceCell::from(populator);
    }

    pub fn populator(&self) -> &Populator {
        self.populator.get_or_init(Populator::new)
    }
}

/// A unit of seed data, loaded by a [`FixtureLoader`].
pub trait Fixture {
    /// Name reported in logs and in [`PopulationError::Fixture`].
    fn name(&self) -> &str;

    /// Loads the fixture's data, usually through [`DataFixture::populate`].
    fn load(&self, fixture: &DataFixture) -> PopulateResult;
}

/// Timing of a [`FixtureLoader::load`] run.
#[derive(Debug)]
pub struct LoadExecution {
    /// The time when loading started
    pub start: Instant,
    /// The time when the last fixture finished
    pub end: Instant,
    /// The total duration of the run
    pub duration: Duration,
}

/// An ordered set of fixtures sharing one [`DataFixture`].
///
/// Fixtures load in the order they were added; the first failure stops the run.
pub struct FixtureLoader<'a> {
    /// Unique identifier for this run
    id: Uuid,
    /// Human-readable name for the run
    name: String,
    data_fixture: DataFixture,
    fixtures: Vec<&'a dyn Fixture>,
}

impl FixtureLoader<'_> {
    /// Loads every fixture in sequence.
    ///
    /// # Returns
    /// - `Ok(LoadExecution)` when all fixtures load
    /// - `Err(PopulationError::Fixture)` naming the first fixture that failed
    pub fn load(&self) -> LoadResult<LoadExecution> {
        let start = Instant::now();

        info!("Start of fixture loading: {}, id: {}", self.name, self.id);

        for fixture in &self.fixtures {
            info!("Loading fixture: {}", fixture.name());

            if let Err(err) = fixture.load(&self.data_fixture) {
                error!("Fixture {} failed: {}", fixture.name(), err);
                return Err(PopulationError::Fixture(fixture.name().to_owned()));
            }
        }

        info!("End of fixture loading: {}, id: {}", self.name, self.id);

        Ok(LoadExecution {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Builder for creating a [`FixtureLoader`].
///
/// # Example
///
/// ```rust,no_run,compile_fail
/// use population::core::fixture::FixtureLoaderBuilder;
///
/// let loader = FixtureLoaderBuilder::new()
///     .name("blog".to_string())
///     .add(&post_fixture)
///     .add(&comment_fixture)
///     .build();
///
/// loader.load()?;
/// ```
#[derive(Default)]
pub struct FixtureLoaderBuilder<'a> {
    /// Optional name for the run (generated randomly if not specified)
    name: Option<String>,
    populator: Option<Populator>,
    fixtures: Vec<&'a dyn Fixture>,
}

impl<'a> FixtureLoaderBuilder<'a> {
    pub fn new() -> Self {
        Self {
            name: None,
            populator: None,
            fixtures: Vec::new(),
        }
    }

    pub fn name(mut self, name: String) -> FixtureLoaderBuilder<'a> {
        self.name = Some(name);
        self
    }

    /// Populator shared by the fixtures instead of a default one.
    pub fn populator(mut self, populator: Populator) -> FixtureLoaderBuilder<'a> {
        self.populator = Some(populator);
        self
    }

    /// Appends a fixture. Fixtures load in insertion order.
    pub fn add(mut self, fixture: &'a dyn Fixture) -> FixtureLoaderBuilder<'a> {
        self.fixtures.push(fixture);
        self
    }

    pub fn build(self) -> FixtureLoader<'a> {
        let mut data_fixture = DataFixture::new();
        if let Some(populator) = self.populator {
            data_fixture.set_populator(populator);
        }

        FixtureLoader {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            data_fixture,
            fixtures: self.fixtures,
        }
    }
}
