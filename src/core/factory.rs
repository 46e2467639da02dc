use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PopulationError;

/// Result of building a single object.
pub type FactoryResult<T> = Result<T, PopulationError>;

type Constructor<T> = Box<dyn Fn(&[Value]) -> FactoryResult<T>>;

/// Builds fresh objects from positional constructor arguments.
///
/// Any `Fn(&[Value]) -> FactoryResult<T>` is a factory, so callers can hand a
/// closure to [`PopulateOptionsBuilder::factory`](super::options::PopulateOptionsBuilder::factory)
/// to bypass the repository's default constructor.
pub trait ObjectFactory<T> {
    fn create(&self, args: &[Value]) -> FactoryResult<T>;
}

impl<T, F> ObjectFactory<T> for F
where
    F: Fn(&[Value]) -> FactoryResult<T>,
{
    fn create(&self, args: &[Value]) -> FactoryResult<T> {
        self(args)
    }
}

/// Type metadata of a populated class: its name and default constructor.
///
/// This is the factory used by [`Populator`](super::populator::Populator) when
/// the call does not override it.
pub struct ClassMetadata<T> {
    name: String,
    constructor: Constructor<T>,
}

impl<T> ClassMetadata<T> {
    /// Metadata with an explicit constructor.
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&[Value]) -> FactoryResult<T> + 'static,
    {
        Self {
            name: name.into(),
            constructor: Box::new(constructor),
        }
    }

    /// Metadata constructing objects with [`Default`].
    ///
    /// The default constructor takes no arguments: passing any fails with
    /// [`PopulationError::Construction`].
    pub fn with_default(name: impl Into<String>) -> Self
    where
        T: Default + 'static,
    {
        let name = name.into();
        let class = name.clone();
        Self::new(name, move |args: &[Value]| {
            if args.is_empty() {
                Ok(T::default())
            } else {
                Err(PopulationError::Construction(format!(
                    "{class} takes no constructor arguments, got {}",
                    args.len()
                )))
            }
        })
    }

    /// Metadata constructing objects by deserializing the positional arguments.
    ///
    /// Arguments are fed to serde as a sequence, which derived structs accept
    /// in field order. With no arguments, `null` is tried first so unit-like
    /// types and `Option`s construct as well.
    pub fn deserialized(name: impl Into<String>) -> Self
    where
        T: DeserializeOwned + 'static,
    {
        let name = name.into();
        let class = name.clone();
        Self::new(name, move |args: &[Value]| {
            if args.is_empty() {
                if let Ok(object) = serde_json::from_value(Value::Null) {
                    return Ok(object);
                }
            }
            serde_json::from_value(Value::Array(args.to_vec()))
                .map_err(|error| PopulationError::Construction(format!("{class}: {error}")))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> ObjectFactory<T> for ClassMetadata<T> {
    fn create(&self, args: &[Value]) -> FactoryResult<T> {
        (self.constructor)(args)
    }
}

impl<T> fmt::Debug for ClassMetadata<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMetadata")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
