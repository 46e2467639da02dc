use std::fmt;

use serde_json::Value;

use super::factory::ObjectFactory;

/// Number of iterations between two flushes when nothing else is configured.
pub const DEFAULT_PER_FLUSH: usize = 100;

/// Per-call configuration of [`Populator::populate`](super::populator::Populator::populate).
///
/// Built with [`PopulateOptionsBuilder`]; [`PopulateOptions::default`] gives a
/// flush every [`DEFAULT_PER_FLUSH`] objects, a clear after every flush, the
/// repository's own constructor and no constructor arguments.
pub struct PopulateOptions<'a, T> {
    per_flush: Option<usize>,
    clear_after_flush: bool,
    factory: Option<&'a dyn ObjectFactory<T>>,
    constructor_args: Vec<Value>,
}

impl<'a, T> PopulateOptions<'a, T> {
    /// Flush cadence, `None` when batching is disabled.
    pub fn per_flush(&self) -> Option<usize> {
        self.per_flush.filter(|per_flush| *per_flush > 0)
    }

    pub fn clear_after_flush(&self) -> bool {
        self.clear_after_flush
    }

    pub fn factory(&self) -> Option<&'a dyn ObjectFactory<T>> {
        self.factory
    }

    pub fn constructor_args(&self) -> &[Value] {
        &self.constructor_args
    }
}

impl<T> Default for PopulateOptions<'_, T> {
    fn default() -> Self {
        PopulateOptionsBuilder::new().build()
    }
}

impl<T> fmt::Debug for PopulateOptions<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulateOptions")
            .field("per_flush", &self.per_flush)
            .field("clear_after_flush", &self.clear_after_flush)
            .field("factory", &self.factory.is_some())
            .field("constructor_args", &self.constructor_args)
            .finish()
    }
}

/// Builder for [`PopulateOptions`].
///
/// # Example
///
/// ```
/// use population::core::options::PopulateOptionsBuilder;
/// use serde_json::json;
///
/// let options = PopulateOptionsBuilder::<String>::new()
///     .per_flush(4)
///     .clear_after_flush(false)
///     .constructor_args(vec![json!("draft")])
///     .build();
///
/// assert_eq!(options.per_flush(), Some(4));
/// assert!(!options.clear_after_flush());
/// ```
pub struct PopulateOptionsBuilder<'a, T> {
    per_flush: Option<usize>,
    clear_after_flush: bool,
    factory: Option<&'a dyn ObjectFactory<T>>,
    constructor_args: Vec<Value>,
}

impl<'a, T> PopulateOptionsBuilder<'a, T> {
    pub fn new() -> PopulateOptionsBuilder<'a, T> {
        Self {
            per_flush: Some(DEFAULT_PER_FLUSH),
            clear_after_flush: true,
            factory: None,
            constructor_args: Vec::new(),
        }
    }

    /// Flushes after every `per_flush` objects. Zero disables batching.
    pub fn per_flush(mut self, per_flush: usize) -> PopulateOptionsBuilder<'a, T> {
        self.per_flush = Some(per_flush);
        self
    }

    /// Disables batching: the session is flushed once, at the end.
    pub fn unbatched(mut self) -> PopulateOptionsBuilder<'a, T> {
        self.per_flush = None;
        self
    }

    pub fn clear_after_flush(mut self, clear_after_flush: bool) -> PopulateOptionsBuilder<'a, T> {
        self.clear_after_flush = clear_after_flush;
        self
    }

    /// Replaces the repository's default constructor.
    pub fn factory(mut self, factory: &'a dyn ObjectFactory<T>) -> PopulateOptionsBuilder<'a, T> {
        self.factory = Some(factory);
        self
    }

    pub fn constructor_args(mut self, constructor_args: Vec<Value>) -> PopulateOptionsBuilder<'a, T> {
        self.constructor_args = constructor_args;
        self
    }

    pub fn build(self) -> PopulateOptions<'a, T> {
        PopulateOptions {
            per_flush: self.per_flush,
            clear_after_flush: self.clear_after_flush,
            factory: self.factory,
            constructor_args: self.constructor_args,
        }
    }
}

impl<T> Default for PopulateOptionsBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
