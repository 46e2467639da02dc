use std::cell::{Cell, RefCell};

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityName, EntityTrait};
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::{
    PopulationError,
    core::{
        factory::ClassMetadata,
        session::{EntityRepository, ObjectManager, ObjectRepository, SessionResult},
    },
};

/// An entity manager staging ORM active models and inserting them on flush.
///
/// Persisted active models are buffered in memory. [`flush`](ObjectManager::flush)
/// inserts the whole buffer with a single `insert_many` statement, so one
/// populate batch costs one database round trip. [`clear`](ObjectManager::clear)
/// forgets both the buffer and the count of managed models.
///
/// # Runtime
///
/// The insert is async and is bridged with `tokio::task::block_in_place`, which
/// requires a multi-threaded tokio runtime. Flushing outside of one fails with
/// [`PopulationError::Flush`].
///
/// # Thread Safety
///
/// This manager is **not thread-safe**: it is designed to be driven by a single
/// populate call at a time.
///
/// # Examples
///
/// ```
/// use population::session::orm::OrmEntityManagerBuilder;
/// use sea_orm::Database;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Database::connect("sqlite::memory:").await?;
///
/// // let manager: OrmEntityManager<post::ActiveModel> = OrmEntityManagerBuilder::new()
/// //     .connection(&db)
/// //     .build();
/// # Ok(())
/// # }
/// ```
pub struct OrmEntityManager<'a, A>
where
    A: ActiveModelTrait + Send,
{
    /// Database connection reference
    connection: &'a DatabaseConnection,
    /// Active models staged since the last flush
    pending: RefCell<Vec<A>>,
    /// Active models inserted since the last clear
    managed: Cell<usize>,
}

impl<'a, A> OrmEntityManager<'a, A>
where
    A: ActiveModelTrait + Send,
{
    pub fn new(connection: &'a DatabaseConnection) -> Self {
        Self {
            connection,
            pending: RefCell::new(Vec::new()),
            managed: Cell::new(0),
        }
    }

    /// Number of active models staged and not yet flushed.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of active models flushed since the last clear.
    pub fn managed_count(&self) -> usize {
        self.managed.get()
    }

    async fn insert_batch_async(&self, active_models: Vec<A>) -> Result<(), DbErr> {
        <A as ActiveModelTrait>::Entity::insert_many(active_models)
            .exec(self.connection)
            .await?;
        Ok(())
    }

    fn insert_batch(&self, active_models: Vec<A>) -> SessionResult {
        let handle = Handle::try_current().map_err(|error| {
            log::error!("No tokio runtime to insert batch: {}", error);
            PopulationError::Flush(format!("No tokio runtime to insert batch: {}", error))
        })?;

        if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
            let error_msg = "Inserting a batch requires a multi-threaded tokio runtime";
            log::error!("{}", error_msg);
            return Err(PopulationError::Flush(error_msg.to_string()));
        }

        let result = tokio::task::block_in_place(|| {
            handle.block_on(async { self.insert_batch_async(active_models).await })
        });

        match result {
            Ok(()) => {
                log::debug!("Successfully inserted batch to database");
                Ok(())
            }
            Err(db_err) => {
                let error_msg = format!("Failed to insert batch to database: {}", db_err);
                log::error!("{}", error_msg);
                Err(PopulationError::Flush(error_msg))
            }
        }
    }
}

impl<A> ObjectManager<A> for OrmEntityManager<'_, A>
where
    A: ActiveModelTrait + Send,
{
    fn persist(&self, object: A) -> SessionResult {
        self.pending.borrow_mut().push(object);
        Ok(())
    }

    /// Inserts every staged active model. Nothing is sent when the buffer is empty.
    fn flush(&self) -> SessionResult {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());

        if batch.is_empty() {
            log::debug!("No pending active models, skipping database operation");
            return Ok(());
        }

        let batch_size = batch.len();
        self.insert_batch(batch)?;
        self.managed.set(self.managed.get() + batch_size);

        log::info!("Flushed {} active models to database", batch_size);
        Ok(())
    }

    fn clear(&self) -> SessionResult {
        self.pending.borrow_mut().clear();
        self.managed.set(0);
        log::debug!("Cleared ORM entity manager");
        Ok(())
    }
}

/// A builder for creating ORM entity managers.
///
/// # Required Configuration
///
/// - **Connection**: Database connection reference
#[derive(Default)]
pub struct OrmEntityManagerBuilder<'a> {
    /// Database connection - None until set by the user
    connection: Option<&'a DatabaseConnection>,
}

impl<'a> OrmEntityManagerBuilder<'a> {
    pub fn new() -> Self {
        Self { connection: None }
    }

    pub fn connection(mut self, connection: &'a DatabaseConnection) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Builds the entity manager.
    ///
    /// # Panics
    /// Panics if the required database connection parameter is missing.
    pub fn build<A>(self) -> OrmEntityManager<'a, A>
    where
        A: ActiveModelTrait + Send,
    {
        let connection = self
            .connection
            .expect("Database connection is required. Call .connection() before .build()");

        OrmEntityManager::new(connection)
    }
}

/// An entity repository over an [`OrmEntityManager`].
///
/// By default objects are built with the active model's `Default`, i.e. with
/// every column `NotSet`, and the repository is named after the entity's table.
pub struct OrmRepository<'a, A>
where
    A: ActiveModelTrait + Send,
{
    manager: &'a OrmEntityManager<'a, A>,
    metadata: ClassMetadata<A>,
}

impl<'a, A> OrmRepository<'a, A>
where
    A: ActiveModelTrait + Send,
{
    pub fn new(manager: &'a OrmEntityManager<'a, A>) -> Self
    where
        A: Default + 'static,
    {
        let table_name = <<A as ActiveModelTrait>::Entity as Default>::default()
            .table_name()
            .to_owned();
        Self::with_metadata(manager, ClassMetadata::with_default(table_name))
    }

    /// Repository with its own constructor, e.g. [`ClassMetadata::deserialized`].
    pub fn with_metadata(manager: &'a OrmEntityManager<'a, A>, metadata: ClassMetadata<A>) -> Self {
        Self { manager, metadata }
    }
}

impl<A> EntityRepository<A> for OrmRepository<'_, A>
where
    A: ActiveModelTrait + Send,
{
    fn entity_manager(&self) -> &dyn ObjectManager<A> {
        self.manager
    }

    fn class_metadata(&self) -> &ClassMetadata<A> {
        &self.metadata
    }
}

impl<A> ObjectRepository<A> for OrmRepository<'_, A>
where
    A: ActiveModelTrait + Send,
{
    fn repository_name(&self) -> &str {
        self.metadata.name()
    }

    fn as_entity_repository(&self) -> Option<&dyn EntityRepository<A>> {
        Some(self)
    }
}
