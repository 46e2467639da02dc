use std::cell::{Cell, RefCell};

use mongodb::{options::InsertManyOptions, sync::Collection};
use serde::Serialize;

use crate::{
    PopulationError,
    core::{
        factory::ClassMetadata,
        session::{DocumentRepository, ObjectManager, ObjectRepository, SessionResult},
    },
};

/// A document manager staging documents and inserting them on flush.
///
/// Flushing sends one unordered `insert_many` for the staged documents.
pub struct MongodbDocumentManager<'a, D: Send + Sync> {
    collection: &'a Collection<D>,
    pending: RefCell<Vec<D>>,
    managed: Cell<usize>,
}

impl<'a, D: Serialize + Send + Sync> MongodbDocumentManager<'a, D> {
    pub fn new(collection: &'a Collection<D>) -> Self {
        Self {
            collection,
            pending: RefCell::new(Vec::new()),
            managed: Cell::new(0),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn managed_count(&self) -> usize {
        self.managed.get()
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }
}

impl<D: Serialize + Send + Sync> ObjectManager<D> for MongodbDocumentManager<'_, D> {
    fn persist(&self, object: D) -> SessionResult {
        self.pending.borrow_mut().push(object);
        Ok(())
    }

    fn flush(&self) -> SessionResult {
        let documents = std::mem::take(&mut *self.pending.borrow_mut());

        if documents.is_empty() {
            log::debug!("No pending documents, skipping insert into {}", self.collection.name());
            return Ok(());
        }

        let opts = InsertManyOptions::builder().ordered(false).build();

        let result = self
            .collection
            .insert_many(&documents)
            .with_options(opts)
            .run();

        match result {
            Ok(inserted) => {
                self.managed
                    .set(self.managed.get() + inserted.inserted_ids.len());
                log::debug!(
                    "Inserted {} documents into {}",
                    inserted.inserted_ids.len(),
                    self.collection.name()
                );
                Ok(())
            }
            Err(error) => {
                log::error!("Insert into {} failed: {}", self.collection.name(), error);
                Err(PopulationError::Flush(error.to_string()))
            }
        }
    }

    fn clear(&self) -> SessionResult {
        self.pending.borrow_mut().clear();
        self.managed.set(0);
        log::debug!("Cleared MongoDB document manager");
        Ok(())
    }
}

#[derive(Default)]
pub struct MongodbDocumentManagerBuilder<'a, D: Send + Sync> {
    collection: Option<&'a Collection<D>>,
}

impl<'a, D: Serialize + Send + Sync> MongodbDocumentManagerBuilder<'a, D> {
    pub fn new() -> Self {
        Self { collection: None }
    }

    pub fn collection(
        mut self,
        collection: &'a Collection<D>,
    ) -> MongodbDocumentManagerBuilder<'a, D> {
        self.collection = Some(collection);
        self
    }

    /// # Panics
    /// Panics if no collection was set.
    pub fn build(&self) -> MongodbDocumentManager<'a, D> {
        MongodbDocumentManager::new(
            self.collection
                .expect("Collection is required. Call .collection() before .build()"),
        )
    }
}

/// A document repository over a [`MongodbDocumentManager`], named after its collection.
pub struct MongodbRepository<'a, D: Send + Sync> {
    manager: &'a MongodbDocumentManager<'a, D>,
    metadata: ClassMetadata<D>,
}

impl<'a, D: Serialize + Send + Sync> MongodbRepository<'a, D> {
    /// Repository building documents with `Default`.
    pub fn new(manager: &'a MongodbDocumentManager<'a, D>) -> Self
    where
        D: Default + 'static,
    {
        let metadata = ClassMetadata::with_default(manager.collection_name());
        Self::with_metadata(manager, metadata)
    }

    pub fn with_metadata(manager: &'a MongodbDocumentManager<'a, D>, metadata: ClassMetadata<D>) -> Self {
        Self { manager, metadata }
    }
}

impl<D: Serialize + Send + Sync> DocumentRepository<D> for MongodbRepository<'_, D> {
    fn document_manager(&self) -> &dyn ObjectManager<D> {
        self.manager
    }

    fn class_metadata(&self) -> &ClassMetadata<D> {
        &self.metadata
    }
}

impl<D: Serialize + Send + Sync> ObjectRepository<D> for MongodbRepository<'_, D> {
    fn repository_name(&self) -> &str {
        self.manager.collection_name()
    }

    fn as_document_repository(&self) -> Option<&dyn DocumentRepository<D>> {
        Some(self)
    }
}
