//! In-memory sessions and repositories.
use std::cell::{Cell, RefCell};

use population::core::{
    factory::ClassMetadata,
    session::{
        DocumentRepository, EntityRepository, ObjectManager, ObjectRepository, SessionResult,
    },
};

/// Keeps staged objects until flush, then moves them to `stored`.
pub struct MemoryManager<T> {
    pub pending: RefCell<Vec<T>>,
    pub stored: RefCell<Vec<T>>,
    pub managed: Cell<usize>,
    pub flushes: Cell<usize>,
    pub clears: Cell<usize>,
}

impl<T> Default for MemoryManager<T> {
    fn default() -> Self {
        Self {
            pending: RefCell::new(Vec::new()),
            stored: RefCell::new(Vec::new()),
            managed: Cell::new(0),
            flushes: Cell::new(0),
            clears: Cell::new(0),
        }
    }
}

impl<T> ObjectManager<T> for MemoryManager<T> {
    fn persist(&self, object: T) -> SessionResult {
        self.pending.borrow_mut().push(object);
        Ok(())
    }

    fn flush(&self) -> SessionResult {
        let mut pending = self.pending.borrow_mut();
        self.managed.set(self.managed.get() + pending.len());
        self.stored.borrow_mut().append(&mut pending);
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }

    fn clear(&self) -> SessionResult {
        self.pending.borrow_mut().clear();
        self.managed.set(0);
        self.clears.set(self.clears.get() + 1);
        Ok(())
    }
}

/// Entity repository over any manager.
pub struct EntityRepo<T, M> {
    pub name: String,
    pub manager: M,
    pub metadata: ClassMetadata<T>,
}

impl<T, M> EntityRepo<T, M> {
    pub fn new(name: &str, manager: M, metadata: ClassMetadata<T>) -> Self {
        Self {
            name: name.to_owned(),
            manager,
            metadata,
        }
    }
}

impl<T, M: ObjectManager<T>> EntityRepository<T> for EntityRepo<T, M> {
    fn entity_manager(&self) -> &dyn ObjectManager<T> {
        &self.manager
    }

    fn class_metadata(&self) -> &ClassMetadata<T> {
        &self.metadata
    }
}

impl<T, M: ObjectManager<T>> ObjectRepository<T> for EntityRepo<T, M> {
    fn repository_name(&self) -> &str {
        &self.name
    }

    fn as_entity_repository(&self) -> Option<&dyn EntityRepository<T>> {
        Some(self)
    }
}

/// Document repository over any manager.
pub struct DocumentRepo<T, M> {
    pub name: String,
    pub manager: M,
    pub metadata: ClassMetadata<T>,
}

impl<T, M> DocumentRepo<T, M> {
    pub fn new(name: &str, manager: M, metadata: ClassMetadata<T>) -> Self {
        Self {
            name: name.to_owned(),
            manager,
            metadata,
        }
    }
}

impl<T, M: ObjectManager<T>> DocumentRepository<T> for DocumentRepo<T, M> {
    fn document_manager(&self) -> &dyn ObjectManager<T> {
        &self.manager
    }

    fn class_metadata(&self) -> &ClassMetadata<T> {
        &self.metadata
    }
}

impl<T, M: ObjectManager<T>> ObjectRepository<T> for DocumentRepo<T, M> {
    fn repository_name(&self) -> &str {
        &self.name
    }

    fn as_document_repository(&self) -> Option<&dyn DocumentRepository<T>> {
        Some(self)
    }
}

/// A repository of no known session family.
pub struct FlatFileRepo;

impl<T> ObjectRepository<T> for FlatFileRepo {
    fn repository_name(&self) -> &str {
        "posts.txt"
    }
}
