use crate::error::PopulationError;

use super::factory::ClassMetadata;

/// Result of a single session operation.
pub type SessionResult = Result<(), PopulationError>;

/// A unit-of-work over objects of type `T`.
///
/// Implementations track staged objects until [`flush`](ObjectManager::flush)
/// commits them, and forget every tracked object on [`clear`](ObjectManager::clear).
/// Methods take `&self`: sessions are expected to use interior mutability and are
/// only ever driven from one thread at a time.
pub trait ObjectManager<T> {
    /// Stages `object` for persistence. Ownership moves to the session.
    fn persist(&self, object: T) -> SessionResult;

    /// Commits every staged object.
    fn flush(&self) -> SessionResult;

    /// Detaches every object tracked by the session.
    fn clear(&self) -> SessionResult;
}

/// Repository backed by an object-relational entity manager.
pub trait EntityRepository<T> {
    fn entity_manager(&self) -> &dyn ObjectManager<T>;
    fn class_metadata(&self) -> &ClassMetadata<T>;
}

/// Repository backed by an object-document manager.
pub trait DocumentRepository<T> {
    fn document_manager(&self) -> &dyn ObjectManager<T>;
    fn class_metadata(&self) -> &ClassMetadata<T>;
}

/// The session family a repository belongs to, resolved once per populate call.
pub enum RepositoryFamily<'r, T> {
    Entity(&'r dyn EntityRepository<T>),
    Document(&'r dyn DocumentRepository<T>),
}

impl<T> RepositoryFamily<'_, T> {
    /// Short label used in log records.
    pub fn label(&self) -> &'static str {
        match self {
            RepositoryFamily::Entity(_) => "entity",
            RepositoryFamily::Document(_) => "document",
        }
    }
}

/// A named collection of objects of type `T`.
///
/// A repository advertises which session family it belongs to by overriding
/// [`as_entity_repository`](ObjectRepository::as_entity_repository) or
/// [`as_document_repository`](ObjectRepository::as_document_repository).
/// A repository that overrides neither cannot be populated.
pub trait ObjectRepository<T> {
    fn repository_name(&self) -> &str;

    fn as_entity_repository(&self) -> Option<&dyn EntityRepository<T>> {
        None
    }

    fn as_document_repository(&self) -> Option<&dyn DocumentRepository<T>> {
        None
    }

    /// Resolves the session family. Document repositories win when a type
    /// answers for both families.
    fn family(&self) -> Option<RepositoryFamily<'_, T>> {
        if let Some(repository) = self.as_document_repository() {
            return Some(RepositoryFamily::Document(repository));
        }
        self.as_entity_repository().map(RepositoryFamily::Entity)
    }
}
