use std::time::Instant;

use log::{debug, error, info};

use crate::error::PopulationError;

use super::{
    factory::{ClassMetadata, ObjectFactory},
    initializer::InitializerOutcome,
    options::PopulateOptions,
    session::{DocumentRepository, EntityRepository, ObjectManager, ObjectRepository, RepositoryFamily},
};

/// Result of a populate call.
pub type PopulateResult = Result<(), PopulationError>;

/// Creates placeholder objects in bulk and hands them to a persistence session.
///
/// Every populate call runs the same loop: build an object, let the initializer
/// fill it in, stage it unless the initializer returned `false`, and flush (then
/// optionally clear) the session every `per_flush` objects. One last flush, and
/// clear, happens once the loop is over.
///
/// # Example
///
/// ```rust,no_run,compile_fail
/// use population::core::{options::PopulateOptions, populator::Populator};
///
/// let populator = Populator::new();
///
/// // Generate 10 blog posts
/// populator.populate(&post_repository, 10, |post: &mut Post| {
///     post.title = Sentence(3..8).fake();
///     post.content = Paragraph(6..10).fake();
/// }, &PopulateOptions::default())?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Populator {}

impl Populator {
    pub fn new() -> Populator {
        Populator {}
    }

    /// Populates `repository` with `count` objects.
    ///
    /// The repository's session family is resolved once, before anything is
    /// constructed. A repository that is neither an entity nor a document
    /// repository fails with [`PopulationError::UnsupportedRepositoryKind`].
    /// Any other error stops the loop and is returned unchanged; objects flushed
    /// before it stay persisted.
    pub fn populate<T, F, O>(
        &self,
        repository: &dyn ObjectRepository<T>,
        count: usize,
        initializer: F,
        options: &PopulateOptions<'_, T>,
    ) -> PopulateResult
    where
        F: FnMut(&mut T) -> O,
        O: InitializerOutcome,
    {
        match repository.family() {
            Some(RepositoryFamily::Document(documents)) => {
                self.populate_document(documents, count, initializer, options)
            }
            Some(RepositoryFamily::Entity(entities)) => {
                self.populate_entity(entities, count, initializer, options)
            }
            None => {
                error!(
                    "Repository {} is neither an entity nor a document repository",
                    repository.repository_name()
                );
                Err(PopulationError::UnsupportedRepositoryKind(
                    repository.repository_name().to_owned(),
                ))
            }
        }
    }

    /// Populates a document repository with `count` documents.
    pub fn populate_document<T, F, O>(
        &self,
        repository: &dyn DocumentRepository<T>,
        count: usize,
        initializer: F,
        options: &PopulateOptions<'_, T>,
    ) -> PopulateResult
    where
        F: FnMut(&mut T) -> O,
        O: InitializerOutcome,
    {
        let family = RepositoryFamily::Document(repository);
        self.populate_object(
            family.label(),
            repository.document_manager(),
            repository.class_metadata(),
            count,
            initializer,
            options,
        )
    }

    /// Populates an entity repository with `count` entities.
    pub fn populate_entity<T, F, O>(
        &self,
        repository: &dyn EntityRepository<T>,
        count: usize,
        initializer: F,
        options: &PopulateOptions<'_, T>,
    ) -> PopulateResult
    where
        F: FnMut(&mut T) -> O,
        O: InitializerOutcome,
    {
        let family = RepositoryFamily::Entity(repository);
        self.populate_object(
            family.label(),
            repository.entity_manager(),
            repository.class_metadata(),
            count,
            initializer,
            options,
        )
    }

    fn populate_object<T, F, O>(
        &self,
        family: &str,
        manager: &dyn ObjectManager<T>,
        metadata: &ClassMetadata<T>,
        count: usize,
        mut initializer: F,
        options: &PopulateOptions<'_, T>,
    ) -> PopulateResult
    where
        F: FnMut(&mut T) -> O,
        O: InitializerOutcome,
    {
        let start = Instant::now();

        info!(
            "Start of population: {} {} {}(s)",
            count,
            metadata.name(),
            family
        );

        let factory: &dyn ObjectFactory<T> = match options.factory() {
            Some(factory) => factory,
            None => metadata,
        };
        let constructor_args = options.constructor_args();
        let per_flush = options.per_flush();

        let mut persisted: usize = 0;

        for index in 0..count {
            let mut object = factory.create(constructor_args)?;

            if initializer(&mut object).into_acceptance()? {
                manager.persist(object)?;
                persisted += 1;
            } else {
                debug!("Object #{} of {} rejected by initializer", index, metadata.name());
            }

            if let Some(per_flush) = per_flush {
                if (index + 1) % per_flush == 0 {
                    Self::flush(manager, options)?;
                }
            }
        }

        Self::flush(manager, options)?;

        info!(
            "End of population: {}/{} {}(s) persisted in {:?}",
            persisted,
            count,
            metadata.name(),
            start.elapsed()
        );

        Ok(())
    }

    fn flush<T>(manager: &dyn ObjectManager<T>, options: &PopulateOptions<'_, T>) -> PopulateResult {
        debug!("Flushing session");
        manager.flush()?;

        if options.clear_after_flush() {
            debug!("Clearing session");
            manager.clear()?;
        }

        Ok(())
    }
}
