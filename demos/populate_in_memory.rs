use std::cell::RefCell;

use fake::{Fake, faker::internet::en::FreeEmail, faker::name::en::Name};
use log::info;
use population::{
    PopulationError,
    core::{
        factory::ClassMetadata,
        options::PopulateOptionsBuilder,
        populator::Populator,
        session::{DocumentRepository, ObjectManager, ObjectRepository, SessionResult},
    },
};

#[derive(Debug, Default)]
struct Person {
    name: String,
    email: String,
}

/// A document store keeping everything in a vector.
#[derive(Default)]
struct MemoryStore {
    staged: RefCell<Vec<Person>>,
    documents: RefCell<Vec<Person>>,
}

impl ObjectManager<Person> for MemoryStore {
    fn persist(&self, person: Person) -> SessionResult {
        self.staged.borrow_mut().push(person);
        Ok(())
    }

    fn flush(&self) -> SessionResult {
        let mut staged = self.staged.borrow_mut();
        info!("Flushing {} persons", staged.len());
        self.documents.borrow_mut().append(&mut staged);
        Ok(())
    }

    fn clear(&self) -> SessionResult {
        self.staged.borrow_mut().clear();
        Ok(())
    }
}

struct PersonRepository {
    store: MemoryStore,
    metadata: ClassMetadata<Person>,
}

impl DocumentRepository<Person> for PersonRepository {
    fn document_manager(&self) -> &dyn ObjectManager<Person> {
        &self.store
    }

    fn class_metadata(&self) -> &ClassMetadata<Person> {
        &self.metadata
    }
}

impl ObjectRepository<Person> for PersonRepository {
    fn repository_name(&self) -> &str {
        "persons"
    }

    fn as_document_repository(&self) -> Option<&dyn DocumentRepository<Person>> {
        Some(self)
    }
}

fn main() -> Result<(), PopulationError> {
    env_logger::init();

    let repository = PersonRepository {
        store: MemoryStore::default(),
        metadata: ClassMetadata::with_default("Person"),
    };

    let options = PopulateOptionsBuilder::new().per_flush(25).build();

    Populator::new().populate(
        &repository,
        100,
        |person: &mut Person| {
            person.name = Name().fake();
            person.email = FreeEmail().fake();
        },
        &options,
    )?;

    for person in repository.store.documents.borrow().iter().take(5) {
        info!("Person: {:?}", person);
    }

    Ok(())
}
