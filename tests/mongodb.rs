use anyhow::Result;

use fake::{Fake, faker::lorem::en::Sentence, faker::name::en::Name};
use mongodb::{
    bson::{doc, oid::ObjectId},
    sync::Client,
};
use population::{
    core::{
        options::PopulateOptionsBuilder,
        populator::Populator,
        session::{ObjectManager, ObjectRepository},
    },
    session::mongodb::{MongodbDocumentManagerBuilder, MongodbRepository},
};
use serde::{Deserialize, Serialize};
use testcontainers_modules::{
    mongo::Mongo,
    testcontainers::{Container, runners::SyncRunner},
};

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Book {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    author: String,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            id: ObjectId::new(),
            title: String::new(),
            author: String::new(),
        }
    }
}

fn start_mongo() -> Result<(Container<Mongo>, Client)> {
    let node = Mongo::default().start()?;
    let port = node.get_host_port_ipv4(27017)?;
    let client = Client::with_uri_str(format!("mongodb://127.0.0.1:{port}/"))?;
    Ok((node, client))
}

fn fake_book(book: &mut Book) {
    book.title = Sentence(2..5).fake();
    book.author = Name().fake();
}

#[test]
fn populate_books_collection() -> Result<()> {
    let (_node, client) = start_mongo()?;
    let collection = client.database("test").collection::<Book>("books");

    let manager = MongodbDocumentManagerBuilder::new()
        .collection(&collection)
        .build();
    let repository = MongodbRepository::new(&manager);
    assert_eq!(repository.repository_name(), "books");

    let options = PopulateOptionsBuilder::new().per_flush(8).build();
    let mut index = 0;

    Populator::new().populate(
        &repository,
        20,
        |book: &mut Book| {
            index += 1;
            fake_book(book);
            // skip every fifth book
            index % 5 != 0
        },
        &options,
    )?;

    assert_eq!(collection.count_documents(doc! {}).run()?, 16);
    assert_eq!(manager.pending_count(), 0);

    Ok(())
}

#[test]
fn rejecting_every_book_leaves_the_collection_empty() -> Result<()> {
    let (_node, client) = start_mongo()?;
    let collection = client.database("test").collection::<Book>("rejected");

    let manager = MongodbDocumentManagerBuilder::new()
        .collection(&collection)
        .build();
    let repository = MongodbRepository::new(&manager);
    let options = PopulateOptionsBuilder::new().unbatched().build();

    Populator::new().populate(&repository, 10, |_book: &mut Book| false, &options)?;

    assert_eq!(collection.count_documents(doc! {}).run()?, 0);
    assert_eq!(manager.pending_count(), 0);
    assert_eq!(manager.managed_count(), 0);

    Ok(())
}

#[test]
fn managed_books_are_kept_without_clear() -> Result<()> {
    let (_node, client) = start_mongo()?;
    let collection = client.database("test").collection::<Book>("kept");

    let manager = MongodbDocumentManagerBuilder::new()
        .collection(&collection)
        .build();
    let repository = MongodbRepository::new(&manager);
    let options = PopulateOptionsBuilder::new()
        .per_flush(4)
        .clear_after_flush(false)
        .build();

    Populator::new().populate(&repository, 11, fake_book, &options)?;

    assert_eq!(manager.managed_count(), 11);
    assert_eq!(collection.count_documents(doc! {}).run()?, 11);

    manager.clear()?;
    assert_eq!(manager.managed_count(), 0);

    Ok(())
}
