use fake::{
    Fake,
    faker::{lorem::en::Paragraph, lorem::en::Sentence, name::en::Name},
};
use log::info;
use population::{
    core::{options::PopulateOptionsBuilder, populator::Populator},
    session::orm::{OrmEntityManager, OrmEntityManagerBuilder, OrmRepository},
};
use sea_orm::{ActiveValue::Set, Database, PaginatorTrait, entity::prelude::*};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let db = Database::connect("sqlite::memory:").await?;
    db.execute_unprepared(
        "CREATE TABLE posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            content TEXT NOT NULL
        )",
    )
    .await?;

    let manager: OrmEntityManager<ActiveModel> =
        OrmEntityManagerBuilder::new().connection(&db).build();
    let repository = OrmRepository::new(&manager);

    let options = PopulateOptionsBuilder::new().per_flush(50).build();

    // Generate 120 blog posts
    Populator::new().populate(
        &repository,
        120,
        |post: &mut ActiveModel| {
            post.title = Set(Sentence(3..8).fake());
            post.author = Set(Name().fake());
            post.content = Set(Paragraph(3..6).fake());
        },
        &options,
    )?;

    info!("{} posts in database", Entity::find().count(&db).await?);

    Ok(())
}
