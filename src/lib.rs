#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Population

 **Population** fills ORM entities and ODM documents with placeholder data. It is meant
 for seeding development and demo databases: you say how many objects you want and how
 to fill each one in, and it takes care of building them, staging them in the
 persistence session and flushing the session in batches.

 ## Core Concepts

- **ObjectManager:** The persistence session. It stages objects (`persist`), commits them (`flush`) and detaches everything it tracks (`clear`).
- **ObjectRepository:** A collection of one type. A repository belongs to a session family, entity (ORM) or document (ODM), and gives access to that family's manager and to the type's `ClassMetadata`.
- **ObjectFactory:** Builds a fresh object from positional constructor arguments. `ClassMetadata` is the default one; any closure can replace it.
- **Populator:** The batch loop. It builds `count` objects, hands each one to your initializer, persists the ones that were not rejected and flushes every `per_flush` objects.
- **FixtureLoader:** Runs several fixtures in order, sharing one populator.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| orm           | Enables the SeaORM entity manager and repository              |
| mongodb       | Enables the MongoDB document manager and repository           |
| full          | Enables all available features                                |

 ## Getting Started

```rust
# use std::cell::RefCell;
# use population::{
#     core::{
#         factory::ClassMetadata,
#         options::PopulateOptionsBuilder,
#         populator::Populator,
#         session::{EntityRepository, ObjectManager, ObjectRepository, SessionResult},
#     },
#     PopulationError,
# };
#[derive(Debug, Default)]
struct Post {
    title: String,
    published: bool,
}

#[derive(Default)]
struct Posts {
    staged: RefCell<Vec<Post>>,
    stored: RefCell<Vec<Post>>,
}

impl ObjectManager<Post> for Posts {
    fn persist(&self, post: Post) -> SessionResult {
        self.staged.borrow_mut().push(post);
        Ok(())
    }
    fn flush(&self) -> SessionResult {
        self.stored.borrow_mut().append(&mut self.staged.borrow_mut());
        Ok(())
    }
    fn clear(&self) -> SessionResult {
        Ok(())
    }
}

struct PostRepository {
    posts: Posts,
    metadata: ClassMetadata<Post>,
}

impl EntityRepository<Post> for PostRepository {
    fn entity_manager(&self) -> &dyn ObjectManager<Post> {
        &self.posts
    }
    fn class_metadata(&self) -> &ClassMetadata<Post> {
        &self.metadata
    }
}

impl ObjectRepository<Post> for PostRepository {
    fn repository_name(&self) -> &str {
        "posts"
    }
    fn as_entity_repository(&self) -> Option<&dyn EntityRepository<Post>> {
        Some(self)
    }
}

fn main() -> Result<(), PopulationError> {
    let repository = PostRepository {
        posts: Posts::default(),
        metadata: ClassMetadata::with_default("Post"),
    };

    let options = PopulateOptionsBuilder::new().per_flush(4).build();

    let mut n = 0;
    Populator::new().populate(
        &repository,
        10,
        |post: &mut Post| {
            n += 1;
            post.title = format!("Post #{n}");
            post.published = n % 2 == 0;
            // drafts are not persisted
            post.published
        },
        &options,
    )?;

    assert_eq!(repository.posts.stored.borrow().len(), 5);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: session abstractions, factories, options and the populator
pub mod core;

/// Error types for population
pub mod error;

#[doc(inline)]
pub use error::*;

/// Session-family adapters (for example: SeaORM and MongoDB)
pub mod session;
