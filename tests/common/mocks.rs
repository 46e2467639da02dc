//! Mock version of a persistence session.
use mockall::mock;

use population::core::session::{ObjectManager, SessionResult};

use super::Post;

mock! {
    pub Manager {}
    impl ObjectManager<Post> for Manager {
        fn persist(&self, object: Post) -> SessionResult;
        fn flush(&self) -> SessionResult;
        fn clear(&self) -> SessionResult;
    }
}
