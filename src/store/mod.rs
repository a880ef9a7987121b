//! Page/revision store with a synchronized full-text index

mod error;
mod phantom;
mod repository;
mod save;
mod schema;
mod search;
pub mod sqlite;
pub mod validate;

pub use error::{StoreError, StoreResult};
pub use phantom::{PhantomReport, resolve_phantoms};
pub use repository::{CommentRepository, PageRepository, Visibility};
pub use save::{SaveOutcome, save_page};
pub use schema::{SCHEMA_VERSION, create_schema, schema_version};
pub use search::sanitize_query;
pub use sqlite::SqliteStore;
