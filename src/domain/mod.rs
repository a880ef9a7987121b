//! Core types: Page, Revision, Comment and their typed ids

mod id;
mod page;
mod revision;

pub use id::{CommentId, PageId, ParseIdError, RevisionId, UserId};
pub use page::{Page, PageState, PageStats, PhantomWithSource};
pub use revision::{Comment, Revision, SearchHit};
