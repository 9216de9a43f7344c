//! Leaf cursors: the concrete sources a pipeline starts from

pub mod collection;
pub mod push;
pub mod source;

pub use collection::CollectionCursor;
pub use push::PushCursor;
pub use source::{IntoSource, Source, of};
