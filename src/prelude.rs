//! Commonly used imports
//!
//! Use `use fluentseq::prelude::*;` to get the construction entry points, every
//! chaining method and the terminal operations in one go.

// Core types
pub use crate::cursor::{BoxedCursor, Cursor};
pub use crate::cursors::{IntoSource, Source, of};

// Sources built on demand
pub use crate::lazy::lazy;

// Stages
pub use crate::distinct::DistinctExt;
pub use crate::filter::FilterExt;
pub use crate::flatten::FlattenExt;
pub use crate::keyed::KeyedExt;
pub use crate::map::MapExt;
pub use crate::merge::{MergeExt, merge};
pub use crate::peek::PeekExt;
pub use crate::slice::SliceExt;
pub use crate::sorted::SortedExt;

// Execution
pub use crate::iter::CursorIter;
pub use crate::terminal::Terminal;
