//! # fluentseq - Lazy Sequence Pipelines
//!
//! fluentseq builds chains of transformation stages over any finite or infinite
//! source of values and evaluates them on demand, one element at a time.
//!
//! ```
//! use fluentseq::prelude::*;
//!
//! let words = of(vec!["pear", "fig", "apple", "fig", "kiwi"])
//!     .distinct()
//!     .filter(|word, _| word.len() > 3)
//!     .sorted()
//!     .to_vec();
//! assert_eq!(words, Ok(vec!["apple", "kiwi", "pear"]));
//! ```
//!
//! Every stage is a [`Cursor`] owning its upstream. The library emphasizes:
//!
//! - **Laziness**: building a pipeline pulls nothing; only terminal operations do
//! - **Zero panics**: source errors flow through every stage as `Result`s
//! - **Composability**: each stage is a small cursor wrapping the previous one
//! - **Restartability**: collection and [`lazy()`] sources can be traversed again

pub mod cursor;
pub mod cursors;
pub mod distinct;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod flatten;
pub mod iter;
pub mod keyed;
pub mod lazy;
pub mod map;
pub mod merge;
pub mod peek;
pub mod prelude;
pub mod slice;
pub mod sorted;
pub mod terminal;

pub use cursor::{BoxedCursor, Cursor};
pub use cursors::{IntoSource, Source, of};
pub use error::FluentError;
pub use fingerprint::{Fingerprint, Fingerprinted};
pub use iter::CursorIter;
pub use lazy::{Lazy, lazy};
pub use merge::{Merge, merge};
pub use terminal::Terminal;
