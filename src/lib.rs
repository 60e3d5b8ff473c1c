//! Generic segment tree over a fixed-size array.
//!
//! A [`SegmentTree`] answers "combine every element in `[start, end]`" under a caller supplied
//! associative [`Operator`] and applies point updates, both in logarithmic time.
//!
//! ```
//! use segment_tree::{operators::MinOperator, SegmentTree};
//!
//! let mut tree = SegmentTree::new(&[1, 6, 8, 9], MinOperator, i32::MAX).unwrap();
//! assert_eq!(tree.query_range(1, 3), 6);
//! tree.set(0, 100).unwrap();
//! assert_eq!(tree.query_range(0, 3), 6);
//! ```

pub mod error;
pub mod operators;
pub mod segment_tree;
pub mod traits;
pub mod util;

pub use crate::error::SegmentTreeError;
pub use crate::segment_tree::SegmentTree;
pub use crate::traits::{IdentityOperator, Operator, OwnedSize};
