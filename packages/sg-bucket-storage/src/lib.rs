//! Storage collections with bounded cost per operation.
//!
//! Both structures split their contents into buckets stored under separate
//! keys, so a single operation only reads and writes one or two buckets no
//! matter how large the collection grows.

mod big_vector;
mod bucket_table;
mod error;

pub use big_vector::{bucket_index, BigVector, VectorInfo};
pub use bucket_table::{BucketTable, TableInfo};
pub use error::StorageError;
