//! A hash table that chains colliding keys onto singly linked list buckets,
//! doubling its bucket array whenever the load factor climbs past 0.75.
//!
//! ```
//! use chained_table::{Error, HashTable};
//!
//! let mut numerals = HashTable::with_buckets(4)?;
//! numerals.set("I", 1);
//! numerals.set("V", 5);
//! numerals.set("X", 10);
//! assert_eq!(4, numerals.bucket_count());
//!
//! // the fourth entry pushes the load factor past the threshold
//! numerals.set("L", 50);
//! assert_eq!(8, numerals.bucket_count());
//! assert_eq!(Ok(&50), numerals.get("L"));
//!
//! assert_eq!(Ok(1), numerals.delete("I"));
//! assert_eq!(Err(Error::KeyNotFound), numerals.get("I"));
//! # Ok::<(), Error>(())
//! ```

mod error;
pub mod hash_table;
mod identity_hasher;
pub mod linked_list;
#[cfg(feature = "shared_table")]
mod shared_table;

#[cfg(test)]
mod proptests;

pub use error::{Error, Result};
pub use hash_table::{HashTable, DEFAULT_BUCKETS, MAX_LOAD_FACTOR};
pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use linked_list::LinkedList;
#[cfg(feature = "shared_table")]
pub use shared_table::SharedHashTable;
