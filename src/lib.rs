//! # sovran-set
//!
//! A heterogeneous, thread-safe set library.
//!
//! `sovran-set` stores values of different types in a single mathematical set
//! while keeping element identity strict: `1`, `1u64`, `1.0` and `"1"` are four
//! different elements. Values that cannot be compared structurally (lists and
//! maps) are rejected with an error instead of corrupting the set.
//!
//! ## Key Features
//!
//! - **Heterogeneous**: integers, floats, strings, tuples and any user type
//!   implementing `Eq + Hash` share one set through [`Value`]
//! - **Thread-safe option**: [`SyncSet`] wraps a [`Set`] in a mutex, with
//!   zero-copy conversion in both directions
//! - **Deadlock-free algebra**: the second operand of an operation is read
//!   through [`ToUnsync`] before the receiver is locked
//! - **Type partitioning**: [`TypedSetGroup`] keeps one sub-set per
//!   [`TypeTag`] and presents them as a single set
//! - **Explicit configuration**: strict duplicate detection is opted into per
//!   set through [`SetOptions`]
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_set::{Set, SetError, Value};
//!
//! fn main() -> Result<(), SetError> {
//!     let mut set = Set::new();
//!
//!     // Store values of different types
//!     set.add(1)?;
//!     set.add("two")?;
//!     set.add(3.0)?;
//!
//!     assert!(set.contains(&Value::from("two")));
//!     assert!(!set.contains(&Value::from(3)));
//!
//!     // Lists are not valid set elements
//!     match set.add(vec![1, 2, 3]) {
//!         Err(SetError::InadmissibleElement(kind)) => println!("Rejected a {}", kind),
//!         other => println!("Unexpected: {:?}", other),
//!     }
//!
//!     println!("{}", set);
//!     Ok(())
//! }
//! ```
//!
//! ### Set Algebra
//!
//! ```rust
//! use sovran_set::{Set, Value};
//!
//! let a = Set::from_values([Value::from(1), Value::from(2), Value::from("3")]);
//! let b = Set::from_values([Value::from("3"), Value::from(4.0)]);
//!
//! assert_eq!(a.unite(&b), b.unite(&a));
//! assert_eq!(a.diff(&b), Set::from_values([1, 2]));
//! assert_eq!(a.symmetric_diff(&b), a.diff(&b).unite(&b.diff(&a)));
//! assert!(a.intersect(&b).is_subset_of(&a));
//! ```
//!
//! ### Sharing a Set Between Threads
//!
//! ```rust
//! use sovran_set::{Set, SetError, SyncSet};
//! use std::sync::Arc;
//! use std::thread;
//!
//! fn main() -> Result<(), SetError> {
//!     let set = Arc::new(Set::from_values([1, 2, 3]).into_sync());
//!
//!     let handles: Vec<_> = (3..6)
//!         .map(|i| {
//!             let set = Arc::clone(&set);
//!             thread::spawn(move || set.add(i))
//!         })
//!         .collect();
//!
//!     for handle in handles {
//!         handle.join().expect("worker panicked")?;
//!     }
//!
//!     // Take the set back once every other handle is gone
//!     let set: Set = Arc::try_unwrap(set)
//!         .map(SyncSet::into_unsync)
//!         .unwrap_or_default();
//!     assert_eq!(set.len(), 5);
//!     Ok(())
//! }
//! ```
//!
//! ### Strict Duplicates
//!
//! ```rust
//! use sovran_set::{SetError, SetOptions, SyncSet};
//!
//! let set = SyncSet::with_options(SetOptions::strict());
//! set.add("once").unwrap();
//!
//! match set.add("once") {
//!     Err(SetError::AlreadyExists(value)) => println!("{} was already there", value),
//!     other => println!("Unexpected: {:?}", other),
//! }
//! ```
//!
//! ### Type-Partitioned Groups
//!
//! ```rust
//! use sovran_set::{TypeTag, TypedSetGroup, Value};
//!
//! let group = TypedSetGroup::from_values([Value::from(1), Value::from("a"), Value::from(2.5)]);
//! let other = TypedSetGroup::from_values([Value::from(1), Value::from("b")]);
//!
//! assert_eq!(group.type_tags(), vec![TypeTag::Int, TypeTag::Float, TypeTag::String]);
//! assert_eq!(group.intersect(&other), TypedSetGroup::from_values([1]));
//! assert_eq!(group.unite(&other).len(), 4);
//! ```

mod any_value;
mod error;
mod options;
mod set;
mod sync;
mod traits;
mod typed;
mod value;

#[cfg(any(feature = "quickcheck", test))]
mod arbitrary;


pub use any_value::AnyValue;
pub use error::SetError;
pub use options::SetOptions;
pub use set::Set;
pub use sync::SyncSet;
pub use traits::ToUnsync;
pub use typed::TypedSetGroup;
pub use value::{TypeTag, Value};
