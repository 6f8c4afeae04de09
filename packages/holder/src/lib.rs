#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A container for zero or one value, stored inline with no heap allocation.
//!
//! This crate provides [`Holder<T>`], which owns either exactly one `T` or nothing. The storage
//! is sized and aligned to `T`, plus one alignment unit of `T` for the occupancy tag, and the
//! holder carries the lifetime characteristics of `T` through to its own operations.
//!
//! # Key Features
//!
//! - **Inline storage**: the value lives inside the holder, never on the heap
//! - **Predictable layout**: `size_of::<Holder<T>>() == size_of::<T>() + align_of::<T>()`,
//!   regardless of any niches in `T`
//! - **Trivial drop propagation**: if `T` has no drop glue, neither does `Holder<T>`
//! - **Exactly-once drop**: the held value is dropped exactly once, whether by
//!   [`reset()`](Holder::reset), by assignment over it or by dropping the holder
//! - **Three access styles**: panicking, `Result`-returning and `unsafe` unchecked
//! - **Compile-time guarantees**: the [`Guarantees`] trait and the `is_*` queries describe which
//!   operations of a type can panic, and `Holder<T>` derives its own guarantees from them
//!
//! # Examples
//!
//! ```rust
//! use holder::{Holder, swap};
//!
//! let mut greeting = Holder::with_value(String::from("Hello"));
//! let mut nothing = Holder::<String>::new();
//!
//! // Values can be read and modified in place.
//! greeting.value_mut().push_str(", World!");
//! assert_eq!(greeting.value(), "Hello, World!");
//!
//! // A fallback is used when the holder is empty.
//! assert_eq!(nothing.value_or(String::from("(none)")), "(none)");
//!
//! // Swapping moves the value into the empty holder.
//! swap(&mut greeting, &mut nothing);
//! assert!(greeting.is_empty());
//! assert_eq!(nothing.value(), "Hello, World!");
//!
//! // Resetting drops the value.
//! nothing.reset();
//! assert!(nothing.is_empty());
//! ```
//!
//! # Lifetime guarantees
//!
//! ```rust
//! use holder::{Guarantees, Holder, is_trivially_destructible};
//!
//! assert!(is_trivially_destructible::<Holder<u64>>());
//! assert!(!is_trivially_destructible::<Holder<String>>());
//!
//! // Dropping a `u64` never panics, so neither does resetting a holder of one.
//! assert!(Holder::<u64>::NOTHROW_RESET);
//! assert!(<Holder<u64> as Guarantees>::NOTHROW_DESTRUCTIBLE);
//! ```

mod error;
mod guarantees;
mod holder;
mod slot;

pub use error::*;
pub use guarantees::*;
pub use holder::*;
pub(crate) use slot::*;
