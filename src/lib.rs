//! symtable: a single-threaded symbol table mapping string keys to borrowed
//! values, backed by a chained hash table that grows through a fixed
//! schedule of prime-like bucket counts.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable associative container for compiler-style
//!   symbol lookup where the caller keeps ownership of every value.
//! - Layers:
//!   - `hash`: `KeyHasher` and the default `Poly65599` accumulator
//!     (`h = h * 65599 + byte`, 32-bit wraparound).
//!   - `schedule`: the ascending bucket counts
//!     `519, 1021, 2053, 4093, 8191, 16381, 32771, 65521` and the growth
//!     search over them.
//!   - `sym_table`: bucket array of chain heads over a node arena; all
//!     lookup, insertion, removal, traversal and diagnostics.
//!   - `builder`: optional configuration of hasher and schedule.
//!
//! Ownership
//! - The table owns its bucket array, its nodes, and a copy of every key.
//! - Values are stored as `&'v V` and are never dropped or cloned by the
//!   table; the borrow checker keeps each value alive while it is bound.
//!
//! Chaining
//! - Nodes live in a `slotmap::SlotMap` and link to one another through
//!   arena keys. Each bucket holds the key of its chain head.
//! - New bindings are pushed to the front of their chain. A resize walks
//!   every old chain and pushes each node to the front of its new chain,
//!   so link order within a bucket may change across resizes.
//!
//! Growth
//! - Before a new binding is linked, if `len >= bucket_count` and the
//!   schedule has a larger size, the table moves to the smallest size that
//!   restores `len < bucket_count` (or to the maximum). Hash codes are
//!   recomputed from the key on every rehash; nothing is cached per node.
//! - The table never shrinks. Past the maximum size chains simply grow.
//!
//! Duplicate keys
//! - `put` rejects an already-bound key: the call reports
//!   `PutOutcome::AlreadyPresent`, keeps the existing value, and does not
//!   run the growth check. There is no overwrite mode.
//!
//! Failure
//! - `put` reserves the key copy and any resized bucket array before it
//!   mutates anything, so `SymTableError::OutOfMemory` leaves the table
//!   exactly as it was.
//!
//! Notes and non-goals
//! - Not thread-safe beyond what `&`/`&mut` already guarantee; no locking.
//! - No ordered iteration, no persistence, keys are always strings.

mod builder;
pub mod error;
pub mod hash;
pub mod schedule;
mod stats;
mod sym_table;
mod sym_table_proptest;

// Public surface
pub use builder::SymTableBuilder;
pub use error::{ScheduleError, SymTableError};
pub use hash::{KeyHasher, Poly65599, HASH_MULTIPLIER};
pub use schedule::{BucketSchedule, DEFAULT_BUCKET_COUNTS, MAX_BUCKETS, MIN_BUCKETS};
pub use stats::Stats;
pub use sym_table::{Iter, PutOutcome, SymTable};
