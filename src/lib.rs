//! Compact, time-ordered, practically-unique 128-bit sequential identifiers
//!
//! ```rust
//! use seqid::seqid;
//!
//! let id = seqid();
//! println!("{}", id); // e.g. "68a9c7d2-c86a-9d1f-4b1d-33dd0bd0ffa3"
//! println!("{:?}", id.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! Sequential identifiers are meant to be used as primary keys where insertion order
//! should correlate with value order, unlike fully random identifiers that destroy
//! locality in sorted storage. Uniqueness is best-effort across machines and processes
//! and exact within a process; no coordination between machines takes place.
//!
//! # Field layout
//!
//! An identifier is 16 bytes holding four big-endian 32-bit fields in fixed order:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            machine                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              pid                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The signed 32-bit `timestamp` field holds whole seconds since the Unix epoch,
//!   truncated toward zero. The signed-32 range (roughly year 1901 through 2038) is an
//!   accepted limitation of the format.
//! - The `machine` field is a hash of the host name, computed once per process.
//! - The `pid` field is the operating-system process identifier, cached once per process.
//! - The `random` field is a counter seeded once per process from a random source and
//!   incremented atomically for every generated identifier, wrapping on signed overflow.
//!
//! Only `timestamp` and `random` vary identifier-to-identifier within a process; the
//! counter keeps identifiers created in the same second distinct. Ordering compares the
//! `timestamp` field alone (see [`SeqId::timestamp_cmp`]), while equality requires all
//! four fields to match.
//!
//! # Crate features
//!
//! - `serde`: serialization into the hyphenated string form for human-readable formats
//!   and into the raw 16 bytes for compact ones.
//! - `uuid`: conversions to and from `uuid::Uuid` by raw-byte reinterpretation.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{DecodeError, ParseError, SeqId};

mod generator;
pub use generator::SeqIdGenerator;

mod entry;
pub use entry::seqid;
