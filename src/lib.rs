//! Generation and decoding of UUIDs across RFC 9562 versions and database-friendly layouts
//!
//! ```rust
//! use uuidnext::{new_database_friendly, new_random, new_sequential, Database};
//!
//! let uuid = new_sequential();
//! println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = new_random();
//! println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = new_database_friendly(Database::SqlServer);
//! println!("{uuid}"); // e.g., "5e3a4b6d-9f21-8c0d-a3be-01809424a3e5"
//! ```
//!
//! Name-based UUIDs are derived from a namespace and a name:
//!
//! ```rust
//! use uuidnext::{new_name_based, NAMESPACE_DNS};
//!
//! let uuid = new_name_based(&NAMESPACE_DNS, "python.org");
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! ```
//!
//! Any UUID can be decoded back into its version and, where the layout carries them, its
//! timestamp and monotonic counter:
//!
//! ```rust
//! use uuidnext::{decode, Uuid};
//!
//! let uuid: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
//! assert_eq!(
//!     decode(&uuid).to_string(),
//!     r#"{ Version: 7, Timestamp: "2022-02-22T19:22:22Z", Sequence: 3508330093580 }"#
//! );
//! # Ok::<(), uuidnext::ParseError>(())
//! ```
//!
//! # Time-ordered layouts
//!
//! UUIDv7 places a 48-bit Unix timestamp in milliseconds first, followed by a 42-bit counter and
//! 32 random bits. SQL Server does not compare `uniqueidentifier` values byte by byte from the
//! start, so [`Database::SqlServer`] gets a UUIDv8 that holds the same kind of timestamp in its last
//! six bytes and a 26-bit counter in bytes 6 to 9. See [`Layout`] for the bit diagrams.
//!
//! The counter is incremented by one for each new UUID generated within the same timestamp and is
//! randomly initialized whenever the timestamp changes. In the rare circumstances where the counter
//! reaches its maximum, or when the system clock moves backwards, the generator goes on with a
//! timestamp ahead of the real-time clock rather than breaking the monotonic order.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `cli`: builds the `uuidnext` command and enables `global_gen`.
//!
//! Optional features:
//!
//! - `global_gen`: enables the process-wide generators behind [`new_random`], [`new_sequential`]
//!   and [`new_database_friendly`].
//! - `serde`: enables serialization and deserialization of [`Uuid`] and serialization of
//!   [`DecodeReport`].
//! - `uuid`: enables conversion from/to the [`Uuid`] type of [uuid](https://crates.io/crates/uuid)
//!   crate.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod bits;
pub use bits::{get_variant, get_version, set_version_and_variant, Variant};

mod id;
pub use id::{ParseError, Uuid};

pub mod layout;
#[doc(inline)]
pub use layout::{sql_server_order, Layout, Sequence};

mod database;
pub use database::{Database, ParseDatabaseError};

pub mod generator;
#[doc(inline)]
pub use generator::{RandSource, SequenceGenerator, StdSystemTime, TimeSource};

mod v5;
pub use v5::{new_name_based, NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500};

mod decoder;
pub use decoder::{decode, try_decode_sequence, try_decode_timestamp, DecodeReport};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{new_database_friendly, new_random, new_sequential};
