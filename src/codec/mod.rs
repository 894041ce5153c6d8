//! Binary codec for the NEO wire format
//!
//! Little-endian fixed-width integers and length-prefixed byte strings.
//! Every count and length prefix is a single byte no larger than
//! [`MAX_PREFIXED_LEN`], which reads the same as a one-byte NEO var-int.
//! Anything larger is an encoding error.

pub mod reader;
pub mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Largest count or length a prefix may carry
///
/// `0xfd..=0xff` are var-int markers, so a single prefix byte stops at `0xfc`.
pub const MAX_PREFIXED_LEN: usize = 0xfc;
