//! PMS frame wire format and decoding.
//!
//! A frame is a fixed-size binary unit: two marker bytes, a big-endian
//! declared length, the measurement words, two reserved bytes, and a
//! big-endian checksum over everything before it. Offsets and constants
//! live in `layout`, safe byte access in `reader`, and validation plus
//! word extraction in `parser`. The decoder is generic over the word
//! count and the output type through the [`FieldMap`] capability.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::FrameError;
pub use parser::{FieldMap, decode_frame};
