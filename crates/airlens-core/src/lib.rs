//! Airlens core library: streaming decoder for PMS5003T-family
//! particulate-matter sensor telemetry.
//!
//! The sensor emits fixed-size 32-byte binary frames over a serial link.
//! This crate sits between the raw byte channel and the consumer: it
//! acquires candidate frames, recovers alignment after desynchronization,
//! validates marker, declared length, and checksum, and delivers decoded
//! readings to registered observers through a bounded-retry poll loop.
//!
//! Layering mirrors the wire: `frame` holds the byte layout and the pure
//! decoder (generic over word count and output via [`FieldMap`]), `channel`
//! is the byte-source seam, `sensor` drives acquisition, resynchronization,
//! and observer dispatch, and `model` is the PMS5003T measurement type.
//!
//! Invariants:
//! - A reading is zeroed before every decode attempt; a failed decode never
//!   leaves stale fields behind.
//! - Resynchronization failure flushes the channel, trading data loss for a
//!   clean boundary on the next poll.
//! - Observer count never exceeds `min(requested, MAX_OBSERVERS)`.
//!
//! # Examples
//! ```
//! use airlens_core::{BufferedChannel, PollOutcome, Pms5003t, Sensor};
//!
//! let frame: [u8; 32] = [
//!     0x42, 0x4D, 0x00, 0x1C, 0x00, 0x32, 0x00, 0x64, 0x00, 0x96, 0x00,
//!     0x32, 0x00, 0x64, 0x00, 0x96, 0x00, 0x32, 0x00, 0x64, 0x00, 0x96,
//!     0x00, 0x96, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x04, 0xC8,
//! ];
//! let mut channel = BufferedChannel::new();
//! channel.feed(&frame);
//!
//! let mut sensor = Sensor::new(channel, Pms5003t, 1);
//! sensor.add_observer(Box::new(|reading: &airlens_core::AirQuality| {
//!     println!("PM2.5: {} ug/m3", reading.pm25_env);
//! }))?;
//!
//! assert_eq!(sensor.poll(), PollOutcome::Decoded);
//! # Ok::<(), airlens_core::RegistryFull>(())
//! ```

pub mod channel;
pub mod frame;
pub mod model;
pub mod sensor;

pub use channel::{BufferedChannel, ByteChannel};
pub use frame::{FieldMap, FrameError, decode_frame};
pub use model::{AirQuality, Pms5003t};
pub use sensor::{
    AcquireError, MAX_OBSERVERS, Observer, ObserverRegistry, POLL_RETRIES, POLL_TIMEOUT,
    PollOutcome, RegistryFull, Sensor,
};
