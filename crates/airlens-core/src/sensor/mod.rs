//! Sensor driver: frame acquisition, observer dispatch, and the poll loop.
//!
//! [`Sensor`] owns the byte channel, the field mapper, the observer
//! registry, and the reusable decoded reading. One poll call performs one
//! bounded decode cycle: up to [`POLL_RETRIES`] acquisition attempts inside
//! a [`POLL_TIMEOUT`] wall-clock window, stopping at the first frame that
//! validates. Exactly one caller drives a given sensor; `&mut self` on the
//! polling entry points enforces that at compile time.

pub mod acquire;
pub mod observers;

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::channel::ByteChannel;
use crate::frame::{FieldMap, decode_frame, layout};

pub use acquire::{AcquireError, acquire_frame, resynchronize};
pub use observers::{MAX_OBSERVERS, Observer, ObserverRegistry, RegistryFull};

/// Acquisition attempts per poll call.
pub const POLL_RETRIES: u32 = 3;
/// Wall-clock budget per poll call.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(1000);

/// Outcome of one poll cycle.
///
/// `TimedOut` covers both budget exhaustions (retries and deadline); which
/// decode-path failure occurred is deliberately not reported here. Callers
/// that need that detail drive [`Sensor::try_read_frame`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A frame was decoded and every registered observer was notified.
    Decoded,
    /// The retry or deadline budget ran out with no valid frame.
    TimedOut,
}

/// Streaming decoder for one sensor on one byte channel.
pub struct Sensor<C, M>
where
    C: ByteChannel,
    M: FieldMap,
{
    channel: C,
    mapper: M,
    observers: ObserverRegistry<M::Output>,
    reading: M::Output,
    frame: Vec<u8>,
}

impl<C, M> Sensor<C, M>
where
    C: ByteChannel,
    M: FieldMap,
{
    /// Build a sensor over `channel` with room for up to `max_observers`
    /// observers (clamped to [`MAX_OBSERVERS`]).
    pub fn new(channel: C, mapper: M, max_observers: usize) -> Self {
        Self {
            channel,
            mapper,
            observers: ObserverRegistry::new(max_observers),
            reading: M::Output::default(),
            frame: vec![0u8; layout::frame_len(M::WORDS)],
        }
    }

    /// Register an observer; fails once the configured capacity is reached.
    pub fn add_observer(
        &mut self,
        observer: Box<dyn Observer<M::Output>>,
    ) -> Result<(), RegistryFull> {
        self.observers.register(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Last successfully decoded reading. Zeroed at construction and after
    /// any failed decode attempt.
    pub fn reading(&self) -> &M::Output {
        &self.reading
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Run one decode cycle: retry acquisition until a frame validates, the
    /// retry budget is spent, or the deadline passes.
    ///
    /// Policy: every iteration consumes one retry, including iterations
    /// where the channel reports zero available bytes and no read is
    /// attempted. An idle channel therefore exhausts the retry budget long
    /// before the deadline.
    pub fn poll(&mut self) -> PollOutcome {
        let deadline = Instant::now() + POLL_TIMEOUT;
        let mut retries = POLL_RETRIES;

        while retries != 0 && Instant::now() <= deadline {
            retries -= 1;
            if self.channel.available() > 0 {
                match self.try_read_frame() {
                    Ok(()) => {
                        trace!("frame decoded, notifying observers");
                        self.observers.notify(&self.reading);
                        return PollOutcome::Decoded;
                    }
                    Err(err) => {
                        debug!(%err, retries, "frame acquisition failed");
                    }
                }
            } else {
                trace!(retries, "no bytes available");
            }
        }

        PollOutcome::TimedOut
    }

    /// Acquire and decode exactly one frame into the owned reading.
    ///
    /// Unlike [`poll`](Self::poll) this surfaces the precise failure, for
    /// callers that need to distinguish starvation from desynchronization
    /// from validation errors.
    pub fn try_read_frame(&mut self) -> Result<(), AcquireError> {
        acquire_frame(&mut self.channel, &mut self.frame)?;
        decode_frame(&self.frame, &self.mapper, &mut self.reading)?;
        Ok(())
    }
}
