use thiserror::Error;
use tracing::{debug, trace};

use crate::channel::ByteChannel;
use crate::frame::FrameError;
use crate::frame::layout::MARKER;

/// Errors from pulling one candidate frame off the channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcquireError {
    #[error("insufficient data: {available} of {needed} bytes available")]
    InsufficientData { available: usize, needed: usize },
    #[error("channel desynchronized: frame marker not found")]
    Desynchronized,
    #[error("short read: got {actual} of {needed} bytes")]
    ShortRead { needed: usize, actual: usize },
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Pull exactly `frame.len()` bytes of candidate frame off the channel.
///
/// With exactly one frame's worth of bytes buffered, the read is direct.
/// With more, the channel has drifted past a frame boundary (it was not
/// drained often enough), so alignment is recovered first: the marker scan
/// consumes the two marker bytes, which are then placed at offsets 0-1
/// by hand, and the remaining `len - 2` bytes are bulk-read behind them.
/// With less, nothing is consumed.
pub fn acquire_frame<C: ByteChannel>(channel: &mut C, frame: &mut [u8]) -> Result<(), AcquireError> {
    let frame_len = frame.len();
    let available = channel.available();

    if available < frame_len {
        return Err(AcquireError::InsufficientData {
            available,
            needed: frame_len,
        });
    }

    if available > frame_len {
        debug!(available, frame_len, "excess bytes buffered, resynchronizing");
        if !resynchronize(channel) {
            return Err(AcquireError::Desynchronized);
        }

        let needed = frame_len - MARKER.len();
        let remaining = channel.available();
        if remaining < needed {
            debug!(remaining, needed, "not enough data after resynchronization");
            return Err(AcquireError::InsufficientData {
                available: remaining,
                needed,
            });
        }

        frame[..MARKER.len()].copy_from_slice(&MARKER);
        let actual = channel.read_bytes(&mut frame[MARKER.len()..]);
        if actual != needed {
            return Err(AcquireError::ShortRead { needed, actual });
        }
    } else {
        let actual = channel.read_bytes(frame);
        if actual != frame_len {
            return Err(AcquireError::ShortRead {
                needed: frame_len,
                actual,
            });
        }
    }

    Ok(())
}

/// Scan and discard channel bytes until the two-byte frame marker is found.
///
/// On success exactly the two marker bytes have been consumed and the
/// channel is positioned at the byte after them. On exhaustion the channel
/// is flushed so the next poll starts from a clean boundary; the bytes lost
/// are the price of forward progress.
pub fn resynchronize<C: ByteChannel>(channel: &mut C) -> bool {
    let mut discarded = 0usize;
    let mut found = false;

    while !found && channel.available() > 0 {
        if channel.peek() == Some(MARKER[0]) {
            let _ = channel.read();
            if channel.peek() == Some(MARKER[1]) {
                let _ = channel.read();
                found = true;
            } else {
                discarded += 1;
            }
        } else {
            let _ = channel.read();
            discarded += 1;
        }
    }

    trace!(discarded, found, "resynchronization scan finished");

    if !found {
        channel.flush();
    }

    found
}
