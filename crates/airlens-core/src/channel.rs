//! Byte channel abstraction over the sensor's serial link.
//!
//! The core never touches a serial port directly; it consumes this trait.
//! [`BufferedChannel`] is the in-memory implementation used to replay
//! captured byte streams and to drive tests.

use std::collections::VecDeque;

/// FIFO byte source feeding the frame acquirer.
///
/// All operations are non-blocking with respect to bytes that are already
/// buffered; `available` must never consume.
pub trait ByteChannel {
    /// Number of bytes ready to read right now.
    fn available(&self) -> usize;

    /// Next byte without consuming it, or `None` when nothing is ready.
    fn peek(&self) -> Option<u8>;

    /// Consume and return one byte, or `None` when nothing is ready.
    fn read(&mut self) -> Option<u8>;

    /// Bulk-consume up to `buf.len()` bytes into `buf`; returns how many
    /// were actually obtained.
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize;

    /// Discard any buffered unread bytes.
    fn flush(&mut self);
}

/// In-memory [`ByteChannel`] backed by a queue.
#[derive(Debug, Default)]
pub struct BufferedChannel {
    buffer: VecDeque<u8>,
}

impl BufferedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the back of the channel, as if they had just
    /// arrived on the wire.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }
}

impl ByteChannel for BufferedChannel {
    fn available(&self) -> usize {
        self.buffer.len()
    }

    fn peek(&self) -> Option<u8> {
        self.buffer.front().copied()
    }

    fn read(&mut self) -> Option<u8> {
        self.buffer.pop_front()
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        while count < buf.len() {
            match self.buffer.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    fn flush(&mut self) {
        self.buffer.clear();
    }
}
