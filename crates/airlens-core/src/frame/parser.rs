use tracing::trace;

use super::error::FrameError;
use super::layout;
use super::reader::FrameReader;

/// Positional mapping from raw measurement words onto a named output type.
///
/// Implementations copy `Self::WORDS` big-endian words, in frame order, into
/// the destination. No validation and no failure mode: by the time the
/// mapper runs, the frame has already passed header, length, and checksum
/// checks.
pub trait FieldMap {
    type Output: Default;

    /// Number of 16-bit measurement words in the frame body.
    const WORDS: usize;

    /// Populate `dst` from `words`. The slice always holds exactly
    /// `Self::WORDS` entries.
    fn apply(&self, words: &[u16], dst: &mut Self::Output);
}

/// Validate a candidate frame and decode it into `dst`.
///
/// `dst` is reset to its zero state unconditionally, so a failed decode
/// never leaves stale values behind. Checks run in order: length, header
/// marker, declared length, checksum; the raw words are then handed to the
/// mapper.
pub fn decode_frame<M: FieldMap>(
    frame: &[u8],
    mapper: &M,
    dst: &mut M::Output,
) -> Result<(), FrameError> {
    *dst = M::Output::default();

    let reader = FrameReader::new(frame);
    let frame_len = layout::frame_len(M::WORDS);
    reader.require_len(frame_len)?;

    let checksum_offset = layout::checksum_offset(M::WORDS);
    let computed: u16 = frame[..checksum_offset]
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)));

    let marker = reader.read_slice(layout::MARKER_RANGE)?;
    if marker != layout::MARKER {
        return Err(FrameError::HeaderMismatch {
            first: marker[0],
            second: marker[1],
        });
    }

    let length = reader.read_u16_be(layout::LENGTH_RANGE.start)?;
    let expected = layout::declared_len(M::WORDS);
    if length != expected {
        return Err(FrameError::LengthMismatch { length, expected });
    }

    let mut words = Vec::with_capacity(M::WORDS);
    for idx in 0..M::WORDS {
        words.push(reader.read_u16_be(layout::DATA_OFFSET + idx * layout::WORD_SIZE)?);
    }

    let declared = reader.read_u16_be(checksum_offset)?;
    if declared != computed {
        trace!(declared, computed, "checksum mismatch");
        return Err(FrameError::ChecksumMismatch { declared, computed });
    }

    mapper.apply(&words, dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FieldMap, decode_frame};
    use crate::frame::error::FrameError;
    use crate::frame::layout;

    #[derive(Debug, Default, PartialEq)]
    struct TwoWords {
        first: u16,
        second: u16,
    }

    struct TwoWordMap;

    impl FieldMap for TwoWordMap {
        type Output = TwoWords;
        const WORDS: usize = 2;

        fn apply(&self, words: &[u16], dst: &mut TwoWords) {
            dst.first = words[0];
            dst.second = words[1];
        }
    }

    fn build_frame(words: &[u16]) -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(&layout::MARKER);
        frame.extend_from_slice(&layout::declared_len(words.len()).to_be_bytes());
        for word in words {
            frame.extend_from_slice(&word.to_be_bytes());
        }
        frame.extend_from_slice(&[0, 0]); // reserved
        let checksum = frame
            .iter()
            .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)));
        frame.extend_from_slice(&checksum.to_be_bytes());
        frame
    }

    #[test]
    fn decode_valid_frame() {
        let frame = build_frame(&[0x0102, 0xBEEF]);
        let mut dst = TwoWords::default();
        decode_frame(&frame, &TwoWordMap, &mut dst).unwrap();
        assert_eq!(
            dst,
            TwoWords {
                first: 0x0102,
                second: 0xBEEF
            }
        );
    }

    #[test]
    fn decode_rejects_bad_header() {
        let mut frame = build_frame(&[1, 2]);
        frame[0] = 0x00;
        let mut dst = TwoWords::default();
        let err = decode_frame(&frame, &TwoWordMap, &mut dst).unwrap_err();
        assert_eq!(
            err,
            FrameError::HeaderMismatch {
                first: 0x00,
                second: 0x4D
            }
        );
    }

    #[test]
    fn decode_rejects_bad_declared_length() {
        let mut frame = build_frame(&[1, 2]);
        frame[3] = 0xFF;
        // keep the checksum consistent so the length check is what fires
        let checksum_offset = layout::checksum_offset(TwoWordMap::WORDS);
        let checksum = frame[..checksum_offset]
            .iter()
            .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)));
        frame[checksum_offset..].copy_from_slice(&checksum.to_be_bytes());

        let mut dst = TwoWords::default();
        let err = decode_frame(&frame, &TwoWordMap, &mut dst).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                length: 0x00FF,
                expected: 8
            }
        );
    }

    #[test]
    fn decode_rejects_corrupted_body() {
        let mut frame = build_frame(&[1, 2]);
        frame[5] ^= 0x10;
        let mut dst = TwoWords::default();
        let err = decode_frame(&frame, &TwoWordMap, &mut dst).unwrap_err();
        assert!(matches!(err, FrameError::ChecksumMismatch { .. }));
    }

    #[test]
    fn failed_decode_zeroes_destination() {
        let good = build_frame(&[7, 9]);
        let mut dst = TwoWords::default();
        decode_frame(&good, &TwoWordMap, &mut dst).unwrap();
        assert_eq!(dst.first, 7);

        let mut bad = build_frame(&[7, 9]);
        bad[6] ^= 0xFF;
        decode_frame(&bad, &TwoWordMap, &mut dst).unwrap_err();
        assert_eq!(dst, TwoWords::default());
    }

    #[test]
    fn decode_rejects_short_input() {
        let frame = build_frame(&[1, 2]);
        let mut dst = TwoWords::default();
        let err = decode_frame(&frame[..frame.len() - 1], &TwoWordMap, &mut dst).unwrap_err();
        assert!(matches!(err, FrameError::TooShort { .. }));
    }
}
