pub const MARKER: [u8; 2] = [0x42, 0x4D];
pub const MARKER_RANGE: std::ops::Range<usize> = 0..2;
pub const LENGTH_RANGE: std::ops::Range<usize> = 2..4;
pub const DATA_OFFSET: usize = 4;

pub const WORD_SIZE: usize = 2;
pub const RESERVED_SIZE: usize = 2;
pub const CHECKSUM_SIZE: usize = 2;

/// Total frame length for a layout carrying `words` measurement words.
pub const fn frame_len(words: usize) -> usize {
    DATA_OFFSET + words * WORD_SIZE + RESERVED_SIZE + CHECKSUM_SIZE
}

/// Value of the declared-length field: everything after it, reserved and
/// checksum included.
pub const fn declared_len(words: usize) -> u16 {
    (words * WORD_SIZE + RESERVED_SIZE + CHECKSUM_SIZE) as u16
}

/// Offset of the big-endian checksum trailer. The checksum itself covers
/// every byte before this offset.
pub const fn checksum_offset(words: usize) -> usize {
    frame_len(words) - CHECKSUM_SIZE
}

/// Word count of the PMS5003T layout: PM concentrations (standard and
/// environmental), particle counts, temperature, humidity.
pub const PMS5003T_WORDS: usize = 12;
pub const PMS5003T_FRAME_LEN: usize = frame_len(PMS5003T_WORDS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pms5003t_layout_constants() {
        assert_eq!(PMS5003T_FRAME_LEN, 32);
        assert_eq!(declared_len(PMS5003T_WORDS), 28);
        assert_eq!(checksum_offset(PMS5003T_WORDS), 30);
    }
}
