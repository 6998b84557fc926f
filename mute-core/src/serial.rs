//! USB serial number derived from the board's flash unique id

/// Bytes in the flash unique id
pub const UNIQUE_ID_LEN: usize = 8;
/// Characters in the serial string, two per id byte
pub const SERIAL_LEN: usize = UNIQUE_ID_LEN * 2;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Upper-case hex of `id`, most significant byte first
pub fn serial_from_unique_id(id: &[u8; UNIQUE_ID_LEN]) -> [u8; SERIAL_LEN] {
    let mut out = [0u8; SERIAL_LEN];
    for (i, byte) in id.iter().enumerate() {
        out[2 * i] = HEX[(byte >> 4) as usize];
        out[2 * i + 1] = HEX[(byte & 0x0f) as usize];
    }
    out
}
