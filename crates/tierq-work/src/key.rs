//! Storage key encoding.
//!
//! Priority items use `[priority, ':', id as u64 big-endian]`; single-level
//! variants use the bare 8-byte big-endian id. Big-endian keeps byte order
//! equal to numeric order, so the first and last key under a prefix are
//! the smallest and largest ids.

/// Separator between the priority byte and the id.
pub const PREFIX_SEP: u8 = b':';

/// Length of a priority prefix.
pub const PREFIX_LEN: usize = 2;

/// Length of an encoded id.
pub const ID_LEN: usize = 8;

/// Length of a full priority key.
pub const PRIORITY_KEY_LEN: usize = PREFIX_LEN + ID_LEN;

/// Encodes an id as a single-level key.
pub fn id_key(id: u64) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

/// Decodes a single-level key.
pub fn decode_id(key: &[u8]) -> Option<u64> {
    let bytes: [u8; ID_LEN] = key.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

/// Key prefix shared by every item of a priority level.
pub fn priority_prefix(priority: u8) -> [u8; PREFIX_LEN] {
    [priority, PREFIX_SEP]
}

/// Encodes a `(priority, id)` pair.
pub fn priority_key(priority: u8, id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(PRIORITY_KEY_LEN);
    key.extend_from_slice(&priority_prefix(priority));
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Decodes a priority key back into `(priority, id)`.
pub fn decode_priority_key(key: &[u8]) -> Option<(u8, u64)> {
    if key.len() != PRIORITY_KEY_LEN || key[1] != PREFIX_SEP {
        return None;
    }
    Some((key[0], decode_id(&key[PREFIX_LEN..])?))
}
