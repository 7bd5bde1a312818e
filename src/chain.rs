use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("transaction reverted: {0}")]
    Reverted(String),
    #[error("malformed entity id: {0}")]
    BadEntityId(String),
}

pub type TxHash = String;

/// One on-chain system call, fully assembled by the spawn module.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub namespace: &'static str,
    pub system: &'static str,
    pub function: &'static str,
    /// Entity id of the spawn tile, 0x-prefixed hex.
    pub spawn_tile: String,
    /// Spawn coordinate packed as three 32-bit lanes.
    pub packed_coord: u128,
    pub energy: u128,
}

/// Blockchain capability this app consumes. Submission, signing, sessions
/// and balance bookkeeping all live behind this boundary; the app only
/// assembles requests and reports outcomes.
pub trait ChainClient {
    fn submit_spawn(&mut self, request: &SpawnRequest) -> Result<TxHash, ChainError>;
    fn read_balance(&mut self, address: &str) -> Result<u128, ChainError>;
}

/// Decodes a position-bearing entity id: one type byte (0x03) followed by
/// three big-endian two's-complement i32 lanes, zero-padded to 32 bytes.
pub fn decode_position(entity_id: &str) -> Result<[i32; 3], ChainError> {
    let hex = entity_id
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::BadEntityId("missing 0x prefix".into()))?;
    if hex.len() < 26 {
        return Err(ChainError::BadEntityId("too short for a position".into()));
    }
    let bytes = decode_hex(&hex[..26])?;
    if bytes[0] != 0x03 {
        return Err(ChainError::BadEntityId(format!(
            "type byte {:#04x} is not a position entity",
            bytes[0]
        )));
    }
    let lane = |i: usize| i32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
    Ok([lane(1), lane(5), lane(9)])
}

/// Packs a coordinate into the wire format: x, y, z as u32 lanes in the low
/// 96 bits, x highest.
pub fn pack_vec3(coord: [i32; 3]) -> u128 {
    ((coord[0] as u32 as u128) << 64) | ((coord[1] as u32 as u128) << 32) | coord[2] as u32 as u128
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, ChainError> {
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| ChainError::BadEntityId(e.to_string()))
        })
        .collect()
}
