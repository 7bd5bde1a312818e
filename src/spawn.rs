use rand::Rng;

use crate::chain::{decode_position, pack_vec3, ChainClient, ChainError, SpawnRequest, TxHash};

/// Players land within this many blocks of the spawn tile, horizontally.
pub const SPAWN_RADIUS: i32 = 5;

/// Energy granted on spawn: 20% of max energy.
pub const SPAWN_ENERGY: u128 = 817_600_000_000_000_000 * 2 / 10;

/// Entity id of the spawn tile this front-end targets.
pub const SPAWN_TILE_ENTITY_ID: &str =
    "0x030000006d00000042ffffff5a00000000000000000000000000000000000000";

/// Picks the actual spawn coordinate: uniform horizontal jitter within the
/// radius, and always two blocks above the tile so the player spawns in
/// air.
pub fn spawn_coord<R: Rng + ?Sized>(tile: [i32; 3], rng: &mut R) -> [i32; 3] {
    let dx = (rng.random::<f64>() * (SPAWN_RADIUS * 2) as f64).round() as i32 - SPAWN_RADIUS;
    let dz = (rng.random::<f64>() * (SPAWN_RADIUS * 2) as f64).round() as i32 - SPAWN_RADIUS;
    [tile[0] + dx, tile[1] - 2, tile[2] + dz]
}

/// Assembles the spawn system call for the configured tile.
pub fn build_spawn_request<R: Rng + ?Sized>(rng: &mut R) -> Result<SpawnRequest, ChainError> {
    let tile = decode_position(SPAWN_TILE_ENTITY_ID)?;
    let coord = spawn_coord(tile, rng);
    Ok(SpawnRequest {
        namespace: "GardenOfEden",
        system: "SpawnSystem",
        function: "spawn",
        spawn_tile: SPAWN_TILE_ENTITY_ID.to_string(),
        packed_coord: pack_vec3(coord),
        energy: SPAWN_ENERGY,
    })
}

/// Submits a spawn through the injected chain client and reports the
/// outcome. All chain failures end here as log lines; the page never
/// crashes over a failed spawn.
pub fn spawn_player<R: Rng + ?Sized>(
    client: &mut dyn ChainClient,
    rng: &mut R,
) -> Result<TxHash, ChainError> {
    let request = build_spawn_request(rng)?;
    match client.submit_spawn(&request) {
        Ok(tx) => {
            log::info!("spawn submitted: {}", tx);
            Ok(tx)
        }
        Err(err) => {
            log::error!("spawn failed: {}", err);
            Err(err)
        }
    }
}
