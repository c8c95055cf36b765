//! Helpers for deterministic status-feed regression tests.

use hud_core::{StatusField, StatusPayload, StatusSnapshot, DEFAULT_STATUS_VALUE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 42;

/// Chance that a sampled payload leaves a field out.
const ABSENT_PROBABILITY: f64 = 0.3;

/// Builds a payload where each field is independently absent or a whole
/// number in `0..=100`.
pub fn sample_payload(rng: &mut StdRng) -> StatusPayload {
    let mut payload = StatusPayload::new();
    for field in StatusField::ALL {
        if !rng.gen_bool(ABSENT_PROBABILITY) {
            payload = payload.with(field, f64::from(rng.gen_range(0..=100u32)));
        }
    }
    payload
}

pub fn sample_feed(seed: u64, len: usize) -> Vec<StatusPayload> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| sample_payload(&mut rng)).collect()
}

/// What the store must hold after applying `payload`, whatever came before.
pub fn expected_after(payload: &StatusPayload) -> StatusSnapshot {
    StatusSnapshot {
        health: payload.health.unwrap_or(DEFAULT_STATUS_VALUE),
        shield: payload.shield.unwrap_or(DEFAULT_STATUS_VALUE),
        hunger: payload.hunger.unwrap_or(DEFAULT_STATUS_VALUE),
        thirst: payload.thirst.unwrap_or(DEFAULT_STATUS_VALUE),
    }
}

pub fn render_trace(trace: &[StatusSnapshot]) -> String {
    trace
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
