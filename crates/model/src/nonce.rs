//! Nonces and deadlines derived from the wall clock.

use {
    alloy::primitives::{U256, uint},
    chrono::Utc,
    rand::Rng,
    std::time::Duration,
};

pub const DEFAULT_DEADLINE_DURATION: Duration = Duration::from_secs(10 * 60);

/// `10^57`, the lower bound of the random part of a nonce.
const RANDOM_MIN: U256 = uint!(1000000000000000000000000000000000000000000000000000000000_U256);
/// `10^58`, the factor applied to the time part of a nonce.
const TIME_FACTOR: U256 = uint!(10000000000000000000000000000000000000000000000000000000000_U256);

/// A fresh nonce `now_ns * 10^58 + r` with `r` uniform in `[10^57, 10^58)`.
///
/// Nonces generated at least one nanosecond apart are strictly increasing,
/// within the same nanosecond a collision has probability below `10^-57`.
pub fn generate_nonce() -> U256 {
    nonce_at(now_nanos(), &mut rand::thread_rng())
}

fn nonce_at(nanos: U256, rng: &mut impl Rng) -> U256 {
    nanos * TIME_FACTOR + random_part(rng)
}

fn random_part(rng: &mut impl Rng) -> U256 {
    // Rejection sampling over 193 bit values, `2^193 > 10^58`.
    loop {
        let candidate = U256::from_limbs([
            rng.r#gen(),
            rng.r#gen(),
            rng.r#gen(),
            rng.r#gen::<u64>() & 1,
        ]);
        if (RANDOM_MIN..TIME_FACTOR).contains(&candidate) {
            return candidate;
        }
    }
}

fn now_nanos() -> U256 {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    U256::from(u64::try_from(nanos).unwrap_or_default())
}

/// Unix timestamp `duration` from now, in seconds.
pub fn get_deadline(duration: Duration) -> U256 {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    U256::from(now.saturating_add(duration.as_secs()))
}

pub fn get_default_deadline() -> U256 {
    get_deadline(DEFAULT_DEADLINE_DURATION)
}
