//! Seeded random streams for azimuth sampling and beam generation.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

use crate::config::SeedPolicy;

/// Substream drawing photon-emission azimuths.
pub const EMISSION_SUBSTREAM: u64 = 0;
/// Offset of particle-gun substreams; gun `n` draws from `GUN_SUBSTREAM_BASE + n`.
pub const GUN_SUBSTREAM_BASE: u64 = 1 << 32;

/// Seeded generator handed to every random draw of a run.
///
/// Streams are split by substream id: the seed of substream `n` is the
/// SipHash-1-3 digest (zero keys) of `(master_seed, n)`, which keeps the
/// split stable across platforms and releases.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Generator seeded directly with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator for substream `substream` of `master_seed`.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }

    /// Generator for photon-emission azimuths under `policy`.
    pub fn for_emission(policy: &SeedPolicy) -> Self {
        Self::substream(policy.master_seed, EMISSION_SUBSTREAM)
    }

    /// Generator for particle gun number `gun` under `policy`.
    pub fn for_gun(policy: &SeedPolicy, gun: u64) -> Self {
        Self::substream(policy.master_seed, GUN_SUBSTREAM_BASE.wrapping_add(gun))
    }

    /// Seed this generator was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed of substream `substream` of `master_seed`.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
