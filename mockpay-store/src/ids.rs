//! Random identifier generator.

use std::sync::atomic::{AtomicU64, Ordering};

use mockpay_types::{IdGenerator, IdKind};
use rand::Rng;
use rand::distr::Alphanumeric;

/// Upper bound (exclusive) of the random part of an id.
const RANDOM_SPACE: u32 = 100_000;

const SECRET_LEN: usize = 6;

/// Mints `<prefix>_mock_<sequence><random>` identifiers.
///
/// The sequence is process-wide and strictly increasing, so ids never
/// repeat; the zero-padded five-digit random tail keeps them unguessable
/// across restarts. Generated ids always carry at least six digits and
/// therefore never collide with the shorter fixture ids.
#[derive(Debug)]
pub struct RandomIdGenerator {
    sequence: AtomicU64,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(1),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn new_id(&self, kind: IdKind) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let tail = rand::rng().random_range(0..RANDOM_SPACE);
        format!("{}_mock_{}{:05}", kind.prefix(), seq, tail)
    }

    fn new_secret(&self, intent_id: &str) -> String {
        let secret: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SECRET_LEN)
            .map(char::from)
            .collect();
        format!("{}_secret_{}", intent_id, secret)
    }
}
