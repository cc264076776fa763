//! Random credential generation.
//!
//! Uses whatever RNG it is handed; the client passes the thread-local one.
//! Nothing here is meant to be cryptographically strong.

use crate::Account;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of the generated local-part.
pub const LOCAL_PART_LEN: usize = 10;
/// Length of the generated password.
pub const PASSWORD_LEN: usize = 12;

const LOCAL_PART_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a lowercase alphanumeric local-part.
pub fn local_part<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..LOCAL_PART_LEN)
        .map(|_| LOCAL_PART_CHARSET[rng.random_range(0..LOCAL_PART_CHARSET.len())] as char)
        .collect()
}

/// Generate a mixed-case alphanumeric password.
pub fn password<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PASSWORD_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

impl Account {
    /// Generate fresh credentials on `domain`.
    pub fn generate<R: Rng + ?Sized>(domain: &str, rng: &mut R) -> Self {
        Self {
            address: format!("{}@{}", local_part(rng), domain),
            password: password(rng),
        }
    }
}
