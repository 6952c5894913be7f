//! bcrypt-backed password hasher

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::value_objects::PasswordDigest;
use crate::errors::AuthError;

/// Length of generated temporary passwords
pub const DEFAULT_TEMPORARY_PASSWORD_LENGTH: usize = 9;

/// Specials drawn from when generating temporary passwords
pub const SPECIAL_CHARACTERS: &str = "~=+%^*/()[]{}/!@#$?|";

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Password hasher
///
/// `verify` never errors: a malformed stored digest and a wrong password
/// both come back as `false` so callers cannot tell them apart.
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Salted one-way digest of `secret`
    pub fn hash(&self, secret: &str) -> Result<PasswordDigest, AuthError> {
        bcrypt::hash(secret, self.cost)
            .map(PasswordDigest::new)
            .map_err(|e| AuthError::HashingFailed {
                reason: e.to_string(),
            })
    }

    /// Whether `candidate` matches `digest`
    pub fn verify(&self, digest: &PasswordDigest, candidate: &str) -> bool {
        match bcrypt::verify(candidate, digest.as_str()) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password digest could not be parsed");
                false
            }
        }
    }

    /// Random password handed out at signup
    ///
    /// Contains at least one digit and one special character. A requested
    /// length below 2 falls back to the default length.
    pub fn generate_temporary(&self, length: usize) -> String {
        let length = if length < 2 {
            DEFAULT_TEMPORARY_PASSWORD_LENGTH
        } else {
            length
        };

        let digits = DIGITS.as_bytes();
        let specials = SPECIAL_CHARACTERS.as_bytes();
        let all: Vec<u8> = [LOWER, UPPER, DIGITS, SPECIAL_CHARACTERS]
            .concat()
            .into_bytes();

        let mut rng = rand::thread_rng();
        let mut buf = Vec::with_capacity(length);
        buf.push(digits[rng.gen_range(0..digits.len())]);
        buf.push(specials[rng.gen_range(0..specials.len())]);
        for _ in 2..length {
            buf.push(all[rng.gen_range(0..all.len())]);
        }
        buf.shuffle(&mut rng);

        buf.into_iter().map(char::from).collect()
    }
}
