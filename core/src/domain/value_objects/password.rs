//! Stored one-way credential digest.

use std::fmt;

/// bcrypt digest of a secret. Never holds plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_leak_digest() {
        let digest = PasswordDigest::new("$2b$04$abcdefghijklmnopqrstuv");
        assert!(!format!("{:?}", digest).contains("abcdef"));
    }
}
