//! Live account record resolved during authentication.

use serde::{Deserialize, Serialize};

use super::Identity;

/// Which side of the job board the account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Employer,
    Applicant,
}

/// Result of the existence check performed for every authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub identity: Identity,
    pub kind: AccountKind,
}

impl Account {
    pub fn employer(identity: Identity) -> Self {
        Self {
            identity,
            kind: AccountKind::Employer,
        }
    }

    pub fn applicant(identity: Identity) -> Self {
        Self {
            identity,
            kind: AccountKind::Applicant,
        }
    }
}
