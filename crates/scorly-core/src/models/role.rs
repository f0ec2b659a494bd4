use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    User,
    BankOfficial,
    Admin,
}

impl Role {
    /// Elevated roles may read reports they do not own. Never write.
    pub fn has_cross_tenant_read(self) -> bool {
        matches!(self, Role::Admin | Role::BankOfficial)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::BankOfficial => "bank_official",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `user_roles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserRole {
    pub role: Role,
    /// The bank a `bank_official` operates for.
    #[serde(default)]
    pub bank: Option<String>,
}

impl UserRole {
    pub fn new(role: Role) -> Self {
        Self { role, bank: None }
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }
}
