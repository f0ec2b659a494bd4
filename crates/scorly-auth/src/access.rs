use scorly_core::models::role::{Role, UserRole};
use tracing::debug;

use crate::error::AuthError;
use crate::identity::{Caller, RoleDirectory};

/// Why a caller was allowed to read a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadGrant {
    Owner,
    Elevated(Role),
}

/// Pure read rule: the owner, or anyone holding an elevated role.
pub fn can_read(owner_id: &str, caller_id: &str, role: Option<&UserRole>) -> Option<ReadGrant> {
    if owner_id == caller_id {
        return Some(ReadGrant::Owner);
    }
    role.map(|r| r.role)
        .filter(|r| r.has_cross_tenant_read())
        .map(ReadGrant::Elevated)
}

/// Authorize `caller` to read a report owned by `owner_id`.
///
/// The role directory is only consulted when the caller is not the owner.
pub async fn authorize_read(
    caller: &Caller,
    owner_id: &str,
    roles: &dyn RoleDirectory,
) -> Result<ReadGrant, AuthError> {
    if owner_id == caller.id {
        return Ok(ReadGrant::Owner);
    }

    let role = roles.role_of(caller).await?;
    debug!(caller = %caller.id, role = ?role.as_ref().map(|r| r.role), "cross-tenant read check");

    can_read(owner_id, &caller.id, role.as_ref()).ok_or(AuthError::AccessDenied)
}
