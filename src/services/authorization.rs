use std::fmt;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::Identity;

/// Operations guarded by the authorization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateFestival,
    UpdateFestival,
    DeleteFestival,
    ViewSubscriberStats,
    ManageOwnSubscriptions,
    Administer,
}

impl Action {
    fn requires_admin(&self) -> bool {
        !matches!(self, Action::ManageOwnSubscriptions)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::CreateFestival => "create festivals",
            Action::UpdateFestival => "update festivals",
            Action::DeleteFestival => "delete festivals",
            Action::ViewSubscriberStats => "view subscriber statistics",
            Action::ManageOwnSubscriptions => "manage subscriptions",
            Action::Administer => "use admin functions",
        };
        f.write_str(text)
    }
}

/// Single authorization policy for every guarded operation
///
/// # Returns
/// * `Err(AuthorizationError::Forbidden)` - The identity may not perform the action
pub fn authorize(identity: &Identity, action: Action) -> Result<(), InternalError> {
    if action.requires_admin() && !identity.is_admin() {
        tracing::warn!(user_id = %identity.user_id, action = %action, "Forbidden");
        return Err(AuthorizationError::Forbidden {
            user_id: identity.user_id.clone(),
            action,
        }
        .into());
    }
    Ok(())
}

/// Generic admin check for callers without a more specific action
pub fn require_admin(identity: &Identity) -> Result<(), InternalError> {
    authorize(identity, Action::Administer)
}
