//! Shared helpers for command handlers.

use pmgr_core::{EntityId, Session};

use crate::error::CliError;

/// The id of the logged-in identity, from the current snapshot.
///
/// Fails if the snapshot has no record for the login name, which means
/// the account list changed under us between login and now.
pub fn current_user_id(session: &Session) -> Result<EntityId, CliError> {
    let user = session.current_user().ok_or(CliError::NoCredentials)?;
    user.id.ok_or_else(|| {
        CliError::Internal(format!(
            "server record for {:?} has no id",
            user.username
        ))
    })
}
