//! Group command handlers.

use pmgr_core::{EntityKind, Group, Request, RequestStatus, Session};

use crate::cli::{GlobalOpts, GroupArgs, GroupCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle_list(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.store().snapshot();
    let rows: Vec<_> = snapshot
        .groups
        .iter()
        .map(|g| output::group_row(&snapshot, g))
        .collect();
    output::print_table(&rows, global.quiet);
    Ok(())
}

pub async fn handle(
    session: &Session,
    args: GroupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupCommand::Add { name } => {
            let owner = util::current_user_id(session)?;
            session.add_group(&Group::new(name.clone(), owner)).await?;
            output::print_line(&format!("Created group '{name}'"), global.quiet);
            Ok(())
        }

        GroupCommand::Rm { id } => {
            session.remove_group(id.into()).await?;
            output::print_line(&format!("Deleted group {id}"), global.quiet);
            Ok(())
        }

        GroupCommand::Join { id } => {
            let group_id = id.into();
            // Make sure the target is actually a group before filing
            // the request.
            let known = session
                .store()
                .resolve(group_id)
                .is_some_and(|e| e.kind() == EntityKind::Group);
            if !known {
                return Err(CliError::NotFound {
                    kind: "group".to_owned(),
                    id: id.to_string(),
                });
            }

            let user = util::current_user_id(session)?;
            let request = Request::new(user, group_id, RequestStatus::AwaitingGroup);
            session.add_request(&request).await?;
            output::print_line(&format!("Asked to join group {id}"), global.quiet);
            Ok(())
        }
    }
}
