//! Membership request command handlers.

use pmgr_core::{RequestStatus, Session};

use crate::cli::{GlobalOpts, RequestArgs, RequestCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: RequestArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RequestCommand::List => {
            let snapshot = session.store().snapshot();
            let rows: Vec<_> = snapshot
                .requests
                .iter()
                .map(|r| output::request_row(&snapshot, r))
                .collect();
            output::print_table(&rows, global.quiet);
            Ok(())
        }

        RequestCommand::Accept { id } => {
            answer(session, id, RequestStatus::Accepted).await?;
            output::print_line(&format!("Accepted request {id}"), global.quiet);
            Ok(())
        }

        RequestCommand::Reject { id } => {
            answer(session, id, RequestStatus::Rejected).await?;
            output::print_line(&format!("Rejected request {id}"), global.quiet);
            Ok(())
        }
    }
}

async fn answer(session: &Session, id: u64, status: RequestStatus) -> Result<(), CliError> {
    let request_id = id.into();
    let mut request = session
        .store()
        .resolve(request_id)
        .as_ref()
        .and_then(|e| e.as_request())
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            kind: "request".to_owned(),
            id: id.to_string(),
        })?;

    request.status = status;
    session.set_request(&request).await?;
    Ok(())
}
