//! The `users` command.

use pmgr_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.store().snapshot();
    let rows: Vec<_> = snapshot.users.iter().map(output::user_row).collect();
    output::print_table(&rows, global.quiet);
    Ok(())
}
