//! Command dispatch: bridges CLI args -> session calls -> output.

pub mod groups;
pub mod movies;
pub mod overview;
pub mod populate;
pub mod ratings;
pub mod requests;
pub mod users;
mod util;

use pmgr_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a logged-in command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List => overview::handle(session, global),
        Command::Users => users::handle(session, global),
        Command::Movies => movies::handle_list(session, global),
        Command::Groups => groups::handle_list(session, global),
        Command::Movie(args) => movies::handle(session, args, global).await,
        Command::Rate(args) => ratings::handle(session, args, global).await,
        Command::Group(args) => groups::handle(session, args, global).await,
        Command::Request(args) => requests::handle(session, args, global).await,
        Command::Populate(args) => populate::handle(session, args, global).await,
    }
}
