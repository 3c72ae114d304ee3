//! The `list` command: a one-screen summary of service state.

use owo_colors::OwoColorize;

use pmgr_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.store().snapshot();

    output::print_line(&format!("Service: {}", snapshot.name.bold()), global.quiet);
    if let Some(user) = session.username() {
        output::print_line(&format!("Logged in as: {user}"), global.quiet);
    }
    if let Some(at) = session.store().last_refresh() {
        output::print_line(
            &format!("Last refresh: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            global.quiet,
        );
    }
    output::print_line(
        &format!(
            "Users: {}  Groups: {}  Movies: {}  Ratings: {}  Requests: {}",
            snapshot.users.len(),
            snapshot.groups.len(),
            snapshot.movies.len(),
            snapshot.ratings.len(),
            snapshot.requests.len(),
        ),
        global.quiet,
    );
    Ok(())
}
