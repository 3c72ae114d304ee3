//! The `populate` command: fill the service with generated data.

use pmgr_core::populate::{populate, PopulateOptions};
use pmgr_core::Session;

use crate::cli::{GlobalOpts, PopulateArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: PopulateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let options = PopulateOptions {
        users: args.users,
        groups: args.groups,
        movies: args.movies,
        ratings: args.ratings,
    };

    populate(session, &options).await?;

    let snapshot = session.store().snapshot();
    output::print_line(
        &format!(
            "Done. Service now holds {} entities ({} users, {} groups, {} movies, {} ratings, {} requests).",
            snapshot.entity_count(),
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
