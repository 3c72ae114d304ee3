//! Movie catalog command handlers.

use pmgr_core::{Movie, Session};

use crate::cli::{GlobalOpts, MovieArgs, MovieCommand};
use crate::error::CliError;
use crate::output;

pub fn handle_list(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.store().snapshot();
    let rows: Vec<_> = snapshot.movies.iter().map(output::movie_row).collect();
    output::print_table(&rows, global.quiet);
    Ok(())
}

pub async fn handle(
    session: &Session,
    args: MovieArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MovieCommand::Add {
            imdb,
            name,
            director,
            actors,
            year,
            minutes,
        } => {
            let movie = Movie::new(imdb, name.clone(), director, actors, year, minutes)
                .map_err(|e| CliError::Validation {
                    reason: e.to_string(),
                })?;
            session.add_movie(&movie).await?;
            output::print_line(&format!("Added '{name}'"), global.quiet);
            Ok(())
        }

        MovieCommand::Set {
            id,
            name,
            director,
            actors,
            year,
            minutes,
        } => {
            let id = id.into();
            let mut movie = session
                .store()
                .resolve(id)
                .as_ref()
                .and_then(|e| e.as_movie())
                .cloned()
                .ok_or_else(|| CliError::NotFound {
                    kind: "movie".to_owned(),
                    id: id.to_string(),
                })?;

            if let Some(name) = name {
                movie.name = name;
            }
            if let Some(director) = director {
                movie.director = director;
            }
            if let Some(actors) = actors {
                movie.actors = actors;
            }
            if let Some(year) = year {
                movie.year = year;
            }
            if let Some(minutes) = minutes {
                movie.minutes = minutes;
            }

            session.set_movie(&movie).await?;
            output::print_line(&format!("Updated '{}'", movie.name), global.quiet);
            Ok(())
        }

        MovieCommand::Rm { id } => {
            session.remove_movie(id.into()).await?;
            output::print_line(&format!("Removed movie {id}"), global.quiet);
            Ok(())
        }
    }
}
