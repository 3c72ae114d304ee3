//! The `rate` command: create or replace your rating of a movie.

use pmgr_core::{Rating, Score, Session};

use crate::cli::{GlobalOpts, RateArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session,
    args: RateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let movie_id = args.movie.into();
    let movie = session
        .store()
        .resolve(movie_id)
        .as_ref()
        .and_then(|e| e.as_movie())
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            kind: "movie".to_owned(),
            id: args.movie.to_string(),
        })?;

    let score = if args.no_opinion {
        Score::NoOpinion
    } else {
        let stars = args.stars.ok_or_else(|| CliError::Validation {
            reason: "pass --stars 0..5 or --no-opinion".to_owned(),
        })?;
        Score::new(i64::from(stars)).map_err(|e| CliError::Validation {
            reason: e.to_string(),
        })?
    };

    let user = util::current_user_id(session)?;
    let existing = session
        .store()
        .snapshot()
        .ratings
        .iter()
        .find(|r| r.user == user && r.movie == movie_id)
        .cloned();

    // One rating per (user, movie): replace if we already have one.
    let rating = if let Some(mut rating) = existing {
        rating.rating = score;
        rating.labels = args.labels;
        session.set_rating(&rating).await?;
        rating
    } else {
        let rating = Rating::new(user, movie_id, score, args.labels);
        session.add_rating(&rating).await?;
        rating
    };

    output::print_line(
        &format!("Rated '{}': {}", movie.name, output::rating_summary(&rating)),
        global.quiet,
    );
    Ok(())
}
