// ── Test data population ──
//
// Generates plausible users, groups, movies, and ratings and uploads
// them through the regular add calls. Generated objects carry
// temporary local ids so cross-references can be wired up before
// upload; those are remapped to server-assigned ids after each add
// (users matched by username, groups by name, movies by imdb key).

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use pmgr_api::model::{
    EntityId, Group, Movie, Rating, Request, RequestStatus, Roles, Score, User,
};

use crate::error::CoreError;
use crate::session::Session;

/// How much of everything to generate.
#[derive(Debug, Clone, Copy)]
pub struct PopulateOptions {
    pub users: usize,
    pub groups: usize,
    pub movies: usize,
    pub ratings: usize,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            users: 10,
            groups: 3,
            movies: 10,
            ratings: 100,
        }
    }
}

// Membership odds per candidate, in percent: included outright,
// invited by the owner, or asking to join.
const P_INCLUDE: u32 = 30;
const P_INVITE: u32 = 20;
const P_REQUEST: u32 = 20;

const FIRST_NAMES: &[&str] = &[
    "Alba", "Andrea", "Sara", "Ana", "Nerea", "Claudia", "Cristina", "Marina", "Elena", "Irene",
    "Julia", "Rocio", "Sandra", "Raquel", "Sofia", "Alicia", "Clara", "Eva", "Isabel", "Silvia",
    "Alejandro", "Pablo", "Daniel", "David", "Adrian", "Javier", "Alvaro", "Sergio", "Carlos",
    "Jorge", "Mario", "Raul", "Diego", "Manuel", "Miguel", "Ivan", "Juan", "Victor", "Hugo",
    "Marcos",
];

const LAST_NAMES: &[&str] = &[
    "Garcia", "Rodriguez", "Gonzalez", "Fernandez", "Lopez", "Martinez", "Sanchez", "Perez",
    "Gomez", "Martin", "Jimenez", "Ruiz", "Diaz", "Moreno", "Alvarez", "Romero", "Alonso",
    "Navarro", "Torres", "Vazquez", "Ramos", "Gil", "Serrano", "Molina", "Blanco", "Castro",
    "Ortiz", "Rubio", "Medina", "Vidal",
];

const LABELS: &[&str] = &[
    "boring", "brilliant", "cheesy", "classic", "confusing", "dark", "epic", "forgettable",
    "funny", "gripping", "long", "moving", "overrated", "quirky", "slow", "stunning", "tense",
    "uneven", "warm", "weird",
];

/// Generate random data and upload it through `session`'s add calls.
///
/// Existing movies are reused when the current snapshot already has at
/// least `options.movies` of them. Requires a logged-in session.
pub async fn populate(session: &Session, options: &PopulateOptions) -> Result<(), CoreError> {
    let mut rng = rand::thread_rng();
    let mut next_id = 1u64;
    let mut temp_id = || -> EntityId {
        let id = next_id;
        next_id += 1;
        id.into()
    };

    // ── Generate, with temporary local ids ───────────────────────────

    let mut usernames = HashSet::new();
    let users: Vec<User> = (0..options.users)
        .map(|_| {
            let mut user = random_user(&mut rng, temp_id());
            while !usernames.insert(user.username.clone()) {
                user.username = random_username(&mut rng);
            }
            user
        })
        .collect();

    let groups: Vec<(Group, Vec<Request>)> = (0..options.groups)
        .map(|_| random_group(&mut rng, temp_id(), &users))
        .collect();

    let existing_movies = session.store().snapshot().movies.clone();
    let generate_movies = existing_movies.len() < options.movies;
    let movies: Vec<Movie> = if generate_movies {
        (0..options.movies)
            .map(|_| random_movie(&mut rng, temp_id()))
            .collect()
    } else {
        existing_movies
    };

    let user_ids: Vec<EntityId> = users.iter().filter_map(|u| u.id).collect();
    let movie_ids: Vec<EntityId> = movies.iter().filter_map(|m| m.id).collect();
    let ratings: Vec<Rating> = random_pairs(&mut rng, options.ratings, &user_ids, &movie_ids)
        .into_iter()
        .map(|(user, movie)| random_rating(&mut rng, user, movie))
        .collect();

    info!(
        users = users.len(),
        groups = groups.len(),
        movies = movies.len(),
        ratings = ratings.len(),
        "uploading generated data"
    );

    // ── Upload, remapping temporary ids to server-assigned ones ──────

    let mut id_map: HashMap<EntityId, EntityId> = HashMap::new();
    upload_users(session, &users, &mut id_map).await?;
    upload_groups(session, &groups, &id_map).await?;
    if generate_movies {
        upload_movies(session, &movies, &mut id_map).await?;
    }

    for rating in &ratings {
        // Reused movies already carry real ids; generated ones remap.
        let movie = if generate_movies {
            remap(&id_map, rating.movie)?
        } else {
            rating.movie
        };
        let upload = Rating::new(
            remap(&id_map, rating.user)?,
            movie,
            rating.rating,
            rating.labels.clone(),
        );
        session.add_rating(&upload).await?;
    }

    debug!("populate complete");
    Ok(())
}

fn remap(map: &HashMap<EntityId, EntityId>, id: EntityId) -> Result<EntityId, CoreError> {
    map.get(&id)
        .copied()
        .ok_or_else(|| CoreError::Internal(format!("no server id recorded for {id}")))
}

async fn upload_users(
    session: &Session,
    users: &[User],
    id_map: &mut HashMap<EntityId, EntityId>,
) -> Result<(), CoreError> {
    for user in users {
        let upload = User::new(
            user.username.clone(),
            user.password.clone().unwrap_or_default(),
            Roles::user(),
        );
        let snapshot = session.add_user(&upload).await?;
        let assigned = snapshot
            .users
            .iter()
            .find(|u| u.username == user.username)
            .and_then(|u| u.id)
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "created user {:?} missing from snapshot",
                    user.username
                ))
            })?;
        if let Some(tmp) = user.id {
            id_map.insert(tmp, assigned);
        }
    }
    Ok(())
}

async fn upload_groups(
    session: &Session,
    groups: &[(Group, Vec<Request>)],
    id_map: &HashMap<EntityId, EntityId>,
) -> Result<(), CoreError> {
    for (group, pending) in groups {
        let mut upload = Group::new(group.name.clone(), remap(id_map, group.owner)?);
        upload.members = group
            .members
            .iter()
            .map(|&m| remap(id_map, m))
            .collect::<Result<_, _>>()?;

        let snapshot = session.add_group(&upload).await?;
        let assigned = snapshot
            .groups
            .iter()
            .find(|g| g.name == group.name)
            .and_then(|g| g.id)
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "created group {:?} missing from snapshot",
                    group.name
                ))
            })?;

        for request in pending {
            let request = Request::new(remap(id_map, request.user)?, assigned, request.status);
            session.add_request(&request).await?;
        }
    }
    Ok(())
}

async fn upload_movies(
    session: &Session,
    movies: &[Movie],
    id_map: &mut HashMap<EntityId, EntityId>,
) -> Result<(), CoreError> {
    for movie in movies {
        let mut upload = movie.clone();
        upload.id = None;
        upload.ratings.clear();
        let snapshot = session.add_movie(&upload).await?;
        let assigned = snapshot
            .movies
            .iter()
            .find(|m| m.imdb == movie.imdb)
            .and_then(|m| m.id)
            .ok_or_else(|| {
                CoreError::Internal(format!("created movie {:?} missing from snapshot", movie.imdb))
            })?;
        if let Some(tmp) = movie.id {
            id_map.insert(tmp, assigned);
        }
    }
    Ok(())
}

// ── Generators ───────────────────────────────────────────────────────

fn random_user(rng: &mut impl Rng, id: EntityId) -> User {
    let mut user = User::new(random_username(rng), random_password(rng), Roles::user());
    user.id = Some(id);
    user
}

fn random_username(rng: &mut impl Rng) -> String {
    let first = choose(rng, FIRST_NAMES);
    let stem: String = first.chars().filter(|c| *c != ' ').take(5).collect();
    format!("{stem}_{}", rng.gen_range(10..=99))
}

fn random_password(rng: &mut impl Rng) -> String {
    const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"0123456789";
    const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    // One of each class up front so the password always mixes cases
    // and digits, then filler.
    let mut password = String::with_capacity(7);
    for alphabet in [UPPER, LOWER, DIGITS] {
        password.push(char::from(*choose(rng, alphabet)));
    }
    for _ in 0..4 {
        password.push(char::from(*choose(rng, ALNUM)));
    }
    password
}

fn random_person(rng: &mut impl Rng) -> String {
    format!("{} {}", choose(rng, FIRST_NAMES), choose(rng, LAST_NAMES))
}

fn random_movie(rng: &mut impl Rng, id: EntityId) -> Movie {
    let title = match rng.gen_range(0..4u8) {
        0 => format!("The Life of {}", random_person(rng)),
        1 => format!("{} vs {}", choose(rng, LAST_NAMES), choose(rng, LAST_NAMES)),
        2 => format!("The {} {}", choose(rng, LABELS), choose(rng, LAST_NAMES)),
        _ => format!("{} and {}", choose(rng, FIRST_NAMES), choose(rng, FIRST_NAMES)),
    };
    let imdb: String = std::iter::once("tt".to_owned())
        .chain((0..7).map(|_| rng.gen_range(0..10u8).to_string()))
        .collect();

    let actors = (0..rng.gen_range(1..=4))
        .map(|_| random_person(rng))
        .collect::<Vec<_>>()
        .join(", ");

    Movie {
        id: Some(id),
        imdb,
        name: title,
        director: random_person(rng),
        actors,
        year: rng.gen_range(1950..=2021),
        minutes: rng.gen_range(35..=240),
        ratings: Vec::new(),
    }
}

/// A group plus the not-yet-persisted requests rolled for it.
fn random_group(rng: &mut impl Rng, id: EntityId, users: &[User]) -> (Group, Vec<Request>) {
    let prefix = *["Los", "Las", "Cineclub"]
        .choose(rng)
        .unwrap_or(&"Cineclub");
    let name = format!("{prefix} {} {}", choose(rng, LAST_NAMES), rng.gen_range(10..=99));

    let owner = users
        .iter()
        .filter_map(|u| u.id)
        .collect::<Vec<_>>();
    let owner = *owner.choose(rng).unwrap_or(&EntityId::from(1));

    let mut group = Group::new(name, owner);
    let mut pending = Vec::new();

    for user in users {
        let Some(user_id) = user.id else { continue };
        if user_id == owner {
            continue;
        }
        if rng.gen_range(0..100) < P_INCLUDE {
            group.members.push(user_id);
        } else if rng.gen_range(0..100) < P_INVITE {
            pending.push(Request::new(user_id, id, RequestStatus::AwaitingUser));
        } else if rng.gen_range(0..100) < P_REQUEST {
            pending.push(Request::new(user_id, id, RequestStatus::AwaitingGroup));
        }
    }

    group.id = Some(id);
    (group, pending)
}

fn random_rating(rng: &mut impl Rng, user: EntityId, movie: EntityId) -> Rating {
    // Half the ratings are "no opinion"; the rest bias high by taking
    // the better of two rolls, like real people rating movies they
    // chose to watch.
    let score = if rng.gen_bool(0.5) {
        Score::NoOpinion
    } else {
        Score::Stars(rng.gen_range(0..=5u8).max(rng.gen_range(0..=5u8)))
    };

    let labels = if rng.gen_bool(0.5) {
        (0..rng.gen_range(1..=3))
            .map(|_| choose(rng, LABELS).to_owned())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        String::new()
    };

    Rating::new(user, movie, score, labels)
}

/// Up to `count` distinct (user, movie) pairs; gives up after a bounded
/// number of duplicate draws, like the source it mimics.
fn random_pairs(
    rng: &mut impl Rng,
    count: usize,
    users: &[EntityId],
    movies: &[EntityId],
) -> Vec<(EntityId, EntityId)> {
    let mut pairs = HashSet::new();
    let mut retries = 0;
    if users.is_empty() || movies.is_empty() {
        return Vec::new();
    }
    while pairs.len() < count && retries < 100 {
        let pair = (*choose(rng, users), *choose(rng, movies));
        if !pairs.insert(pair) {
            retries += 1;
        }
    }
    pairs.into_iter().collect()
}

fn choose<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
