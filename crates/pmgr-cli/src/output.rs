//! Table rendering for the list commands.
//!
//! One row struct per entity kind, built from the snapshot with ids
//! already resolved to names where that helps (owners, rating users).

use std::io::{self, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use pmgr_core::{EntityId, Group, Movie, Rating, Request, Snapshot, User};

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "USERNAME")]
    pub username: String,
    #[tabled(rename = "ROLES")]
    pub roles: String,
    #[tabled(rename = "GROUPS")]
    pub groups: usize,
    #[tabled(rename = "RATINGS")]
    pub ratings: usize,
}

#[derive(Tabled)]
pub struct MovieRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "IMDB")]
    pub imdb: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "DIRECTOR")]
    pub director: String,
    #[tabled(rename = "YEAR")]
    pub year: u16,
    #[tabled(rename = "MIN")]
    pub minutes: u32,
    #[tabled(rename = "RATINGS")]
    pub ratings: usize,
}

#[derive(Tabled)]
pub struct GroupRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "OWNER")]
    pub owner: String,
    #[tabled(rename = "MEMBERS")]
    pub members: usize,
    #[tabled(rename = "PENDING")]
    pub pending: usize,
}

#[derive(Tabled)]
pub struct RequestRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "USER")]
    pub user: String,
    #[tabled(rename = "GROUP")]
    pub group: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
}

// ── Row builders ─────────────────────────────────────────────────────

pub fn user_row(user: &User) -> UserRow {
    UserRow {
        id: fmt_id(user.id),
        username: user.username.clone(),
        roles: user.role.to_string(),
        groups: user.groups.len(),
        ratings: user.ratings.len(),
    }
}

pub fn movie_row(movie: &Movie) -> MovieRow {
    MovieRow {
        id: fmt_id(movie.id),
        imdb: movie.imdb.clone(),
        name: movie.name.clone(),
        director: movie.director.clone(),
        year: movie.year,
        minutes: movie.minutes,
        ratings: movie.ratings.len(),
    }
}

pub fn group_row(snapshot: &Snapshot, group: &Group) -> GroupRow {
    GroupRow {
        id: fmt_id(group.id),
        name: group.name.clone(),
        owner: username_for(snapshot, group.owner),
        members: group.members.len(),
        pending: group.requests.len(),
    }
}

pub fn request_row(snapshot: &Snapshot, request: &Request) -> RequestRow {
    RequestRow {
        id: fmt_id(request.id),
        user: username_for(snapshot, request.user),
        group: group_name_for(snapshot, request.group),
        status: request.status.to_string(),
    }
}

pub fn rating_summary(rating: &Rating) -> String {
    let stars = match rating.rating.as_i8() {
        -1 => "no opinion".to_owned(),
        n => format!("{n} star{}", if n == 1 { "" } else { "s" }),
    };
    if rating.labels.is_empty() {
        stars
    } else {
        format!("{stars} ({})", rating.labels)
    }
}

// ── Lookup helpers ───────────────────────────────────────────────────

fn username_for(snapshot: &Snapshot, id: EntityId) -> String {
    snapshot
        .users
        .iter()
        .find(|u| u.id == Some(id))
        .map_or_else(|| id.to_string(), |u| u.username.clone())
}

fn group_name_for(snapshot: &Snapshot, id: EntityId) -> String {
    snapshot
        .groups
        .iter()
        .find(|g| g.id == Some(id))
        .map_or_else(|| id.to_string(), |g| g.name.clone())
}

fn fmt_id(id: Option<EntityId>) -> String {
    id.map_or_else(|| "-".to_owned(), |id| id.to_string())
}

// ── Printing ─────────────────────────────────────────────────────────

pub fn print_table<R: Tabled>(rows: &[R], quiet: bool) {
    if quiet {
        return;
    }
    let table = Table::new(rows).with(Style::rounded()).to_string();
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{table}");
}

pub fn print_line(line: &str, quiet: bool) {
    if !quiet {
        println!("{line}");
    }
}
