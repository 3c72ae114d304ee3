//! Clap derive structures for the `pmgr` CLI.

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pmgr -- rate movies and manage rating groups from the command line
#[derive(Debug, Parser)]
#[command(
    name = "pmgr",
    version,
    about = "Client for the Pmgr movie-group service",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service root URL (must end with a slash)
    #[arg(
        long,
        short = 'u',
        env = "PMGR_URL",
        default_value = "http://localhost:8080/api/",
        global = true
    )]
    pub url: String,

    /// Account to log in as
    #[arg(long, env = "PMGR_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for the account
    #[arg(long, env = "PMGR_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PMGR_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what the service currently holds
    #[command(alias = "ls")]
    List,

    /// List registered users
    Users,

    /// List movies in the catalog
    Movies,

    /// List rating groups
    Groups,

    /// Manage the movie catalog
    #[command(alias = "m")]
    Movie(MovieArgs),

    /// Rate a movie (creates or replaces your rating)
    Rate(RateArgs),

    /// Manage rating groups
    #[command(alias = "g")]
    Group(GroupArgs),

    /// Answer pending membership requests
    #[command(alias = "req")]
    Request(RequestArgs),

    /// Fill the service with generated test data
    Populate(PopulateArgs),
}

// ── Movie ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MovieArgs {
    #[command(subcommand)]
    pub command: MovieCommand,
}

#[derive(Debug, Subcommand)]
pub enum MovieCommand {
    /// Add a movie to the catalog
    Add {
        /// IMDB key, `tt` followed by seven digits
        #[arg(long)]
        imdb: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        director: String,
        /// Comma-separated cast list
        #[arg(long, default_value = "")]
        actors: String,
        #[arg(long)]
        year: u16,
        #[arg(long)]
        minutes: u32,
    },

    /// Update fields of an existing movie
    Set {
        /// Id of the movie to change
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        actors: Option<String>,
        #[arg(long)]
        year: Option<u16>,
        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Remove a movie from the catalog
    Rm {
        /// Id of the movie to remove
        id: u64,
    },
}

// ── Rate ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Id of the movie to rate
    pub movie: u64,

    /// Star rating, 0 through 5
    #[arg(long, short = 's', conflicts_with = "no_opinion")]
    pub stars: Option<u8>,

    /// Record that you watched it but have no opinion
    #[arg(long)]
    pub no_opinion: bool,

    /// Comma-separated free-form labels
    #[arg(long, default_value = "")]
    pub labels: String,
}

// ── Group ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create a group owned by you
    Add {
        /// Name of the new group
        name: String,
    },

    /// Delete a group
    Rm {
        /// Id of the group to delete
        id: u64,
    },

    /// Ask to join a group
    Join {
        /// Id of the group to join
        id: u64,
    },
}

// ── Request ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RequestArgs {
    #[command(subcommand)]
    pub command: RequestCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestCommand {
    /// List pending membership requests
    List,

    /// Accept a membership request
    Accept {
        /// Id of the request
        id: u64,
    },

    /// Reject a membership request
    Reject {
        /// Id of the request
        id: u64,
    },
}

// ── Populate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PopulateArgs {
    /// How many users to create
    #[arg(long, default_value = "10")]
    pub users: usize,

    /// How many groups to create
    #[arg(long, default_value = "3")]
    pub groups: usize,

    /// How many movies to create (skipped if the catalog is big enough)
    #[arg(long, default_value = "10")]
    pub movies: usize,

    /// How many ratings to attempt
    #[arg(long, default_value = "100")]
    pub ratings: usize,
}
