use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::model::Person;

#[derive(Parser, Debug)]
#[command(name = "oml")]
#[command(about = "A personal movie catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the catalog (defaults to the platform data directory)
    #[arg(long, env = "OML_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON file replacing the bundled seed movies
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List movie titles
    List {
        /// Only titles containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show everything about a movie
    Show { title: String },

    /// Add a movie, or overwrite the movie with the same title
    Add {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: MovieFields,
    },

    /// Edit a movie; omitted fields keep their current value
    Edit {
        /// Current title of the movie
        original_title: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: MovieFields,
    },

    /// Set one person's stars for a movie
    Rate {
        title: String,
        /// One of O, M, L
        person: Person,
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },

    /// Export titles and ratings as a Letterboxd CSV file
    Export {
        file: PathBuf,
        /// Whose ratings to export
        #[arg(long, default_value = "O")]
        person: Person,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct MovieFields {
    /// Poster URL
    #[arg(long, conflicts_with = "poster_file")]
    pub poster: Option<String>,
    /// Image file to embed as the poster
    #[arg(long)]
    pub poster_file: Option<PathBuf>,
    #[arg(long)]
    pub trailer: Option<String>,
    /// Audio file to embed
    #[arg(long)]
    pub music_file: Option<PathBuf>,
    #[arg(long)]
    pub actors: Option<String>,
    #[arg(long)]
    pub rating_o: Option<String>,
    #[arg(long)]
    pub rating_m: Option<String>,
    #[arg(long)]
    pub rating_l: Option<String>,
    /// Quotes, one per line
    #[arg(long)]
    pub quotes: Option<String>,
    #[arg(long)]
    pub platforms: Option<String>,
    #[arg(long)]
    pub comments: Option<String>,
}
