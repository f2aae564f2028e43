// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Bookmark dashboard for the terminal: your own bookmarks merged with a shared server list
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    /// Print the default configuration and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List bookmarks, refreshing the server list first when it is in use
    List {
        /// Case-insensitive filter on title or URL
        query: Option<String>,

        #[arg(short = 's', long = "source", help = "server, manual or both (default: settings)")]
        source: Option<String>,

        #[arg(short = 'c', long = "category", help = "only bookmarks in this category")]
        category: Option<String>,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Add a manual bookmark
    Add {
        url: String,
        #[arg(long = "title", help = "title, defaults to the host name")]
        title: Option<String>,
        #[arg(short = 'c', long = "category", help = "category id")]
        category: Option<String>,
        #[arg(long = "favicon", help = "icon URL, defaults to the favicon service")]
        favicon: Option<String>,
    },
    /// Change a manual bookmark
    Edit {
        id: String,
        #[arg(long = "title")]
        title: Option<String>,
        #[arg(long = "url")]
        url: Option<String>,
        #[arg(short = 'c', long = "category")]
        category: Option<String>,
        #[arg(long = "favicon")]
        favicon: Option<String>,
    },
    /// Delete a manual bookmark
    Delete { id: String },
    /// Fetch the server bookmark list into the local cache
    Refresh,
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Write manual bookmarks, settings and categories as JSON
    Export {
        #[arg(short = 'f', long = "file", help = "target file, '-' for stdout")]
        file: Option<PathBuf>,
    },
    /// Restore from a JSON export
    Import { file: PathBuf },
    /// Create the store and seed defaults
    Init,
    /// Normalize a URL the way stored bookmarks are normalized
    FormatUrl { url: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// List categories
    List,
    /// Add a category
    Add {
        name: String,
        #[arg(long = "color", help = "hex color, e.g. #9b87f5")]
        color: Option<String>,
    },
    /// Rename or recolor a category
    Edit {
        id: String,
        #[arg(long = "name")]
        name: Option<String>,
        #[arg(long = "color")]
        color: Option<String>,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print current settings
    Show {
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Change one or more settings
    Set {
        #[arg(long = "grid-cols", help = "number of grid columns, 2 to 6")]
        grid_cols: Option<u8>,
        #[arg(long = "show-titles")]
        show_titles: Option<bool>,
        #[arg(long = "default-category")]
        default_category: Option<String>,
        #[arg(long = "source", help = "server, manual or both")]
        source: Option<String>,
        #[arg(long = "server-url")]
        server_url: Option<String>,
    },
    /// Switch the grid between four and three columns
    ToggleGrid,
}
