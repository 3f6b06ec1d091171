use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use expenses::cli::{
    handle_add, handle_average, handle_change, handle_compare, handle_delete, handle_list,
    handle_setup,
};
use expenses::config::ExpensePaths;
use expenses::storage::EntryStore;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Command-line expense tracker",
    long_about = "Tracks dated, tagged expense entries in a local database and \
                  answers queries over rolling time windows: listings, sliding \
                  30-day averages with smoothed trends, and per-tag comparisons."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the entry database, backing up an existing file
    Setup {
        /// Overwrite the database if it already exists
        #[arg(short, long)]
        overwrite: bool,
    },

    /// Add an entry to the database
    Add {
        /// Name of the entry
        name: String,
        /// Cost of the entry, e.g. "3.50"
        cost: String,
        /// Date of expenditure (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Tags to associate with the entry
        #[arg(short, long, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Delete an entry from the database
    Delete {
        /// ID of the entry to be deleted
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Change fields of an existing entry
    Change {
        /// ID of the entry to change
        id: u64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New cost
        #[arg(long)]
        cost: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Replacement tag list (replaces all existing tags)
        #[arg(long, num_args = 0..)]
        tags: Option<Vec<String>>,
    },

    /// List entries within the last days
    List {
        /// Number of past days to include
        #[arg(short, long, default_value_t = 30)]
        days: i64,
        /// Only list entries with these tags; prefix a tag with '/' to exclude it
        #[arg(short, long, num_args = 1..)]
        tags: Vec<String>,
        /// Sort key: name, cost or date
        #[arg(short, long, default_value = "date")]
        sort: String,
    },

    /// Show sliding-window spending sums per tag with a fitted trend
    Average {
        /// Total number of past days to cover, defaults to the full span of the data
        #[arg(short, long)]
        days: Option<i64>,
        /// Sliding window size in days
        #[arg(short, long, default_value_t = 30)]
        window: i64,
        /// Degree of the fitted trend polynomial
        #[arg(long, default_value_t = 2)]
        degree: usize,
        /// Tags to break the series down by; prefix with '/' to exclude
        #[arg(short, long, num_args = 1..)]
        tags: Vec<String>,
        /// Combine all tag buckets into a single series
        #[arg(short, long)]
        combine: bool,
    },

    /// Compare total spending per tag over one fixed window
    Compare {
        /// Number of past days to cover
        #[arg(short, long, default_value_t = 30)]
        days: i64,
        /// Tags to compare (at least one); prefix with '/' to exclude
        #[arg(short, long, num_args = 1.., required = true)]
        tags: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = ExpensePaths::new()?;

    // The reference day is captured once per invocation so every entry in a
    // query is judged against the same "today".
    let today: NaiveDate = Local::now().date_naive();

    match cli.command {
        Commands::Setup { overwrite } => {
            handle_setup(paths, overwrite)?;
        }
        Commands::Add {
            name,
            cost,
            date,
            tags,
        } => {
            let mut store = EntryStore::open(paths)?;
            handle_add(&mut store, name, cost, date, tags, today)?;
        }
        Commands::Delete { id, yes } => {
            let mut store = EntryStore::open(paths)?;
            handle_delete(&mut store, id, yes)?;
        }
        Commands::Change {
            id,
            name,
            cost,
            date,
            tags,
        } => {
            let mut store = EntryStore::open(paths)?;
            handle_change(&mut store, id, name, cost, date, tags)?;
        }
        Commands::List { days, tags, sort } => {
            let store = EntryStore::open(paths)?;
            handle_list(&store, days, tags, sort, today)?;
        }
        Commands::Average {
            days,
            window,
            degree,
            tags,
            combine,
        } => {
            let store = EntryStore::open(paths)?;
            handle_average(&store, days, window, degree, tags, combine, today)?;
        }
        Commands::Compare { days, tags } => {
            let store = EntryStore::open(paths)?;
            handle_compare(&store, days, tags, today)?;
        }
    }

    Ok(())
}
