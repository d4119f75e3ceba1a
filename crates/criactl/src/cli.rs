//! Command-line argument parsing.
//!
//! Running without a subcommand starts the interactive session.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cria::FormatGroup;

/// Cria CLI
#[derive(Parser)]
#[command(name = "criactl")]
#[command(about = "Cria - AI critique of ad creatives across Meta placements", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand (if not provided, starts the interactive session)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze creatives for one format group
    Analyze {
        /// Path to the square (1:1) creative
        #[arg(long)]
        square: Option<PathBuf>,

        /// Path to the vertical (9:16) creative
        #[arg(long)]
        vertical: Option<PathBuf>,

        /// Format group to critique
        #[arg(long, value_enum)]
        group: GroupArg,

        /// Print the raw analysis result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the placement catalog
    Placements {
        /// Only placements of this format group
        #[arg(long, value_enum)]
        group: Option<GroupArg>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and credentials
    Doctor,
}

/// CLI spelling of the two format groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    /// Square and rectangular placements (feed, marketplace, messenger)
    Square,
    /// Vertical placements (stories, reels, audience network)
    Vertical,
}

impl From<GroupArg> for FormatGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Square => FormatGroup::SquareLike,
            GroupArg::Vertical => FormatGroup::Vertical,
        }
    }
}
