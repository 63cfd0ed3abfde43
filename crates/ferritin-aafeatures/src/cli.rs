use super::commands;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered encodings
    List,
    /// Print a feature table
    Show {
        /// Registered encoding name
        #[arg(short, long, conflicts_with = "table", required_unless_present = "table")]
        encoding: Option<String>,

        /// Raw table file to build instead of a preset
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Leave rows of a custom table unnormalized
        #[arg(long, requires = "table")]
        no_normalize: bool,

        /// Encode `X` in a custom table as the zero vector
        #[arg(long, requires = "table")]
        no_average: bool,

        /// Print JSON instead of the raw table format
        #[arg(long)]
        json: bool,
    },
    /// Encode a sequence into a labelled safetensors record
    Encode {
        #[arg(short, long)]
        encoding: String,

        #[arg(short, long)]
        sequence: String,

        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::List => commands::list::execute(),
            Commands::Show {
                encoding,
                table,
                no_normalize,
                no_average,
                json,
            } => commands::show::execute(encoding, table, !no_normalize, !no_average, json),
            Commands::Encode {
                encoding,
                sequence,
                output,
            } => commands::encode::execute(encoding, sequence, output),
        }
    }
}
