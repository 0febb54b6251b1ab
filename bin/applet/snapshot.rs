use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Board;
use tracing::instrument;

/// Prints the starting board in snapshot notation.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Snapshot {}

impl Snapshot {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        println!("{}", Board::default().snapshot());
        Ok(())
    }
}
