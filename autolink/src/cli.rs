// autolink/src/cli.rs
//! Defines the command-line argument structure using clap.
use autolink_common::error::Result;
use autolink_common::Config;
use clap::{ArgAction, Parser, Subcommand};

// Module declarations
pub mod args;
pub mod generate;
pub mod provider;
pub mod resolve;
pub mod search;
pub mod verify;

use crate::cli::generate::GeneratePackageList;
use crate::cli::provider::GenerateModulesProvider;
use crate::cli::resolve::Resolve;
use crate::cli::search::Search;
use crate::cli::verify::Verify;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "autolink", bin_name = "autolink")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical search results as JSON
    Search(Search),
    /// Resolve module descriptors for a platform
    Resolve(Resolve),
    /// Report modules installed more than once
    Verify(Verify),
    /// Write the platform package list or provider file
    GeneratePackageList(GeneratePackageList),
    /// Write the Apple modules provider for selected packages
    GenerateModulesProvider(GenerateModulesProvider),
}

impl Command {
    pub async fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Search(command) => command.run(config).await,
            Self::Resolve(command) => command.run(config).await,
            Self::Verify(command) => command.run(config).await,
            Self::GeneratePackageList(command) => command.run(config).await,
            Self::GenerateModulesProvider(command) => command.run(config).await,
        }
    }
}
