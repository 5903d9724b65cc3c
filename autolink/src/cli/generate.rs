use std::path::PathBuf;

use autolink_common::error::Result;
use autolink_common::model::{GenerateOptions, ResolveOptions};
use autolink_common::Config;
use autolink_core::generate_package_list;
use clap::Args;
use colored::Colorize;

use super::args::SearchArgs;

#[derive(Args, Debug)]
pub struct GeneratePackageList {
    #[command(flatten)]
    pub search: SearchArgs,

    /// File to write
    #[arg(short, long)]
    pub target: PathBuf,

    /// Java package of the generated Android list (default: expo.modules)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Write a provider without entries and skip scanning
    #[arg(long)]
    pub empty: bool,
}

impl GeneratePackageList {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let options = GenerateOptions {
            resolve: ResolveOptions {
                search: self.search.to_search_options(config)?,
                json: false,
            },
            target: self.target.clone(),
            namespace: self.namespace.clone(),
            empty: self.empty,
        };
        let outcome = generate_package_list(config, &options).await?;
        let status = if outcome.changed { "Generated" } else { "Up to date:" };
        println!(
            "{} {} ({} modules)",
            status.green().bold(),
            self.target.display(),
            outcome.module_count
        );
        Ok(())
    }
}
