use std::path::PathBuf;

use autolink_common::error::Result;
use autolink_common::model::{GenerateModulesProviderOptions, ResolveOptions};
use autolink_common::Config;
use autolink_core::generate_modules_provider;
use clap::Args;
use colored::Colorize;

use super::args::SearchArgs;

#[derive(Args, Debug)]
pub struct GenerateModulesProvider {
    #[command(flatten)]
    pub search: SearchArgs,

    /// File to write
    #[arg(short, long)]
    pub target: PathBuf,

    /// Entitlements plist whose app groups are embedded in the provider
    #[arg(long)]
    pub entitlement: Option<PathBuf>,

    /// Packages to include; all linked packages when omitted
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub packages: Vec<String>,
}

impl GenerateModulesProvider {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let options = GenerateModulesProviderOptions {
            resolve: ResolveOptions {
                search: self.search.to_search_options(config)?,
                json: false,
            },
            target: self.target.clone(),
            entitlement: self.entitlement.clone(),
            packages: self.packages.clone(),
        };
        let outcome = generate_modules_provider(config, &options).await?;
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
