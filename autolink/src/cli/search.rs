use autolink_common::error::Result;
use autolink_common::Config;
use autolink_core::find_modules_async;
use clap::Args;
use tracing::debug;

use super::args::SearchArgs;

#[derive(Args, Debug)]
pub struct Search {
    #[command(flatten)]
    pub search: SearchArgs,
}

impl Search {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let options = self.search.to_search_options(config)?;
        debug!("Searching for {} modules", options.platform);
        let outcome = find_modules_async(config.clone(), options).await?;
        println!("{}", serde_json::to_string_pretty(&outcome.results)?);
        Ok(())
    }
}
