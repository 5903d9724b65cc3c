use autolink_common::error::{AutolinkError, Result};
use autolink_common::Config;
use autolink_core::{find_modules_async, verify_search_results};
use clap::Args;
use colored::Colorize;

use super::args::SearchArgs;

#[derive(Args, Debug)]
pub struct Verify {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail when any module is installed more than once
    #[arg(long)]
    pub strict: bool,
}

impl Verify {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let options = self.search.to_search_options(config)?;
        let outcome = find_modules_async(config.clone(), options).await?;
        let report = verify_search_results(&outcome.results);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if report.is_clean() {
            println!("{}", "No duplicate modules found".green());
        } else {
            for module in &report.duplicated {
                println!(
                    "{} {}",
                    "==>".bold().yellow(),
                    format!("Multiple revisions of {}", module.name).bold()
                );
                println!(
                    "  {} {}@{}",
                    "linked:".green(),
                    module.canonical.path.display(),
                    module.canonical.version
                );
                for duplicate in &module.duplicates {
                    println!(
                        "  {} {}@{}",
                        "ignored:".dimmed(),
                        duplicate.path.display(),
                        duplicate.version
                    );
                }
            }
            println!(
                "{}",
                format!("{} module(s) installed more than once", report.count()).bold()
            );
        }

        if self.strict && !report.is_clean() {
            return Err(AutolinkError::ValidationError(format!(
                "{} module(s) installed more than once",
                report.count()
            )));
        }
        Ok(())
    }
}
