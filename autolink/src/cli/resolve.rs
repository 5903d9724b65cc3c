use autolink_common::error::Result;
use autolink_common::model::ResolveOptions;
use autolink_common::{Config, ModuleDescriptor};
use autolink_core::{resolve, ResolveResponse};
use clap::Args;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use super::args::SearchArgs;

#[derive(Args, Debug)]
pub struct Resolve {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Print `{ extraDependencies, modules }` as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Resolve {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let options = ResolveOptions {
            search: self.search.to_search_options(config)?,
            json: self.json,
        };
        let outcome = match resolve(config, &options).await? {
            ResolveResponse::Report(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            ResolveResponse::Modules(outcome) => outcome,
        };
        let options = options.search;

        if outcome.modules.is_empty() {
            println!(
                "{}",
                format!("0 modules to link for {}", options.platform).yellow()
            );
            return Ok(());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Package").style_spec("b"),
            Cell::new("Version").style_spec("b"),
            Cell::new("Native").style_spec("b"),
            Cell::new("Modules").style_spec("b"),
        ]));
        for module in &outcome.modules {
            let version = outcome
                .results
                .get(module.package_name())
                .map(|r| r.version.as_str())
                .unwrap_or("-");
            table.add_row(Row::new(vec![
                Cell::new(module.package_name()).style_spec("Fb"),
                Cell::new(version),
                Cell::new(&native_summary(module)),
                Cell::new(&module_classes(module)),
            ]));
        }
        table.printstd();
        println!(
            "{}",
            format!(
                "{} modules to link for {}",
                outcome.modules.len(),
                options.platform
            )
            .bold()
        );
        Ok(())
    }
}

fn native_summary(module: &ModuleDescriptor) -> String {
    match module {
        ModuleDescriptor::Android(android) => android
            .projects
            .iter()
            .map(|p| p.name.clone())
            .collect::<Vec<_>>()
            .join(", "),
        ModuleDescriptor::Apple(apple) => {
            let pods = apple
                .pods
                .iter()
                .map(|p| p.pod_name.clone())
                .collect::<Vec<_>>()
                .join(", ");
            if apple.debug_only {
                format!("{pods} (debug)")
            } else {
                pods
            }
        }
        ModuleDescriptor::DevTools(devtools) => devtools.webpage_root.display().to_string(),
    }
}

fn module_classes(module: &ModuleDescriptor) -> String {
    let classes = match module {
        ModuleDescriptor::Android(android) => android.modules.clone(),
        ModuleDescriptor::Apple(apple) => apple.modules.clone(),
        ModuleDescriptor::DevTools(_) => Vec::new(),
    };
    if classes.is_empty() {
        "-".to_string()
    } else {
        classes.join(", ")
    }
}
