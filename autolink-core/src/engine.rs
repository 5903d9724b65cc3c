// autolink-core/src/engine.rs
//! One resolve pass: expand roots, scan, load in parallel, filter, pick
//! canonical revisions, then build descriptors. Nothing is cached between passes.
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use autolink_common::config::Config;
use autolink_common::diagnostic::Diagnostic;
use autolink_common::error::{AutolinkError, Result};
use autolink_common::model::{
    ExtraDependencies, GenerateModulesProviderOptions, GenerateOptions, ModuleDescriptor,
    ResolveOptions, SearchOptions, SearchResults,
};
use crossbeam_channel::unbounded;
use glob::Pattern;
use serde::Serialize;
use threadpool::ThreadPool;
use tracing::{debug, info, instrument, warn};

use crate::descriptor::build_descriptor;
use crate::duplicates::{DuplicateResolver, Occurrence};
use crate::entitlements::{read_app_code_sign_entitlements, AppCodeSignEntitlements};
use crate::extra_deps::resolve_extra_build_dependencies;
use crate::generate::{render_provider, validate_target, write_provider};
use crate::loader::{load_candidate, LoadedPackage};
use crate::search::scan::compile_patterns;
use crate::search::{
    discover_candidates, expand_search_paths, filter_to_project_dependencies, Candidate,
    IgnoreMatcher,
};

/// Canonical revisions plus everything that was skipped or resolved on the way.
#[derive(Debug, Clone, Default)]
pub struct ResolveOutcome {
    pub results: SearchResults,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct ModulesOutcome {
    /// In the order the canonical results were first discovered.
    pub modules: Vec<ModuleDescriptor>,
    pub results: SearchResults,
    pub diagnostics: Vec<Diagnostic>,
}

/// The `resolve --json` document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub extra_dependencies: Option<ExtraDependencies>,
    pub modules: Vec<ModuleDescriptor>,
}

impl ResolveReport {
    pub fn new(options: &SearchOptions, modules: Vec<ModuleDescriptor>) -> Self {
        Self {
            extra_dependencies: resolve_extra_build_dependencies(
                &options.project_root,
                options.platform,
            ),
            modules,
        }
    }
}

/// What a resolve-only request produces: the serialized document when `json`
/// is set, otherwise descriptors and results for display.
#[derive(Debug, Clone)]
pub enum ResolveResponse {
    Report(ResolveReport),
    Modules(ModulesOutcome),
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOutcome {
    pub changed: bool,
    pub module_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compiled `exclude` patterns, matched against package names.
struct ExcludeMatcher {
    patterns: Vec<Pattern>,
}

impl ExcludeMatcher {
    fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns("exclude", patterns)?,
        })
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Loads candidates on a worker pool and returns them in discovery order.
#[instrument(skip_all)]
fn load_candidates(
    config: &Config,
    candidates: Vec<Candidate>,
) -> (Vec<LoadedPackage>, Vec<Diagnostic>) {
    if candidates.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let num_workers = config.jobs.clamp(1, candidates.len());
    let pool = ThreadPool::new(num_workers);
    debug!(
        "Loading {} candidates with {} workers",
        candidates.len(),
        num_workers
    );

    let expected: Vec<(usize, PathBuf)> = candidates
        .iter()
        .map(|c| (c.order, c.package_dir.clone()))
        .collect();
    let (tx, rx) = unbounded();
    for candidate in candidates {
        let tx = tx.clone();
        pool.execute(move || {
            let result = load_candidate(&candidate);
            let _ = tx.send((candidate.order, result));
        });
    }
    drop(tx);

    let received: Vec<_> = rx.iter().collect();
    pool.join();
    if pool.panic_count() > 0 {
        warn!("{} loader worker(s) panicked", pool.panic_count());
    }
    collect_in_order(expected, received)
}

/// Pairs worker results with the candidates that were sent out, in discovery
/// order. A candidate whose result never arrived becomes `LoadAborted`.
fn collect_in_order(
    expected: Vec<(usize, PathBuf)>,
    received: Vec<(usize, std::result::Result<LoadedPackage, Diagnostic>)>,
) -> (Vec<LoadedPackage>, Vec<Diagnostic>) {
    let mut by_order: HashMap<usize, _> = received.into_iter().collect();
    let mut loaded = Vec::with_capacity(expected.len());
    let mut diagnostics = Vec::new();
    for (order, package_dir) in expected {
        match by_order.remove(&order) {
            Some(Ok(package)) => loaded.push(package),
            Some(Err(diagnostic)) => diagnostics.push(diagnostic),
            None => diagnostics.push(Diagnostic::LoadAborted { path: package_dir }),
        }
    }
    (loaded, diagnostics)
}

fn report_diagnostics(diagnostics: &[Diagnostic], silent: bool) {
    for diagnostic in diagnostics {
        if diagnostic.excludes_package() && !silent {
            warn!("{}", diagnostic);
        } else {
            debug!("{}", diagnostic);
        }
    }
}

/// Finds every module linkable on `options.platform`, keyed by module name.
///
/// Fails when a glob pattern is invalid or the search roots as a whole cannot be
/// read; anything scoped to one package ends up in `diagnostics`.
#[instrument(skip_all, fields(platform = %options.platform))]
pub fn find_modules(config: &Config, options: &SearchOptions) -> Result<ResolveOutcome> {
    let ignore = IgnoreMatcher::new(&options.ignore_paths)?;
    let exclude = ExcludeMatcher::new(&options.exclude)?;
    let expanded = expand_search_paths(options)?;
    let mut diagnostics = expanded.diagnostics;
    if expanded.roots.is_empty() {
        debug!("No search roots; nothing to link");
        return Ok(ResolveOutcome {
            results: SearchResults::new(),
            diagnostics,
        });
    }

    let candidates = discover_candidates(&expanded.roots, &ignore);

    let (loaded, load_diagnostics) = load_candidates(config, candidates);
    diagnostics.extend(load_diagnostics);

    let mut local_modules = HashSet::new();
    let occurrences: Vec<Occurrence> = loaded
        .into_iter()
        .filter(|package| {
            let local = package.candidate.from_native_modules_dir;
            if !local && exclude.is_excluded(&package.name) {
                debug!("Excluding {} (matches exclude)", package.name);
                return false;
            }
            let supported = package
                .revision
                .config
                .as_ref()
                .is_some_and(|c| c.supports_platform(options.platform));
            if !supported {
                debug!("{} does not support {}", package.name, options.platform);
            }
            supported
        })
        .inspect(|package| {
            if package.candidate.from_native_modules_dir {
                local_modules.insert(package.name.clone());
            }
        })
        .map(Occurrence::from)
        .collect();

    let resolver = DuplicateResolver::for_policy(options.policy, &options.project_root);
    let mut results = resolver.resolve(occurrences, &mut diagnostics);

    if options.only_project_deps {
        results = filter_to_project_dependencies(
            results,
            &options.project_root,
            &local_modules,
            &mut diagnostics,
        );
    }

    report_diagnostics(&diagnostics, options.silent);
    info!(
        "Found {} module(s) for {}",
        results.len(),
        options.platform
    );
    Ok(ResolveOutcome {
        results,
        diagnostics,
    })
}

/// Builds one descriptor per canonical result that has something to link.
#[instrument(skip_all, fields(platform = %options.platform))]
pub fn resolve_modules(config: &Config, options: &SearchOptions) -> Result<ModulesOutcome> {
    let ResolveOutcome {
        results,
        mut diagnostics,
    } = find_modules(config, options)?;
    let (modules, descriptor_diagnostics) = build_descriptors(&results, options);
    report_diagnostics(&descriptor_diagnostics, options.silent);
    diagnostics.extend(descriptor_diagnostics);
    Ok(ModulesOutcome {
        modules,
        results,
        diagnostics,
    })
}

fn build_descriptors(
    results: &SearchResults,
    options: &SearchOptions,
) -> (Vec<ModuleDescriptor>, Vec<Diagnostic>) {
    let mut modules = Vec::new();
    let mut diagnostics = Vec::new();
    for (name, revision) in results.iter() {
        match build_descriptor(name, revision, options) {
            Ok(Some(descriptor)) => modules.push(descriptor),
            Ok(None) => {}
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    (modules, diagnostics)
}

/// Runs [`find_modules`] off the async runtime.
pub async fn find_modules_async(config: Config, options: SearchOptions) -> Result<ResolveOutcome> {
    tokio::task::spawn_blocking(move || find_modules(&config, &options))
        .await
        .map_err(|e| AutolinkError::Generic(format!("Resolve task failed: {e}")))?
}

/// Runs [`resolve_modules`] off the async runtime.
pub async fn resolve_modules_async(
    config: Config,
    options: SearchOptions,
) -> Result<ModulesOutcome> {
    tokio::task::spawn_blocking(move || resolve_modules(&config, &options))
        .await
        .map_err(|e| AutolinkError::Generic(format!("Resolve task failed: {e}")))?
}

/// Answers a resolve-only request. No code is generated either way.
#[instrument(skip_all, fields(json = options.json))]
pub async fn resolve(config: &Config, options: &ResolveOptions) -> Result<ResolveResponse> {
    let outcome = resolve_modules_async(config.clone(), options.search.clone()).await?;
    if options.json {
        return Ok(ResolveResponse::Report(ResolveReport::new(
            &options.search,
            outcome.modules,
        )));
    }
    Ok(ResolveResponse::Modules(outcome))
}

/// Writes the package list for the requested platform. With `empty` set no
/// scanning happens and a provider without entries is written.
#[instrument(skip_all, fields(target = %options.target.display()))]
pub async fn generate_package_list(
    config: &Config,
    options: &GenerateOptions,
) -> Result<GenerateOutcome> {
    validate_target(&options.target)?;
    let search = &options.resolve.search;
    let outcome = if options.empty {
        debug!("Generating an empty provider");
        ModulesOutcome::default()
    } else {
        resolve_modules_async(config.clone(), search.clone()).await?
    };

    let content = render_provider(
        search.platform,
        &outcome.modules,
        options.namespace.as_deref(),
        &AppCodeSignEntitlements::default(),
    )?;
    let changed = write_provider(&options.target, content).await?;
    Ok(GenerateOutcome {
        changed,
        module_count: outcome.modules.len(),
        diagnostics: outcome.diagnostics,
    })
}

/// Writes the modules provider restricted to `packages` (all packages when the
/// list is empty), embedding the app's code-sign entitlements.
#[instrument(skip_all, fields(target = %options.target.display()))]
pub async fn generate_modules_provider(
    config: &Config,
    options: &GenerateModulesProviderOptions,
) -> Result<GenerateOutcome> {
    validate_target(&options.target)?;
    let search = &options.resolve.search;
    let mut outcome = resolve_modules_async(config.clone(), search.clone()).await?;
    if !options.packages.is_empty() {
        let allowed: HashSet<&str> = options.packages.iter().map(String::as_str).collect();
        outcome
            .modules
            .retain(|module| allowed.contains(module.package_name()));
        debug!("{} module(s) left after the allow-list", outcome.modules.len());
    }

    let entitlements = options
        .entitlement
        .as_deref()
        .map(read_app_code_sign_entitlements)
        .unwrap_or_default();
    let content = render_provider(search.platform, &outcome.modules, None, &entitlements)?;
    let changed = write_provider(&options.target, content).await?;
    Ok(GenerateOutcome {
        changed,
        module_count: outcome.modules.len(),
        diagnostics: outcome.diagnostics,
    })
}
