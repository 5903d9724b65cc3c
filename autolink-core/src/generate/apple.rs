// autolink-core/src/generate/apple.rs
use autolink_common::error::Result;
use autolink_common::model::ModuleDescriptorIos;

use crate::entitlements::AppCodeSignEntitlements;

pub const DEBUG_CONDITION: &str = "EXPO_CONFIGURATION_DEBUG";
pub const PROVIDER_CLASS: &str = "ExpoModulesProvider";

const HEADER: &str = "/**
 * Automatically generated by autolink.
 *
 * This provider lists the native Swift module classes linked into the app.
 */
";

/// Entries split by whether they may only ship in debug builds.
#[derive(Debug, Default)]
struct Entries {
    release: Vec<String>,
    debug: Vec<String>,
}

impl Entries {
    fn collect(modules: &[&ModuleDescriptorIos], f: impl Fn(&ModuleDescriptorIos) -> Vec<String>) -> Self {
        let mut entries = Self::default();
        for module in modules {
            let items = f(module);
            if module.debug_only {
                entries.debug.extend(items);
            } else {
                entries.release.extend(items);
            }
        }
        entries
    }
}

/// Renders a `return [...]` statement, wrapping debug-only entries in a build
/// condition while keeping the release list valid on its own.
fn render_return(entries: &Entries, indent: &str) -> String {
    let list = |items: &[String]| -> String {
        if items.is_empty() {
            return format!("{indent}return []\n");
        }
        let body = items
            .iter()
            .map(|item| format!("{indent}  {item}"))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("{indent}return [\n{body}\n{indent}]\n")
    };

    if entries.debug.is_empty() {
        return list(&entries.release);
    }
    let all: Vec<String> = entries
        .release
        .iter()
        .chain(entries.debug.iter())
        .cloned()
        .collect();
    format!(
        "{indent}#if {DEBUG_CONDITION}\n{}{indent}#else\n{}{indent}#endif\n",
        list(&all),
        list(&entries.release)
    )
}

fn has_content(module: &ModuleDescriptorIos) -> bool {
    !module.modules.is_empty()
        || !module.app_delegate_subscribers.is_empty()
        || !module.react_delegate_handlers.is_empty()
}

fn render_imports(modules: &[&ModuleDescriptorIos]) -> String {
    let imports = Entries::collect(modules, |module| {
        if has_content(module) {
            module
                .swift_module_names
                .iter()
                .map(|name| format!("import {name}"))
                .collect()
        } else {
            Vec::new()
        }
    });
    let mut out = String::from("import ExpoModulesCore\n");
    for line in &imports.release {
        out.push_str(line);
        out.push('\n');
    }
    if !imports.debug.is_empty() {
        out.push_str(&format!("#if {DEBUG_CONDITION}\n"));
        for line in &imports.debug {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("#endif\n");
    }
    out
}

/// Renders the Swift modules provider. The entitlements are embedded as a raw
/// JSON string literal decoded at runtime.
pub fn render_modules_provider(
    modules: &[&ModuleDescriptorIos],
    entitlements: &AppCodeSignEntitlements,
) -> Result<String> {
    let module_classes = Entries::collect(modules, |m| {
        m.modules.iter().map(|class| format!("{class}.self")).collect()
    });
    let subscribers = Entries::collect(modules, |m| {
        m.app_delegate_subscribers
            .iter()
            .map(|class| format!("{class}.self"))
            .collect()
    });
    let handlers = Entries::collect(modules, |m| {
        m.react_delegate_handlers
            .iter()
            .map(|class| format!("(packageName: \"{}\", handler: {class}.self)", m.package_name))
            .collect()
    });
    let entitlements_json = serde_json::to_string(entitlements)?;

    let indent = "    ";
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&render_imports(modules));
    out.push('\n');
    out.push_str(&format!("@objc({PROVIDER_CLASS})\n"));
    out.push_str(&format!("public class {PROVIDER_CLASS}: ModulesProvider {{\n"));

    out.push_str("  public override func getModuleClasses() -> [AnyModule.Type] {\n");
    out.push_str(&render_return(&module_classes, indent));
    out.push_str("  }\n\n");

    out.push_str(
        "  public override func getAppDelegateSubscribers() -> [ExpoAppDelegateSubscriber.Type] {\n",
    );
    out.push_str(&render_return(&subscribers, indent));
    out.push_str("  }\n\n");

    out.push_str(
        "  public override func getReactDelegateHandlers() -> [ExpoReactDelegateHandlerTupleType] {\n",
    );
    out.push_str(&render_return(&handlers, indent));
    out.push_str("  }\n\n");

    out.push_str(
        "  public override func getAppCodeSignEntitlements() -> AppCodeSignEntitlements {\n",
    );
    out.push_str(&format!(
        "{indent}return AppCodeSignEntitlements.from(json: #\"{entitlements_json}\"#)\n"
    ));
    out.push_str("  }\n}\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, modules: &[&str], debug_only: bool) -> ModuleDescriptorIos {
        ModuleDescriptorIos {
            package_name: name.into(),
            pods: Vec::new(),
            flags: None,
            swift_module_names: vec![name.replace('-', "_")],
            modules: modules.iter().map(|m| m.to_string()).collect(),
            app_delegate_subscribers: Vec::new(),
            react_delegate_handlers: Vec::new(),
            debug_only,
        }
    }

    #[test]
    fn debug_only_modules_are_wrapped() {
        let release = descriptor("expo-foo", &["FooModule"], false);
        let debug = descriptor("expo-dev", &["DevModule"], true);
        let swift = render_modules_provider(&[&release, &debug], &Default::default()).unwrap();

        assert!(swift.contains("import expo_foo\n#if EXPO_CONFIGURATION_DEBUG\nimport expo_dev\n#endif\n"));
        assert!(swift.contains(
            "    #if EXPO_CONFIGURATION_DEBUG\n    return [\n      FooModule.self,\n      DevModule.self\n    ]\n    #else\n    return [\n      FooModule.self\n    ]\n    #endif\n"
        ));
        assert!(swift.contains("AppCodeSignEntitlements.from(json: #\"{}\"#)"));
    }

    #[test]
    fn react_delegate_handlers_carry_their_package() {
        let mut module = descriptor("expo-foo", &[], false);
        module.react_delegate_handlers = vec!["FooReactDelegateHandler".into()];
        let swift = render_modules_provider(&[&module], &Default::default()).unwrap();
        assert!(swift
            .contains("(packageName: \"expo-foo\", handler: FooReactDelegateHandler.self)"));
        assert!(swift.contains("import expo_foo\n"));
    }

    #[test]
    fn empty_provider_returns_empty_lists() {
        let swift = render_modules_provider(&[], &Default::default()).unwrap();
        assert_eq!(swift.matches("    return []\n").count(), 3);
    }
}
