// autolink-core/src/generate/android.rs
use autolink_common::model::ModuleDescriptorAndroid;

pub const DEFAULT_NAMESPACE: &str = "expo.modules";
pub const PACKAGE_LIST_CLASS: &str = "ExpoModulesPackageList";

/// Renders `ExpoModulesPackageList.java` registering every Kotlin module class.
pub fn render_package_list(namespace: Option<&str>, modules: &[&ModuleDescriptorAndroid]) -> String {
    let namespace = namespace.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NAMESPACE);
    let classes: Vec<&str> = modules
        .iter()
        .flat_map(|m| m.modules.iter().map(String::as_str))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("package {namespace};\n"));
    out.push_str(
        "
import java.util.Arrays;
import java.util.List;
import expo.modules.kotlin.ModulesProvider;
import expo.modules.kotlin.modules.Module;

",
    );
    out.push_str(&format!(
        "public class {PACKAGE_LIST_CLASS} implements ModulesProvider {{\n"
    ));
    out.push_str("  private static class LazyHolder {\n");
    out.push_str(
        "    static final List<Class<? extends Module>> modulesList = Arrays.<Class<? extends Module>>asList(\n",
    );
    let entries: Vec<String> = classes
        .iter()
        .map(|class| format!("      {class}.class"))
        .collect();
    if !entries.is_empty() {
        out.push_str(&entries.join(",\n"));
        out.push('\n');
    }
    out.push_str("    );\n  }\n\n");
    out.push_str("  @Override\n");
    out.push_str("  public List<Class<? extends Module>> getModulesList() {\n");
    out.push_str("    return LazyHolder.modulesList;\n");
    out.push_str("  }\n}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(modules: &[&str]) -> ModuleDescriptorAndroid {
        ModuleDescriptorAndroid {
            package_name: "expo-foo".into(),
            projects: Vec::new(),
            plugins: Vec::new(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
            aar_projects: Vec::new(),
        }
    }

    #[test]
    fn lists_module_classes_in_order() {
        let a = descriptor(&["expo.modules.a.AModule"]);
        let b = descriptor(&["expo.modules.b.BModule"]);
        let java = render_package_list(Some("com.example.app"), &[&a, &b]);
        assert!(java.starts_with("package com.example.app;\n"));
        let a_at = java.find("expo.modules.a.AModule.class,").unwrap();
        let b_at = java.find("expo.modules.b.BModule.class\n").unwrap();
        assert!(a_at < b_at);
    }

    #[test]
    fn empty_list_is_valid_java() {
        let java = render_package_list(None, &[]);
        assert!(java.starts_with("package expo.modules;\n"));
        assert!(java.contains("asList(\n    );"));
    }

    #[test]
    fn declares_the_provider_class_after_the_imports() {
        let java = render_package_list(Some("com.example.app"), &[]);
        let import_at = java.find("import expo.modules.kotlin.modules.Module;\n").unwrap();
        let class_at = java
            .find("public class ExpoModulesPackageList implements ModulesProvider {\n")
            .unwrap();
        assert!(import_at < class_at);
    }
}
