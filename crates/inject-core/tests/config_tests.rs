//! Tests for configuration loading

use inject_core::{Error, InjectConfig, InjectionContext};
use inject_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const TOML: &str = r#"
directory = "vendor"
src = ["index.html"]
include_self = true

[package]
name = "my-app"

[file_types.html.replace]
js = '<script defer src="{{filePath}}"></script>'

[file_types.ts]
block = '(?P<open>(?P<indent>[ \t]*)//\s*bower:*(?P<kind>\S*))(?P<body>.*?)(?P<close>//\s*endbower)'
detect = { js = "import '([^']+)'" }
replace = { js = "import '{{filePath}}';" }

[dependencies.packages.jquery]
name = "jquery"

[dependencies.sorted]
js = ["vendor/jquery/dist/jquery.js"]
"#;

const JSON: &str = r#"{
  "directory": "vendor",
  "src": ["index.html"],
  "include_self": true,
  "package": { "name": "my-app" },
  "dependencies": {
    "packages": { "jquery": { "name": "jquery" } },
    "sorted": { "js": ["vendor/jquery/dist/jquery.js"] }
  }
}"#;

const YAML: &str = r#"
directory: vendor
src:
  - index.html
include_self: true
package:
  name: my-app
dependencies:
  packages:
    jquery:
      name: jquery
  sorted:
    js:
      - vendor/jquery/dist/jquery.js
"#;

fn write(temp: &TempDir, name: &str, content: &str) -> NormalizedPath {
    let path = temp.path().join(name);
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[rstest]
#[case::toml("depinject.toml", TOML)]
#[case::json("depinject.json", JSON)]
#[case::yaml("depinject.yaml", YAML)]
fn test_load_every_format(#[case] name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let config = InjectConfig::load(&write(&temp, name, content)).unwrap();

    assert_eq!(config.directory.as_str(), "vendor");
    assert_eq!(config.src, vec![NormalizedPath::new("index.html")]);
    assert!(config.include_self);
    assert_eq!(config.package["name"], "my-app");
    assert_eq!(config.dependencies.packages["jquery"]["name"], "jquery");
    assert_eq!(
        config.dependencies.sorted["js"],
        vec![NormalizedPath::new("vendor/jquery/dist/jquery.js")]
    );
    assert_eq!(config.fallback_type, "js");
}

#[test]
fn test_custom_file_types_are_compiled() {
    let temp = TempDir::new().unwrap();
    let config = InjectConfig::load(&write(&temp, "depinject.toml", TOML)).unwrap();
    let ctx = InjectionContext::new(&config, &NormalizedPath::new("/proj")).unwrap();

    let html = ctx.file_type("html").unwrap();
    assert_eq!(
        html.render("js", "a.js").as_deref(),
        Some("<script defer src=\"a.js\"></script>")
    );
    let ts = ctx.file_type_for(&NormalizedPath::new("/proj/main.ts")).unwrap();
    assert_eq!(ts.render("js", "a.js").as_deref(), Some("import 'a.js';"));
}

#[test]
fn test_load_rejects_invalid_pattern() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "depinject.toml", "ignore_path_pattern = \"(\"\n");

    let err = InjectConfig::load(&path).unwrap_err();

    assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("depinject.toml"));

    assert!(matches!(InjectConfig::load(&path), Err(Error::Fs(_))));
}
