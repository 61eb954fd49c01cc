//! Per-run state.

use inject_blocks::{BlockRewriter, FileType, FileTypes, PathResolver, SortedDependencies};
use inject_fs::NormalizedPath;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::InjectConfig;
use crate::error::{Error, Result};

/// Compiled configuration for one run.
///
/// Built once from an [`InjectConfig`] and a working directory. Every
/// relative path in the configuration (managed directory, dependencies,
/// sources) is resolved against that directory, so the rewriter only ever
/// sees absolute paths.
#[derive(Debug, Clone)]
pub struct InjectionContext {
    cwd: NormalizedPath,
    directory: NormalizedPath,
    include_self: bool,
    own_package: Value,
    packages: BTreeMap<String, Value>,
    sources: Vec<NormalizedPath>,
    file_types: FileTypes,
    rewriter: BlockRewriter,
}

impl InjectionContext {
    pub fn new(config: &InjectConfig, cwd: &NormalizedPath) -> Result<Self> {
        config.validate()?;

        let cwd = cwd.clean();
        let directory = config.directory.absolutize(&cwd);
        let dependencies: SortedDependencies = config
            .dependencies
            .sorted
            .iter()
            .map(|(block_type, paths)| {
                let paths: Vec<NormalizedPath> =
                    paths.iter().map(|p| p.absolutize(&cwd)).collect();
                (block_type.clone(), paths)
            })
            .collect();

        let resolver = match config.ignore()? {
            Some(ignore) => PathResolver::with_ignore(ignore),
            None => PathResolver::new(),
        };
        let rewriter = BlockRewriter::new(dependencies, resolver)
            .with_fallback_type(config.fallback_type.clone());

        let sources = config.src.iter().map(|p| p.absolutize(&cwd)).collect();

        debug!(
            cwd = %cwd,
            directory = %directory,
            packages = config.dependencies.packages.len(),
            "Built injection context"
        );

        Ok(Self {
            cwd,
            directory,
            include_self: config.include_self,
            own_package: config.package.clone(),
            packages: config.dependencies.packages.clone(),
            sources,
            file_types: config.file_types()?,
            rewriter,
        })
    }

    /// Build a context rooted at the process working directory.
    pub fn from_current_dir(config: &InjectConfig) -> Result<Self> {
        let cwd = NormalizedPath::current_dir()?;
        Self::new(config, &cwd)
    }

    pub fn cwd(&self) -> &NormalizedPath {
        &self.cwd
    }

    /// Absolute managed dependency directory.
    pub fn directory(&self) -> &NormalizedPath {
        &self.directory
    }

    /// Absolute paths of the consumer files, in configured order.
    pub fn sources(&self) -> &[NormalizedPath] {
        &self.sources
    }

    pub fn file_types(&self) -> &FileTypes {
        &self.file_types
    }

    pub fn rewriter(&self) -> &BlockRewriter {
        &self.rewriter
    }

    /// Resolve `path` against the working directory.
    pub fn absolutize(&self, path: &NormalizedPath) -> NormalizedPath {
        path.absolutize(&self.cwd)
    }

    /// The file type for `path`, chosen by extension with `default` as fallback.
    pub fn file_type_for(&self, path: &NormalizedPath) -> Result<&FileType> {
        self.file_type(path.extension().unwrap_or_default())
    }

    /// The file type registered under `key`, or `default` when there is none.
    ///
    /// Fails only when no `default` type is registered either.
    pub fn file_type(&self, key: &str) -> Result<&FileType> {
        self.file_types
            .for_extension(key)
            .ok_or_else(|| Error::UnknownFileType {
                key: key.to_string(),
            })
    }

    /// Metadata of the package that provides `dependency`.
    ///
    /// With `include_self`, a path outside the managed directory belongs
    /// to the project itself. Otherwise the path segment following the
    /// managed directory names the package.
    pub fn package_for(&self, dependency: &NormalizedPath) -> Result<&Value> {
        let path = dependency.as_str();
        let directory = self.directory.as_str().trim_end_matches('/');

        if self.include_self && !path.contains(directory) {
            return Ok(&self.own_package);
        }

        let marker = format!("{directory}/");
        let name = path
            .find(&marker)
            .map(|idx| &path[idx + marker.len()..])
            .and_then(|rest| rest.split('/').next())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::UnresolvablePackage {
                path: path.to_string(),
                directory: directory.to_string(),
            })?;

        self.packages
            .get(name)
            .ok_or_else(|| Error::UnknownPackage {
                name: name.to_string(),
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(include_self: bool) -> InjectionContext {
        let mut config = InjectConfig {
            include_self,
            package: json!({ "name": "my-app" }),
            ..Default::default()
        };
        config
            .dependencies
            .packages
            .insert("jquery".into(), json!({ "name": "jquery" }));
        InjectionContext::new(&config, &NormalizedPath::new("/proj")).unwrap()
    }

    #[test]
    fn test_relative_paths_are_absolutized() {
        let config = InjectConfig {
            src: vec![NormalizedPath::new("app/../index.html")],
            ..Default::default()
        };
        let ctx = InjectionContext::new(&config, &NormalizedPath::new("/proj/")).unwrap();
        assert_eq!(ctx.directory().as_str(), "/proj/bower_components");
        assert_eq!(ctx.sources()[0].as_str(), "/proj/index.html");
    }

    #[test]
    fn test_package_for_managed_dependency() {
        let ctx = context(false);
        let pkg = ctx
            .package_for(&NormalizedPath::new("/proj/bower_components/jquery/dist/jquery.js"))
            .unwrap();
        assert_eq!(pkg["name"], "jquery");
    }

    #[test]
    fn test_package_for_own_file_with_include_self() {
        let ctx = context(true);
        let pkg = ctx.package_for(&NormalizedPath::new("/proj/src/app.js")).unwrap();
        assert_eq!(pkg["name"], "my-app");
    }

    #[test]
    fn test_package_for_outside_directory_is_unresolvable() {
        let err = context(false)
            .package_for(&NormalizedPath::new("/proj/src/app.js"))
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvablePackage { .. }));
    }

    #[test]
    fn test_package_for_unknown_package() {
        let err = context(false)
            .package_for(&NormalizedPath::new("/proj/bower_components/lodash/lodash.js"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPackage { ref name, .. } if name == "lodash"));
    }

    #[test]
    fn test_file_type_for_unknown_extension_uses_default() {
        let ctx = context(false);
        let file_type = ctx.file_type_for(&NormalizedPath::new("/proj/index.php")).unwrap();
        assert_eq!(file_type.name(), "html");
    }

    #[test]
    fn test_file_type_for_unknown_key_uses_default() {
        let ctx = context(false);
        assert_eq!(ctx.file_type("nope").unwrap().name(), "html");
        assert_eq!(ctx.file_type("SCSS").unwrap().name(), "scss");
    }
}
