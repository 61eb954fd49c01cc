//! [`TestProject`] builder for injection scenarios.

use inject_fs::NormalizedPath;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary project directory with a managed package directory and
/// helpers for writing consumer files and asserting on their content.
///
/// # Example
///
/// ```rust,no_run
/// use inject_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.package("jquery", &["dist/jquery.js"]);
/// project.write("index.html", "<!-- bower:js --><!-- endbower -->");
/// project.assert_file_contains("index.html", "bower:js");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    directory: String,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project whose packages live in `bower_components`.
    pub fn new() -> Self {
        Self::with_directory("bower_components")
    }

    /// Create an empty project with a custom package directory name.
    pub fn with_directory(directory: &str) -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            directory: directory.to_string(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as a [`NormalizedPath`].
    pub fn root_path(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Absolute normalized path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> NormalizedPath {
        self.root_path().join(relative)
    }

    /// Name of the managed package directory.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> NormalizedPath {
        let full_path = self.root().join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self.path(relative)
    }

    /// Create package `name` under the managed directory with empty `files`.
    ///
    /// Returns the absolute path of every file, in the order given.
    pub fn package(&self, name: &str, files: &[&str]) -> Vec<NormalizedPath> {
        files
            .iter()
            .map(|file| self.write(&format!("{}/{name}/{file}", self.directory), ""))
            .collect()
    }

    /// Read the file at `relative`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.root().join(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "Expected {} to contain {:?}\nActual content:\n{}",
            relative,
            content,
            file_content
        );
    }

    /// Assert that the file at `relative` does **not** contain `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or contains `content`.
    pub fn assert_file_not_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            !file_content.contains(content),
            "Expected {} NOT to contain {:?}\nActual content:\n{}",
            relative,
            content,
            file_content
        );
    }
}
