//! In-memory mode: rewrite stdin to stdout.

use std::io::{Read, Write};
use std::path::Path;

use inject_core::{Injector, TracingSink};
use inject_fs::NormalizedPath;

use super::{Overrides, load_context};
use crate::error::Result;

/// Run the stdin command
///
/// `file_type` defaults to the extension of `path`, then to `default`.
pub fn run_stdin(
    cwd: &Path,
    overrides: &Overrides,
    path: &Path,
    file_type: Option<&str>,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let ctx = load_context(cwd, overrides)?;
    let path = NormalizedPath::new(path).absolutize(&NormalizedPath::new(cwd));
    let key = file_type
        .map(str::to_string)
        .or_else(|| path.extension().map(str::to_lowercase))
        .unwrap_or_else(|| "default".to_string());

    let mut content = String::new();
    input.read_to_string(&mut content)?;

    tracing::debug!(path = %path, file_type = %key, directory = %ctx.directory(), "Rewriting stdin");
    let rewritten = Injector::default().inject_str(&ctx, &path, &content, &key, &mut TracingSink)?;
    output.write_all(rewritten.as_bytes())?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_test_utils::TestProject;

    #[test]
    fn test_stdin_rewrites_to_output() {
        let project = TestProject::new();
        project.write(
            "depinject.toml",
            "[dependencies.packages.jquery]\nname = \"jquery\"\n\n[dependencies.sorted]\njs = [\"bower_components/jquery/jquery.js\"]\n",
        );

        let mut input = "<!-- bower:js --><!-- endbower -->".as_bytes();
        let mut output = Vec::new();
        run_stdin(
            project.root(),
            &Overrides::default(),
            Path::new("index.html"),
            None,
            &mut input,
            &mut output,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<!-- bower:js -->\n<script src=\"bower_components/jquery/jquery.js\"></script>\n<!-- endbower -->"
        );
    }

    #[test]
    fn test_stdin_path_is_relative_to_cwd_not_config() {
        let project = TestProject::new();
        project.write(
            "web/site.toml",
            "[dependencies.packages.jquery]\nname = \"jquery\"\n\n[dependencies.sorted]\njs = [\"bower_components/jquery/jquery.js\"]\n",
        );
        let overrides = Overrides {
            config: Some(project.root().join("web/site.toml")),
            ..Default::default()
        };

        let mut input = "<!-- bower:js --><!-- endbower -->".as_bytes();
        let mut output = Vec::new();
        run_stdin(
            project.root(),
            &overrides,
            Path::new("index.html"),
            None,
            &mut input,
            &mut output,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<!-- bower:js -->\n<script src=\"web/bower_components/jquery/jquery.js\"></script>\n<!-- endbower -->"
        );
    }

    #[test]
    fn test_stdin_unknown_file_type_uses_default() {
        let project = TestProject::new();
        project.write(
            "depinject.toml",
            "[dependencies.packages.jquery]\nname = \"jquery\"\n\n[dependencies.sorted]\njs = [\"bower_components/jquery/jquery.js\"]\n",
        );

        let mut input = "<!-- bower:js --><!-- endbower -->".as_bytes();
        let mut output = Vec::new();
        run_stdin(
            project.root(),
            &Overrides::default(),
            Path::new("index.php"),
            Some("php"),
            &mut input,
            &mut output,
        )
        .unwrap();

        assert!(
            String::from_utf8(output)
                .unwrap()
                .contains("<script src=\"bower_components/jquery/jquery.js\"></script>")
        );
    }
}
