//! Built-in file type definitions.
//!
//! Every block pattern captures the opening marker (with its indentation),
//! the declared block type, the current body and the closing marker. The
//! marker words are `bower` and `endbower`, written in each format's
//! comment syntax.

use crate::file_type::{FileType, Renderer};

const HTML_BLOCK: &str = r"(?P<open>(?P<indent>[ \t]*)<!--\s*bower:*(?P<kind>\S*)\s*-->)(?P<body>.*?)(?P<close><!--\s*endbower\s*-->)";
const JADE_BLOCK: &str = r"(?P<open>(?P<indent>[ \t]*)//-?\s*bower:*(?P<kind>\S*))(?P<body>.*?)(?P<close>//-?\s*endbower)";
const SLASH_BLOCK: &str = r"(?P<open>(?P<indent>[ \t]*)//\s*bower:*(?P<kind>\S*))(?P<body>.*?)(?P<close>//\s*endbower)";
const HASH_BLOCK: &str = r"(?P<open>(?P<indent>[ \t]*)#\s*bower:*(?P<kind>\S*))(?P<body>.*?)(?P<close>#\s*endbower)";
const HAML_BLOCK: &str = r"(?P<open>(?P<indent>[ \t]*)-#\s*bower:*(?P<kind>\S*))(?P<body>.*?)(?P<close>-#\s*endbower)";
const SLIM_BLOCK: &str = r"(?P<open>(?P<indent>[ \t]*)/!\s*bower:*(?P<kind>\S*))(?P<body>.*?)(?P<close>/!\s*endbower)";

/// All built-in file types with the extensions they serve.
///
/// `html` doubles as the `default` file type.
pub fn builtin_file_types() -> Vec<(&'static [&'static str], FileType)> {
    vec![
        (&["html", "htm", "default"][..], html()),
        (&["js"][..], js()),
        (&["jade", "pug"][..], jade()),
        (&["less"][..], less()),
        (&["sass"][..], sass()),
        (&["scss"][..], scss()),
        (&["styl"][..], styl()),
        (&["yaml", "yml"][..], yaml()),
        (&["haml"][..], haml()),
        (&["slim"][..], slim()),
    ]
}

// The patterns below are constants; a failure here is a bug in this file.
fn build(
    name: &str,
    block: &str,
    detect: &[(&str, &str)],
    replace: Vec<(&str, Renderer)>,
) -> FileType {
    let mut file_type = FileType::new(name, block).expect("built-in block pattern");
    for (block_type, pattern) in detect {
        file_type = file_type
            .detect(*block_type, pattern)
            .expect("built-in detect pattern");
    }
    for (block_type, renderer) in replace {
        file_type = file_type.replace(block_type, renderer);
    }
    file_type
}

fn html() -> FileType {
    build(
        "html",
        HTML_BLOCK,
        &[
            ("js", r#"<script.*src=['"]([^'"]+)"#),
            ("css", r#"<link.*href=['"]([^'"]+)"#),
        ],
        vec![
            ("js", Renderer::template(r#"<script src="{{filePath}}"></script>"#)),
            ("css", Renderer::template(r#"<link rel="stylesheet" href="{{filePath}}" />"#)),
        ],
    )
}

fn js() -> FileType {
    build(
        "js",
        SLASH_BLOCK,
        &[("js", r#"['"]([^'"]+\.js)['"],?"#)],
        vec![("js", Renderer::template("'{{filePath}}',"))],
    )
}

fn jade() -> FileType {
    build(
        "jade",
        JADE_BLOCK,
        &[
            ("js", r#"script\(.*src=['"]([^'"]+)"#),
            ("css", r#"link\(.*href=['"]([^'"]+)"#),
        ],
        vec![
            ("js", Renderer::template("script(src='{{filePath}}')")),
            ("css", Renderer::template("link(rel='stylesheet', href='{{filePath}}')")),
        ],
    )
}

fn less() -> FileType {
    build(
        "less",
        SLASH_BLOCK,
        &[
            ("css", r#"@import\s['"](.+css)['"]"#),
            ("less", r#"@import\s['"](.+less)['"]"#),
        ],
        vec![
            ("css", Renderer::template(r#"@import "{{filePath}}";"#)),
            ("less", Renderer::template(r#"@import "{{filePath}}";"#)),
        ],
    )
}

fn sass() -> FileType {
    build(
        "sass",
        SLASH_BLOCK,
        &[
            ("css", r"@import\s(.+css)"),
            ("sass", r"@import\s(.+sass)"),
            ("scss", r"@import\s(.+scss)"),
        ],
        vec![
            ("css", Renderer::template("@import {{filePath}}")),
            ("sass", Renderer::template("@import {{filePath}}")),
            ("scss", Renderer::template("@import {{filePath}}")),
        ],
    )
}

fn scss() -> FileType {
    build(
        "scss",
        SLASH_BLOCK,
        &[
            ("css", r#"@import\s['"](.+css)['"]"#),
            ("sass", r#"@import\s['"](.+sass)['"]"#),
            ("scss", r#"@import\s['"](.+scss)['"]"#),
        ],
        vec![
            ("css", Renderer::template(r#"@import "{{filePath}}";"#)),
            ("sass", Renderer::template(r#"@import "{{filePath}}";"#)),
            ("scss", Renderer::template(r#"@import "{{filePath}}";"#)),
        ],
    )
}

fn styl() -> FileType {
    build(
        "styl",
        SLASH_BLOCK,
        &[
            ("css", r#"@import\s['"](.+css)['"]"#),
            ("styl", r#"@import\s['"](.+styl)['"]"#),
        ],
        vec![
            ("css", Renderer::template(r#"@import "{{filePath}}""#)),
            ("styl", Renderer::template(r#"@import "{{filePath}}""#)),
        ],
    )
}

fn yaml() -> FileType {
    build(
        "yaml",
        HASH_BLOCK,
        &[("js", r"-\s(.+js)"), ("css", r"-\s(.+css)")],
        vec![
            ("js", Renderer::function(|path| format!("- {path}"))),
            ("css", Renderer::function(|path| format!("- {path}"))),
        ],
    )
}

fn haml() -> FileType {
    build(
        "haml",
        HAML_BLOCK,
        &[
            ("js", r#"%script\{.*src:['"]([^'"]+)"#),
            ("css", r#"%link\{.*href:['"]([^'"]+)"#),
        ],
        vec![
            ("js", Renderer::template("%script{src:'{{filePath}}'}")),
            ("css", Renderer::template("%link{rel:'stylesheet', href:'{{filePath}}'}")),
        ],
    )
}

fn slim() -> FileType {
    build(
        "slim",
        SLIM_BLOCK,
        &[
            ("js", r#"script.*src=['"]([^'"]+)"#),
            ("css", r#"link.*href=['"]([^'"]+)"#),
        ],
        vec![
            ("js", Renderer::template(r#"script src="{{filePath}}""#)),
            ("css", Renderer::template(r#"link rel="stylesheet" href="{{filePath}}""#)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_compiles() {
        let types = builtin_file_types();
        assert_eq!(types.len(), 10);
        for (extensions, file_type) in &types {
            assert!(!extensions.is_empty(), "{} has no extensions", file_type.name());
        }
    }

    #[test]
    fn test_html_detect_finds_script_src() {
        let html = html();
        let pattern = html.detect_pattern("js").unwrap();
        let caps = pattern
            .captures(r#"<script type="text/javascript" src='lib/a.js'></script>"#)
            .unwrap();
        assert_eq!(&caps[1], "lib/a.js");
    }

    #[test]
    fn test_yaml_renders_list_items() {
        assert_eq!(yaml().render("css", "a.css").as_deref(), Some("- a.css"));
    }
}
