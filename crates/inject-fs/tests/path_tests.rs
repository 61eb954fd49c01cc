use inject_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_mixed_slashes() {
    let path = NormalizedPath::new("foo/bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
}

#[test]
fn test_join_onto_empty_path() {
    let base = NormalizedPath::new("");
    assert_eq!(base.join("pkg.js").as_str(), "pkg.js");
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("/proj/index.html");
    assert_eq!(path.parent().unwrap().as_str(), "/proj");
    assert_eq!(NormalizedPath::new("/index.html").parent().unwrap().as_str(), "/");
    assert!(NormalizedPath::new("index.html").parent().is_none());
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("foo/bar/baz.min.js");
    assert_eq!(path.file_name(), Some("baz.min.js"));
    assert_eq!(path.extension(), Some("js"));
    assert_eq!(NormalizedPath::new("foo/.bowerrc").extension(), None);
}

#[rstest]
#[case("/proj/app", true)]
#[case("C:/proj/app", true)]
#[case("C:\\proj\\app", true)]
#[case("//server/share", true)]
#[case("app/index.html", false)]
#[case("./index.html", false)]
fn test_is_absolute(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(NormalizedPath::new(input).is_absolute(), expected);
}

#[rstest]
#[case("/proj/./app//index.html", "/proj/app/index.html")]
#[case("/proj/app/../lib", "/proj/lib")]
#[case("a/b/../../..", "..")]
#[case("./", ".")]
#[case("C:\\proj\\..\\lib", "C:/lib")]
fn test_clean(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).clean().as_str(), expected);
}

#[rstest]
#[case("/proj/managed/pkgA/dist", "/proj", "managed/pkgA/dist")]
#[case("/proj/managed/pkgA", "/proj/app/views", "../../managed/pkgA")]
#[case("/proj", "/proj/app", "..")]
#[case("/other/x", "/proj/app", "../../other/x")]
#[case("C:/proj/lib", "C:/proj/app", "../lib")]
fn test_relative_to(#[case] target: &str, #[case] base: &str, #[case] expected: &str) {
    let rel = NormalizedPath::new(target).relative_to(&NormalizedPath::new(base));
    assert_eq!(rel.as_str(), expected);
}

#[test]
fn test_relative_to_across_drives_returns_target() {
    let rel = NormalizedPath::new("D:/libs/a").relative_to(&NormalizedPath::new("C:/proj"));
    assert_eq!(rel.as_str(), "D:/libs/a");
}

#[test]
fn test_absolutize() {
    let cwd = NormalizedPath::new("/home/user/proj");
    assert_eq!(
        NormalizedPath::new("app/../index.html").absolutize(&cwd).as_str(),
        "/home/user/proj/index.html"
    );
    assert_eq!(
        NormalizedPath::new("/etc/./hosts").absolutize(&cwd).as_str(),
        "/etc/hosts"
    );
}

#[test]
fn test_current_dir_is_absolute() {
    let cwd = NormalizedPath::current_dir().unwrap();
    assert!(cwd.is_absolute());
    assert!(!cwd.as_str().contains('\\'));
}
