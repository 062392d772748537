use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use super::directive::Directive;
use super::error::{Error, Result};

/// A concrete file to render and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Builds the ordered job list: every glob directive's matches first, in the
/// order given, then the literal directives as-is. Nothing is deduplicated.
pub fn expand(literals: &[Directive], globs: &[Directive]) -> Result<Vec<RenderJob>> {
    let mut jobs = Vec::new();

    for directive in globs {
        let matches = glob(&directive.source)?;
        if matches.is_empty() {
            log::warn!("No files match {}", directive.source);
        }
        jobs.extend(matches.into_iter().map(|source| RenderJob {
            output: directive.output_for(&source),
            source,
        }));
    }

    for directive in literals {
        let source = PathBuf::from(&directive.source);
        jobs.push(RenderJob {
            output: directive.output_for(&source),
            source,
        });
    }

    Ok(jobs)
}

fn is_meta(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

/// Collapses runs of `/` so the walk root and the matcher agree.
fn clean_separators(pattern: &str) -> String {
    let mut cleaned = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '/' && cleaned.ends_with('/') {
            continue;
        }
        cleaned.push(c);
    }
    cleaned
}

/// Files matching `pattern`, in lexicographic path order.
pub fn glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = clean_separators(pattern);
    let pattern = pattern.as_str();
    let matcher = compile(pattern)?;

    let components: Vec<&str> = pattern.split('/').collect();
    let Some(first_meta) = components.iter().position(|c| is_meta(c)) else {
        let path = PathBuf::from(pattern);
        return Ok(if path.exists() { vec![path] } else { Vec::new() });
    };

    let (root, implicit_root) = match components[..first_meta].join("/") {
        base if base.is_empty() && pattern.starts_with('/') => (PathBuf::from("/"), false),
        base if base.is_empty() => (PathBuf::from("."), true),
        base => (PathBuf::from(base), false),
    };

    let mut walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if !pattern.contains("**") {
        walker = walker.max_depth(components.len() - first_meta);
    }

    let matches = walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let path = entry.into_path();
            if implicit_root {
                path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
            } else {
                path
            }
        })
        .filter(|path| matcher.is_match(path))
        .collect();

    Ok(matches)
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| Error::Glob {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn pattern(dir: &Path, rest: &str) -> String {
        format!("{}/{}", dir.display(), rest)
    }

    #[test]
    fn test_glob_sorted_and_no_separator_crossing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.conf.tmpl");
        touch(dir.path(), "a.conf.tmpl");
        touch(dir.path(), "other.txt");
        touch(dir.path(), "nested/c.conf.tmpl");

        let found = glob(&pattern(dir.path(), "*.conf.tmpl")).unwrap();
        assert_eq!(found, vec![dir.path().join("a.conf.tmpl"), dir.path().join("b.conf.tmpl")]);
    }

    #[test]
    fn test_glob_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.tmpl");
        touch(dir.path(), "x/y/b.tmpl");

        let found = glob(&pattern(dir.path(), "**/*.tmpl")).unwrap();
        assert_eq!(found, vec![dir.path().join("a.tmpl"), dir.path().join("x/y/b.tmpl")]);
    }

    #[test]
    fn test_glob_literal_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.conf");

        assert_eq!(glob(&pattern(dir.path(), "plain.conf")).unwrap(), vec![dir.path().join("plain.conf")]);
        assert!(glob(&pattern(dir.path(), "missing.conf")).unwrap().is_empty());
    }

    #[test]
    fn test_glob_repeated_separators() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "conf/a.tmpl");

        let found = glob(&pattern(dir.path(), "conf//*.tmpl")).unwrap();
        assert_eq!(found, vec![dir.path().join("conf/a.tmpl")]);
        assert_eq!(clean_separators("//etc///app//*.conf"), "/etc/app/*.conf");
    }

    #[test]
    fn test_empty_glob_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "other.txt");

        let globs = vec![Directive::parse(&pattern(dir.path(), "*.tmpl")).unwrap()];
        assert!(expand(&[], &globs).unwrap().is_empty());
    }

    #[test]
    fn test_same_source_from_glob_and_literal_kept_twice() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app.tmpl");

        let source = dir.path().join("app.tmpl");
        let globs = vec![Directive::parse(&format!(r"{}:\.tmpl$:.conf", pattern(dir.path(), "*.tmpl"))).unwrap()];
        let literals = vec![Directive::parse(&format!(r"{}:app\.tmpl$:app.conf", source.display())).unwrap()];

        let jobs = expand(&literals, &globs).unwrap();
        let expected = RenderJob {
            source: source.clone(),
            output: dir.path().join("app.conf"),
        };
        assert_eq!(jobs, vec![expected.clone(), expected]);
    }

    #[test]
    fn test_glob_malformed() {
        assert!(matches!(glob("conf/[unclosed"), Err(Error::Glob { .. })));
    }

    #[test]
    fn test_expand_order_and_rename() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.conf.tmpl");
        touch(dir.path(), "b.conf.tmpl");

        let globs = vec![Directive::parse(&format!(r"{}:\.tmpl$:", pattern(dir.path(), "*.conf.tmpl"))).unwrap()];
        let literals = vec![
            Directive::parse("literal.conf").unwrap(),
            Directive::parse(&pattern(dir.path(), "a.conf.tmpl")).unwrap(),
        ];

        let jobs = expand(&literals, &globs).unwrap();
        let outputs: Vec<PathBuf> = jobs.iter().map(|job| job.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                dir.path().join("a.conf"),
                dir.path().join("b.conf"),
                PathBuf::from("literal.conf"),
                dir.path().join("a.conf.tmpl"),
            ]
        );
        assert_eq!(jobs[0].source, dir.path().join("a.conf.tmpl"));
    }

    #[test]
    fn test_literal_not_expanded() {
        let jobs = expand(&[Directive::parse("*.conf").unwrap()], &[]).unwrap();
        assert_eq!(jobs, vec![RenderJob { source: "*.conf".into(), output: "*.conf".into() }]);
    }
}
