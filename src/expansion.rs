//! Filename-pattern (glob) expansion of argument tokens.

use std::path::PathBuf;

use nix::unistd::User;

use crate::errors::{Error, Result};

/// Upper bound on the argument tokens handed to the launcher, counting every
/// glob match. Going over it drops the command, not the session.
const MAX_TOKENS: usize = 128;

/// Expands `*`/`?` tokens into their sorted filesystem matches.
///
/// A wildcard token that matches nothing is passed through verbatim as a
/// single argument, so expansion never drops an argument. Tokens without
/// wildcard characters are untouched; in particular the `~` and `~user`
/// prefixes are only expanded inside wildcard-bearing tokens.
pub fn expand_globs<T: AsRef<str>>(argv: &[T]) -> Result<Vec<String>> {
    let mut expanded = Vec::new();
    for arg in argv {
        let arg = arg.as_ref();
        if arg.contains('*') || arg.contains('?') {
            match glob_matches(&expand_tilde(arg)) {
                Some(matches) => expanded.extend(matches),
                None => expanded.push(arg.to_string()),
            }
        } else {
            expanded.push(arg.to_string());
        }
    }

    if expanded.len() > MAX_TOKENS {
        return Err(Error::capacity_exceeded("argument", MAX_TOKENS));
    }

    Ok(expanded)
}

/// Returns the sorted matches for `pattern`, or `None` if nothing matched.
/// An invalid pattern is treated the same as a pattern with no matches.
fn glob_matches(pattern: &str) -> Option<Vec<String>> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            debug!("invalid glob pattern {}: {}", pattern, e);
            return None;
        }
    };

    let matches: Vec<String> = paths
        .filter_map(|entry| entry.ok())
        .map(|path| path.to_string_lossy().into_owned())
        .collect();

    if matches.is_empty() {
        None
    } else {
        Some(matches)
    }
}

/// Rewrites a leading `~` or `~user` to the matching home directory. A name
/// with no passwd entry leaves the pattern unchanged.
fn expand_tilde(pattern: &str) -> String {
    if !pattern.starts_with('~') {
        return pattern.to_string();
    }

    let end = pattern.find('/').unwrap_or(pattern.len());
    let name = &pattern[1..end];
    let home = if name.is_empty() {
        dirs::home_dir()
    } else {
        user_home(name)
    };

    match home {
        Some(home) => format!("{}{}", home.display(), &pattern[end..]),
        None => pattern.to_string(),
    }
}

fn user_home(name: &str) -> Option<PathBuf> {
    match User::from_name(name) {
        Ok(user) => user.map(|u| u.dir),
        Err(e) => {
            debug!("passwd lookup for {} failed: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempdir::TempDir;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn tokens_without_wildcards_pass_through() {
        let args = argv(&["echo", "hello", "-n"]);
        assert_eq!(expand_globs(&args).unwrap(), args);
    }

    #[test]
    fn no_match_preserves_the_pattern() {
        let args = argv(&["ls", "*.nonexistent-extension"]);
        assert_eq!(expand_globs(&args).unwrap(), args);
    }

    #[test]
    fn star_expands_sorted() {
        let dir = TempDir::new("ccsh-glob").unwrap();
        for name in &["b.txt", "a.txt", "c.log"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let pattern = format!("{}/*.txt", dir.path().display());
        let expanded = expand_globs(&argv(&["cat", &pattern])).unwrap();
        assert_eq!(
            expanded,
            vec![
                "cat".to_string(),
                format!("{}/a.txt", dir.path().display()),
                format!("{}/b.txt", dir.path().display()),
            ]
        );
    }

    #[test]
    fn question_mark_matches_single_character() {
        let dir = TempDir::new("ccsh-glob").unwrap();
        File::create(dir.path().join("a1")).unwrap();
        File::create(dir.path().join("a22")).unwrap();

        let pattern = format!("{}/a?", dir.path().display());
        let expanded = expand_globs(&[pattern]).unwrap();
        assert_eq!(expanded, vec![format!("{}/a1", dir.path().display())]);
    }

    #[test]
    fn named_user_tilde_uses_the_passwd_entry() {
        // root is in every passwd database this can run against
        if let Some(home) = user_home("root") {
            assert_eq!(
                expand_tilde("~root/*.txt"),
                format!("{}/*.txt", home.display())
            );
        }
    }

    #[test]
    fn unknown_user_tilde_passes_through() {
        assert_eq!(expand_tilde("~no-such-user-ccsh/*"), "~no-such-user-ccsh/*");
    }

    #[test]
    fn token_capacity_is_enforced() {
        let args: Vec<String> = (0..200).map(|i| format!("arg{}", i)).collect();
        assert!(expand_globs(&args).is_err());
    }
}
