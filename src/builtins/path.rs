use std::env;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use crate::builtins::prelude::*;

pub struct Path;

impl BuiltinCommand for Path {
    const NAME: &'static str = super::PATH_NAME;

    const HELP: &'static str = "\
path: path
    Print each directory on the executable search path, one per line.";

    fn run(_shell: &mut Shell, _args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        let path_var = env::var_os("PATH").unwrap_or_default();
        for dir in env::split_paths(&path_var) {
            writeln!(stdout, "{}", dir.display()).context(ErrorKind::Io)?;
        }
        Ok(())
    }
}

pub struct Which;

impl BuiltinCommand for Which {
    const NAME: &'static str = super::WHICH_NAME;

    const HELP: &'static str = "\
which: which <name>
    Print the full path NAME resolves to on the executable search path.";

    fn run(_shell: &mut Shell, args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        let name = args
            .first()
            .ok_or_else(|| Error::builtin_command("which: usage: which <name>", 2))?;

        match search_path(name, env::var_os("PATH")) {
            Some(path) => {
                writeln!(stdout, "{}", path.display()).context(ErrorKind::Io)?;
                Ok(())
            }
            None => Err(Error::builtin_command(
                format!("which: {}: not found", name),
                1,
            )),
        }
    }
}

/// Returns the first directory of `path_var` containing an executable file
/// named `name`, joined with the name.
fn search_path(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &std::path::Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempdir::TempDir;

    fn make_executable(path: &std::path::Path) {
        File::create(path).unwrap();
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn finds_name_in_single_directory() {
        let first = TempDir::new("ccsh-which").unwrap();
        let second = TempDir::new("ccsh-which").unwrap();
        make_executable(&second.path().join("tool"));

        let path_var = env::join_paths(vec![first.path(), second.path()]).unwrap();
        let found = search_path("tool", Some(path_var)).unwrap();
        assert_eq!(found, second.path().join("tool"));
    }

    #[test]
    fn earlier_directories_win() {
        let first = TempDir::new("ccsh-which").unwrap();
        let second = TempDir::new("ccsh-which").unwrap();
        make_executable(&first.path().join("tool"));
        make_executable(&second.path().join("tool"));

        let path_var = env::join_paths(vec![first.path(), second.path()]).unwrap();
        let found = search_path("tool", Some(path_var)).unwrap();
        assert_eq!(found, first.path().join("tool"));
    }

    #[test]
    fn absent_name_is_none() {
        let dir = TempDir::new("ccsh-which").unwrap();
        let path_var = env::join_paths(vec![dir.path()]).unwrap();
        assert!(search_path("missing", Some(path_var)).is_none());
        assert!(search_path("missing", None).is_none());
    }

    #[test]
    fn non_executable_files_are_skipped() {
        let dir = TempDir::new("ccsh-which").unwrap();
        let path = dir.path().join("data");
        File::create(&path).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).unwrap();

        let path_var = env::join_paths(vec![dir.path()]).unwrap();
        assert!(search_path("data", Some(path_var)).is_none());
    }
}
