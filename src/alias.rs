//! Alias table and alias expansion.
//!
//! Aliases rewrite only the leading token of a command line, before any
//! parsing happens. Expansion is single-pass: an alias value that itself
//! begins with another alias name is not expanded again. That is a deliberate
//! choice carried over from the shell's first implementation, not an
//! oversight; recursive expansion would need cycle detection and nothing in
//! the builtin surface promises it.

use crate::errors::{Error, Result};

const DEFAULT_ALIAS_CAPACITY: usize = 64;

/// A single name -> replacement-text mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Alias {
    name: String,
    value: String,
}

/// An ordered collection of aliases with update semantics and a bounded size.
#[derive(Debug)]
pub struct AliasTable {
    entries: Vec<Alias>,
    capacity: usize,
}

impl AliasTable {
    /// Creates an empty table with the default capacity.
    pub fn new() -> AliasTable {
        AliasTable::with_capacity(DEFAULT_ALIAS_CAPACITY)
    }

    /// Creates an empty table holding at most `capacity` aliases.
    pub fn with_capacity(capacity: usize) -> AliasTable {
        AliasTable {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Defines `name` as `value`, overwriting the value of an existing entry.
    ///
    /// New names are appended in insertion order. Adding a new name to a full
    /// table is an error; the table is unchanged and the session continues.
    pub fn set<S1, S2>(&mut self, name: S1, value: S2) -> Result<()>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let name = name.as_ref();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.value = value.as_ref().to_string();
            return Ok(());
        }

        if self.entries.len() >= self.capacity {
            return Err(Error::capacity_exceeded("alias", self.capacity));
        }

        self.entries.push(Alias {
            name: name.to_string(),
            value: value.as_ref().to_string(),
        });
        Ok(())
    }

    /// Removes `name`, compacting the remaining entries in order.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                self.entries.remove(index);
                Ok(())
            }
            None => Err(Error::no_such_alias(name)),
        }
    }

    /// Returns the replacement text for `name`, if defined.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
    }

    /// Returns `true` if no aliases are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrites the leading token of `line` if it names an alias.
    ///
    /// On a hit the result is the alias value, a single space, and the
    /// remainder of the line; otherwise the line comes back unchanged.
    pub fn expand_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let (first, rest) = match trimmed.find(char::is_whitespace) {
            Some(index) => (&trimmed[..index], trimmed[index..].trim_start()),
            None => (trimmed, ""),
        };

        match self.lookup(first) {
            Some(value) if rest.is_empty() => value.to_string(),
            Some(value) => format!("{} {}", value, rest),
            None => line.to_string(),
        }
    }
}

impl Default for AliasTable {
    fn default() -> AliasTable {
        AliasTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn set_and_lookup() {
        let mut table = AliasTable::new();
        table.set("ll", "ls -la").unwrap();
        assert_eq!(table.lookup("ll"), Some("ls -la"));
        assert_eq!(table.lookup("lll"), None);
    }

    #[test]
    fn set_twice_updates_in_place() {
        let mut table = AliasTable::new();
        table.set("x", "y").unwrap();
        table.set("x", "z").unwrap();
        assert_eq!(table.iter().count(), 1);
        assert_eq!(table.lookup("x"), Some("z"));
    }

    #[test]
    fn remove_compacts_in_order() {
        let mut table = AliasTable::new();
        table.set("a", "1").unwrap();
        table.set("b", "2").unwrap();
        table.set("c", "3").unwrap();
        table.remove("b").unwrap();
        let names: Vec<_> = table.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn remove_unknown_is_an_error() {
        let mut table = AliasTable::new();
        let err = table.remove("nope").unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::NoSuchAlias("nope".to_string()));
    }

    #[test]
    fn capacity_exceeded() {
        let mut table = AliasTable::with_capacity(1);
        table.set("a", "1").unwrap();
        assert!(table.set("b", "2").is_err());
        // updating an existing name still works at capacity
        table.set("a", "9").unwrap();
        assert_eq!(table.lookup("a"), Some("9"));
    }

    #[test]
    fn expand_leading_token() {
        let mut table = AliasTable::new();
        table.set("ll", "ls -la").unwrap();
        assert_eq!(table.expand_line("ll /tmp"), "ls -la /tmp");
        assert_eq!(table.expand_line("ll"), "ls -la");
    }

    #[test]
    fn expand_without_match_is_identity() {
        let table = AliasTable::new();
        assert_eq!(table.expand_line("ls -la /tmp"), "ls -la /tmp");
    }

    #[test]
    fn expansion_is_not_recursive() {
        let mut table = AliasTable::new();
        table.set("a", "b").unwrap();
        table.set("b", "c").unwrap();
        assert_eq!(table.expand_line("a"), "b");
    }

    #[test]
    fn only_the_first_token_is_expanded() {
        let mut table = AliasTable::new();
        table.set("ll", "ls -la").unwrap();
        assert_eq!(table.expand_line("echo ll"), "echo ll");
    }
}
