// SPDX-License-Identifier: Apache-2.0

//! Repaired versions of common unsafe patterns.
//!
//! Each function here replaces a pattern that reviewers routinely flag:
//!
//! - [`get_user`] binds the id as a query parameter instead of splicing it into SQL.
//! - [`run_user_command`] builds an argument vector for an allowlisted program; no shell.
//! - [`read_config`] reads a file with scoped acquisition.
//! - [`Counter`] is caller-owned and atomic, so concurrent increments are never lost.
//! - [`risky_operation`] tolerates exactly one error kind and propagates the rest.
//! - [`append_to_list`] takes the collection by value; there is no hidden default.
//! - [`Credentials`] come from the environment instead of source constants.

use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use secrecy::SecretString;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::SampleError;

/// Environment variable holding the sample API key.
pub const API_KEY_ENV: &str = "PRLENS_SAMPLE_API_KEY";

/// Environment variable holding the sample database password.
pub const DATABASE_PASSWORD_ENV: &str = "PRLENS_SAMPLE_DATABASE_PASSWORD";

/// A parameterized user lookup.
///
/// The SQL text is constant; the id travels separately as a bound parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// SQL with a positional placeholder.
    pub sql: &'static str,
    /// Parameters bound to the placeholders, in order.
    pub params: Vec<i64>,
}

/// Builds the query that fetches a single user by id.
///
/// # Errors
///
/// Returns [`SampleError::InvalidUserId`] unless `user_id` is a positive integer.
pub fn get_user(user_id: &str) -> Result<UserQuery> {
    let id: i64 = user_id
        .trim()
        .parse()
        .map_err(|_| SampleError::InvalidUserId(user_id.to_string()))?;
    if id <= 0 {
        return Err(SampleError::InvalidUserId(user_id.to_string()));
    }

    Ok(UserQuery {
        sql: "SELECT * FROM users WHERE id = ?1",
        params: vec![id],
    })
}

/// Prepares a command from untrusted input without involving a shell.
///
/// The input is split on whitespace; the first word must be one of `allowed`.
/// Shell metacharacters in later words reach the program as literal arguments.
/// The command is returned unspawned.
///
/// # Errors
///
/// Returns [`SampleError::EmptyCommand`] for blank input and
/// [`SampleError::DisallowedCommand`] when the program is not allowlisted.
#[instrument(skip(allowed))]
pub fn run_user_command(input: &str, allowed: &[&str]) -> Result<Command> {
    let mut words = input.split_whitespace();
    let program = words.next().ok_or(SampleError::EmptyCommand)?;

    if !allowed.contains(&program) {
        return Err(SampleError::DisallowedCommand(program.to_string()));
    }

    let mut command = Command::new(program);
    command.args(words);
    debug!(program, "Prepared command");
    Ok(command)
}

/// Reads a config file to a string.
///
/// The handle is closed before this function returns, on success and on error.
///
/// # Errors
///
/// Returns [`SampleError::ReadConfig`] if the file cannot be read.
pub fn read_config(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| SampleError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// A counter shared explicitly between its users.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter and returns the new value.
    pub fn increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Runs a fallible I/O operation, treating a missing resource as "nothing to do".
///
/// Only [`io::ErrorKind::NotFound`] is absorbed (as `Ok(None)`).
///
/// # Errors
///
/// Every other error from `op` is returned unchanged.
pub fn risky_operation<T, F>(op: F) -> io::Result<Option<T>>
where
    F: FnOnce() -> io::Result<T>,
{
    match op() {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(error = %e, "Resource not found, skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Appends `item` to `list` and hands the list back.
#[must_use]
pub fn append_to_list<T>(item: T, mut list: Vec<T>) -> Vec<T> {
    list.push(item);
    list
}

/// Credentials that would otherwise be hardcoded.
#[derive(Debug)]
pub struct Credentials {
    /// API key for the sample service.
    pub api_key: SecretString,
    /// Password for the sample database.
    pub database_password: SecretString,
}

impl Credentials {
    /// Loads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::MissingCredential`] if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads credentials through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::MissingCredential`] if either value is absent or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let fetch = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .map(SecretString::from)
                .ok_or(SampleError::MissingCredential(name))
        };

        Ok(Self {
            api_key: fetch(API_KEY_ENV)?,
            database_password: fetch(DATABASE_PASSWORD_ENV)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_get_user_binds_parameter() {
        let query = get_user("42").unwrap();
        assert_eq!(query.sql, "SELECT * FROM users WHERE id = ?1");
        assert_eq!(query.params, vec![42]);
    }

    #[test]
    fn test_get_user_rejects_injection() {
        let result = get_user("1 OR 1=1");
        assert!(matches!(result, Err(SampleError::InvalidUserId(_))));

        let result = get_user("1; DROP TABLE users");
        assert!(matches!(result, Err(SampleError::InvalidUserId(_))));
    }

    #[test]
    fn test_get_user_rejects_non_positive() {
        assert!(get_user("0").is_err());
        assert!(get_user("-5").is_err());
        assert!(get_user("").is_err());
    }

    #[test]
    fn test_run_user_command_allowlisted() {
        let command = run_user_command("echo hello; rm -rf /", &["echo"]).unwrap();
        assert_eq!(command.get_program(), "echo");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["hello;", "rm", "-rf", "/"]);
    }

    #[test]
    fn test_run_user_command_disallowed() {
        let result = run_user_command("rm -rf /", &["echo", "ls"]);
        assert!(matches!(result, Err(SampleError::DisallowedCommand(p)) if p == "rm"));
    }

    #[test]
    fn test_run_user_command_empty() {
        assert!(matches!(
            run_user_command("   ", &["echo"]),
            Err(SampleError::EmptyCommand)
        ));
    }

    #[test]
    fn test_read_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "strictness = \"high\"").unwrap();

        let contents = read_config(file.path()).unwrap();
        assert_eq!(contents, "strictness = \"high\"");
    }

    #[test]
    fn test_read_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, SampleError::ReadConfig { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_counter_increment() {
        let counter = Counter::new();
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.value(), 2);
    }

    #[test]
    fn test_counter_no_lost_updates() {
        let counter = Counter::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                });
            }
        });
        assert_eq!(counter.value(), 8000);
    }

    #[test]
    fn test_risky_operation_success() {
        let result = risky_operation(|| Ok::<_, io::Error>(7)).unwrap();
        assert_eq!(result, Some(7));
    }

    #[test]
    fn test_risky_operation_absorbs_not_found() {
        let result: Option<()> =
            risky_operation(|| Err(io::Error::from(io::ErrorKind::NotFound))).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_risky_operation_propagates_other_errors() {
        let result: io::Result<Option<()>> =
            risky_operation(|| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_append_to_list_has_no_shared_default() {
        let first = append_to_list(1, Vec::new());
        let second = append_to_list(2, Vec::new());
        assert_eq!(first, vec![1]);
        assert_eq!(second, vec![2]);

        let extended = append_to_list(3, first);
        assert_eq!(extended, vec![1, 3]);
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars = HashMap::from([
            (API_KEY_ENV, "sk-test".to_string()),
            (DATABASE_PASSWORD_ENV, "hunter2".to_string()),
        ]);
        let creds = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds.api_key.expose_secret(), "sk-test");
        assert_eq!(creds.database_password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_credentials_missing() {
        let vars = HashMap::from([(API_KEY_ENV, "sk-test".to_string())]);
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(
            err,
            SampleError::MissingCredential(DATABASE_PASSWORD_ENV)
        ));
    }

    #[test]
    fn test_credentials_empty_value_is_missing() {
        let err = Credentials::from_lookup(|_| Some(String::new())).unwrap_err();
        assert!(matches!(err, SampleError::MissingCredential(API_KEY_ENV)));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = Credentials::from_lookup(|_| Some("sk-visible".to_string())).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("sk-visible"));
    }
}
