//! Environment variable parsing helpers
//!
//! Provides ergonomic helpers for reading configuration and secrets from
//! environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;

/// Extension trait for parsing environment variables.
///
/// Provides convenient methods for reading optional values and lists.
pub trait ConfigExt {
    /// Get an environment variable if it is set and not empty.
    fn env_opt(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    /// Get a comma-separated environment variable as a list.
    ///
    /// Entries are trimmed; empty entries are dropped.
    fn env_list(name: &str) -> Option<Vec<String>> {
        Self::env_opt(name).map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
    }
}

// Blanket implementation for all types
impl<T> ConfigExt for T {}

/// Read a secret from `NAME`, or from the file named by `NAME_FILE`.
///
/// The file form matches how orchestrators mount secrets. A trailing newline
/// in the file is dropped. Setting both variables is an error.
pub fn env_secret(name: &str) -> Result<Option<String>> {
    let file_var = format!("{}_FILE", name);

    match (String::env_opt(name), String::env_opt(&file_var)) {
        (Some(_), Some(_)) => bail!("{} and {} are mutually exclusive", name, file_var),
        (Some(value), None) => Ok(Some(value)),
        (None, Some(path)) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {} from {}", name, path))?;
            Ok(Some(content.trim_end_matches(['\r', '\n']).to_string()))
        }
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_opt_ignores_empty_value() {
        env::set_var("COMMON_TEST_OPT_EMPTY", "");
        assert_eq!(String::env_opt("COMMON_TEST_OPT_EMPTY"), None);
    }

    #[test]
    fn test_env_list_trims_entries() {
        env::set_var("COMMON_TEST_LIST", " readWrite, dbAdmin ,,");
        assert_eq!(
            String::env_list("COMMON_TEST_LIST"),
            Some(vec!["readWrite".to_string(), "dbAdmin".to_string()])
        );
    }

    #[test]
    fn test_env_secret_from_value() {
        env::set_var("COMMON_TEST_SECRET_VALUE", "s3cret");
        env::remove_var("COMMON_TEST_SECRET_VALUE_FILE");
        assert_eq!(
            env_secret("COMMON_TEST_SECRET_VALUE").unwrap().as_deref(),
            Some("s3cret")
        );
    }

    #[test]
    fn test_env_secret_from_file_drops_trailing_newline() {
        let path = env::temp_dir().join(format!("common-secret-{}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "from-file").unwrap();

        env::remove_var("COMMON_TEST_SECRET_FILE");
        env::set_var("COMMON_TEST_SECRET_FILE_FILE", &path);
        assert_eq!(
            env_secret("COMMON_TEST_SECRET_FILE").unwrap().as_deref(),
            Some("from-file")
        );

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_env_secret_rejects_both_sources() {
        env::set_var("COMMON_TEST_SECRET_BOTH", "a");
        env::set_var("COMMON_TEST_SECRET_BOTH_FILE", "/nonexistent");
        assert!(env_secret("COMMON_TEST_SECRET_BOTH").is_err());
    }

    #[test]
    fn test_env_secret_unset() {
        env::remove_var("COMMON_TEST_SECRET_UNSET");
        env::remove_var("COMMON_TEST_SECRET_UNSET_FILE");
        assert_eq!(env_secret("COMMON_TEST_SECRET_UNSET").unwrap(), None);
    }
}
