//! Detection of the current operating-system account name.
//!
//! Used as the default author when no identity has been configured. Lookup
//! never fails: `whoami` first, then `USER`/`USERNAME`, then a fixed literal.
//! Non-ASCII names are passed through unchanged.

use std::process::Command;

/// Literal used when neither `whoami` nor the environment yields a name.
pub const FALLBACK_ACCOUNT: &str = "user";

const ENV_VARS: [&str; 2] = ["USER", "USERNAME"];

/// Best-effort name of the account running this process.
pub fn account_name() -> String {
    from_command()
        .or_else(from_env)
        .unwrap_or_else(|| FALLBACK_ACCOUNT.to_string())
}

fn from_command() -> Option<String> {
    let output = Command::new("whoami").output().ok()?;
    if !output.status.success() {
        tracing::debug!("whoami exited with {}", output.status);
        return None;
    }
    parse_whoami(&String::from_utf8_lossy(&output.stdout))
}

fn from_env() -> Option<String> {
    first_non_empty(ENV_VARS.iter().map(|k| std::env::var(k).ok()))
}

/// Extract the account name from `whoami` output.
///
/// Windows prints `DOMAIN\user`; only the part after the last backslash is kept.
fn parse_whoami(stdout: &str) -> Option<String> {
    let line = stdout.lines().next()?.trim();
    let name = line.rsplit('\\').next().unwrap_or(line).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn first_non_empty(candidates: impl Iterator<Item = Option<String>>) -> Option<String> {
    candidates
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whoami_unix() {
        assert_eq!(parse_whoami("alice\n").as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_whoami_windows_domain() {
        assert_eq!(parse_whoami("CORP\\alice\r\n").as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_whoami_empty() {
        assert!(parse_whoami("").is_none());
        assert!(parse_whoami("   \n").is_none());
    }

    #[test]
    fn test_parse_whoami_keeps_non_ascii() {
        assert_eq!(parse_whoami("沈阳\n").as_deref(), Some("沈阳"));
    }

    #[test]
    fn test_first_non_empty_skips_blank_and_missing() {
        let got = first_non_empty(
            vec![None, Some("  ".to_string()), Some("bob".to_string())].into_iter(),
        );
        assert_eq!(got.as_deref(), Some("bob"));
        assert!(first_non_empty(vec![None, None].into_iter()).is_none());
    }

    #[test]
    fn test_account_name_never_empty() {
        assert!(!account_name().is_empty());
    }
}
