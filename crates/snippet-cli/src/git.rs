use std::process::Command;

use thiserror::Error;

/// Reads the GitHub username from `git config github.user`.
pub fn github_username() -> Result<String, GitConfigError> {
    let output = Command::new("git")
        .arg("config")
        .arg("github.user")
        .output()
        .map_err(|error| GitConfigError::Command(error.to_string()))?;

    username_from_output(output.status.success(), &output.stdout)
}

pub fn username_from_output(success: bool, stdout: &[u8]) -> Result<String, GitConfigError> {
    if !success {
        return Err(GitConfigError::MissingUsername);
    }

    let username = String::from_utf8_lossy(stdout).trim().to_string();
    if username.is_empty() {
        return Err(GitConfigError::MissingUsername);
    }

    Ok(username)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitConfigError {
    #[error("failed to run git: {0}")]
    Command(String),
    #[error("github.user is not set (set it with `git config --global github.user <username>`)")]
    MissingUsername,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_username_parses_trimmed_stdout() {
        let username =
            username_from_output(true, b"pixyzehn\n").expect("username should be parsed");

        assert_eq!(username, "pixyzehn");
    }

    #[test]
    fn git_username_rejects_failed_command() {
        let err = username_from_output(false, b"").expect_err("failed command should error");

        assert_eq!(err, GitConfigError::MissingUsername);
    }

    #[test]
    fn git_username_rejects_blank_output() {
        let err = username_from_output(true, b"  \n").expect_err("blank output should error");

        assert_eq!(err, GitConfigError::MissingUsername);
    }
}
