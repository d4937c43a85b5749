//! SSH remote files through the system `ssh` binary

use std::process::{Command, Stdio};

/// Where a remote file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub user: String,
    pub port: u16,
    pub path: String,
}

impl RemoteTarget {
    /// `user@host`, or just `host` without a user
    pub fn destination(&self) -> String {
        if self.user.is_empty() {
            self.host.clone()
        } else {
            format!("{}@{}", self.user, self.host)
        }
    }

    /// Tab name for the fetched document, e.g. `host:/etc/hosts`
    pub fn display_name(&self) -> String {
        format!("{}:{}", self.host, self.path)
    }
}

/// Quote a string for a POSIX shell
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Present only when an `ssh` binary is available
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshClient;

impl SshClient {
    /// Probe for `ssh` on PATH
    pub fn detect() -> Option<Self> {
        let found = Command::new("ssh")
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok();
        if !found {
            tracing::info!("ssh binary not found, remote editing disabled");
        }
        found.then_some(SshClient)
    }

    /// Arguments passed to `ssh` to print the remote file
    pub fn fetch_args(target: &RemoteTarget) -> Vec<String> {
        vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-p".to_string(),
            target.port.to_string(),
            target.destination(),
            format!("cat -- {}", shell_quote(&target.path)),
        ]
    }

    /// Fetch the remote file's contents
    pub fn fetch(&self, target: &RemoteTarget) -> anyhow::Result<String> {
        let output = Command::new("ssh")
            .args(Self::fetch_args(target))
            .stdin(Stdio::null())
            .output()?;
        if !output.status.success() {
            anyhow::bail!("{}", String::from_utf8_lossy(&output.stderr).trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> RemoteTarget {
        RemoteTarget {
            host: "example.org".to_string(),
            user: "dev".to_string(),
            port: 2222,
            path: "/srv/it's here.txt".to_string(),
        }
    }

    #[test]
    fn test_destination() {
        let mut t = target();
        assert_eq!(t.destination(), "dev@example.org");
        t.user.clear();
        assert_eq!(t.destination(), "example.org");
        assert_eq!(t.display_name(), "example.org:/srv/it's here.txt");
    }

    #[test]
    fn test_fetch_args_quote_path() {
        let args = SshClient::fetch_args(&target());
        assert_eq!(args[3], "2222");
        assert_eq!(args[4], "dev@example.org");
        assert_eq!(args[5], r"cat -- '/srv/it'\''s here.txt'");
    }
}
