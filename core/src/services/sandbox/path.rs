use crate::errors::SandboxError;

use super::file_name::sanitize_file_name;

/// Default root every remote path is confined beneath
pub const DEFAULT_ROOT: &str = "/upload";

/// Resolves caller paths to canonical absolute paths beneath a fixed root.
///
/// Containment is decided on normalized path segments, so a root of
/// `/upload` does not admit `/uploads-other`.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: String,
    root_segments: Vec<String>,
}

impl Default for PathSandbox {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl PathSandbox {
    /// Creates a sandbox rooted at `root`, itself normalized as an absolute path
    pub fn new(root: impl AsRef<str>) -> Self {
        let root_segments = normalize(root.as_ref().split('/'));
        Self {
            root: render(&root_segments),
            root_segments,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Resolves a user path beneath the root. `None` or an empty path is the
    /// root itself; an absolute user path is still placed beneath the root.
    pub fn resolve(&self, user_path: Option<&str>) -> Result<String, SandboxError> {
        let user_path = user_path.unwrap_or("");

        if user_path.chars().any(char::is_control) {
            return Err(SandboxError::IllegalCharacter);
        }

        let joined = self
            .root_segments
            .iter()
            .map(String::as_str)
            .chain(user_path.split('/'));
        let segments = normalize(joined);

        let contained = segments.starts_with(&self.root_segments)
            && !segments.iter().any(|s| s == "..");
        if !contained {
            tracing::warn!(path = %user_path, "Rejected path outside sandbox");
            return Err(SandboxError::PathTraversal {
                path: user_path.to_string(),
            });
        }

        Ok(render(&segments))
    }

    /// Resolves `dir` and places the sanitized `name` beneath it
    pub fn join_file(&self, dir: Option<&str>, name: &str) -> Result<String, SandboxError> {
        let dir = self.resolve(dir)?;
        let name = sanitize_file_name(name);
        Ok(format!("{}/{}", dir.trim_end_matches('/'), name))
    }
}

// `..` at the filesystem root stays at the root
fn normalize<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for part in parts {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }
    segments
}

fn render(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}
