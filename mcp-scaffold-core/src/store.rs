//! Template store: structured discovery plus the generator shell-out.
//!
//! Templates are plain directories under one root; discovery is a file-system
//! scan, never parsing of another tool's help output. Project creation shells
//! out to an external generator (`cargo generate` by default) and preserves
//! its stderr on failure.
//!
//! Template root resolution:
//! - `WEBPILOT_TEMPLATES_DIR` env var, when set
//! - OS data dir otherwise (Linux: `~/.local/share/webpilot/templates`)

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const GUIDE_FILE: &str = "GUIDE.md";

/// Metadata for one template directory.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    /// First heading line of the template's GUIDE.md, when present.
    pub description: String,
    pub modified: Option<DateTime<Utc>>,
}

pub struct TemplateStore {
    root: PathBuf,
    generator: String,
}

impl TemplateStore {
    pub fn new(root: PathBuf, generator: impl Into<String>) -> Self {
        Self {
            root,
            generator: generator.into(),
        }
    }

    /// OS-appropriate default template root.
    pub fn default_root() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("WEBPILOT_TEMPLATES_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let proj_dirs = directories::ProjectDirs::from("com", "webpilot", "webpilot")
            .context("Failed to determine data directory for this OS")?;

        Ok(proj_dirs.data_dir().join("templates"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root for template directories, sorted by id.
    pub fn list(&self) -> Result<Vec<TemplateInfo>, ScaffoldError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| ScaffoldError::Io {
            path: self.root.clone(),
            source: e,
        })?;

        let mut templates = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(id) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Utc>::from);

            templates.push(TemplateInfo {
                id: id.to_string(),
                description: read_description(&path).unwrap_or_default(),
                modified,
            });
        }

        templates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(templates)
    }

    /// Resolve a template id to its directory.
    ///
    /// Ids are bare directory names; anything that looks like a path never
    /// names a template.
    pub fn find(&self, id: &str) -> Result<PathBuf, ScaffoldError> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(ScaffoldError::TemplateNotFound(id.to_string()));
        }

        let path = self.root.join(id);
        if !path.is_dir() {
            return Err(ScaffoldError::TemplateNotFound(id.to_string()));
        }
        Ok(path)
    }

    /// Guidance text for a template, when its GUIDE.md exists.
    pub fn guidance(&self, id: &str) -> Result<Option<String>, ScaffoldError> {
        let path = self.find(id)?;
        match std::fs::read_to_string(path.join(GUIDE_FILE)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScaffoldError::Io {
                path: path.join(GUIDE_FILE),
                source: e,
            }),
        }
    }

    /// Create a project from a template via the external generator.
    ///
    /// Returns the path the project was generated into.
    pub async fn create_project(
        &self,
        name: &str,
        template: &str,
        target_dir: &Path,
    ) -> Result<PathBuf, ScaffoldError> {
        let template_path = self.find(template)?;

        tracing::info!(name, template, target = %target_dir.display(), "generating project");

        let output = Command::new(&self.generator)
            .arg("generate")
            .arg("--path")
            .arg(&template_path)
            .arg("--name")
            .arg(name)
            .arg("--destination")
            .arg(target_dir)
            .output()
            .await
            .map_err(|e| ScaffoldError::Io {
                path: PathBuf::from(&self.generator),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ScaffoldError::ExternalCommandFailed {
                command: format!("{} generate", self.generator),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(target_dir.join(name))
    }
}

fn read_description(template_dir: &Path) -> Option<String> {
    let guide = std::fs::read_to_string(template_dir.join(GUIDE_FILE)).ok()?;
    guide
        .lines()
        .map(|line| line.trim_start_matches('#').trim())
        .find(|line| !line.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (TemplateStore, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(tmp.path().to_path_buf(), "cargo");
        (store, tmp)
    }

    fn add_template(tmp: &tempfile::TempDir, id: &str, guide: Option<&str>) {
        let dir = tmp.path().join(id);
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(guide) = guide {
            std::fs::write(dir.join(GUIDE_FILE), guide).unwrap();
        }
    }

    #[test]
    fn test_list_scans_directories() {
        let (store, tmp) = test_store();
        add_template(&tmp, "cli", Some("# CLI starter\n\nDetails."));
        add_template(&tmp, "api", None);
        // Stray files are not templates
        std::fs::write(tmp.path().join("README.md"), "not a template").unwrap();

        let templates = store.list().unwrap();
        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["api", "cli"]);

        let cli = &templates[1];
        assert_eq!(cli.description, "CLI starter");
        assert!(cli.modified.is_some());
    }

    #[test]
    fn test_list_of_missing_root_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(tmp.path().join("nope"), "cargo");
        assert!(matches!(store.list(), Err(ScaffoldError::Io { .. })));
    }

    #[test]
    fn test_find_unknown_template() {
        let (store, _tmp) = test_store();
        assert!(matches!(
            store.find("ghost"),
            Err(ScaffoldError::TemplateNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_find_rejects_path_shaped_ids() {
        let (store, tmp) = test_store();
        add_template(&tmp, "cli", None);

        for id in ["../cli", "a/b", "..", "", "a\\b"] {
            assert!(
                matches!(store.find(id), Err(ScaffoldError::TemplateNotFound(_))),
                "id {id:?} must not resolve"
            );
        }
    }

    #[test]
    fn test_guidance_roundtrip() {
        let (store, tmp) = test_store();
        add_template(&tmp, "cli", Some("# CLI starter\nUse cargo run."));
        add_template(&tmp, "bare", None);

        let guide = store.guidance("cli").unwrap().unwrap();
        assert!(guide.contains("Use cargo run."));
        assert!(store.guidance("bare").unwrap().is_none());
        assert!(store.guidance("ghost").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_create_project_preserves_generator_stderr() {
        let (mut store, tmp) = test_store();
        add_template(&tmp, "cli", None);
        // A generator that always fails
        store.generator = "false".to_string();

        let err = store
            .create_project("demo", "cli", tmp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::ExternalCommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_create_project_returns_target_path() {
        use std::os::unix::fs::PermissionsExt;

        let (mut store, tmp) = test_store();
        add_template(&tmp, "cli", None);

        // Stand-in generator that just exits cleanly
        let fake = tmp.path().join("fakegen");
        std::fs::write(&fake, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        store.generator = fake.to_string_lossy().into_owned();

        let target = tmp.path().join("out");
        std::fs::create_dir_all(&target).unwrap();

        let path = store.create_project("demo", "cli", &target).await.unwrap();
        assert_eq!(path, target.join("demo"));
    }

    #[tokio::test]
    async fn test_create_project_with_unknown_template_never_runs_generator() {
        let (store, tmp) = test_store();
        let err = store
            .create_project("demo", "ghost", tmp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound(_)));
    }
}
