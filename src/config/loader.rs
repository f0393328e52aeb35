//! Configuration file discovery and loading.
//!
//! This module finds command files and settings files in the correct
//! priority order and loads settings by deep-merging them.

use crate::config::merger::merge_configs;
use crate::config::schema::UsercmdConfig;
use crate::error::{Result, UsercmdError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".usercmd";

/// Paths to command and settings files in load order (later overrides earlier).
///
/// Load order:
/// 1. User global (`~/.usercmd/`)
/// 2. Project (`.usercmd/commands.yml`, `.usercmd/config.yml`)
/// 3. Project-local overrides (`.usercmd/*.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct SourcePaths {
    /// User's global command file: ~/.usercmd/commands.yml
    pub user_commands: Option<PathBuf>,

    /// Project command file: .usercmd/commands.yml
    pub project_commands: Option<PathBuf>,

    /// Local command overrides: .usercmd/commands.local.yml
    pub local_commands: Option<PathBuf>,

    /// User's global settings: ~/.usercmd/config.yml
    pub user_settings: Option<PathBuf>,

    /// Project settings: .usercmd/config.yml
    pub project_settings: Option<PathBuf>,

    /// Local settings overrides: .usercmd/config.local.yml
    pub local_settings: Option<PathBuf>,
}

impl SourcePaths {
    /// Discover existing files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let user_dir = dirs::home_dir().map(|home| home.join(CONFIG_DIR));
        Self::discover_in(user_dir.as_deref(), project_root)
    }

    /// Discover with an explicit user directory (for testing).
    pub fn discover_in(user_dir: Option<&Path>, project_root: &Path) -> Self {
        let project_dir = project_root.join(CONFIG_DIR);

        Self {
            user_commands: user_dir.and_then(|dir| existing(dir.join("commands.yml"))),
            project_commands: existing(project_dir.join("commands.yml")),
            local_commands: existing(project_dir.join("commands.local.yml")),
            user_settings: user_dir.and_then(|dir| existing(dir.join("config.yml"))),
            project_settings: existing(project_dir.join("config.yml")),
            local_settings: existing(project_dir.join("config.local.yml")),
        }
    }

    /// Existing command files in load order.
    pub fn command_files(&self) -> Vec<&PathBuf> {
        [
            &self.user_commands,
            &self.project_commands,
            &self.local_commands,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Existing settings files in merge order.
    pub fn settings_files(&self) -> Vec<&PathBuf> {
        [
            &self.user_settings,
            &self.project_settings,
            &self.local_settings,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.usercmd` directory first, then falls back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Identifier under which a command file is registered.
///
/// The same path always maps to the same identifier, so a file can be
/// dropped using the spelling it was added with.
pub fn source_id(path: &Path) -> String {
    expand_home(path).display().to_string()
}

/// Load a settings file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            UsercmdError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            UsercmdError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| UsercmdError::MalformedSource {
        source_id: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and merge settings files.
///
/// Missing files are an error; pass only paths that exist (as
/// [`SourcePaths::settings_files`] does). With no files the defaults apply.
pub fn load_settings(paths: &[&PathBuf]) -> Result<UsercmdConfig> {
    let mut values = Vec::new();
    for path in paths {
        values.push(load_config_value(path)?);
    }

    let merged = merge_configs(&values);

    serde_yaml::from_value(merged).map_err(|e| UsercmdError::MalformedSource {
        source_id: "settings".to_string(),
        message: format!("Failed to parse merged settings: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DuplicatePolicy, OutputMode};
    use tempfile::TempDir;

    fn project_with(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        temp
    }

    #[test]
    fn discover_finds_project_files() {
        let temp = project_with(&[("commands.yml", ""), ("config.yml", "")]);
        let paths = SourcePaths::discover_in(None, temp.path());
        assert!(paths.project_commands.is_some());
        assert!(paths.project_settings.is_some());
        assert!(paths.local_commands.is_none());
    }

    #[test]
    fn discover_finds_user_files() {
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("commands.yml"), "").unwrap();
        let project = TempDir::new().unwrap();

        let paths = SourcePaths::discover_in(Some(user.path()), project.path());
        assert_eq!(
            paths.user_commands,
            Some(user.path().join("commands.yml"))
        );
        assert!(paths.project_commands.is_none());
    }

    #[test]
    fn command_files_in_load_order() {
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("commands.yml"), "").unwrap();
        let project = project_with(&[("commands.yml", ""), ("commands.local.yml", "")]);

        let paths = SourcePaths::discover_in(Some(user.path()), project.path());
        let files = paths.command_files();

        assert_eq!(files.len(), 3);
        assert!(files[0].starts_with(user.path()));
        assert!(files[1].ends_with("commands.yml"));
        assert!(files[2].ends_with("commands.local.yml"));
    }

    #[test]
    fn find_project_root_finds_config_dir() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("foo").join("bar");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_prefers_config_dir_over_git() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("nested").join("project");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::create_dir_all(subdir.join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(subdir));
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(
            expand_home(Path::new("/etc/commands.yml")),
            PathBuf::from("/etc/commands.yml")
        );
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/cmds.yml")),
                home.join("cmds.yml")
            );
        }
    }

    #[test]
    fn load_settings_defaults_without_files() {
        let config = load_settings(&[]).unwrap();
        assert_eq!(config.settings.duplicates, DuplicatePolicy::LastWins);
    }

    #[test]
    fn load_settings_merges_project_and_local() {
        let temp = project_with(&[
            (
                "config.yml",
                "settings:\n  shell: /bin/bash\n  output: verbose\n",
            ),
            ("config.local.yml", "settings:\n  output: quiet\n"),
        ]);
        let paths = SourcePaths::discover_in(None, temp.path());

        let config = load_settings(&paths.settings_files()).unwrap();

        assert_eq!(config.settings.shell, Some("/bin/bash".to_string()));
        assert_eq!(config.settings.output, OutputMode::Quiet);
    }

    #[test]
    fn load_settings_accepts_empty_file() {
        let temp = project_with(&[("config.yml", "")]);
        let paths = SourcePaths::discover_in(None, temp.path());
        assert!(load_settings(&paths.settings_files()).is_ok());
    }

    #[test]
    fn load_config_value_reports_invalid_yaml() {
        let temp = project_with(&[("config.yml", "invalid: yaml: [")]);
        let result = load_config_value(&temp.path().join(CONFIG_DIR).join("config.yml"));
        assert!(matches!(result, Err(UsercmdError::MalformedSource { .. })));
    }
}
