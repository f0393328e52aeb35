//! Loading settings and command files for a CLI invocation.

use std::path::{Path, PathBuf};

use crate::config::{load_settings, Settings, SourcePaths, CONFIG_DIR};
use crate::error::Result;
use crate::plugin::PluginTable;
use crate::registry::{CommandRegistry, LoadReport, Source};
use crate::shell::CommandOptions;
use crate::ui::{OutputMode, UserInterface};

use super::plugins;

/// Where a CLI invocation looks for files.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceOptions {
    /// Project root; shell commands run here.
    pub project_root: PathBuf,
    /// User directory (`~/.usercmd` when unset).
    pub user_dir: Option<PathBuf>,
    /// Command files given on the command line.
    pub files: Vec<PathBuf>,
    /// Settings file given on the command line.
    pub config: Option<PathBuf>,
    /// Whether to look for the standard files at all.
    pub discover: bool,
}

/// Settings plus a registry holding the standard plugins and built-ins.
#[derive(Debug)]
pub struct Workspace {
    pub settings: Settings,
    pub registry: CommandRegistry,
    project_root: PathBuf,
    command_files: Vec<PathBuf>,
}

impl Workspace {
    /// Read settings and prepare an empty registry.
    ///
    /// Command files are located but not loaded yet.
    pub fn open(options: &WorkspaceOptions) -> Result<Self> {
        Self::open_with(options, plugins::standard_plugins()?)
    }

    /// Like [`Workspace::open`] with a caller-supplied plugin table.
    pub fn open_with(options: &WorkspaceOptions, plugins: PluginTable) -> Result<Self> {
        let paths = if options.discover {
            let user_dir = options
                .user_dir
                .clone()
                .or_else(|| dirs::home_dir().map(|home| home.join(CONFIG_DIR)));
            SourcePaths::discover_in(user_dir.as_deref(), &options.project_root)
        } else {
            SourcePaths::default()
        };

        let mut settings_files = paths.settings_files();
        if let Some(config) = &options.config {
            settings_files.push(config);
        }
        let settings = load_settings(&settings_files)?.settings;

        let mut command_files: Vec<PathBuf> =
            paths.command_files().into_iter().cloned().collect();
        command_files.extend(options.files.iter().cloned());

        tracing::debug!(
            "Workspace at {} with {} command file(s)",
            options.project_root.display(),
            command_files.len()
        );

        let mut registry = CommandRegistry::new(plugins).with_duplicate_policy(settings.duplicates);
        plugins::register_builtins(&mut registry);

        Ok(Self {
            settings,
            registry,
            project_root: options.project_root.clone(),
            command_files,
        })
    }

    /// Open and load every command file, stopping at the first failure.
    pub fn load(options: &WorkspaceOptions) -> Result<(Self, Vec<LoadReport>)> {
        let mut workspace = Self::open(options)?;
        let reports = workspace.load_all()?;
        Ok((workspace, reports))
    }

    /// Command files in load order.
    pub fn command_files(&self) -> &[PathBuf] {
        &self.command_files
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load one command file into the registry.
    pub fn load_file(&mut self, path: &Path) -> Result<LoadReport> {
        self.registry.add_source(Source::file(path))
    }

    /// Load every command file in order.
    pub fn load_all(&mut self) -> Result<Vec<LoadReport>> {
        let files = self.command_files.clone();
        files.iter().map(|path| self.load_file(path)).collect()
    }

    /// Apply the configured output mode unless a flag already chose one.
    pub fn apply_output_mode(&self, ui: &mut dyn UserInterface) {
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(self.settings.output);
        }
    }

    /// Shell options from settings, running in the project root.
    pub fn shell_options(&self) -> CommandOptions {
        CommandOptions {
            cwd: Some(self.project_root.clone()),
            ..CommandOptions::from_settings(&self.settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project(commands: &str, config: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("commands.yml"), commands).unwrap();
        if let Some(config) = config {
            fs::write(dir.join("config.yml"), config).unwrap();
        }
        temp
    }

    fn options(root: &Path) -> WorkspaceOptions {
        WorkspaceOptions {
            project_root: root.to_path_buf(),
            user_dir: Some(root.join("no-user-dir")),
            discover: true,
            ..Default::default()
        }
    }

    #[test]
    fn loads_discovered_project_file() {
        let temp = project("commands:\n  hello: echo hello\n", None);
        let (workspace, reports) = Workspace::load(&options(temp.path())).unwrap();

        assert_eq!(reports.len(), 1);
        assert!(workspace.registry.lookup("hello").is_some());
    }

    #[test]
    fn builtins_are_always_present() {
        let temp = TempDir::new().unwrap();
        let (workspace, reports) = Workspace::load(&options(temp.path())).unwrap();

        assert!(reports.is_empty());
        assert!(workspace.registry.resolve_target("version").is_some());
        assert!(workspace.registry.resolve_target("echo").is_some());
    }

    #[test]
    fn settings_set_duplicate_policy() {
        let temp = project(
            "commands:\n  a: echo 1\n  a: echo 2\n",
            Some("settings:\n  duplicates: error\n"),
        );
        let mut workspace = Workspace::open(&options(temp.path())).unwrap();
        assert_eq!(workspace.settings.duplicates, DuplicatePolicy::Error);
        assert!(workspace.load_all().is_err());
    }

    #[test]
    fn no_discover_uses_only_explicit_files() {
        let temp = project("commands:\n  hello: echo hello\n", None);
        let extra = temp.path().join("extra.yml");
        fs::write(&extra, "commands:\n  extra: echo extra\n").unwrap();

        let opts = WorkspaceOptions {
            files: vec![extra.clone()],
            discover: false,
            ..options(temp.path())
        };
        let (workspace, _) = Workspace::load(&opts).unwrap();

        assert_eq!(workspace.command_files(), [extra]);
        assert!(workspace.registry.lookup("hello").is_none());
        assert!(workspace.registry.lookup("extra").is_some());
    }

    #[test]
    fn settings_output_applies_to_default_ui() {
        let temp = project("commands: {}\n", Some("settings:\n  output: quiet\n"));
        let workspace = Workspace::open(&options(temp.path())).unwrap();

        let mut ui = MockUI::new();
        workspace.apply_output_mode(&mut ui);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);

        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        workspace.apply_output_mode(&mut ui);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn shell_options_run_in_project_root() {
        let temp = project("commands: {}\n", Some("settings:\n  env:\n    A: b\n"));
        let workspace = Workspace::open(&options(temp.path())).unwrap();
        let opts = workspace.shell_options();

        assert_eq!(opts.cwd.as_deref(), Some(temp.path()));
        assert_eq!(opts.env["A"], "b");
    }
}
