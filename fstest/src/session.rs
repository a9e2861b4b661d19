//! Orchestration of a filesystem exercise run.
//!
//! A run has two phases separated by an explicit boundary:
//!
//! 1. **Prepare** ([`Orchestrator::prepare`]): ensure and load `Config.txt`,
//!    create the folder layout, write the sample file.
//! 2. **Archive** ([`PreparedRun::archive`]): move a stamped copy of the
//!    config and a placeholder image into save-data, move save-data into the
//!    archive, delete tmp.
//!
//! Steps run in fixed order and stop at the first error. Nothing is rolled
//! back; a failure mid-archive leaves partial state in tmp.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info};

use crate::core::archive_name::{format_stamp, unique_archive_name};
use crate::core::folders::{FolderKind, FolderSet};
use crate::core::rewrite::{rewrite_workspace_entries, stamped_workspace};
use crate::io::config::{ensure_config, load_config};
use crate::io::fs::{
    copy_file, create_dir, delete_dir, dir_exists, extension, file_name,
    file_name_without_extension, file_size, move_dir, move_file, read_lines, write_lines,
    write_text,
};
use crate::io::gate::PhaseGate;
use crate::io::jpeg::write_placeholder_jpeg;
use crate::io::paths::{AppPaths, ensure_root};
use crate::io::settings::{Settings, load_settings};

/// Whether a folder was created or already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirStatus {
    pub kind: FolderKind,
    pub path: PathBuf,
    pub created: bool,
}

/// Facts about a file written by the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// File name without extension.
    pub name: String,
    /// Extension with leading dot, e.g. `.txt`.
    pub extension: String,
    pub size: u64,
}

/// Outcome of the prepare phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    pub config_created: bool,
    /// Entries loaded from `Config.txt`, in order.
    pub folders: Vec<String>,
    pub directories: Vec<DirStatus>,
    pub sample: FileReport,
}

/// Outcome of the archive phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub stamp: String,
    /// Where the stamped config landed before save-data was archived.
    pub config_path: PathBuf,
    pub image_path: PathBuf,
    /// Archive directory holding save-data, if save-data existed.
    pub archived_to: Option<PathBuf>,
    pub tmp_deleted: bool,
}

/// Holds the resolved paths, settings and current folder set for one run.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    paths: AppPaths,
    settings: Settings,
    folders: FolderSet,
}

impl Orchestrator {
    /// Open the user-data root, creating it if needed, and load settings.
    pub fn open(root: &Path) -> Result<Self> {
        let paths = ensure_root(root)?;
        let settings = load_settings(&paths.settings_path)?;
        Ok(Self::new(paths, settings))
    }

    /// Start from the default folder set; [`load_config`](Self::load_config)
    /// replaces it.
    pub fn new(paths: AppPaths, settings: Settings) -> Self {
        Self {
            paths,
            settings,
            folders: FolderSet::default(),
        }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn folders(&self) -> &FolderSet {
        &self.folders
    }

    pub fn folder(&self, kind: FolderKind) -> PathBuf {
        self.paths.folder(&self.folders, kind)
    }

    /// Write the current folder set as `Config.txt` if none exists.
    pub fn ensure_config(&self) -> Result<bool> {
        ensure_config(&self.paths.config_path, &self.folders)
    }

    /// Replace the folder set with the entries in `Config.txt`.
    pub fn load_config(&mut self) -> Result<()> {
        self.folders = load_config(&self.paths.config_path)?;
        for (kind, entry) in self.folders.iter() {
            debug!(%kind, entry, "folder entry loaded");
        }
        Ok(())
    }

    /// Create every missing folder. Existing folders are left as they are.
    pub fn ensure_directories(&self) -> Result<Vec<DirStatus>> {
        let mut statuses = Vec::with_capacity(FolderKind::ALL.len());
        for kind in FolderKind::ALL {
            let path = self.folder(kind);
            let created = if dir_exists(&path) {
                false
            } else {
                create_dir(&path)?;
                info!(%kind, path = %path.display(), "created directory");
                true
            };
            statuses.push(DirStatus {
                kind,
                path,
                created,
            });
        }
        Ok(statuses)
    }

    /// Write the sample text file into save-data.
    pub fn write_sample_file(&self) -> Result<FileReport> {
        let sample = &self.settings.sample;
        let path = self.folder(FolderKind::SaveData).join(&sample.file_name);
        write_text(&path, &sample.text)?;
        let report = FileReport {
            name: file_name_without_extension(&path)
                .unwrap_or_default()
                .to_string(),
            extension: extension(&path),
            size: file_size(&path)?,
            path,
        };
        info!(path = %report.path.display(), size = report.size, "wrote sample file");
        Ok(report)
    }

    /// Copy `Config.txt` into tmp, rename the workspace folder in its entries
    /// to `<workspace><stamp>`, then move it into save-data.
    ///
    /// Returns the config's path in save-data.
    pub fn archive_config(&self, stamp: &str) -> Result<PathBuf> {
        let config_path = &self.paths.config_path;
        let config_name = file_name(config_path)
            .with_context(|| format!("config path has no file name {}", config_path.display()))?;
        let tmp_path = self.folder(FolderKind::Tmp).join(config_name);
        let saved_path = self.folder(FolderKind::SaveData).join(config_name);

        copy_file(config_path, &tmp_path)?;
        let entries = read_lines(&tmp_path)?;
        let workspace = self.folders.get(FolderKind::Workspace);
        let replacement = stamped_workspace(workspace, stamp);
        let rewritten = rewrite_workspace_entries(&entries, workspace, &replacement);
        write_lines(&tmp_path, &rewritten)?;
        move_file(&tmp_path, &saved_path)?;

        info!(path = %saved_path.display(), workspace = %replacement, "archived config");
        Ok(saved_path)
    }

    /// Write the placeholder JPEG into save-data.
    pub fn save_placeholder_image(&self) -> Result<PathBuf> {
        let image = &self.settings.image;
        let path = self.folder(FolderKind::SaveData).join(&image.file_name);
        write_placeholder_jpeg(&path, image)?;
        info!(path = %path.display(), "saved placeholder image");
        Ok(path)
    }

    /// Move save-data into the archive as `<name>_<stamp>`.
    ///
    /// Returns `None` when there is no save-data directory.
    pub fn archive_savedata(&self, stamp: &str) -> Result<Option<PathBuf>> {
        let save_data = self.folder(FolderKind::SaveData);
        if !dir_exists(&save_data) {
            debug!(path = %save_data.display(), "no save-data to archive");
            return Ok(None);
        }
        let base = file_name(&save_data).with_context(|| {
            format!("save-data path has no directory name {}", save_data.display())
        })?;
        let archive = self.folder(FolderKind::Archive);
        let name = unique_archive_name(base, stamp, |candidate| {
            archive.join(candidate).exists()
        });
        let dest = archive.join(name);
        move_dir(&save_data, &dest)?;
        info!(from = %save_data.display(), to = %dest.display(), "archived save-data");
        Ok(Some(dest))
    }

    /// Recursively delete tmp. Returns false if it was already gone.
    pub fn delete_tmp(&self) -> Result<bool> {
        let tmp = self.folder(FolderKind::Tmp);
        if !dir_exists(&tmp) {
            return Ok(false);
        }
        delete_dir(&tmp)?;
        info!(path = %tmp.display(), "deleted tmp");
        Ok(true)
    }

    /// Run the prepare phase.
    pub fn prepare(mut self) -> Result<(PreparedRun, PrepareReport)> {
        let config_created = self.ensure_config()?;
        self.load_config()?;
        let directories = self.ensure_directories()?;
        let sample = self.write_sample_file()?;
        let report = PrepareReport {
            config_created,
            folders: self.folders.entries().to_vec(),
            directories,
            sample,
        };
        Ok((PreparedRun { orchestrator: self }, report))
    }

    /// Load an existing config and skip straight to the archive phase.
    ///
    /// Used when setup happened in an earlier invocation.
    pub fn resume(mut self) -> Result<PreparedRun> {
        self.load_config()?;
        Ok(PreparedRun { orchestrator: self })
    }
}

/// An orchestrator whose folder set has been loaded from `Config.txt`.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    orchestrator: Orchestrator,
}

impl PreparedRun {
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Run the archive phase stamped with the current local time.
    pub fn archive(self) -> Result<ArchiveReport> {
        let stamp = format_stamp(Local::now().naive_local());
        self.archive_at(&stamp)
    }

    /// Run the archive phase with an explicit stamp.
    pub fn archive_at(self, stamp: &str) -> Result<ArchiveReport> {
        let run = &self.orchestrator;
        let config_path = run.archive_config(stamp)?;
        let image_path = run.save_placeholder_image()?;
        let archived_to = run.archive_savedata(stamp)?;
        let tmp_deleted = run.delete_tmp()?;
        Ok(ArchiveReport {
            stamp: stamp.to_string(),
            config_path,
            image_path,
            archived_to,
            tmp_deleted,
        })
    }
}

/// Prepare, wait on `gate`, then archive.
pub fn run_all(
    orchestrator: Orchestrator,
    gate: &dyn PhaseGate,
) -> Result<(PrepareReport, ArchiveReport)> {
    let (prepared, prepare_report) = orchestrator.prepare()?;
    gate.wait().context("wait at phase boundary")?;
    let archive_report = prepared.archive()?;
    Ok((prepare_report, archive_report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::io::gate::OpenGate;
    use crate::test_support::TestRoot;
    use std::cell::Cell;
    use std::fs;

    const STAMP: &str = "20260102030405";

    #[test]
    fn prepare_on_fresh_root_creates_layout_and_sample() {
        let root = TestRoot::new().expect("root");
        let (prepared, report) = root.orchestrator().prepare().expect("prepare");

        assert!(report.config_created);
        assert_eq!(report.folders, FolderSet::default().entries());
        assert!(report.directories.iter().all(|status| status.created));
        for kind in FolderKind::ALL {
            assert!(prepared.orchestrator().folder(kind).is_dir(), "{kind} missing");
        }

        assert_eq!(report.sample.name, "TestFile");
        assert_eq!(report.sample.extension, ".txt");
        assert_eq!(report.sample.size, 11);
        assert_eq!(
            fs::read_to_string(&report.sample.path).expect("read sample"),
            "Hello World"
        );
    }

    #[test]
    fn second_prepare_keeps_config_and_existing_dirs() {
        let root = TestRoot::new().expect("root");
        root.orchestrator().prepare().expect("first prepare");
        let before = fs::read_to_string(&root.paths().config_path).expect("read config");

        let (_, report) = root.orchestrator().prepare().expect("second prepare");

        assert!(!report.config_created);
        assert!(report.directories.iter().all(|status| !status.created));
        let after = fs::read_to_string(&root.paths().config_path).expect("read config");
        assert_eq!(before, after);
    }

    #[test]
    fn load_config_replaces_folder_set() {
        let root = TestRoot::new().expect("root");
        root.write_config(&["Data/", "Data/Old/", "Scratch/", "Scratch/Live/"])
            .expect("write config");

        let mut orchestrator = root.orchestrator();
        orchestrator.load_config().expect("load");

        assert_eq!(orchestrator.folders().get(FolderKind::SaveData), "Scratch/Live/");
        assert_eq!(
            orchestrator.folder(FolderKind::Archive),
            root.path().join("Data/Old/")
        );
    }

    #[test]
    fn short_config_fails_prepare_before_touching_folders() {
        let root = TestRoot::new().expect("root");
        root.write_config(&["Workspace/", "Workspace/Archive/"])
            .expect("write config");

        let err = root.orchestrator().prepare().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Malformed { found: 2, .. })
        ));
        assert!(!root.path().join("Workspace").exists());
    }

    #[test]
    fn archive_config_moves_stamped_copy_into_save_data() {
        let root = TestRoot::new().expect("root");
        let (prepared, _) = root.orchestrator().prepare().expect("prepare");
        let orchestrator = prepared.orchestrator();

        let saved = orchestrator.archive_config(STAMP).expect("archive config");

        assert!(!orchestrator.folder(FolderKind::Tmp).join("Config.txt").exists());
        assert_eq!(saved, orchestrator.folder(FolderKind::SaveData).join("Config.txt"));
        let lines = read_lines(&saved).expect("read archived config");
        assert_eq!(
            lines,
            vec![
                "Workspace20260102030405/",
                "Workspace20260102030405/Archive/",
                "Workspace20260102030405/Tmp/",
                "Workspace20260102030405/Tmp/SaveData/",
            ]
        );
        // The live config keeps the original entries.
        assert_eq!(
            read_lines(&root.paths().config_path).expect("read config"),
            FolderSet::default().entries()
        );
    }

    #[test]
    fn archive_savedata_without_save_data_is_noop() {
        let root = TestRoot::new().expect("root");
        let orchestrator = root.orchestrator();
        create_dir(&orchestrator.folder(FolderKind::Archive)).expect("create archive");

        let archived = orchestrator.archive_savedata(STAMP).expect("archive");

        assert_eq!(archived, None);
        let entries = fs::read_dir(orchestrator.folder(FolderKind::Archive))
            .expect("read archive")
            .count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn archive_savedata_disambiguates_same_second() {
        let root = TestRoot::new().expect("root");
        let (prepared, _) = root.orchestrator().prepare().expect("prepare");
        let orchestrator = prepared.orchestrator();

        let first = orchestrator.archive_savedata(STAMP).expect("first");
        orchestrator.ensure_directories().expect("recreate");
        let second = orchestrator.archive_savedata(STAMP).expect("second");

        let archive = orchestrator.folder(FolderKind::Archive);
        assert_eq!(first, Some(archive.join("SaveData_20260102030405")));
        assert_eq!(second, Some(archive.join("SaveData_20260102030405_1")));
    }

    #[test]
    fn delete_tmp_is_noop_when_absent() {
        let root = TestRoot::new().expect("root");
        let orchestrator = root.orchestrator();
        assert!(!orchestrator.delete_tmp().expect("delete"));
        assert!(!orchestrator.folder(FolderKind::Tmp).exists());
    }

    #[test]
    fn full_run_leaves_one_archived_snapshot() {
        let root = TestRoot::new().expect("root");
        let (prepared, _) = root.orchestrator().prepare().expect("prepare");
        let report = prepared.archive_at(STAMP).expect("archive");

        let archive = root.path().join("Workspace/Archive");
        let snapshot = archive.join("SaveData_20260102030405");
        assert_eq!(report.archived_to.as_deref(), Some(snapshot.as_path()));
        assert!(report.tmp_deleted);
        assert!(!root.path().join("Workspace/Tmp").exists());
        assert!(root.path().join("Workspace").is_dir());

        let mut names: Vec<String> = fs::read_dir(&snapshot)
            .expect("read snapshot")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Config.txt", "Image.jpg", "TestFile.txt"]);
        assert_eq!(
            fs::read_to_string(snapshot.join("TestFile.txt")).expect("read sample"),
            "Hello World"
        );
        assert_eq!(fs::read_dir(&archive).expect("read archive").count(), 1);
    }

    #[test]
    fn settings_change_sample_and_image_names() {
        let root = TestRoot::new().expect("root");
        fs::write(
            &root.paths().settings_path,
            "[sample]\nfile_name = \"Note.md\"\ntext = \"hi\"\n\n[image]\nfile_name = \"Swatch.jpg\"\nsize = 16\n",
        )
        .expect("write settings");

        let orchestrator = Orchestrator::open(root.path()).expect("open");
        let (prepared, report) = orchestrator.prepare().expect("prepare");
        assert_eq!(report.sample.name, "Note");
        assert_eq!(report.sample.extension, ".md");
        assert_eq!(report.sample.size, 2);

        let archive = prepared.archive_at(STAMP).expect("archive");
        assert!(archive.image_path.ends_with("Swatch.jpg"));
    }

    struct CheckingGate<'a> {
        sample: PathBuf,
        called: &'a Cell<bool>,
    }

    impl PhaseGate for CheckingGate<'_> {
        fn wait(&self) -> Result<()> {
            assert!(self.sample.is_file(), "gate reached before setup finished");
            self.called.set(true);
            Ok(())
        }
    }

    #[test]
    fn run_all_waits_between_phases() {
        let root = TestRoot::new().expect("root");
        let called = Cell::new(false);
        let gate = CheckingGate {
            sample: root.path().join("Workspace/Tmp/SaveData/TestFile.txt"),
            called: &called,
        };

        let (_, archive) = run_all(root.orchestrator(), &gate).expect("run");

        assert!(called.get());
        assert_eq!(archive.stamp.len(), 14);
        assert!(archive.archived_to.is_some());
    }

    #[test]
    fn run_all_with_open_gate_completes() {
        let root = TestRoot::new().expect("root");
        let (prepare, archive) = run_all(root.orchestrator(), &OpenGate).expect("run");
        assert!(prepare.config_created);
        assert!(archive.tmp_deleted);
    }
}
