//! OpenFOAM case directories.
//!
//! A [`Case`] owns a directory with the standard `0`, `constant` and `system`
//! subdirectories. Dictionaries inside it are edited with scoped
//! read-modify-write access: the current contents are parsed, handed to a
//! closure, and written back with a `FoamFile` header.
//!
//! ```no_run
//! use firefish::case::{Case, FileClass, FileName};
//! use firefish::dict::Dict;
//!
//! # fn main() -> Result<(), firefish::case::CaseError> {
//! let case = Case::create_new("cavity")?;
//! case.mutable_data_file(FileName::TurbulenceProperties, FileClass::Dictionary, |d| {
//!     d.update(Dict::new().with("simulationType", "laminar"));
//! })?;
//! case.run_tool("blockMesh", &[])?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod field;
mod file_name;
mod tool;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::dict::{self, Dict, DictHeader};

pub use config::CaseConfig;
pub use error::CaseError;
pub use field::InitialField;
pub use file_name::{FileClass, FileName};

/// Subdirectories every case is created with.
const CASE_DIRS: [&str; 3] = ["0", "constant", "system"];

/// Suffix for a path set aside while [`Case::move_path`] replaces it.
const REPLACED_SUFFIX: &str = ".replaced";

/// Entry that holds the file header once a dictionary is parsed.
const HEADER_KEY: &str = "FoamFile";

/// An OpenFOAM case directory on disk.
#[derive(Debug, Clone)]
pub struct Case {
    root: PathBuf,
    config: CaseConfig,
}

impl Case {
    /// Opens the case at `root`, creating it and its standard subdirectories
    /// if they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if a directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CaseError> {
        Self::with_config(root, CaseConfig::default())
    }

    /// Like [`Case::new`], with explicit tool settings.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if a directory cannot be created.
    pub fn with_config(root: impl Into<PathBuf>, config: CaseConfig) -> Result<Self, CaseError> {
        let root = root.into();
        for dir in CASE_DIRS {
            let path = root.join(dir);
            fs::create_dir_all(&path).map_err(CaseError::io(&path))?;
        }
        tracing::debug!(root = %root.display(), "opened case");
        Ok(Self { root, config })
    }

    /// Creates a case at `root`, refusing to touch a path that already exists.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Exists`] if `root` exists, or [`CaseError::Io`]
    /// if a directory cannot be created.
    pub fn create_new(root: impl Into<PathBuf>) -> Result<Self, CaseError> {
        let root = root.into();
        if root.exists() {
            return Err(CaseError::Exists { path: root });
        }
        Self::new(root)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config(&self) -> &CaseConfig {
        &self.config
    }

    /// Resolves a path relative to the case root.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Reads and parses the dictionary at `file`, without its header.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if the file cannot be read, or
    /// [`CaseError::Parse`] if its contents are malformed.
    pub fn read_data_file(&self, file: impl AsRef<Path>) -> Result<Option<Dict>, CaseError> {
        let path = self.path(file);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(CaseError::io(&path))?;
        let mut dict = dict::parse(&text).map_err(|source| CaseError::Parse {
            path: path.clone(),
            source,
        })?;
        dict.remove(HEADER_KEY);
        Ok(Some(dict))
    }

    /// Gives `edit` mutable access to the dictionary at `file` and writes the
    /// result back.
    ///
    /// A missing file starts out as an empty dictionary. The `class` is used
    /// for the header written with the file.
    ///
    /// # Errors
    ///
    /// Returns a [`CaseError`] if the existing file cannot be read or the
    /// result cannot be written.
    pub fn mutable_data_file<F, R>(
        &self,
        file: impl AsRef<Path>,
        class: FileClass,
        edit: F,
    ) -> Result<R, CaseError>
    where
        F: FnOnce(&mut Dict) -> R,
    {
        self.try_mutable_data_file(file, class, |dict| Ok::<_, CaseError>(edit(dict)))
    }

    /// Like [`Case::mutable_data_file`], for edits that can fail.
    ///
    /// Nothing is written if `edit` returns an error.
    ///
    /// # Errors
    ///
    /// Returns the error from `edit`, or a [`CaseError`] converted into `E`
    /// if reading or writing fails.
    pub fn try_mutable_data_file<F, R, E>(
        &self,
        file: impl AsRef<Path>,
        class: FileClass,
        edit: F,
    ) -> Result<R, E>
    where
        F: FnOnce(&mut Dict) -> Result<R, E>,
        E: From<CaseError>,
    {
        let file = file.as_ref();
        let mut dict = self.read_data_file(file)?.unwrap_or_default();
        let result = edit(&mut dict)?;
        self.write_data_file(file, class, &dict)?;
        Ok(result)
    }

    /// Merges `entries` into the dictionary at `file`.
    ///
    /// # Errors
    ///
    /// See [`Case::mutable_data_file`].
    pub fn update_data_file(
        &self,
        file: impl AsRef<Path>,
        class: FileClass,
        entries: Dict,
    ) -> Result<(), CaseError> {
        self.mutable_data_file(file, class, |dict| dict.update(entries))
    }

    /// Replaces the dictionary at `file` with `dict`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if the file or its parent directory cannot
    /// be written.
    pub fn write_data_file(
        &self,
        file: impl AsRef<Path>,
        class: FileClass,
        dict: &Dict,
    ) -> Result<(), CaseError> {
        let file = file.as_ref();
        let path = self.path(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(CaseError::io(parent))?;
        }

        let header = DictHeader {
            class: class.as_str().to_string(),
            location: file
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(|parent| parent.to_string_lossy().into_owned()),
            object: file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        fs::write(&path, header.render_file(dict)).map_err(CaseError::io(&path))?;
        tracing::debug!(path = %path.display(), entries = dict.len(), "wrote dictionary");
        Ok(())
    }

    /// Deletes a file or directory inside the case. Missing paths are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if the removal fails.
    pub fn remove_path(&self, relative: impl AsRef<Path>) -> Result<(), CaseError> {
        remove_existing(&self.path(relative))
    }

    /// Moves `from` to `to` inside the case, replacing anything already at `to`.
    ///
    /// An existing `to` is set aside first and only deleted once the move has
    /// succeeded, so a failed move leaves both paths as they were.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if `from` does not exist or the move fails.
    pub fn move_path(
        &self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
    ) -> Result<(), CaseError> {
        let source = self.path(from);
        let target = self.path(to);
        if !source.exists() {
            return Err(CaseError::io(&source)(io::ErrorKind::NotFound.into()));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(CaseError::io(parent))?;
        }

        let backup = target.exists().then(|| {
            let mut name = target.file_name().unwrap_or_default().to_os_string();
            name.push(REPLACED_SUFFIX);
            target.with_file_name(name)
        });
        if let Some(backup) = &backup {
            remove_existing(backup)?;
            fs::rename(&target, backup).map_err(CaseError::io(&target))?;
        }

        if let Err(source_error) = fs::rename(&source, &target) {
            if let Some(backup) = &backup {
                fs::rename(backup, &target).map_err(CaseError::io(backup))?;
            }
            return Err(CaseError::io(&source)(source_error));
        }
        if let Some(backup) = &backup {
            remove_existing(backup)?;
        }

        tracing::debug!(from = %source.display(), to = %target.display(), "moved");
        Ok(())
    }

    /// Lists the numeric time directories of the case in ascending order.
    ///
    /// Names that parse as non-finite numbers, such as `inf` or `nan`, are
    /// not time directories.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if the case root cannot be listed.
    pub fn time_dirs(&self) -> Result<Vec<String>, CaseError> {
        let entries = fs::read_dir(&self.root).map_err(CaseError::io(&self.root))?;
        let mut times = Vec::new();
        for entry in entries {
            let entry = entry.map_err(CaseError::io(&self.root))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Ok(time) = name.parse::<f64>()
                && time.is_finite()
            {
                times.push((time, name));
            }
        }
        times.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(times.into_iter().map(|(_, name)| name).collect())
    }
}

fn remove_existing(path: &Path) -> Result<(), CaseError> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        return Ok(());
    };
    result.map_err(CaseError::io(path))?;
    tracing::debug!(path = %path.display(), "removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dict::Value;

    fn scratch_case() -> (tempfile::TempDir, Case) {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path().join("case")).unwrap();
        (dir, case)
    }

    #[test]
    fn creates_standard_directories() {
        let (_dir, case) = scratch_case();
        for sub in CASE_DIRS {
            assert!(case.path(sub).is_dir(), "{sub} missing");
        }
    }

    #[test]
    fn create_new_refuses_existing_path() {
        let (_dir, case) = scratch_case();
        let error = Case::create_new(case.root()).unwrap_err();
        assert!(matches!(error, CaseError::Exists { .. }));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let (_dir, case) = scratch_case();
        assert!(case.read_data_file(FileName::Control).unwrap().is_none());
    }

    #[test]
    fn read_modify_write_merges_entries() {
        let (_dir, case) = scratch_case();

        case.update_data_file(
            FileName::Control,
            FileClass::Dictionary,
            Dict::new().with("application", "rhoCentralFoam").with("endTime", 10),
        )
        .unwrap();
        case.mutable_data_file(FileName::Control, FileClass::Dictionary, |d| {
            d.insert("endTime", 20);
            d.insert("deltaT", 0.001);
        })
        .unwrap();

        let dict = case.read_data_file(FileName::Control).unwrap().unwrap();
        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, ["application", "endTime", "deltaT"]);
        assert_eq!(dict.get("endTime"), Some(&Value::Int(20)));
    }

    #[test]
    fn header_records_class_and_location() {
        let (_dir, case) = scratch_case();
        case.update_data_file("0/U", FileClass::VectorField3d, Dict::new().with("a", 1))
            .unwrap();

        let text = fs::read_to_string(case.path("0/U")).unwrap();
        assert!(text.contains("class           volVectorField;"));
        assert!(text.contains("location        \"0\";"));
        assert!(text.contains("object          U;"));
    }

    #[test]
    fn failed_edit_writes_nothing() {
        let (_dir, case) = scratch_case();

        let result = case.try_mutable_data_file(
            FileName::FvSchemes,
            FileClass::Dictionary,
            |d| -> Result<(), CaseError> {
                d.insert("ddtSchemes", Dict::new());
                Err(CaseError::Exists {
                    path: PathBuf::from("x"),
                })
            },
        );

        assert!(result.is_err());
        assert!(!case.path(FileName::FvSchemes).exists());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let (_dir, case) = scratch_case();
        fs::write(case.path(FileName::FvSolution), "solvers {").unwrap();

        let error = case.read_data_file(FileName::FvSolution).unwrap_err();
        assert!(matches!(error, CaseError::Parse { .. }));
    }

    #[test]
    fn move_replaces_target_and_time_dirs_sort_numerically() {
        let (_dir, case) = scratch_case();
        for time in ["0.001", "0.002", "10"] {
            fs::create_dir_all(case.path(time).join("polyMesh")).unwrap();
        }
        fs::create_dir_all(case.path("constant/polyMesh")).unwrap();
        fs::write(case.path("0.002/polyMesh/points"), "final").unwrap();

        assert_eq!(case.time_dirs().unwrap(), ["0", "0.001", "0.002", "10"]);

        case.move_path("0.002/polyMesh", "constant/polyMesh").unwrap();
        let moved = fs::read_to_string(case.path("constant/polyMesh/points")).unwrap();
        assert_eq!(moved, "final");

        case.remove_path("0.001").unwrap();
        case.remove_path("does-not-exist").unwrap();
        assert!(!case.path("0.001").exists());
    }

    #[test]
    fn failed_move_keeps_existing_target() {
        let (_dir, case) = scratch_case();
        fs::create_dir_all(case.path("constant/polyMesh")).unwrap();
        fs::write(case.path("constant/polyMesh/points"), "block").unwrap();

        let error = case
            .move_path("0.002/polyMesh", "constant/polyMesh")
            .unwrap_err();
        assert!(matches!(error, CaseError::Io { ref source, .. } if source.kind() == io::ErrorKind::NotFound));
        assert_eq!(
            fs::read_to_string(case.path("constant/polyMesh/points")).unwrap(),
            "block"
        );
        assert!(!case.path("constant/polyMesh.replaced").exists());
    }

    #[test]
    fn time_dirs_skip_non_finite_names() {
        let (_dir, case) = scratch_case();
        for name in ["0.5", "inf", "nan", "infinity", "-inf"] {
            fs::create_dir_all(case.path(name)).unwrap();
        }
        assert_eq!(case.time_dirs().unwrap(), ["0", "0.5"]);
    }
}
