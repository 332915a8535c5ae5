//! File-backed INI handle
//!
//! Every operation reads the file, works on a fresh [`Document`] and, for
//! mutations, writes the whole document back. Nothing is cached between calls.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{IniError, Result};
use crate::generator;
use crate::models::{Document, IniValue, Placement, Section};
use crate::parser::{self, FileFormat};
use crate::settings::EditorSettings;
use crate::utils::file::{is_plain_file_name, parent_dir, path_in_dir, sibling_path};
use crate::vfs::{LocalStorage, Storage, VfsError};

/// Handle to one INI (or JSON) file
#[derive(Debug)]
pub struct IniFile<S: Storage = LocalStorage> {
    path: PathBuf,
    storage: S,
    settings: EditorSettings,
}

impl IniFile<LocalStorage> {
    /// Open `path` on the local disk with default settings, creating it if missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_settings(path, EditorSettings::default())
    }

    pub fn open_with_settings(path: impl Into<PathBuf>, settings: EditorSettings) -> Result<Self> {
        let storage = LocalStorage::new(settings.durable_writes);
        IniFile::with_storage(path, storage, settings)
    }
}

impl<S: Storage> IniFile<S> {
    pub fn with_storage(path: impl Into<PathBuf>, storage: S, settings: EditorSettings) -> Result<Self> {
        let file = Self {
            path: path.into(),
            storage,
            settings,
        };
        if !file.storage.exists(&file.path) {
            if !file.settings.create_missing {
                return Err(VfsError::NotFound(file.path.clone()).into());
            }
            create_file(&file.storage, &file.path)?;
        }
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn format(&self) -> FileFormat {
        FileFormat::from_path(&self.path)
    }

    // ---------------------------------------------------------------------
    // Load / save
    // ---------------------------------------------------------------------

    pub fn load(&self) -> Result<Document> {
        let content = self.storage.read_all(&self.path)?;
        parser::parse(&content, self.format())
    }

    pub fn save(&self, document: &Document) -> Result<()> {
        let content = generator::render(document, self.format())?;
        self.storage.write_all(&self.path, &content)?;
        Ok(())
    }

    /// Load, apply `op`, save. Nothing is written when `op` fails.
    pub fn update<T>(&self, action: &str, op: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let mut document = self.load()?;
        let out = op(&mut document)?;
        self.save(&document)?;
        debug!("{} applied to {:?}", action, self.path);
        Ok(out)
    }

    /// Current file contents rendered as INI text
    pub fn to_ini_string(&self) -> Result<String> {
        Ok(generator::to_ini(&self.load()?))
    }

    pub fn export_json(&self) -> Result<String> {
        generator::to_json(&self.load()?)
    }

    /// Replace the whole file with the document described by `json`
    pub fn import_json(&self, json: &str) -> Result<()> {
        let document = parser::parse_json(json)?;
        self.save(&document)?;
        debug!("imported {} sections into {:?}", document.len(), self.path);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn section_names(&self) -> Result<Vec<String>> {
        Ok(self.load()?.section_names().map(str::to_string).collect())
    }

    pub fn has_section(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.has_section(name))
    }

    pub fn has_key(&self, section: &str, key: &str) -> Result<bool> {
        Ok(self.load()?.has_key(section, key))
    }

    pub fn section(&self, name: &str) -> Result<Section> {
        self.load()?.section(name).cloned()
    }

    pub fn value(&self, section: &str, key: &str) -> Result<IniValue> {
        self.load()?.value(section, key).cloned()
    }

    pub fn section_index(&self, name: &str) -> Result<Option<usize>> {
        Ok(self.load()?.section_index(name))
    }

    pub fn key_index(&self, section: &str, key: &str) -> Result<Option<usize>> {
        Ok(self.load()?.key_index(section, key))
    }

    pub fn has_next_section(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.has_next_section(name))
    }

    pub fn has_previous_section(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.has_previous_section(name))
    }

    pub fn next_section(&self, name: &str) -> Result<Option<(String, Section)>> {
        Ok(self
            .load()?
            .next_section(name)
            .map(|(n, s)| (n.to_string(), s.clone())))
    }

    pub fn previous_section(&self, name: &str) -> Result<Option<(String, Section)>> {
        Ok(self
            .load()?
            .previous_section(name)
            .map(|(n, s)| (n.to_string(), s.clone())))
    }

    pub fn has_next_key(&self, section: &str, key: &str) -> Result<bool> {
        Ok(self.load()?.has_next_key(section, key))
    }

    pub fn has_previous_key(&self, section: &str, key: &str) -> Result<bool> {
        Ok(self.load()?.has_previous_key(section, key))
    }

    pub fn next_key(&self, section: &str, key: &str) -> Result<Option<(String, IniValue)>> {
        Ok(self
            .load()?
            .next_key(section, key)
            .map(|(k, v)| (k.to_string(), v.clone())))
    }

    pub fn previous_key(&self, section: &str, key: &str) -> Result<Option<(String, IniValue)>> {
        Ok(self
            .load()?
            .previous_key(section, key)
            .map(|(k, v)| (k.to_string(), v.clone())))
    }

    // ---------------------------------------------------------------------
    // Section mutations
    // ---------------------------------------------------------------------

    pub fn set_section(&self, name: &str) -> Result<()> {
        self.update("set_section", |doc| doc.set_section(name))
    }

    pub fn set_section_with(&self, name: &str, contents: Section) -> Result<()> {
        self.update("set_section_with", |doc| doc.set_section_with(name, contents))
    }

    pub fn remove_section(&self, name: &str) -> Result<Section> {
        self.update("remove_section", |doc| doc.remove_section(name))
    }

    pub fn rename_section(&self, old: &str, new: &str) -> Result<()> {
        let to_end = self.settings.rename_moves_to_end;
        self.update("rename_section", |doc| {
            doc.rename_section(old, new)?;
            if to_end {
                doc.move_section_to_end(new)?;
            }
            Ok(())
        })
    }

    pub fn move_section(&self, name: &str, placement: Placement<'_>) -> Result<()> {
        self.update("move_section", |doc| doc.move_section(name, placement))
    }

    pub fn move_section_before(&self, name: &str, pivot: &str) -> Result<()> {
        self.move_section(name, Placement::Before(pivot))
    }

    pub fn move_section_after(&self, name: &str, pivot: &str) -> Result<()> {
        self.move_section(name, Placement::After(pivot))
    }

    pub fn move_section_to_start(&self, name: &str) -> Result<()> {
        self.move_section(name, Placement::Start)
    }

    pub fn move_section_to_end(&self, name: &str) -> Result<()> {
        self.move_section(name, Placement::End)
    }

    // ---------------------------------------------------------------------
    // Key mutations
    // ---------------------------------------------------------------------

    pub fn set_key(&self, section: &str, key: &str) -> Result<()> {
        self.update("set_key", |doc| doc.set_key(section, key))
    }

    pub fn set_keys<I, K, V>(&self, section: &str, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<IniValue>,
    {
        self.update("set_keys", |doc| doc.set_keys(section, pairs))
    }

    pub fn write_value(&self, section: &str, key: &str, content: impl Into<IniValue>) -> Result<()> {
        self.update("write_value", |doc| doc.write_value(section, key, content))
    }

    pub fn rename_key(&self, section: &str, old: &str, new: &str) -> Result<()> {
        let to_end = self.settings.rename_moves_to_end;
        self.update("rename_key", |doc| {
            doc.rename_key(section, old, new)?;
            if to_end {
                doc.move_key_to_end(section, new)?;
            }
            Ok(())
        })
    }

    pub fn clear_value(&self, section: &str, key: &str) -> Result<()> {
        self.update("clear_value", |doc| doc.clear_value(section, key))
    }

    pub fn remove_key(&self, section: &str, key: &str) -> Result<IniValue> {
        self.update("remove_key", |doc| doc.remove_key(section, key))
    }

    pub fn move_key_to_section(&self, section: &str, key: &str, new_section: &str) -> Result<()> {
        self.update("move_key_to_section", |doc| {
            doc.move_key_to_section(section, key, new_section)
        })
    }

    pub fn move_key(&self, section: &str, key: &str, placement: Placement<'_>) -> Result<()> {
        self.update("move_key", |doc| doc.move_key(section, key, placement))
    }

    pub fn move_key_before(&self, section: &str, key: &str, pivot: &str) -> Result<()> {
        self.move_key(section, key, Placement::Before(pivot))
    }

    pub fn move_key_after(&self, section: &str, key: &str, pivot: &str) -> Result<()> {
        self.move_key(section, key, Placement::After(pivot))
    }

    pub fn move_key_to_start(&self, section: &str, key: &str) -> Result<()> {
        self.move_key(section, key, Placement::Start)
    }

    pub fn move_key_to_end(&self, section: &str, key: &str) -> Result<()> {
        self.move_key(section, key, Placement::End)
    }

    // ---------------------------------------------------------------------
    // File lifecycle
    // ---------------------------------------------------------------------

    /// Rename the file within its directory; the handle follows it
    pub fn rename_file(&mut self, name: &str) -> Result<()> {
        let target = self.plain_sibling(name)?;
        self.storage.rename(&self.path, &target)?;
        info!("Renamed {:?} to {:?}", self.path, target);
        self.path = target;
        Ok(())
    }

    /// Copy the file next to itself under `name`; the handle stays put
    pub fn copy_file(&self, name: &str) -> Result<PathBuf> {
        let target = self.plain_sibling(name)?;
        self.storage.copy(&self.path, &target)?;
        info!("Copied {:?} to {:?}", self.path, target);
        Ok(target)
    }

    /// Move the file into `dir`, creating it if needed; the handle follows it
    pub fn move_to(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let target = path_in_dir(dir, &self.path)
            .ok_or_else(|| IniError::invalid(format!("{:?} has no file name", self.path)))?;
        if target == self.path {
            return Ok(());
        }
        if self.storage.exists(&target) {
            return Err(IniError::invalid(format!("{:?} already exists", target)));
        }
        if !self.storage.exists(dir) {
            self.storage.create_dir_all(dir)?;
        }
        self.storage.rename(&self.path, &target)?;
        info!("Moved {:?} to {:?}", self.path, target);
        self.path = target;
        Ok(())
    }

    fn plain_sibling(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_file_name(name) {
            return Err(IniError::invalid(format!(
                "{:?} is not a plain file name",
                name
            )));
        }
        let target = sibling_path(&self.path, name);
        if self.storage.exists(&target) {
            return Err(IniError::invalid(format!("{:?} already exists", target)));
        }
        Ok(target)
    }
}

/// Create an empty file at `path`, creating missing parent directories first
fn create_file<S: Storage>(storage: &S, path: &Path) -> Result<()> {
    if let Some(parent) = parent_dir(path) {
        if !storage.exists(parent) {
            storage.create_dir_all(parent)?;
        }
    }
    storage.write_all(path, "")?;
    info!("Created {:?}", path);
    Ok(())
}
