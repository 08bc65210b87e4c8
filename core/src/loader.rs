//! Fetch-once script loader.
//!
//! # Design
//! `import_url(name, url)` keys a cache on `name`: the script lives at
//! `<documents>/<name>.js` in the injected [`Storage`]. If that file is
//! missing it is downloaded once through the [`Transport`] and written; from
//! then on the stored copy is used forever, whatever happens upstream. There
//! is no versioning and no invalidation. Deleting the file is the only way
//! to force a refresh.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::http::{HttpRequest, Transport};

/// Host collaborator for file storage.
///
/// Cloud-synced storage may hold files that are not materialized locally
/// yet; such implementations report `is_cloud_backed` and make
/// `download_from_cloud` block until the file is readable.
pub trait Storage {
    fn documents_directory(&self) -> PathBuf;
    fn file_exists(&self, path: &Path) -> bool;
    fn read_string(&self, path: &Path) -> io::Result<String>;
    fn write_string(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn is_cloud_backed(&self) -> bool {
        false
    }

    /// Whether `path` lives in cloud-synced storage.
    fn is_file_stored_in_cloud(&self, _path: &Path) -> bool {
        false
    }

    fn download_from_cloud(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn documents_directory(&self) -> PathBuf {
        (**self).documents_directory()
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn read_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_string(path)
    }

    fn write_string(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write_string(path, contents)
    }

    fn is_cloud_backed(&self) -> bool {
        (**self).is_cloud_backed()
    }

    fn is_file_stored_in_cloud(&self, path: &Path) -> bool {
        (**self).is_file_stored_in_cloud(path)
    }

    fn download_from_cloud(&self, path: &Path) -> io::Result<()> {
        (**self).download_from_cloud(path)
    }
}

/// Pick the storage the running script itself lives in: `cloud` when
/// `local` reports `script_path` as cloud-stored, `local` otherwise.
pub fn select_storage<'a, S: Storage + ?Sized>(
    local: &'a S,
    cloud: &'a S,
    script_path: &Path,
) -> &'a S {
    if local.is_file_stored_in_cloud(script_path) {
        cloud
    } else {
        local
    }
}

/// A plain directory on the local disk.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Storage for FsStorage {
    fn documents_directory(&self) -> PathBuf {
        self.root.clone()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_string(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

/// A script as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub path: PathBuf,
    pub source: String,
}

#[derive(Debug)]
pub struct ScriptLoader<S, T> {
    storage: S,
    transport: T,
}

impl<S: Storage, T: Transport> ScriptLoader<S, T> {
    pub fn new(storage: S, transport: T) -> Self {
        Self { storage, transport }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Where `name` is cached. `name` is joined unchecked; `import_url`
    /// rejects names that would leave the documents directory.
    pub fn script_path(&self, name: &str) -> PathBuf {
        self.storage
            .documents_directory()
            .join(format!("{name}.js"))
    }

    /// Load `name`, downloading it from `url` only if it is not stored yet.
    ///
    /// The response body is stored as-is; the status code is not checked.
    ///
    /// `name` must be a single path component: empty names, `..`, and names
    /// containing `/` or `\` fail with `InvalidInput` before any I/O.
    pub fn import_url(&self, name: &str, url: &str) -> Result<Script, LoadError> {
        check_name(name)?;
        let path = self.script_path(name);

        if self.storage.file_exists(&path) {
            tracing::debug!(name, path = %path.display(), "script already stored");
        } else {
            tracing::info!(name, url, "downloading script");
            let response = self.transport.execute(HttpRequest::get(url))?;
            self.storage.write_string(&path, &response.body)?;
        }

        if self.storage.is_cloud_backed() {
            self.storage.download_from_cloud(&path)?;
        }

        let source = self.storage.read_string(&path)?;
        Ok(Script {
            name: name.to_string(),
            path,
            source,
        })
    }
}

fn check_name(name: &str) -> io::Result<()> {
    if name.is_empty() || name == ".." || name.contains(['/', '\\']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid script name: {name:?}"),
        ));
    }
    Ok(())
}
