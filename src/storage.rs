//! Access to the exam and answer-key directories

use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    category::Category,
    error::{ApiErrorKind, ApiResult, AppResult, ErrorKind},
};

/// The two directories files are served from.
///
/// Both paths are absolute and lexically normalized. They are fixed when the
/// server starts and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseDirs {
    exams: PathBuf,
    answer_keys: PathBuf,
}

impl BaseDirs {
    /// Resolve the configured directories against `project_root`.
    ///
    /// Relative paths are joined onto the project root, relative project
    /// roots onto the current working directory.
    pub fn new(
        project_root: &Path,
        exams: impl AsRef<Path>,
        answer_keys: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let root = absolute_path(project_root)?;
        Ok(Self {
            exams: normalize_path(&root.join(exams)),
            answer_keys: normalize_path(&root.join(answer_keys)),
        })
    }

    /// Base directory of `category`
    pub fn get(&self, category: Category) -> &Path {
        match category {
            Category::Exams => &self.exams,
            Category::AnswerKeys => &self.answer_keys,
        }
    }
}

/// A file that passed every check and may be sent to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    /// Absolute path inside the base directory
    pub path: PathBuf,
    /// File name as requested by the client (decoded)
    pub name: String,
    /// Size in bytes at the time of the lookup
    pub len: u64,
    /// MIME type derived from the file extension
    pub content_type: &'static str,
}

/// Read-only access to the files of both categories
pub trait Storage: Send + Sync + Clone + std::fmt::Debug + 'static {
    /// Build the storage from resolved base directories and an optional listing filter.
    fn init(dirs: BaseDirs, list_extension: Option<&str>) -> AppResult<Self>;

    /// Base directory of `category`
    fn base_dir(&self, category: Category) -> &Path;

    /// Names of the files listed for `category`, sorted case-insensitively.
    fn read_dir(&self, category: Category) -> ApiResult<Vec<String>>;

    /// Map a validated file name to a file inside the category's directory.
    ///
    /// `name` must already be decoded and free of separators and `..`.
    fn resolve(&self, category: Category, name: &str) -> ApiResult<FileHandle>;
}

/// Local storage, reading straight from the configured directories
#[derive(Clone, Debug)]
pub struct LocalStorage {
    dirs: BaseDirs,
    list_extension: Option<String>,
}

impl Storage for LocalStorage {
    fn init(dirs: BaseDirs, list_extension: Option<&str>) -> AppResult<Self> {
        for category in [Category::Exams, Category::AnswerKeys] {
            let dir = dirs.get(category);
            if dir.exists() && !dir.is_dir() {
                return Err(ErrorKind::Config
                    .context(format!(
                        "Directory for `{category}` is not a directory: `{}`",
                        dir.display()
                    ))
                    .into());
            }
            if !dir.exists() {
                warn!(
                    "Directory for `{category}` does not exist: `{}`. Listings will be empty.",
                    dir.display()
                );
            }
        }

        let list_extension = list_extension
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty());

        Ok(Self {
            dirs,
            list_extension,
        })
    }

    fn base_dir(&self, category: Category) -> &Path {
        self.dirs.get(category)
    }

    fn read_dir(&self, category: Category) -> ApiResult<Vec<String>> {
        list_dir(self.base_dir(category), self.list_extension.as_deref())
    }

    fn resolve(&self, category: Category, name: &str) -> ApiResult<FileHandle> {
        let base = self.base_dir(category);
        let path = normalize_path(&base.join(name));

        if !is_contained(base, &path) {
            warn!(
                "[resolve] `{}` escapes base directory `{}`",
                path.display(),
                base.display()
            );
            return Err(ApiErrorKind::PathEscape);
        }

        let metadata = fs::metadata(&path).map_err(|err| {
            debug!("[resolve] no metadata for `{}`: {err}", path.display());
            ApiErrorKind::NotFound
        })?;
        if !metadata.is_file() {
            return Err(ApiErrorKind::NotFound);
        }

        Ok(FileHandle {
            path,
            name: name.to_string(),
            len: metadata.len(),
            content_type: content_type_for(name),
        })
    }
}

/// List the regular files directly inside `dir`.
///
/// A missing directory, or a path that is not a directory, yields an empty
/// list. Symlinks are followed, so a link to a file is listed and a link to
/// a directory is not. With `extension` set (lowercase, without the dot),
/// only names ending in `.<extension>` are kept, ignoring case.
pub fn list_dir(dir: &Path, extension: Option<&str>) -> ApiResult<Vec<String>> {
    if !dir.is_dir() {
        debug!("[list_dir] `{}` is not a directory", dir.display());
        return Ok(Vec::new());
    }

    let suffix = extension.map(|ext| format!(".{ext}"));
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| ApiErrorKind::ListingFailed(err.to_string()))?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!("[list_dir] skipping non-unicode name {:?}", entry.file_name());
            continue;
        };
        if let Some(suffix) = &suffix {
            if !name.to_lowercase().ends_with(suffix.as_str()) {
                continue;
            }
        }
        names.push(name.to_string());
    }

    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    Ok(names)
}

/// MIME type for a file name, looked up by extension (case-insensitive).
pub fn content_type_for(name: &str) -> &'static str {
    let name = name.to_lowercase();
    if name.ends_with(".pdf") {
        "application/pdf"
    } else if name.ends_with(".png") {
        "image/png"
    } else if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

/// Lexically normalize `path`: drop `.` segments and fold `..` into the
/// preceding segment. `..` directly below the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    let _ = normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Make `path` absolute against the current working directory and normalize it.
pub fn absolute_path(path: &Path) -> AppResult<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|err| {
                ErrorKind::Io.context(format!("Could not determine working directory: {err}"))
            })?
            .join(path)
    };
    Ok(normalize_path(&path))
}

/// `true` if `candidate` lies strictly below `base`.
///
/// Compared by path components, so `/srv/examsX/a.pdf` is not inside `/srv/exams`.
pub fn is_contained(base: &Path, candidate: &Path) -> bool {
    candidate != base && candidate.starts_with(base)
}
