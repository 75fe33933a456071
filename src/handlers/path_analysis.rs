use std::borrow::Cow;

use crate::{
    category::Category,
    error::{ApiErrorKind, ApiResult},
    storage::{FileHandle, Storage},
};

pub(crate) const FILE_ROUTE_PREFIX: &str = "/api/file";

/// A validated download request: the category and the decoded file name.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FileTarget {
    pub(crate) category: Category,
    pub(crate) name: String,
}

impl FileTarget {
    /// Validate the raw category token and the raw (percent-encoded) name.
    ///
    /// The name is decoded and checked for traversal tokens first, so a
    /// traversal attempt is rejected whatever the category token says.
    pub(crate) fn parse(category: &str, raw_name: &str) -> ApiResult<Self> {
        if raw_name.is_empty() {
            return Err(ApiErrorKind::MissingFilename);
        }

        let name = decode_filename(raw_name);
        check_filename(&name)?;

        let category = Category::from_token(category)?;

        Ok(Self { category, name })
    }
}

/// Split `/api/file/<category>/<rest>` into the raw category token and the
/// raw remainder. Everything after the category, slashes included, is the
/// file name.
pub(crate) fn decompose_path(path: &str) -> ApiResult<(&str, &str)> {
    let rest = path
        .strip_prefix(FILE_ROUTE_PREFIX)
        .unwrap_or(path)
        .trim_start_matches('/');
    let (category, name) = rest.split_once('/').unwrap_or((rest, ""));
    tracing::debug!("[decompose_path] category = {category:?}, name = {name:?}");

    if category.is_empty() {
        return Err(ApiErrorKind::MissingFilename);
    }
    Ok((category, name))
}

/// Percent-decode a path segment. Anything that does not decode to valid
/// UTF-8 is used as it came in.
pub(crate) fn decode_filename(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), Cow::into_owned)
}

/// Reject names that could leave the base directory before touching the
/// filesystem at all.
pub(crate) fn check_filename(name: &str) -> ApiResult<()> {
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        tracing::debug!("[check_filename] rejected {name:?}");
        return Err(ApiErrorKind::InvalidFilename);
    }
    Ok(())
}

/// Resolve a raw category token and raw file name to a servable file.
pub(crate) fn resolve_target<S: Storage>(
    storage: &S,
    category: &str,
    raw_name: &str,
) -> ApiResult<FileHandle> {
    let target = FileTarget::parse(category, raw_name)?;
    storage.resolve(target.category, &target.name)
}
