// web server response handler modules
pub(crate) mod fallback;
pub(crate) mod file_exchange;
pub(crate) mod files_list;
pub(crate) mod health;

// Support modules
pub(crate) mod file_helpers;
pub(crate) mod path_analysis;
