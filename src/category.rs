//! Document categories and their route names

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::error::{ApiErrorKind, ApiResult};

/// The kind of document a request refers to.
///
/// Each category is served from its own base directory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
    IntoStaticStr,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Category {
    /// Exam papers
    #[strum(to_string = "exams")]
    Exams,
    /// Answer keys for the exam papers
    // `keys` is what older clients still send
    #[strum(to_string = "answer-keys", serialize = "keys")]
    AnswerKeys,
}

impl Category {
    /// Route name of the category
    pub fn into_str(self) -> &'static str {
        self.into()
    }

    /// Parse the category segment of a request path.
    pub fn from_token(token: &str) -> ApiResult<Self> {
        Self::from_str(token).map_err(|_| ApiErrorKind::UnknownCategory(token.to_string()))
    }
}
