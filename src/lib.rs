//! exam server
//!
//! Lists the exam papers and answer keys kept in two directories and serves
//! them over a small HTTP API:
//!
//! - `GET /api/health`
//! - `GET /api/exams`, `GET /api/answer-keys`
//! - `GET /api/file/{exams|answer-keys}/{filename}`
//!
//! Application based on the [Abscissa] framework.
//!
//! [Abscissa]: https://github.com/iqlusioninc/abscissa

pub mod application;
pub mod category;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub(crate) mod handlers;
pub mod log;
pub mod prelude;
pub mod state;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod web;
