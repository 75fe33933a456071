//! Main entry point for `ExamServer`

#![deny(warnings, missing_docs, trivial_casts, unused_qualifications)]
#![forbid(unsafe_code)]

use exam_server::application::EXAM_SERVER_APP;

/// Boot `ExamServer`
fn main() {
    abscissa_core::boot(&EXAM_SERVER_APP);
}
