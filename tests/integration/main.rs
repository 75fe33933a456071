//! Integration tests for the `exam-server` binary

mod _impl;
mod acceptance;
