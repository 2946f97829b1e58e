//! Integration test harness.

mod helpers;

mod cli_test;
mod marks_file_test;
