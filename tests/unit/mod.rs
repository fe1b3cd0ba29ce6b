/// Unit tests for the public API of the habit analytics crate
mod basic_tests;
mod snapshot_tests;
