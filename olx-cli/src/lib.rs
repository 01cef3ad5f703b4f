//! Library half of the `olx` binary, shared with its integration tests.

pub mod inspect;
