//! Integration tests for the command router

mod dispatch;
mod env_overrides;
mod test_utils;
