//! Unit tests for profile bootstrapping.
