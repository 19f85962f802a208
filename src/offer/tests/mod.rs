//! Unit tests for the offer lifecycle.
