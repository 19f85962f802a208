//! Unit tests for the task context.
