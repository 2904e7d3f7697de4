//! Unit test suites for the workflow module.
