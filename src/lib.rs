//! Workspace tooling package. Holds the pre-commit hook configuration only;
//! the library lives in `crates/roadroute-lib` and the CLI in `crates/roadroute-cli`.
