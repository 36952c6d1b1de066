//! Workspace-level integration tests for SortViz live in `tests/`.
