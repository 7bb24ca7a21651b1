//! Workspace-level integration tests for wxbench live under `tests/`.
