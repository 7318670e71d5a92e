//! Property-based tests for addressing, root ids and ordering
