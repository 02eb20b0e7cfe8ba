//! Test support shared by the seed extractor's integration tests.

pub mod mock_node;
