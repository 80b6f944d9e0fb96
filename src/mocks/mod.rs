//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions
//! that allow unit testing without external dependencies.

pub mod contract;
pub mod ipfs;
pub mod storage;
pub mod time;
pub mod wallet;

pub use contract::{ContractCall, MockContract};
pub use ipfs::MockIpfs;
pub use storage::{MockStorage, MockStorageFailure};
pub use time::MockTime;
pub use wallet::{make_test_address, MockWallet};
