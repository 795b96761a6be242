//! Filesystem backend for the credit-card request ledger.
//!
//! Every request is a single-line text file named `{oib}_{epochMillis}.txt`
//! under one root directory. The file name doubles as the index: listing a
//! subject's requests is a prefix scan of the directory.

mod ledger;

pub mod error;

pub use error::{Error, Result};
pub use ledger::FsLedger;
