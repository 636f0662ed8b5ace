#![deny(unsafe_code)]

pub mod cache;
pub mod error;
pub mod hash;
pub mod loaders;
pub mod manifest;
pub mod paths;
pub mod source;

pub use crate::cache::{CodeListCache, CodeMatch, CodeSet, MULTI_VALUE_SEPARATOR};
pub use crate::error::StandardsError;
pub use crate::loaders::{VerifySummary, verify_and_load};
pub use crate::paths::{REFERENCE_ENV_VAR, reference_root};
pub use crate::source::{
    CodeEntry, CountyEntry, CsvReferenceSource, InMemoryReferenceSource, ReferenceSource,
    StateEntry,
};
