//! Service layer for the movie catalog.
//! - `storage` owns the on-disk JSON array.
//! - `repository` is the seam the catalog talks to.
//! - `movies` holds the catalog operations and their error messages.

pub mod errors;
pub mod storage;
pub mod repository;
pub mod movies;
#[cfg(test)]
pub mod test_support;
