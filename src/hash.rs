//! Streaming content hashes for files
//!
//! Files are read through the digest incrementally, so memory use does not
//! grow with file size.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tracing::trace;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Lowercase algorithm name, as used in logs.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

/// Hash the full contents of a file and return the lowercase hex digest.
///
/// The file handle is dropped before returning on both success and failure.
/// A read error mid-stream yields `Err` and no digest.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> io::Result<String> {
    let digest = match algorithm {
        HashAlgorithm::Md5 => digest_file::<Md5>(path)?,
        HashAlgorithm::Sha1 => digest_file::<Sha1>(path)?,
        HashAlgorithm::Sha256 => digest_file::<Sha256>(path)?,
    };
    trace!(path = %path.display(), algorithm = algorithm.name(), %digest, "hashed file");
    Ok(digest)
}

fn digest_file<D: Digest + Write>(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = D::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
