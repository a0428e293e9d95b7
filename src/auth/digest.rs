//! Password digest computation.

use std::fmt;

use ring::digest;
use serde::Deserialize;

/// One-way hash used for stored password digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// Legacy preference-file format: MD5, lowercase hex.
    #[default]
    Md5,
    /// SHA-256, lowercase hex.
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute the hex digest of `password` with `algorithm`.
pub fn hash_password(algorithm: DigestAlgorithm, password: &str) -> String {
    match algorithm {
        DigestAlgorithm::Md5 => format!("{:x}", md5::compute(password.as_bytes())),
        DigestAlgorithm::Sha256 => {
            hex::encode(digest::digest(&digest::SHA256, password.as_bytes()).as_ref())
        }
    }
}
