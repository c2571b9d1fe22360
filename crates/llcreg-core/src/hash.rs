//! Fingerprints of resolved layouts.
//!
//! The fingerprint is the SHA-256 of a value's JSON serialization. Every
//! artifact rendered from one layout carries it, so outputs generated from
//! different parameter sets can be told apart at a glance.

use std::io;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Raw SHA-256 digest.
pub type LayoutDigest = [u8; 32];

/// Feeds serialized bytes straight into the hasher.
struct DigestWriter(Sha256);

impl io::Write for DigestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Digest of the JSON serialization of `value`.
pub fn content_hash<T: Serialize>(value: &T) -> LayoutDigest {
    let mut writer = DigestWriter(Sha256::new());
    serde_json::to_writer(&mut writer, value).expect("layout types serialize without maps");
    writer.0.finalize().into()
}

/// Lowercase hex of a digest.
pub fn hash_hex(digest: &LayoutDigest) -> String {
    digest.iter().fold(String::with_capacity(64), |mut out, b| {
        out.push_str(&format!("{b:02x}"));
        out
    })
}
