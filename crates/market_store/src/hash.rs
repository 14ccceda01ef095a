//! Streaming SHA-256 content hashing.

use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Chunk size for streamed hashing; bounds memory for large datasets.
const CHUNK_SIZE: usize = 8192;

/// Computes the hex-encoded SHA-256 digest of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Computes the hex-encoded SHA-256 digest of a reader, streamed in
/// fixed-size chunks.
pub fn sha256_stream<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// A reader adapter that hashes everything read through it.
///
/// Lets the store compute the content digest in the same pass that copies
/// bytes into the blob store, so large datasets are never buffered whole.
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
    bytes_read: u64,
}

impl<R: Read> HashingReader<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes_read: 0,
        }
    }

    /// Consumes the adapter, returning the hex digest and byte count of
    /// everything read so far.
    pub fn finalize(self) -> (String, u64) {
        (hex::encode(self.hasher.finalize()), self.bytes_read)
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes_read += n as u64;
        Ok(n)
    }
}
