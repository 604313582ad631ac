//! Content hashing and randomness shared across the project

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use aws_lc_rs::digest::{SHA256, SHA256_OUTPUT_LEN, digest};
use data_encoding::HEXLOWER;

#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    #[error("reading content: {0}")]
    Read(#[from] std::io::Error),
}

/// SHA-256 fingerprint of a file's raw bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ContentHash([u8; SHA256_OUTPUT_LEN]);

impl ContentHash {
    pub fn of_bytes(data: &[u8]) -> Self {
        let digest = digest(&SHA256, data);
        let mut value = [0u8; SHA256_OUTPUT_LEN];
        value.copy_from_slice(digest.as_ref());
        Self(value)
    }

    /// Reads `reader` to the end, then hashes everything that was read.
    pub fn of_reader<R: Read>(mut reader: R) -> Result<Self, DigestError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::of_bytes(&data))
    }

    pub fn of_file(path: impl AsRef<Path>) -> Result<Self, DigestError> {
        let file = File::open(path)?;
        Self::of_reader(file)
    }

    /// Lowercase hex, two characters per byte
    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.0
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Generate cryptographically secure random bytes
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut val = [0u8; N];
    aws_lc_rs::rand::fill(&mut val).expect("should be infallible");
    val
}

#[cfg(test)]
mod tests {
    use std::io::{self, ErrorKind};

    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(
            ContentHash::of_bytes(&[0x00, 0x01, 0x02]).to_hex(),
            "ae4b3280e56e2faf83f414a6e3dabe9d5fbe18976544c05fed121accb85b53fc"
        );
        assert_eq!(
            ContentHash::of_bytes(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            ContentHash::of_bytes(b"abc").to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hex_is_even_lowercase_and_deterministic() {
        let inputs: [&[u8]; 4] = [b"", b"\x00", b"\xff\xfe\xfd", &[0x5a; 4096]];

        for input in inputs {
            let first = ContentHash::of_bytes(input).to_hex();
            let second = ContentHash::of_bytes(input).to_hex();

            assert_eq!(first, second);
            assert_eq!(first.len() % 2, 0);
            assert_eq!(first.len(), 64);
            assert!(first.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn input_is_not_modified() {
        let data = vec![0x10u8, 0x20, 0x30];
        let copy = data.clone();
        let _ = ContentHash::of_bytes(&data);
        assert_eq!(data, copy);
    }

    #[test]
    fn reader_matches_bytes() {
        let data = b"the quick brown fox".to_vec();
        let from_reader = ContentHash::of_reader(data.as_slice()).unwrap();
        assert_eq!(from_reader, ContentHash::of_bytes(&data));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn read_failures_surface() {
        match ContentHash::of_reader(FailingReader) {
            Err(DigestError::Read(e)) => assert_eq!(e.kind(), ErrorKind::PermissionDenied),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("stamps-common-no-such-file");
        assert!(matches!(
            ContentHash::of_file(path),
            Err(DigestError::Read(_))
        ));
    }

    #[test]
    fn test_random_bytes() {
        let bytes1 = random_bytes::<32>();
        let bytes2 = random_bytes::<32>();

        // Should be different (extremely high probability)
        assert_ne!(bytes1, bytes2);
    }
}
