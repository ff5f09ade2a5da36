//! Hashing utilities

use std::fmt::Write;
use std::io::{self, Read};
use std::path::Path;

/// Calculate the MD5 hash of a file as 32 uppercase hex characters (streaming for large files)
pub fn md5_file(path: &Path) -> io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = md5::Context::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.consume(&buffer[..bytes_read]);
    }

    let digest = hasher.compute();
    // MD5 = 16 bytes = 32 hex chars
    let mut hex = String::with_capacity(32);
    for b in digest.iter() {
        let _ = write!(hex, "{b:02X}");
    }
    Ok(hex)
}

/// Whether `value` is a 32-character hex digest (either case)
#[must_use]
pub fn is_md5_hash(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_md5_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        std::fs::write(&path, "test").unwrap();
        assert_eq!(md5_file(&path).unwrap(), "098F6BCD4621D373CADE4E832627B4F6");
    }

    #[test]
    fn test_md5_file_missing() {
        let temp = TempDir::new().unwrap();
        assert!(md5_file(&temp.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_is_md5_hash() {
        assert!(is_md5_hash("098F6BCD4621D373CADE4E832627B4F6"));
        assert!(is_md5_hash("098f6bcd4621d373cade4e832627b4f6"));
        assert!(!is_md5_hash("098F6BCD"));
        assert!(!is_md5_hash("ZZ8F6BCD4621D373CADE4E832627B4F6"));
    }
}
