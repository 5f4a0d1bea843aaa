use anyhow::Result;
use base64ct::{Base64, Encoding};
use futures::stream::TryStreamExt;
use ring::{
    digest,
    digest::{Context, SHA256},
    hmac,
};
use std::{fmt::Write, path::Path};
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

/// Single pass over the file returning its SHA-256, MD5 and length, needed to
/// sign a `PutObject` before streaming the body.
///
/// # Errors
///
/// Will return `Err` if can not open the file
pub async fn sha256_md5_digest(file_path: &Path) -> Result<(digest::Digest, [u8; 16], usize)> {
    let file = File::open(file_path).await?;
    let mut stream = FramedRead::with_capacity(file, BytesCodec::new(), 1024 * 256);
    let mut context_sha = Context::new(&SHA256);
    let mut context_md5 = md5::Context::new();
    let mut length: usize = 0;
    while let Some(bytes) = stream.try_next().await? {
        context_sha.update(&bytes);
        context_md5.consume(&bytes);
        length += bytes.len();
    }
    let digest_sha = context_sha.finish();
    let digest_md5 = context_md5.finalize().0;
    Ok((digest_sha, digest_md5, length))
}

#[must_use]
pub fn sha256_digest(input: impl AsRef<[u8]>) -> digest::Digest {
    digest::digest(&digest::SHA256, input.as_ref())
}

#[must_use]
pub fn sha256_digest_string(input: impl AsRef<[u8]>) -> String {
    write_hex_bytes(sha256_digest(input).as_ref())
}

#[must_use]
pub fn md5_digest(input: impl AsRef<[u8]>) -> [u8; 16] {
    md5::compute(input).0
}

#[must_use]
pub fn base64(input: impl AsRef<[u8]>) -> String {
    Base64::encode_string(input.as_ref())
}

#[must_use]
pub fn sha256_hmac(key: &[u8], msg: &[u8]) -> hmac::Tag {
    let s_key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::sign(&s_key, msg)
}

#[must_use]
pub fn write_hex_bytes(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // writing into a String never fails
        write!(&mut s, "{byte:02x}").ok();
    }
    s
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_sha256_md5_digest() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        let (digest_sha, digest_md5, length) = sha256_md5_digest(file.path()).await.unwrap();
        assert_eq!(
            write_hex_bytes(digest_sha.as_ref()),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(
            write_hex_bytes(digest_md5.as_ref()),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
        assert_eq!(length, 11);
    }

    #[tokio::test]
    async fn test_sha256_md5_digest_missing_file() {
        assert!(
            sha256_md5_digest(Path::new("/this/file/does/not/exist"))
                .await
                .is_err()
        );
    }

    #[test]
    fn test_sha256_digest_string() {
        assert_eq!(
            sha256_digest_string(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_base64_md5() {
        assert_eq!(base64(md5_digest(b"hello world")), "XrY7u+Ae7tCTyyK7j1rNww==");
    }

    #[test]
    fn test_sha256_hmac() {
        let tag = sha256_hmac(b"key", b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            write_hex_bytes(tag.as_ref()),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_write_hex_bytes() {
        assert_eq!(write_hex_bytes(b"hello world"), "68656c6c6f20776f726c64");
        assert_eq!(write_hex_bytes(&[0x00, 0x0f, 0xff]), "000fff");
        assert_eq!(write_hex_bytes(&[]), "");
    }
}
