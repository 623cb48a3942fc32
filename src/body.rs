//! Reception of a request body into a fixed buffer.

use embedded_svc::io::{Error as _, ErrorKind, Read};

/// Size of the buffer `/setinfo` bodies are received into.
pub const BODY_BUFFER_LEN: usize = 512;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("body of {len} bytes does not fit into a {capacity} byte buffer")]
    TooLarge { len: usize, capacity: usize },
    #[error("connection closed after {received} of {expected} bytes")]
    ShortRead { received: usize, expected: usize },
    #[error("read failed: {0:?}")]
    Io(ErrorKind),
    #[error("body is not valid UTF-8")]
    Utf8,
}

impl BodyError {
    /// HTTP status answering a request whose body failed with this error.
    /// Only an incomplete read is the server's fault.
    pub fn status(&self) -> u16 {
        match self {
            BodyError::TooLarge { .. } => 413,
            BodyError::Utf8 => 400,
            BodyError::ShortRead { .. } | BodyError::Io(_) => 500,
        }
    }
}

/// Reads exactly `content_len` bytes from `reader` into `buf`.
///
/// The connection may deliver the body in several chunks; each chunk is
/// appended after the previous one.
pub fn receive_body<'b, R>(
    reader: &mut R,
    content_len: usize,
    buf: &'b mut [u8],
) -> Result<&'b str, BodyError>
where
    R: Read,
{
    if content_len > buf.len() {
        return Err(BodyError::TooLarge {
            len: content_len,
            capacity: buf.len(),
        });
    }

    let mut received = 0;
    while received < content_len {
        match reader.read(&mut buf[received..content_len]) {
            Ok(0) => {
                return Err(BodyError::ShortRead {
                    received,
                    expected: content_len,
                })
            }
            Ok(n) => received += n,
            Err(e) => return Err(BodyError::Io(e.kind())),
        }
    }

    std::str::from_utf8(&buf[..received]).map_err(|_| BodyError::Utf8)
}
