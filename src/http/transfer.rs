//! File-to-connection transfer.
//!
//! [`FileSource::transfer_to`] moves at most one chunk from an arbitrary file
//! offset and may move fewer bytes than asked. [`send_file`] loops it until
//! the whole file has gone out.

use std::io::{self, SeekFrom};
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

/// An open regular file ready to be transferred.
#[derive(Debug)]
pub struct FileSource {
    file: File,
    len: u64,
    /// Current OS file offset, to skip redundant seeks.
    cursor: u64,
}

impl FileSource {
    /// Opens `path` for reading. Anything but a regular file is an error.
    pub async fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(io::Error::other(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        Ok(Self {
            file,
            len: metadata.len(),
            cursor: 0,
        })
    }

    /// File length captured at open time.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Transfers up to `count` bytes starting at `position`, staging them
    /// through `buf`. Returns how many bytes `out` accepted, which may be
    /// less than `count`.
    pub async fn transfer_to<W>(
        &mut self,
        position: u64,
        count: u64,
        buf: &mut [u8],
        out: &mut W,
    ) -> io::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        if count == 0 {
            return Ok(0);
        }

        if self.cursor != position {
            self.file.seek(SeekFrom::Start(position)).await?;
            self.cursor = position;
        }

        let want = usize::try_from(count).unwrap_or(usize::MAX).min(buf.len());
        let read = self.file.read(&mut buf[..want]).await?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file shrank during transfer",
            ));
        }
        self.cursor += read as u64;

        let written = out.write(&buf[..read]).await?;
        if written == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "connection closed while writing",
            ));
        }

        Ok(written as u64)
    }
}

/// Sends the first `len` bytes of `source` to `out`.
///
/// Short transfers are normal; the loop resumes from wherever the previous
/// call stopped until the cumulative count reaches `len`.
pub async fn send_file<W>(
    source: &mut FileSource,
    len: u64,
    buf: &mut [u8],
    out: &mut W,
) -> io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut sent = 0;
    while sent < len {
        sent += source.transfer_to(sent, len - sent, buf, out).await?;
    }
    out.flush().await?;

    Ok(sent)
}
