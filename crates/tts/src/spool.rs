use std::{
    io::{self, SeekFrom},
    path::Path,
};

use tempfile::TempPath;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};

/// Request-scoped temporary file receiving synthesized audio
///
/// The backing file is removed when the spool is dropped, on every exit
/// path including cancellation of the owning request.
pub struct AudioSpool {
    // Field order matters: the handle closes before the path is unlinked
    file: File,
    path: TempPath,
    len: u64,
}

impl AudioSpool {
    /// Create an empty spool file inside `dir`
    pub fn create(dir: &Path) -> io::Result<Self> {
        let (file, path) = tempfile::Builder::new()
            .prefix("wordcast-")
            .suffix(".mp3")
            .tempfile_in(dir)?
            .into_parts();

        Ok(Self {
            file: File::from_std(file),
            path,
            len: 0,
        })
    }

    /// Append a chunk of encoded audio
    pub async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.len += chunk.len() as u64;
        Ok(())
    }

    /// Bytes written so far
    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard everything written, keeping the file
    pub async fn reset(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.set_len(0).await?;
        self.file.seek(SeekFrom::Start(0)).await?;
        self.len = 0;
        Ok(())
    }

    /// Read back the complete contents
    pub async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.file.flush().await?;
        self.file.seek(SeekFrom::Start(0)).await?;

        let mut audio = Vec::with_capacity(usize::try_from(self.len).unwrap_or_default());
        self.file.read_to_end(&mut audio).await?;

        self.file.seek(SeekFrom::End(0)).await?;
        Ok(audio)
    }
}
