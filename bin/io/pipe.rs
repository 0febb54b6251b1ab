use super::Io;
use async_trait::async_trait;
use futures_util::StreamExt;
use std::io::{self, ErrorKind};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::instrument;

/// The longest line a [`Pipe`] accepts, in bytes.
pub const MAX_LINE_LENGTH: usize = 1024;

/// A line-oriented [`Io`] over a pair of byte streams.
///
/// Lines longer than [`MAX_LINE_LENGTH`] are discarded and reported as
/// [`ErrorKind::InvalidData`] instead of being buffered.
#[derive(Debug)]
pub struct Pipe<W: AsyncWrite, R: AsyncRead> {
    writer: W,
    reader: FramedRead<R, LinesCodec>,
}

impl<W: AsyncWrite, R: AsyncRead> Pipe<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Pipe {
            writer,
            reader: FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)),
        }
    }
}

#[async_trait]
impl<W: AsyncWrite + Send + Unpin, R: AsyncRead + Send + Unpin> Io for Pipe<W, R> {
    #[instrument(level = "trace", skip(self), ret, err)]
    async fn recv(&mut self) -> io::Result<String> {
        match self.reader.next().await {
            Some(Ok(line)) => Ok(line),
            Some(Err(LinesCodecError::Io(e))) => Err(e),
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("line longer than {MAX_LINE_LENGTH} bytes"),
            )),
            None => Err(ErrorKind::UnexpectedEof.into()),
        }
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn send(&mut self, msg: &str) -> io::Result<()> {
        self.writer.write_all(msg.as_bytes()).await?;
        self.writer.write_u8(b'\n').await?;
        Ok(())
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn flush(&mut self) -> io::Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}
