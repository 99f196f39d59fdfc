use futures::{FutureExt, StreamExt};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::FramedRead;

use crate::codec::FrameCodec;
use crate::frame::Frame;
use crate::Error;

/// A client connection: request frames are decoded from the read half, replies are buffered on
/// the write half and sent with one flush per batch.
pub struct Connection {
    reader: FramedRead<OwnedReadHalf, FrameCodec>,
    writer: BufWriter<OwnedWriteHalf>,
    // A decoding error hit while collecting a batch, reported on the next read so the frames
    // before it still get their replies.
    deferred: Option<Error>,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Connection {
        Connection::with_codec(stream, FrameCodec::default())
    }

    pub fn with_codec(stream: TcpStream, codec: FrameCodec) -> Connection {
        let (reader, writer) = stream.into_split();

        Connection {
            reader: FramedRead::new(reader, codec),
            writer: BufWriter::new(writer),
            deferred: None,
        }
    }

    /// Waits for the next frame. `None` means the peer closed the connection.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }

        self.reader.next().await.transpose()
    }

    /// Waits for the next frame, then takes every other frame that can be decoded without
    /// waiting: the requests a client pipelined. `None` means the peer closed the connection.
    pub async fn read_batch(&mut self) -> Result<Option<Vec<Frame>>, Error> {
        let Some(first) = self.read_frame().await? else {
            return Ok(None);
        };

        let mut batch = vec![first];
        while let Some(Some(next)) = self.reader.next().now_or_never() {
            match next {
                Ok(frame) => batch.push(frame),
                Err(err) => {
                    self.deferred = Some(err);
                    break;
                }
            }
        }

        Ok(Some(batch))
    }

    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.writer.write_all(&frame.serialize()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Writes all replies, in order, with a single flush.
    pub async fn write_batch(&mut self, frames: &[Frame]) -> Result<(), Error> {
        for frame in frames {
            self.writer.write_all(&frame.serialize()).await?;
        }
        self.writer.flush().await?;
        Ok(())
    }
}
