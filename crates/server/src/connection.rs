// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Line oriented text connection.
use anyhow::{Result, bail};
use futures_util::StreamExt;
use tokio::{
    io::AsyncWriteExt,
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

/// Maximum line length.
pub const MAX_LINE_LEN: usize = 4096;

/// A connection that exchanges UTF-8 text lines.
#[derive(Debug)]
pub struct LineConnection {
    lines: FramedRead<OwnedReadHalf, LinesCodec>,
    writer: OwnedWriteHalf,
}

impl LineConnection {
    /// Creates a new connection from a stream.
    pub fn new(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            lines: FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LEN)),
            writer,
        }
    }

    /// Sends a text that may span multiple lines.
    pub async fn send(&mut self, text: &str) -> Result<()> {
        let mut buf = String::with_capacity(text.len() + 1);
        buf.push_str(text);
        buf.push('\n');

        self.writer.write_all(buf.as_bytes()).await?;
        self.writer.flush().await?;

        Ok(())
    }

    /// Waits for a line, returns `None` if the peer closed the connection.
    ///
    /// Trailing whitespace and carriage returns are removed. Returns an error
    /// as soon as more than [MAX_LINE_LEN] bytes are buffered without a newline.
    pub async fn recv(&mut self) -> Option<Result<String>> {
        match self.lines.next().await? {
            Ok(line) => Some(Ok(line.trim_end().to_string())),
            Err(LinesCodecError::MaxLineLengthExceeded) => Some(Self::too_long()),
            Err(LinesCodecError::Io(e)) => Some(Err(e.into())),
        }
    }

    /// Closes this connection.
    pub async fn close(&mut self) {
        let _ = self.writer.shutdown().await;
    }

    fn too_long() -> Result<String> {
        bail!("Line longer than {MAX_LINE_LEN} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn pair() -> (LineConnection, LineConnection) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        (LineConnection::new(client), LineConnection::new(server))
    }

    #[tokio::test]
    async fn send_and_recv_lines() {
        let (mut client, mut server) = pair().await;

        client.send("hello\r").await.unwrap();
        client.send("two\nlines").await.unwrap();

        assert_eq!(server.recv().await.unwrap().unwrap(), "hello");
        assert_eq!(server.recv().await.unwrap().unwrap(), "two");
        assert_eq!(server.recv().await.unwrap().unwrap(), "lines");

        client.close().await;
        assert!(server.recv().await.is_none());
    }

    #[tokio::test]
    async fn rejects_long_lines() {
        let (mut client, mut server) = pair().await;

        client.send(&"x".repeat(MAX_LINE_LEN + 1)).await.unwrap();
        assert!(server.recv().await.unwrap().is_err());
    }

    #[tokio::test]
    async fn rejects_unterminated_lines() {
        let (mut client, mut server) = pair().await;

        // No newline, the read must fail once the limit is reached without
        // waiting for the rest of the data.
        let chunk = vec![b'x'; MAX_LINE_LEN];
        for _ in 0..4 {
            client.writer.write_all(&chunk).await.unwrap();
        }
        client.writer.flush().await.unwrap();

        let err = server.recv().await.unwrap().unwrap_err();
        assert!(err.to_string().contains("Line longer than"));
    }
}
