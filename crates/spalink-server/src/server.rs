use std::io::{ErrorKind, Read};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use spalink_frame::{decode_frame, hex, FrameWriter};
use spalink_messages::{Message, Status};
use tracing::{debug, info, warn};

use crate::dispatch::dispatch;
use crate::error::{Result, ServerError};

/// How long a read blocks before the loop falls back to a heartbeat.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// One read is one frame; real peers send well under this.
const READ_BUFFER_SIZE: usize = 128;

/// Serves the controller side of the protocol over TCP.
///
/// Owns the authoritative [`Status`] for the process lifetime. One peer
/// is served at a time; the next accept happens only after the previous
/// session ends.
pub struct SpaServer {
    listener: TcpListener,
    status: Status,
}

impl SpaServer {
    pub fn bind(addr: impl ToSocketAddrs + std::fmt::Debug) -> Result<Self> {
        let listener = TcpListener::bind(&addr).map_err(|source| ServerError::Bind {
            addr: format!("{addr:?}"),
            source,
        })?;
        Ok(Self {
            listener,
            status: Status::new(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The current authoritative status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Accept and serve connections forever.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.serve_next()?;
        }
    }

    /// Accept one connection and serve it until the peer disconnects.
    ///
    /// Connection-level I/O failures end the session, not the server.
    pub fn serve_next(&mut self) -> Result<()> {
        let (stream, addr) = self.listener.accept().map_err(ServerError::Accept)?;
        info!(%addr, "client connected");
        match self.serve_connection(stream) {
            Ok(()) => info!(%addr, "client disconnected"),
            Err(err) => warn!(%addr, "session ended: {err}"),
        }
        Ok(())
    }

    fn serve_connection(&mut self, stream: TcpStream) -> Result<()> {
        stream.set_read_timeout(Some(HEARTBEAT_INTERVAL))?;
        let mut reader = stream.try_clone()?;
        let mut writer = FrameWriter::new(stream);

        self.send_status(&mut writer)?;

        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            let read = match reader.read(&mut buf) {
                // Zero-length read: the peer closed the connection.
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(err)
                    if err.kind() == ErrorKind::WouldBlock
                        || err.kind() == ErrorKind::TimedOut =>
                {
                    // Quiet for a full interval: re-broadcast the status
                    // so the peer stays in sync.
                    self.send_status(&mut writer)?;
                    continue;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ServerError::Io(err)),
            };
            self.handle_read(&buf[..read], &mut writer)?;
        }
    }

    /// Decode one read's worth of bytes and act on it. Decode failures
    /// are logged with the raw bytes and otherwise dropped; the frame
    /// produces no reply for that cycle.
    fn handle_read(&mut self, raw: &[u8], writer: &mut FrameWriter<TcpStream>) -> Result<()> {
        let body = match decode_frame(raw) {
            Ok(body) => body,
            Err(err) => {
                warn!(raw = %hex(raw), "discarding unreadable frame: {err}");
                return Ok(());
            }
        };
        let message = match Message::parse(&body) {
            Ok(message) => message,
            Err(err) => {
                warn!(raw = %hex(&err.raw), "discarding message: {err}");
                return Ok(());
            }
        };

        debug!(?message, "received");
        if let Some(reply) = dispatch(&mut self.status, &message) {
            writer.send(reply)?;
        }
        Ok(())
    }

    fn send_status(&mut self, writer: &mut FrameWriter<TcpStream>) -> Result<()> {
        debug!(status = %self.status, "sending status");
        let body = Message::Status(self.status.clone()).encode();
        writer.send(&body)?;
        Ok(())
    }
}
