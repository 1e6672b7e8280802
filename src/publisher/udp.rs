use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant, SystemTime};

use super::message::{Envelope, JointCommand};
use super::{JointPublisher, PublishError};

const RECV_BUFFER: usize = 2048;

/// Sends one JSON envelope per datagram to a fixed peer.
///
/// Spinning drains anything the peer sends back (acks, heartbeats) so the
/// socket buffer never fills; the payloads are only logged.
pub struct UdpPublisher {
    socket: UdpSocket,
    peer: SocketAddr,
    topic: String,
    frame_id: String,
    buf: [u8; RECV_BUFFER],
}

impl UdpPublisher {
    pub fn connect(target: &str, topic: &str, frame_id: &str) -> Result<Self, PublishError> {
        let open_err = |source: io::Error| PublishError::Open {
            target: target.to_string(),
            source,
        };
        let peer = target
            .to_socket_addrs()
            .map_err(open_err)?
            .next()
            .ok_or_else(|| {
                open_err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "address resolved to nothing",
                ))
            })?;
        let bind: SocketAddr = if peer.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(bind).map_err(open_err)?;
        socket.connect(peer).map_err(open_err)?;
        tracing::debug!(%peer, local = ?socket.local_addr().ok(), "udp publisher connected");

        Ok(Self {
            socket,
            peer,
            topic: topic.to_string(),
            frame_id: frame_id.to_string(),
            buf: [0u8; RECV_BUFFER],
        })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive one datagram, waiting at most `wait` (`None` = don't wait).
    fn recv_one(&mut self, wait: Option<Duration>) -> io::Result<Option<usize>> {
        match wait {
            None => self.socket.set_nonblocking(true)?,
            Some(wait) => {
                self.socket.set_nonblocking(false)?;
                self.socket.set_read_timeout(Some(wait))?;
            }
        }
        match self.socket.recv(&mut self.buf) {
            Ok(n) => Ok(Some(n)),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl JointPublisher for UdpPublisher {
    fn publish(
        &mut self,
        names: &[String],
        positions: &[f64],
        stamp: SystemTime,
    ) -> Result<(), PublishError> {
        let envelope = Envelope {
            topic: self.topic.clone(),
            msg: JointCommand::new(names, positions, stamp, &self.frame_id),
        };
        let payload = serde_json::to_vec(&envelope)?;
        self.socket.set_nonblocking(false)?;
        self.socket.send(&payload)?;
        Ok(())
    }

    fn spin_once(&mut self, timeout: Duration) -> Result<(), PublishError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            // set_read_timeout rejects a zero duration
            let wait = (!remaining.is_zero()).then_some(remaining);
            match self.recv_one(wait) {
                Ok(Some(n)) => {
                    tracing::trace!(peer = %self.peer, bytes = n, "inbound datagram ignored");
                }
                Ok(None) => break,
                Err(err) if err.kind() == io::ErrorKind::ConnectionRefused => {
                    // ICMP port unreachable from an earlier send; nobody listens yet.
                    tracing::debug!(peer = %self.peer, "peer refused datagram");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
            if wait.is_none() {
                break;
            }
        }
        Ok(())
    }
}
