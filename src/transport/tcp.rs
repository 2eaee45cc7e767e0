use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use super::{Connector, Transport};

/// Opens [`TcpTransport`]s, trying every resolved address in turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Transport = TcpTransport;

    fn open(&self, host: &str, port: u16, timeout: Duration) -> io::Result<TcpTransport> {
        let mut last_err = None;

        for addr in (host, port).to_socket_addrs()? {
            let attempt = if timeout.is_zero() {
                TcpStream::connect(addr)
            } else {
                TcpStream::connect_timeout(&addr, timeout)
            };

            match attempt {
                Ok(stream) => {
                    stream.set_nodelay(true)?;
                    debug!("connected to {}", addr);
                    return Ok(TcpTransport::new(stream));
                }
                Err(e) => {
                    debug!("connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{host}:{port} did not resolve to any address"),
            )
        }))
    }
}

/// Blocking TCP stream. `None` once closed.
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    fn stream(&mut self) -> io::Result<&mut TcpStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotConnected))
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.stream()?;
        stream.write_all(bytes)?;
        stream.flush()
    }

    fn read(&mut self, len: usize, timeout: Duration) -> io::Result<Option<Vec<u8>>> {
        let stream = self.stream()?;
        // a zero read timeout is rejected by the OS; treat it as "block"
        stream.set_read_timeout((!timeout.is_zero()).then_some(timeout))?;

        let mut buf = vec![0u8; len];
        match stream.read(&mut buf) {
            Ok(0) if len > 0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            Ok(n) => {
                buf.truncate(n);
                Ok(Some(buf))
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}
