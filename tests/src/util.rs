use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const LOOPBACK: &str = "127.0.0.1";

/// A loopback listener that accepts and immediately drops every connection.
pub struct Listener {
    pub port: u16,
    handle: JoinHandle<()>,
}

impl Listener {
    pub async fn spawn() -> anyhow::Result<Self> {
        let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr: SocketAddr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            while let Ok((stream, _peer)) = listener.accept().await {
                drop(stream);
            }
        });

        Ok(Self { port: addr.port(), handle })
    }

    /// `"p-p"` range string covering only this listener.
    pub fn range(&self) -> String {
        format!("{0}-{0}", self.port)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A loopback port that was bound a moment ago and is now closed.
pub async fn closed_port() -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}
