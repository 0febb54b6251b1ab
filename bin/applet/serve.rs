use crate::io::Pipe;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::{directory::Directory, player::PlayerId};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, info_span, instrument, warn, Instrument};

mod connection;
mod request;

pub use connection::*;
pub use request::*;

/// Hosts team chess sessions over a line based TCP protocol.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Serve {
    /// The address to listen on.
    #[clap(short, long, default_value_t = SocketAddr::from(([127, 0, 0, 1], 7878)))]
    address: SocketAddr,
}

impl Default for Serve {
    fn default() -> Self {
        Serve {
            address: SocketAddr::from(([127, 0, 0, 1], 7878)),
        }
    }
}

impl Serve {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let listener = TcpListener::bind(self.address)
            .await
            .with_context(|| format!("failed to listen on {}", self.address))?;

        info!(address = %self.address, "listening");

        let directory = Arc::new(Directory::default());
        for n in 1.. {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("failed to accept connection: {}", e);
                    continue;
                }
            };

            let player = PlayerId::new(n);
            let (reader, writer) = stream.into_split();
            let connection = Connection::new(player, directory.clone(), Pipe::new(writer, reader));

            tokio::spawn(
                async move {
                    if let Err(e) = connection.run().await {
                        warn!("{:?}", e);
                    }
                }
                .instrument(info_span!("connection", %peer, %player)),
            );
        }

        Ok(())
    }
}
