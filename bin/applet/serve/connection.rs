use super::Request;
use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use lib::directory::Directory;
use lib::player::PlayerId;
use lib::session::{Outbox, Rules, SessionError, Signal};
use std::{io, sync::Arc};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, instrument, warn};

/// A player connected to the server.
///
/// Requests come in one per line, replies and session signals go out one per line.
pub struct Connection<T: Io> {
    player: PlayerId,
    directory: Arc<Directory>,
    outbox: Arc<dyn Outbox>,
    inbox: UnboundedReceiver<Signal>,
    io: T,
}

impl<T: Io + Send> Connection<T> {
    pub fn new(player: PlayerId, directory: Arc<Directory>, io: T) -> Self {
        let (tx, inbox) = unbounded_channel();
        Connection {
            player,
            directory,
            outbox: Arc::new(tx),
            inbox,
            io,
        }
    }

    /// Serves the player until they disconnect, then takes them out of their session.
    #[instrument(level = "debug", skip(self), fields(player = %self.player), err)]
    pub async fn run(mut self) -> Result<(), Anyhow> {
        let result = self.serve().await;

        if let Ok((id, team)) = self.directory.leave(self.player) {
            debug!(session = %id, %team, "left on disconnect");
        }

        result
    }

    async fn serve(&mut self) -> Result<(), Anyhow> {
        self.io.send(&format!("WELCOME {}", self.player)).await?;
        self.io.flush().await?;

        loop {
            tokio::select! {
                line = self.io.recv() => match line {
                    Ok(line) => {
                        for reply in self.respond(&line) {
                            self.io.send(&reply).await?;
                        }

                        self.io.flush().await?;
                    }

                    Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                        warn!(player = %self.player, "{}", e);
                        self.io.send(&format!("ERROR {}", e)).await?;
                        self.io.flush().await?;
                    }

                    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break Ok(()),
                    Err(e) => break Err(e).context("failed to read request"),
                },

                Some(signal) = self.inbox.recv() => {
                    self.io.send(&signal.to_string()).await?;
                    self.io.flush().await?;
                }
            }
        }
    }

    /// Handles a single request, answering with zero or more lines.
    fn respond(&self, line: &str) -> Vec<String> {
        let request = match Request::parse(line) {
            Ok(request) => request,
            Err(e) => {
                let e = e.to_string();
                let reason = e.lines().next().unwrap_or_default();
                return vec![format!("ERROR {}", reason.trim_start_matches("error: "))];
            }
        };

        match self.handle(request) {
            Ok(replies) => replies,
            Err(e) => {
                warn!(player = %self.player, "{:#}", e);
                vec![format!("ERROR {:#}", e)]
            }
        }
    }

    fn handle(&self, request: Request) -> Result<Vec<String>, Anyhow> {
        match request {
            Request::Create { team, rules } => {
                let rules = match rules.join(" ") {
                    r if r.is_empty() => Rules::default(),
                    r => r.parse::<Rules>().context("invalid rules")?,
                };

                let outbox = self.outbox.clone();
                let (session, team) = self.directory.create(self.player, team, rules, outbox)?;
                Ok(vec![format!("CREATED {} {}", session.id(), team)])
            }

            Request::Join { id, team } => {
                let outbox = self.outbox.clone();
                let (session, team) = self.directory.join(self.player, id, team, outbox)?;
                Ok(vec![format!("JOINED {} {}", session.id(), team)])
            }

            Request::Leave => {
                let (id, team) = self.directory.leave(self.player)?;
                Ok(vec![format!("LEFT {} {}", id, team)])
            }

            Request::Vote { whence, whither } => {
                let session = self.directory.session_of(self.player);
                session
                    .ok_or(SessionError::NotAMember)?
                    .vote(self.player, whence, whither)?;
                Ok(vec![])
            }

            Request::Chat { words } => {
                let session = self.directory.session_of(self.player);
                session
                    .ok_or(SessionError::NotAMember)?
                    .chat(self.player, &words.join(" "))?;
                Ok(vec![])
            }

            Request::List => Ok(self
                .directory
                .list()
                .into_iter()
                .map(|s| format!("SESSION {}", s))
                .collect()),

            Request::Board => {
                let session = self.directory.session_of(self.player);
                let snapshot = session.ok_or(SessionError::NotAMember)?.snapshot();
                Ok(vec![format!("BOARD {}", snapshot)])
            }
        }
    }
}
