//! Per-connection state machine.
//!
//! `Connecting → AwaitingName → AwaitingRole → Active → Closed`. Once
//! active, the task multiplexes the client's input lines with the
//! session's outbound channel, so broadcasts and local replies share one
//! ordered writer.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LinesCodec};

use super::MAX_LINE_LENGTH;
use crate::domain::{Role, SessionId};
use crate::error::AuctionError;
use crate::protocol::{Command, lines, parse_command};
use crate::service::AuctionService;

type LineSink<S> = SplitSink<Framed<S, LinesCodec>, String>;
type LineStream<S> = SplitStream<Framed<S, LinesCodec>>;

/// A handshaken client.
#[derive(Debug)]
struct Session {
    id: SessionId,
    identity: String,
    role: Role,
}

/// Runs the full lifecycle of one client connection.
///
/// Returns `Ok(())` when the client closes the stream, at any stage. The
/// session is deregistered before returning, whatever the outcome.
///
/// # Errors
///
/// Returns [`AuctionError::Io`] or [`AuctionError::Codec`] if reading or
/// writing the stream fails, including on an over-long input line.
pub async fn run_connection<S>(stream: S, service: AuctionService) -> Result<(), AuctionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let (mut sink, mut input) = framed.split::<String>();

    sink.send(lines::WELCOME.to_string()).await?;
    let Some(name) = next_line(&mut input).await? else {
        return Ok(());
    };
    let identity = name.trim().to_string();

    sink.send(lines::ROLE_PROMPT.to_string()).await?;
    let role = loop {
        match next_line(&mut input).await? {
            Some(answer) if answer.trim().is_empty() => {}
            Some(answer) => break Role::from_answer(&answer),
            None => return Ok(()),
        }
    };
    sink.send(lines::greeting(&identity, role)).await?;

    let (id, notifications) = service.sessions().register(&identity, role);
    let session = Session { id, identity, role };

    let result = run_session(&service, &session, &mut sink, &mut input, notifications).await;
    service.sessions().deregister(session.id);
    result
}

async fn next_line<S>(input: &mut LineStream<S>) -> Result<Option<String>, AuctionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    Ok(input.next().await.transpose()?)
}

async fn run_session<S>(
    service: &AuctionService,
    session: &Session,
    sink: &mut LineSink<S>,
    input: &mut LineStream<S>,
    mut notifications: mpsc::Receiver<String>,
) -> Result<(), AuctionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if session.role == Role::Buyer {
        let open = service.list_open_auctions().await;
        for line in lines::buyer_snapshot(&open) {
            sink.feed(line).await?;
        }
        sink.flush().await?;
    }

    loop {
        tokio::select! {
            line = input.next() => match line {
                Some(Ok(line)) => {
                    if let Some(reply) = handle_line(service, session, &line).await {
                        sink.send(reply.to_string()).await?;
                    }
                }
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            notification = notifications.recv() => match notification {
                Some(line) => sink.send(line).await?,
                None => {
                    // Pruned by a broadcast: the client left or stopped reading.
                    tracing::info!(session_id = %session.id, "session dropped by registry");
                    break;
                }
            },
        }
    }

    Ok(())
}

/// Executes one input line and returns the local reply, if any.
async fn handle_line(
    service: &AuctionService,
    session: &Session,
    line: &str,
) -> Option<&'static str> {
    if line.trim().is_empty() {
        return None;
    }

    let command = match parse_command(session.role, line) {
        Ok(Some(command)) => command,
        Ok(None) => {
            tracing::debug!(session_id = %session.id, line, "ignoring unrecognized line");
            return None;
        }
        Err(err) => return err.reply_line(),
    };

    let result = match command {
        Command::CreateAuction {
            item,
            reserve_price,
            auction_type,
        } => service
            .create_auction(&item, reserve_price, auction_type)
            .await
            .map(|_| ()),
        Command::PlaceBid { item, amount } => {
            service.place_bid(&item, &session.identity, amount).await
        }
    };

    match result {
        Ok(()) => None,
        Err(err) => {
            tracing::debug!(session_id = %session.id, error = %err, "command rejected");
            err.reply_line()
        }
    }
}
