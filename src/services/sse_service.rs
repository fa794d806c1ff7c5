//! Long-lived SSE connections: per-connection snapshot tickers and the
//! event-driven submission feed.

use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use futures::Stream;
use serde::Serialize;
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

use crate::{
    dto::sse::SubmissionNotice,
    services::public_service,
    state::{SharedState, events::ContestEvent},
};

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Scoreboard stream: one fresh projection per tick, whether or not anything
/// changed.
pub fn scoreboard_stream(
    state: SharedState,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let tick = state.config().scoreboard_tick();
    let stream = async_stream::stream! {
        let mut ticker = tokio::time::interval(tick);
        loop {
            ticker.tick().await;
            match public_service::scoreboard_snapshot(&state).await {
                Ok(snapshot) => {
                    if let Some(event) = frame(&snapshot) {
                        yield Ok::<_, Infallible>(event);
                    }
                }
                // A storage hiccup skips one tick instead of killing the
                // connection.
                Err(err) => warn!(error = %err, "failed to build scoreboard snapshot"),
            }
        }
    };

    with_keep_alive(Sse::new(stream))
}

/// Clock stream: the derived clock state once per tick.
pub fn clock_stream(state: SharedState) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let tick = state.config().clock_tick();
    let stream = async_stream::stream! {
        let mut ticker = tokio::time::interval(tick);
        loop {
            ticker.tick().await;
            let status = public_service::clock_status(&state).await;
            if let Some(event) = frame(&status) {
                yield Ok::<_, Infallible>(event);
            }
        }
    };

    with_keep_alive(Sse::new(stream))
}

/// Submission feed: a forwarder task drains this connection's multicast
/// receiver and pushes frames through a small bounded hand-off channel.
///
/// When the client disconnects axum drops the response stream, the hand-off
/// channel closes, and the forwarder exits, dropping the receiver — that is
/// all the cleanup a dead viewer needs. A viewer that falls behind its buffer
/// skips over the events it missed and keeps receiving newer ones.
pub fn submission_stream(
    state: SharedState,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut receiver = state.events().subscribe();
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                received = receiver.recv() => {
                    match received {
                        Ok(ContestEvent::Submission { username, status }) => {
                            let notice = SubmissionNotice { username, status };
                            let Some(event) = frame(&notice) else {
                                continue;
                            };
                            if tx.send(Ok(event)).await.is_err() {
                                break;
                            }
                        }
                        // Clock changes reach viewers through the snapshot
                        // streams, not the submission feed.
                        Ok(ContestEvent::Clock { .. }) => continue,
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "submission viewer lagged; oldest events dropped");
                            continue;
                        }
                    }
                }
            }
        }

        info!("submission stream disconnected");
    });

    with_keep_alive(Sse::new(ReceiverStream::new(rx)))
}

/// Serialize a payload into a `data:`-only SSE frame.
fn frame(payload: &impl Serialize) -> Option<Event> {
    match serde_json::to_string(payload) {
        Ok(data) => Some(Event::default().data(data)),
        Err(err) => {
            warn!(error = %err, "failed to serialize SSE payload");
            None
        }
    }
}

fn with_keep_alive<S>(sse: Sse<S>) -> Sse<KeepAliveStream<S>> {
    sse.keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("keep-alive"),
    )
}
