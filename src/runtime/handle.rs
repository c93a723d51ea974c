use std::fmt;

use hashbrown::HashMap;
use tokio::{
    sync::{broadcast, mpsc, oneshot},
    time::{Duration, Instant},
};

use crate::{
    link::parser::{try_parse, LinkError},
    suggest::{
        builder::build,
        traits::{FrequencyLookup, SystemClock},
    },
};

use super::{
    events::{LinkEvent, LinkOrigin},
    sink::{LinkActivation, LocalActivation, SinkError, SuggestionSink},
};

/// Dispatcher failures surfaced to callers.
#[derive(Debug)]
pub enum DispatchError {
    /// The sink refused the activation.
    Sink(SinkError),
    /// The dispatcher task has stopped.
    ChannelClosed,
}

impl From<SinkError> for DispatchError {
    fn from(value: SinkError) -> Self {
        Self::Sink(value)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink(err) => err.fmt(f),
            Self::ChannelClosed => f.write_str("link dispatcher is not running"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Outcome of delivering one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Link parsed, suggestion built and handed to the sink.
    Accepted(Box<LinkActivation>),
    /// URL was not a valid QSO link.
    Rejected(LinkError),
    /// Same URL already handled inside the dedupe window.
    Duplicate,
}

/// Dispatcher tuning.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Repeat deliveries of an identical URL within this window are dropped. Zero disables.
    pub dedupe_window_ms: u64,
    /// Pending `deliver` calls before senders wait.
    pub command_queue_bound: usize,
    /// Broadcast buffer for [`LinkEvent`]s.
    pub event_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            dedupe_window_ms: 2_000,
            command_queue_bound: 64,
            event_capacity: 256,
        }
    }
}

/// Cloneable handle to a running dispatcher.
pub struct LinkDispatcherHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<LinkEvent>,
}

impl Clone for LinkDispatcherHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Deliver {
        url: String,
        origin: LinkOrigin,
        resp: oneshot::Sender<Result<Delivery, DispatchError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

struct Dispatcher<L> {
    lookup: L,
    clock: SystemClock,
    sink: Option<Box<dyn SuggestionSink>>,
    seen: HashMap<String, Instant>,
    window: Duration,
}

/// Spawns the dispatcher task on the current tokio runtime.
pub fn spawn_link_dispatcher<L>(
    lookup: L,
    sink: Option<Box<dyn SuggestionSink>>,
    config: DispatcherConfig,
) -> LinkDispatcherHandle
where
    L: FrequencyLookup + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<LinkEvent>(config.event_capacity);
    let events_tx_loop = events_tx.clone();

    let mut dispatcher = Dispatcher {
        lookup,
        clock: SystemClock::new(),
        sink,
        seen: HashMap::new(),
        window: Duration::from_millis(config.dedupe_window_ms),
    };

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Deliver { url, origin, resp } => {
                    let res = dispatcher.deliver(url, origin, &events_tx_loop);
                    let _ = resp.send(res);
                }
                Command::Shutdown { resp } => {
                    tracing::debug!("link dispatcher shutting down");
                    let _ = resp.send(());
                    break;
                }
            }
        }
    });

    LinkDispatcherHandle { cmd_tx, events_tx }
}

impl LinkDispatcherHandle {
    /// Subscribes to dispatcher events.
    pub fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.events_tx.subscribe()
    }

    /// Hands one delivered URL to the dispatcher and waits for the outcome.
    pub async fn deliver(
        &self,
        url: impl Into<String>,
        origin: LinkOrigin,
    ) -> Result<Delivery, DispatchError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Deliver {
                url: url.into(),
                origin,
                resp: tx,
            })
            .await
            .map_err(|_| DispatchError::ChannelClosed)?;
        rx.await.map_err(|_| DispatchError::ChannelClosed)?
    }

    /// Stops the dispatcher task.
    pub async fn shutdown(&self) -> Result<(), DispatchError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| DispatchError::ChannelClosed)?;
        rx.await.map_err(|_| DispatchError::ChannelClosed)
    }
}

impl<L: FrequencyLookup> Dispatcher<L> {
    fn deliver(
        &mut self,
        url: String,
        origin: LinkOrigin,
        events_tx: &broadcast::Sender<LinkEvent>,
    ) -> Result<Delivery, DispatchError> {
        if self.is_duplicate(&url) {
            tracing::debug!(?origin, "dropping repeated deep link");
            let _ = events_tx.send(LinkEvent::Duplicate { origin });
            return Ok(Delivery::Duplicate);
        }

        let params = match try_parse(&url) {
            Ok(params) => params,
            Err(reason) => {
                tracing::debug!(%reason, ?origin, "ignoring deep link");
                let _ = events_tx.send(LinkEvent::Rejected {
                    reason: reason.clone(),
                });
                return Ok(Delivery::Rejected(reason));
            }
        };

        let suggestion = build(&params, &self.lookup, &self.clock);
        let activation = LinkActivation {
            local: LocalActivation::from_params(&params),
            params,
            suggestion,
        };

        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.accept(&activation) {
                tracing::warn!(%err, "suggestion sink rejected deep link");
                self.seen.remove(&url);
                return Err(err.into());
            }
        }

        tracing::info!(
            suggestion_key = %activation.suggestion.suggestion_key,
            ?origin,
            "deep link suggestion ready"
        );
        let _ = events_tx.send(LinkEvent::Suggested {
            suggestion_key: activation.suggestion.suggestion_key.clone(),
            origin,
        });
        Ok(Delivery::Accepted(Box::new(activation)))
    }

    /// Records `url` as seen and reports whether it was already seen inside the window.
    fn is_duplicate(&mut self, url: &str) -> bool {
        if self.window.is_zero() {
            return false;
        }

        let now = Instant::now();
        let window = self.window;
        self.seen.retain(|_, at| now.duration_since(*at) < window);

        if self.seen.contains_key(url) {
            return true;
        }
        self.seen.insert(url.to_string(), now);
        false
    }
}
