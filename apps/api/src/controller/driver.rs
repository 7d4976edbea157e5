use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use super::token::TokenSource;
use super::{ConnectionError, Effect, RoomPage, SessionController, SessionEvent, SessionState};

/// The single room connection a page owns.
///
/// `subscribe` hands over the sender that room lifecycle events
/// (`Disconnected`, `ParticipantDisconnected`) must be pushed into.
#[async_trait]
pub trait RoomConnection: Send + Sync {
    async fn connect(&self, server_url: &str, token: &str) -> Result<(), ConnectionError>;
    async fn disconnect(&self);
    fn subscribe(&self, events: mpsc::UnboundedSender<SessionEvent>);
    fn unsubscribe(&self);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Runs the controller's effects and feeds async outcomes back as events.
pub struct SessionDriver {
    controller: SessionController,
    tokens: Arc<dyn TokenSource>,
    connection: Arc<dyn RoomConnection>,
    navigator: Arc<dyn Navigator>,
    tx: mpsc::UnboundedSender<SessionEvent>,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    state: watch::Sender<SessionState>,
}

impl SessionDriver {
    pub fn new(
        page: RoomPage,
        tokens: Arc<dyn TokenSource>,
        connection: Arc<dyn RoomConnection>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            controller: SessionController::new(page),
            tokens,
            connection,
            navigator,
            tx,
            rx,
            state,
        }
    }

    /// Sender for UI-originated events (`EndRequested`, `Unmount`).
    pub fn events(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.tx.clone()
    }

    /// Current controller state, for rendering.
    pub fn states(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Mounts the page and processes events until teardown. Returns the final state.
    pub async fn run(mut self) -> SessionState {
        info!("Joining room {}", self.controller.page().room_id);
        self.dispatch(SessionEvent::Mount).await;

        while !matches!(
            self.controller.state(),
            SessionState::Terminated { torn_down: true }
        ) {
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.dispatch(event).await;
        }

        info!("Left room {}", self.controller.page().room_id);
        self.controller.state()
    }

    async fn dispatch(&mut self, event: SessionEvent) {
        let before = self.controller.state();
        debug!("Session event {event:?} in {before:?}");
        let effects = self.controller.handle(event);
        let after = self.controller.state();
        if after != before {
            debug!("Session state {before:?} -> {after:?}");
            self.state.send_replace(after);
        }
        for effect in effects {
            self.apply(effect).await;
        }
    }

    async fn apply(&self, effect: Effect) {
        match effect {
            Effect::Subscribe => self.connection.subscribe(self.tx.clone()),
            Effect::Unsubscribe => self.connection.unsubscribe(),
            Effect::RequestToken { room, username } => {
                let tokens = Arc::clone(&self.tokens);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let event = match tokens.fetch(&room, username).await {
                        Ok(token) => SessionEvent::TokenReceived {
                            server_url: token.server_url,
                            participant_token: token.participant_token,
                        },
                        Err(e) => SessionEvent::TokenFailed(e.to_string()),
                    };
                    // receiver is gone once the page has been torn down
                    let _ = tx.send(event);
                });
            }
            Effect::Connect { server_url, token } => {
                let connection = Arc::clone(&self.connection);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let event = match connection.connect(&server_url, &token).await {
                        Ok(()) => SessionEvent::ConnectSucceeded,
                        Err(e) => SessionEvent::ConnectFailed(e.to_string()),
                    };
                    let _ = tx.send(event);
                });
            }
            Effect::Disconnect => self.connection.disconnect().await,
            Effect::Navigate(route) => {
                info!("Session ended, navigating to {route}");
                self.navigator.navigate(&route);
            }
            Effect::LogFailure(e) => {
                error!(
                    "Failed to join room {}: {e}",
                    self.controller.page().room_id
                );
            }
        }
    }
}
