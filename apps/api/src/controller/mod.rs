#![allow(dead_code)]

//! Session page controller — the join/leave lifecycle of one room page.
//!
//! `transition` is pure: it takes the current state and an event and returns
//! the next state plus the effects to perform. `driver::SessionDriver` runs
//! the effects and feeds their outcomes back in as events.
//!
//! Connection failures are logged and leave the page idle. There is no retry.
//!
//! This is the client-side half of a session. The API binary does not run it;
//! it is exposed for embedding in the room page host and exercised by tests.

pub mod driver;
pub mod token;

use thiserror::Error;

use crate::session::descriptor::SessionType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("Token request failed: {0}")]
    TokenRequest(String),

    #[error("Token response carried no participant token")]
    MissingToken,

    #[error("Connect failed: {0}")]
    Connect(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    RequestingToken,
    Connecting,
    Connected,
    /// Leaving on our own initiative; the backend's disconnect echo is expected.
    Disconnecting,
    /// `torn_down` is set once subscriptions are removed and the connection released.
    Terminated { torn_down: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Mount,
    TokenReceived {
        server_url: String,
        participant_token: Option<String>,
    },
    TokenFailed(String),
    ConnectSucceeded,
    ConnectFailed(String),
    /// The backend closed the connection.
    Disconnected,
    /// A remote participant left; `remaining` is the room's participant count afterwards.
    ParticipantDisconnected { remaining: u32 },
    /// The user pressed "end session".
    EndRequested,
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Subscribe,
    RequestToken {
        room: String,
        username: &'static str,
    },
    Connect {
        server_url: String,
        token: String,
    },
    Disconnect,
    Unsubscribe,
    Navigate(String),
    LogFailure(ConnectionError),
}

/// Identifies the page: which room, and which product surface it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPage {
    pub room_id: String,
    pub session_type: SessionType,
}

impl RoomPage {
    pub fn new(room_id: impl Into<String>, session_type: SessionType) -> Self {
        Self {
            room_id: room_id.into(),
            session_type,
        }
    }

    pub fn report_route(&self) -> String {
        self.session_type.report_path(&self.room_id)
    }

    fn counterpart_left(&self, remaining: u32) -> bool {
        remaining <= self.session_type.participant_floor()
    }
}

pub fn transition(
    page: &RoomPage,
    state: SessionState,
    event: SessionEvent,
) -> (SessionState, Vec<Effect>) {
    use SessionEvent as E;
    use SessionState as S;

    match (state, event) {
        (S::Terminated { torn_down: false }, E::Unmount) => (
            S::Terminated { torn_down: true },
            vec![Effect::Unsubscribe, Effect::Disconnect],
        ),
        // a connect that finished after teardown or an explicit end must not leak
        (S::Terminated { .. } | S::Disconnecting, E::ConnectSucceeded) => {
            (state, vec![Effect::Disconnect])
        }
        (S::Terminated { .. }, _) => (state, vec![]),

        (_, E::Unmount) => (
            S::Terminated { torn_down: true },
            vec![Effect::Unsubscribe, Effect::Disconnect],
        ),
        (S::Disconnecting, E::Disconnected) => (S::Terminated { torn_down: false }, vec![]),
        (S::Disconnecting, _) => (state, vec![]),
        (_, E::EndRequested) => (
            S::Disconnecting,
            vec![Effect::Disconnect, Effect::Navigate(page.report_route())],
        ),

        (S::Idle, E::Mount) => (
            S::RequestingToken,
            vec![
                Effect::Subscribe,
                Effect::RequestToken {
                    room: page.room_id.clone(),
                    username: page.session_type.participant_username(),
                },
            ],
        ),

        (
            S::RequestingToken,
            E::TokenReceived {
                server_url,
                participant_token,
            },
        ) => match participant_token.filter(|t| !t.is_empty()) {
            Some(token) => (S::Connecting, vec![Effect::Connect { server_url, token }]),
            None => (
                S::Idle,
                vec![Effect::LogFailure(ConnectionError::MissingToken)],
            ),
        },
        (S::RequestingToken, E::TokenFailed(reason)) => (
            S::Idle,
            vec![Effect::LogFailure(ConnectionError::TokenRequest(reason))],
        ),

        (S::Connecting, E::ConnectSucceeded) => (S::Connected, vec![]),
        (S::Connecting, E::ConnectFailed(reason)) => (
            S::Idle,
            vec![Effect::LogFailure(ConnectionError::Connect(reason))],
        ),

        (S::Connecting | S::Connected, E::Disconnected) => (
            S::Terminated { torn_down: false },
            vec![Effect::Navigate(page.report_route())],
        ),
        (S::Connected, E::ParticipantDisconnected { remaining })
            if page.counterpart_left(remaining) =>
        {
            (
                S::Disconnecting,
                vec![Effect::Navigate(page.report_route()), Effect::Disconnect],
            )
        }

        (state, _) => (state, vec![]),
    }
}

/// Holds the current state of one page and applies events to it.
#[derive(Debug, Clone)]
pub struct SessionController {
    page: RoomPage,
    state: SessionState,
}

impl SessionController {
    pub fn new(page: RoomPage) -> Self {
        Self {
            page,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn page(&self) -> &RoomPage {
        &self.page
    }

    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        let (next, effects) = transition(&self.page, self.state, event);
        self.state = next;
        effects
    }
}
