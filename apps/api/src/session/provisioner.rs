use std::sync::Arc;

use tracing::{error, info};

use crate::config::LiveKitSettings;
use crate::livekit::models::CreateRoomRequest;
use crate::livekit::VideoBackend;
use crate::session::descriptor::{RoomRecord, SessionDescriptor, MAX_PARTICIPANTS};
use crate::session::SessionError;

/// Creates backend rooms for session descriptors.
///
/// Checks configuration before touching the network. Failures are returned
/// as-is and never retried.
#[derive(Clone)]
pub struct RoomProvisioner {
    settings: LiveKitSettings,
    backend: Arc<dyn VideoBackend>,
}

impl RoomProvisioner {
    pub fn new(settings: LiveKitSettings, backend: Arc<dyn VideoBackend>) -> Self {
        Self { settings, backend }
    }

    pub async fn provision(&self, descriptor: &SessionDescriptor) -> Result<RoomRecord, SessionError> {
        let creds = self.settings.credentials()?;

        let request = CreateRoomRequest {
            name: descriptor.session_id.clone(),
            empty_timeout: descriptor.session_type.empty_timeout_secs(),
            max_participants: MAX_PARTICIPANTS,
            metadata: descriptor.serialized_metadata()?,
        };

        let room = self
            .backend
            .create_room(&creds, &request)
            .await
            .map_err(|e| {
                error!("Room creation failed for {}: {e}", request.name);
                SessionError::Backend(e)
            })?;

        info!(
            "Room created: name={} sid={} empty_timeout={}s",
            room.name, room.sid, room.empty_timeout
        );
        Ok(RoomRecord::from(room))
    }
}
