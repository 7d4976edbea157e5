use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::config::{LiveKitSettings, StorageSettings};
use crate::livekit::models::{EncodedFileOutput, EncodedFileType, RoomCompositeEgressRequest, S3Upload};
use crate::livekit::{BackendError, VideoBackend};
use crate::session::descriptor::{EgressRecord, SessionType};

const EGRESS_LAYOUT: &str = "grid";

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("Recording storage is not configured: {0} is missing")]
    MissingStorage(&'static str),

    #[error("{0}")]
    Configuration(String),

    #[error("Egress request failed: {0}")]
    Backend(#[from] BackendError),
}

/// Starts composite recordings of rooms into S3-compatible storage.
///
/// Best-effort: every failure is logged and absorbed here, so an already
/// created room is never affected by recording problems.
#[derive(Clone)]
pub struct RecordingOrchestrator {
    livekit: LiveKitSettings,
    storage: StorageSettings,
    backend: Arc<dyn VideoBackend>,
}

impl RecordingOrchestrator {
    pub fn new(
        livekit: LiveKitSettings,
        storage: StorageSettings,
        backend: Arc<dyn VideoBackend>,
    ) -> Self {
        Self {
            livekit,
            storage,
            backend,
        }
    }

    /// Returns the egress record, or `None` if recording could not be started.
    pub async fn start(&self, room_name: &str, session_type: SessionType) -> Option<EgressRecord> {
        match self.try_start(room_name, session_type).await {
            Ok(record) => {
                info!("Recording started for {room_name}: {}", record.egress_id);
                Some(record)
            }
            Err(e) => {
                error!("Failed to start recording for {room_name}: {e}");
                None
            }
        }
    }

    async fn try_start(
        &self,
        room_name: &str,
        session_type: SessionType,
    ) -> Result<EgressRecord, RecordingError> {
        let creds = self
            .livekit
            .credentials()
            .map_err(|e| RecordingError::Configuration(e.to_string()))?;

        let request = RoomCompositeEgressRequest {
            room_name: room_name.to_string(),
            layout: EGRESS_LAYOUT.to_string(),
            audio_only: session_type.records_audio_only(),
            file_outputs: vec![EncodedFileOutput {
                file_type: EncodedFileType::Mp4,
                filepath: session_type.recording_path(room_name),
                s3: self.s3_upload()?,
            }],
        };

        let egress = self
            .backend
            .start_room_composite_egress(&creds, &request)
            .await?;

        Ok(EgressRecord {
            egress_id: egress.egress_id,
        })
    }

    fn s3_upload(&self) -> Result<S3Upload, RecordingError> {
        let storage = &self.storage;
        Ok(S3Upload {
            access_key: storage
                .access_key
                .clone()
                .ok_or(RecordingError::MissingStorage("AWS_S3_ACCESS_KEY"))?,
            secret: storage
                .secret_key
                .clone()
                .ok_or(RecordingError::MissingStorage("AWS_S3_SECRET_KEY"))?,
            region: storage.region.clone(),
            endpoint: storage.endpoint.clone(),
            bucket: storage
                .bucket
                .clone()
                .ok_or(RecordingError::MissingStorage("AWS_S3_BUCKET_NAME"))?,
            force_path_style: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::session::testing::{configured_livekit, configured_storage, FakeBackend};

    #[tokio::test]
    async fn test_interview_recording_targets_namespaced_mp4() {
        let backend = Arc::new(FakeBackend::default());
        let recorder =
            RecordingOrchestrator::new(configured_livekit(), configured_storage(), backend.clone());

        let record = recorder.start("abc", SessionType::Interview).await.unwrap();
        assert_eq!(record.egress_id, "EG_abc");

        let request = backend.last_egress_request().unwrap();
        assert_eq!(request.layout, "grid");
        assert!(!request.audio_only);
        let output = &request.file_outputs[0];
        assert_eq!(output.filepath, "interviews/abc/session.mp4");
        assert_eq!(output.file_type, EncodedFileType::Mp4);
        assert!(output.s3.force_path_style);
        assert_eq!(output.s3.endpoint.as_deref(), Some("http://minio:9000"));
    }

    #[tokio::test]
    async fn test_demo_recording_is_audio_only() {
        let backend = Arc::new(FakeBackend::default());
        let recorder =
            RecordingOrchestrator::new(configured_livekit(), configured_storage(), backend.clone());

        recorder.start("demo-room", SessionType::Demo).await.unwrap();
        let request = backend.last_egress_request().unwrap();
        assert!(request.audio_only);
        assert_eq!(request.file_outputs[0].filepath, "demo-room/session.mp4");
    }

    #[tokio::test]
    async fn test_missing_storage_is_swallowed_without_backend_call() {
        let backend = Arc::new(FakeBackend::default());
        let recorder = RecordingOrchestrator::new(
            configured_livekit(),
            StorageSettings {
                region: "us-east-1".to_string(),
                ..StorageSettings::default()
            },
            backend.clone(),
        );

        assert!(recorder.start("abc", SessionType::Demo).await.is_none());
        assert_eq!(backend.egress_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_rejection_is_swallowed() {
        let backend = Arc::new(FakeBackend::failing_egress());
        let recorder =
            RecordingOrchestrator::new(configured_livekit(), configured_storage(), backend.clone());

        assert!(recorder.start("abc", SessionType::Interview).await.is_none());
        assert_eq!(backend.egress_calls.load(Ordering::SeqCst), 1);
    }
}
