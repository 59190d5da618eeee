//! Mastery record generation and verification
//!
//! A compact binary record a host can hold as evidence that a lesson was
//! completed: passing score, full transfer coverage, terminal phase. The
//! record hash covers the packed fields, and the event digest covers the
//! session's emitted event log. Nothing here touches disk.

use sha2::{Digest, Sha256};

use crate::content::GameKind;
use crate::types::{LessonEvent, Phase};
use crate::PASS_THRESHOLD;

/// Packed record size: 86 payload bytes + 32 hash bytes
pub const RECORD_SIZE: usize = 118;

/// Record format version
pub const RECORD_VERSION: u16 = 1;

/// A completed lesson's mastery record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasteryRecord {
    /// Format version
    pub version: u16,
    /// Unique session identifier (16 bytes)
    pub session_id: [u8; 16],
    /// Lesson id, ASCII, zero-padded to 16 bytes
    pub game_id: [u8; 16],
    /// Final quiz score
    pub score: u32,
    /// Question count
    pub total: u32,
    /// When mastery was reached (Unix timestamp)
    pub completed_unix: i64,
    /// Number of events in the session log
    pub event_count: u32,
    /// SHA-256 over the session's event log
    pub event_digest: [u8; 32],
    /// SHA-256 over the packed fields above
    pub record_hash: [u8; 32],
}

impl MasteryRecord {
    /// Serialize to fixed-size bytes
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        let mut offset = 0;

        bytes[offset..offset + 2].copy_from_slice(&self.version.to_be_bytes());
        offset += 2;
        bytes[offset..offset + 16].copy_from_slice(&self.session_id);
        offset += 16;
        bytes[offset..offset + 16].copy_from_slice(&self.game_id);
        offset += 16;
        bytes[offset..offset + 4].copy_from_slice(&self.score.to_be_bytes());
        offset += 4;
        bytes[offset..offset + 4].copy_from_slice(&self.total.to_be_bytes());
        offset += 4;
        bytes[offset..offset + 8].copy_from_slice(&self.completed_unix.to_be_bytes());
        offset += 8;
        bytes[offset..offset + 4].copy_from_slice(&self.event_count.to_be_bytes());
        offset += 4;
        bytes[offset..offset + 32].copy_from_slice(&self.event_digest);
        offset += 32;
        bytes[offset..offset + 32].copy_from_slice(&self.record_hash);

        bytes
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut offset = 0;

        let version = u16::from_be_bytes([bytes[0], bytes[1]]);
        offset += 2;

        let mut session_id = [0u8; 16];
        session_id.copy_from_slice(&bytes[offset..offset + 16]);
        offset += 16;

        let mut game_id = [0u8; 16];
        game_id.copy_from_slice(&bytes[offset..offset + 16]);
        offset += 16;

        let score = u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap());
        offset += 4;
        let total = u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap());
        offset += 4;
        let completed_unix = i64::from_be_bytes(bytes[offset..offset + 8].try_into().unwrap());
        offset += 8;
        let event_count = u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap());
        offset += 4;

        let mut event_digest = [0u8; 32];
        event_digest.copy_from_slice(&bytes[offset..offset + 32]);
        offset += 32;

        let mut record_hash = [0u8; 32];
        record_hash.copy_from_slice(&bytes[offset..offset + 32]);

        Self {
            version,
            session_id,
            game_id,
            score,
            total,
            completed_unix,
            event_count,
            event_digest,
            record_hash,
        }
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        self.to_bytes().iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Lesson id as a string, padding stripped
    pub fn game_id_str(&self) -> String {
        String::from_utf8_lossy(&self.game_id)
            .trim_end_matches('\0')
            .to_string()
    }
}

/// Reason codes for record generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordReason {
    /// Record successfully generated
    Generated,
    /// Current phase is not mastery
    NotMastery,
    /// Not all ten questions are submitted
    QuizIncomplete,
    /// Score below the pass threshold
    NotPassing,
    /// Transfer phase entries not all completed
    ApplicationsIncomplete,
}

impl RecordReason {
    /// Get code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Generated => "record_generated",
            Self::NotMastery => "record_not_mastery",
            Self::QuizIncomplete => "record_quiz_incomplete",
            Self::NotPassing => "record_not_passing",
            Self::ApplicationsIncomplete => "record_applications_incomplete",
        }
    }

    /// Is this a success code?
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Generated)
    }
}

impl std::fmt::Display for RecordReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of a record generation attempt
#[derive(Debug, Clone)]
pub struct RecordResult {
    /// The record if successful
    pub record: Option<MasteryRecord>,
    /// Reason code
    pub reason: RecordReason,
}

impl RecordResult {
    pub fn success(record: MasteryRecord) -> Self {
        Self { record: Some(record), reason: RecordReason::Generated }
    }

    pub fn failure(reason: RecordReason) -> Self {
        Self { record: None, reason }
    }

    pub fn is_success(&self) -> bool {
        self.record.is_some()
    }
}

/// Mastery record generator
#[derive(Debug, Default)]
pub struct RecordGenerator;

impl RecordGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Check if a record can be generated (policy check only)
    pub fn can_generate(
        &self,
        phase: Phase,
        quiz_complete: bool,
        score: u32,
        all_applications: bool,
    ) -> Result<(), RecordReason> {
        if phase != Phase::Mastery {
            return Err(RecordReason::NotMastery);
        }
        if !quiz_complete {
            return Err(RecordReason::QuizIncomplete);
        }
        if score < PASS_THRESHOLD {
            return Err(RecordReason::NotPassing);
        }
        if !all_applications {
            return Err(RecordReason::ApplicationsIncomplete);
        }
        Ok(())
    }

    /// Generate a record over the session's event log
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        &self,
        session_id: [u8; 16],
        game: GameKind,
        phase: Phase,
        quiz_complete: bool,
        score: u32,
        total: u32,
        all_applications: bool,
        events: &[LessonEvent],
    ) -> RecordResult {
        if let Err(reason) = self.can_generate(phase, quiz_complete, score, all_applications) {
            return RecordResult::failure(reason);
        }

        let mut game_id = [0u8; 16];
        let id_bytes = game.id().as_bytes();
        game_id[..id_bytes.len()].copy_from_slice(id_bytes);

        let mut record = MasteryRecord {
            version: RECORD_VERSION,
            session_id,
            game_id,
            score,
            total,
            completed_unix: chrono::Utc::now().timestamp(),
            event_count: events.len() as u32,
            event_digest: hash_events(events),
            record_hash: [0u8; 32],
        };

        // Hash the packed fields, excluding the hash slot itself
        let packed = record.to_bytes();
        record.record_hash = sha256(&packed[0..RECORD_SIZE - 32]);

        RecordResult::success(record)
    }
}

/// Digest the event log: one line per event, type + timestamp + details
pub fn hash_events(events: &[LessonEvent]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for event in events {
        hasher.update(event.event_type.code().as_bytes());
        hasher.update(b"|");
        hasher.update(event.timestamp.to_rfc3339().as_bytes());
        hasher.update(b"|");
        hasher.update(
            serde_json::to_string(&event.details).unwrap_or_default().as_bytes(),
        );
        hasher.update(b"\n");
    }
    hasher.finalize().into()
}

/// Verify a record's integrity hash
pub fn verify_record(record: &MasteryRecord) -> bool {
    let packed = record.to_bytes();
    sha256(&packed[0..RECORD_SIZE - 32]) == record.record_hash
}

fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventType;

    fn events() -> Vec<LessonEvent> {
        vec![
            LessonEvent::new(EventType::LessonStarted, "back-emf-lab", "Back-EMF Lab"),
            LessonEvent::new(EventType::GameCompleted, "back-emf-lab", "Back-EMF Lab"),
        ]
    }

    fn generate_passing() -> RecordResult {
        RecordGenerator::new().generate(
            [7u8; 16],
            GameKind::BackEmf,
            Phase::Mastery,
            true,
            9,
            10,
            true,
            &events(),
        )
    }

    #[test]
    fn test_generates_only_in_mastery() {
        let gen = RecordGenerator::new();
        let result =
            gen.generate([0u8; 16], GameKind::BackEmf, Phase::Test, true, 10, 10, true, &[]);
        assert!(!result.is_success());
        assert_eq!(result.reason, RecordReason::NotMastery);
    }

    #[test]
    fn test_requires_passing_score() {
        let gen = RecordGenerator::new();
        let result =
            gen.generate([0u8; 16], GameKind::BackEmf, Phase::Mastery, true, 6, 10, true, &[]);
        assert_eq!(result.reason, RecordReason::NotPassing);
    }

    #[test]
    fn test_requires_all_applications() {
        let gen = RecordGenerator::new();
        let result =
            gen.generate([0u8; 16], GameKind::BackEmf, Phase::Mastery, true, 10, 10, false, &[]);
        assert_eq!(result.reason, RecordReason::ApplicationsIncomplete);
    }

    #[test]
    fn test_round_trip_and_verify() {
        let record = generate_passing().record.unwrap();
        assert!(verify_record(&record));

        let bytes = record.to_bytes();
        let back = MasteryRecord::from_bytes(&bytes);
        assert_eq!(back, record);
        assert!(verify_record(&back));
        assert_eq!(back.game_id_str(), "back-emf-lab");
        assert_eq!(back.score, 9);
    }

    #[test]
    fn test_tampered_record_fails_verification() {
        let record = generate_passing().record.unwrap();
        let mut bytes = record.to_bytes();
        // Flip the score field
        bytes[34] ^= 0xff;
        let tampered = MasteryRecord::from_bytes(&bytes);
        assert!(!verify_record(&tampered));
    }

    #[test]
    fn test_event_digest_is_order_sensitive() {
        let evs = events();
        let forward = hash_events(&evs);
        let reversed: Vec<_> = evs.into_iter().rev().collect();
        assert_ne!(forward, hash_events(&reversed));
    }
}
