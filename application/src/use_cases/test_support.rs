//! In-process doubles for the session use case tests

use crate::ports::evaluator::{EvaluationError, FeedbackEvaluator};
use crate::ports::llm_gateway::GatewayError;
use crate::ports::log_store::{LogStore, StoreError, StreamInfo};
use crate::ports::room_codes::RoomCodeGenerator;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pulse_domain::{
    Answer, Evaluation, Identity, ParticipantSubmission, Question, RoomCode, SessionDefinition,
    SessionMetadata, SessionStatus, StreamName, StreamRecord, StudentAnswer,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Log store kept in memory, listing streams in creation order
#[derive(Default)]
pub struct MockStore {
    streams: Mutex<Vec<(String, Vec<String>)>>,
    failing_reads: Mutex<HashSet<String>>,
    failing_appends: Mutex<HashSet<String>>,
    pub reads: AtomicUsize,
    pub lists: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, stream: &str, record: &StreamRecord) {
        self.push_body(stream, &record.encode().unwrap());
    }

    pub fn push_body(&self, stream: &str, body: &str) {
        let mut streams = self.streams.lock().unwrap();
        match streams.iter_mut().find(|(name, _)| name == stream) {
            Some((_, bodies)) => bodies.push(body.to_string()),
            None => streams.push((stream.to_string(), vec![body.to_string()])),
        }
    }

    pub fn bodies(&self, stream: &str) -> Vec<String> {
        self.streams
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == stream)
            .map(|(_, bodies)| bodies.clone())
            .unwrap_or_default()
    }

    pub fn stream_names(&self) -> Vec<String> {
        self.streams
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn fail_reads_of(&self, stream: &str) {
        self.failing_reads.lock().unwrap().insert(stream.to_string());
    }

    /// Fail appends to every stream whose name starts with `prefix`
    pub fn fail_appends_to(&self, prefix: &str) {
        self.failing_appends
            .lock()
            .unwrap()
            .insert(prefix.to_string());
    }
}

#[async_trait]
impl LogStore for MockStore {
    async fn append_body(&self, stream: &StreamName, body: String) -> Result<(), StoreError> {
        let failing = self
            .failing_appends
            .lock()
            .unwrap()
            .iter()
            .any(|p| stream.as_str().starts_with(p.as_str()));
        if failing {
            return Err(StoreError::Http {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.push_body(stream.as_str(), &body);
        Ok(())
    }

    async fn read_bodies(
        &self,
        stream: &StreamName,
        start_seq: u64,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads.lock().unwrap().contains(stream.as_str()) {
            return Err(StoreError::Transport("connection reset".to_string()));
        }
        let streams = self.streams.lock().unwrap();
        match streams.iter().find(|(name, _)| name == stream.as_str()) {
            Some((_, bodies)) => Ok(bodies
                .iter()
                .skip(start_seq as usize)
                .take(limit)
                .cloned()
                .collect()),
            None => Err(StoreError::Http {
                status: 404,
                body: "stream not found".to_string(),
            }),
        }
    }

    async fn list_streams(&self) -> Result<Vec<StreamInfo>, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .stream_names()
            .into_iter()
            .map(StreamInfo::new)
            .collect())
    }
}

/// Evaluator returning canned results and recording its calls
pub struct MockEvaluator {
    evaluations: Mutex<VecDeque<Result<Evaluation, EvaluationError>>>,
    quiz: Mutex<Option<Result<Vec<Question>, EvaluationError>>>,
    recommendation: Mutex<Option<Result<String, EvaluationError>>>,
    pub evaluate_calls: Mutex<Vec<(String, Vec<StudentAnswer>)>>,
    pub recommend_calls: Mutex<Vec<String>>,
    pub quiz_calls: AtomicUsize,
}

impl MockEvaluator {
    pub fn new() -> Self {
        Self {
            evaluations: Mutex::new(VecDeque::new()),
            quiz: Mutex::new(None),
            recommendation: Mutex::new(None),
            evaluate_calls: Mutex::new(Vec::new()),
            recommend_calls: Mutex::new(Vec::new()),
            quiz_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_evaluation(self, positive: &str, improvement: &str) -> Self {
        self.evaluations.lock().unwrap().push_back(Ok(Evaluation {
            positive_summary: positive.to_string(),
            improvement_summary: improvement.to_string(),
            teacher_feedback: format!("Advice about {positive}"),
        }));
        self
    }

    pub fn with_failed_evaluation(self) -> Self {
        self.evaluations
            .lock()
            .unwrap()
            .push_back(Err(EvaluationError::Gateway(GatewayError::Timeout)));
        self
    }

    pub fn with_quiz(self, quiz: Vec<Question>) -> Self {
        *self.quiz.lock().unwrap() = Some(Ok(quiz));
        self
    }

    pub fn with_recommendation(self, text: &str) -> Self {
        *self.recommendation.lock().unwrap() = Some(Ok(text.to_string()));
        self
    }

    pub fn with_failed_recommendation(self) -> Self {
        *self.recommendation.lock().unwrap() = Some(Err(EvaluationError::Gateway(
            GatewayError::RequestFailed("quota exceeded".to_string()),
        )));
        self
    }

    pub fn evaluate_count(&self) -> usize {
        self.evaluate_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl FeedbackEvaluator for MockEvaluator {
    async fn generate_quiz(&self, _lecture_text: &str) -> Result<Vec<Question>, EvaluationError> {
        self.quiz_calls.fetch_add(1, Ordering::SeqCst);
        self.quiz
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(EvaluationError::Gateway(GatewayError::Timeout)))
    }

    async fn evaluate_answers(
        &self,
        _lecture_text: &str,
        question: &str,
        answers: &[StudentAnswer],
    ) -> Result<Evaluation, EvaluationError> {
        self.evaluate_calls
            .lock()
            .unwrap()
            .push((question.to_string(), answers.to_vec()));
        self.evaluations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EvaluationError::Gateway(GatewayError::Timeout)))
    }

    async fn recommend_reteach(
        &self,
        _lecture_text: &str,
        question: &str,
    ) -> Result<String, EvaluationError> {
        self.recommend_calls
            .lock()
            .unwrap()
            .push(question.to_string());
        self.recommendation
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("Class, let's pause for a moment...".to_string()))
    }
}

/// Generator handing out a fixed sequence of codes, repeating the last one
pub struct SequenceCodes {
    codes: Mutex<VecDeque<u16>>,
    last: Mutex<u16>,
}

impl SequenceCodes {
    pub fn new(codes: &[u16]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().copied().collect()),
            last: Mutex::new(codes.last().copied().unwrap_or(1000)),
        }
    }
}

impl RoomCodeGenerator for SequenceCodes {
    fn next_code(&self) -> RoomCode {
        let n = self
            .codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(*self.last.lock().unwrap());
        RoomCode::clamped(n)
    }
}

pub fn code(raw: &str) -> RoomCode {
    RoomCode::parse(raw).unwrap()
}

pub fn teacher() -> Identity {
    Identity::teacher("t1").with_display_name("Dr. Rivera")
}

pub fn photosynthesis_quiz() -> Vec<Question> {
    vec![
        Question::new(1, "What are the inputs of photosynthesis?"),
        Question::new(2, "Where does the Calvin cycle happen?"),
    ]
}

pub fn definition(owner: &str, room: &str, minute: u32) -> StreamRecord {
    StreamRecord::SessionDefinition(
        SessionDefinition::new(
            "Photosynthesis converts light into chemical energy.",
            photosynthesis_quiz(),
            SessionMetadata {
                user_id: owner.to_string(),
                user_name: "Dr. Rivera".to_string(),
                room_code: code(room),
                created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, minute, 0).unwrap(),
                status: SessionStatus::Active,
            },
        )
        .unwrap(),
    )
}

pub fn submission(student: &str, answers: &[(u32, &str)]) -> StreamRecord {
    StreamRecord::ParticipantSubmission(
        ParticipantSubmission::new(
            student,
            answers.iter().map(|(q, a)| Answer::new(*q, *a)).collect(),
        )
        .unwrap(),
    )
}
