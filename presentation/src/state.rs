//! Shared server state

use pulse_application::{
    AggregateFeedbackUseCase, CreateSessionUseCase, FeedbackEvaluator, FetchRoomDataUseCase,
    ListSessionsUseCase, LogStore, RoomCodeGenerator, RoomResolver, SessionIndex, SessionParams,
    SetStatusUseCase, SimplifyQuestionUseCase, Simplifier, SubmitResponseUseCase,
};
use std::sync::Arc;

/// External collaborators the use cases are built on
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn LogStore>,
    pub evaluator: Arc<dyn FeedbackEvaluator>,
    pub simplifier: Arc<dyn Simplifier>,
    pub codes: Arc<dyn RoomCodeGenerator>,
}

/// Use cases shared by all request handlers
pub struct AppState {
    pub create_session: CreateSessionUseCase,
    pub fetch_room_data: FetchRoomDataUseCase,
    pub submit_response: SubmitResponseUseCase,
    pub aggregate_feedback: AggregateFeedbackUseCase,
    pub list_sessions: ListSessionsUseCase,
    pub set_status: SetStatusUseCase,
    pub simplify: SimplifyQuestionUseCase,
}

impl AppState {
    /// Wire every use case onto one set of collaborators
    pub fn new(deps: Collaborators, params: SessionParams) -> Self {
        let index = Arc::new(SessionIndex::new(
            deps.store.clone(),
            params.read_limit,
            params.use_index,
        ));
        let resolver = Arc::new(RoomResolver::new(
            deps.store.clone(),
            index.clone(),
            params.read_limit,
        ));

        Self {
            create_session: CreateSessionUseCase::new(
                deps.store.clone(),
                deps.evaluator.clone(),
                deps.codes,
                index.clone(),
                params.clone(),
            ),
            fetch_room_data: FetchRoomDataUseCase::new(resolver.clone()),
            submit_response: SubmitResponseUseCase::new(deps.store.clone(), resolver.clone()),
            aggregate_feedback: AggregateFeedbackUseCase::new(deps.evaluator, resolver),
            list_sessions: ListSessionsUseCase::new(deps.store.clone(), index, params.clone()),
            set_status: SetStatusUseCase::new(deps.store, params),
            simplify: SimplifyQuestionUseCase::new(deps.simplifier),
        }
    }
}
