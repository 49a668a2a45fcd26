//! Session lifecycle use cases
//!
//! Together these form the Session Lifecycle Controller: StartSession
//! (Setup -> Active), SubmitAnswer (the per-event state machine), and
//! EndSession (summary).

pub mod end_session;
pub mod shared;
pub mod start_session;
pub mod submit_answer;

pub use end_session::{EndSessionUseCase, SessionSummary};
pub use shared::{EngineError, Prompt, PromptView};
pub use start_session::{SessionStarted, StartSessionInput, StartSessionUseCase};
pub use submit_answer::{SubmitAnswerInput, SubmitAnswerUseCase};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineParams;
    use crate::evaluator::FollowupEvaluator;
    use crate::ports::analyzer::{AnalyzerError, DocumentAnalyzer};
    use crate::ports::generator::{GenerationRequest, GeneratorError, QuestionGenerator};
    use crate::ports::judge::{FollowupJudge, FollowupVerdict, JudgeError, NoFollowupJudge};
    use crate::ports::random::{RandomSource, SequenceRandom};
    use crate::ports::store::{SessionStore, StoreError};
    use crate::synthesizer::QuestionSynthesizer;
    use async_trait::async_trait;
    use boardroom_domain::{
        AnswerModality, Role, Session, SessionLimit, SessionMeta, SessionOptions,
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::OwnedMutexGuard;

    // --- test doubles -----------------------------------------------------

    struct TestStore {
        sessions: tokio::sync::Mutex<HashMap<String, Session>>,
        locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
    }

    impl TestStore {
        fn new() -> Self {
            Self {
                sessions: tokio::sync::Mutex::new(HashMap::new()),
                locks: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SessionStore for TestStore {
        async fn create(&self, session: Session) -> Result<(), StoreError> {
            let mut sessions = self.sessions.lock().await;
            sessions.insert(session.id().to_string(), session);
            Ok(())
        }

        async fn get(&self, id: &str) -> Result<Session, StoreError> {
            let sessions = self.sessions.lock().await;
            sessions
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }

        async fn update(&self, session: Session) -> Result<(), StoreError> {
            let mut sessions = self.sessions.lock().await;
            sessions.insert(session.id().to_string(), session);
            Ok(())
        }

        async fn lock(&self, id: &str) -> OwnedMutexGuard<()> {
            let lock = {
                let mut locks = self.locks.lock().unwrap();
                Arc::clone(
                    locks
                        .entry(id.to_string())
                        .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
                )
            };
            lock.lock_owned().await
        }
    }

    /// Generator that pops scripted outcomes, then repeats the last one
    struct ScriptedGenerator {
        script: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(script: &[&str]) -> Self {
            Self {
                script: Mutex::new(script.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl QuestionGenerator for ScriptedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GeneratorError> {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                Ok(script.remove(0))
            } else {
                script
                    .first()
                    .cloned()
                    .ok_or(GeneratorError::Unavailable)
            }
        }
    }

    struct StubAnalyzer;

    #[async_trait]
    impl DocumentAnalyzer for StubAnalyzer {
        async fn analyze(
            &self,
            _meta: &SessionMeta,
            _document: &str,
        ) -> Result<Vec<String>, AnalyzerError> {
            Ok(vec![
                "Recommendation: enter adjacent markets - capability fit".into(),
                "Analysis: market sizing - optimistic growth".into(),
                "Assumption: 25% adoption in 18 months - revenue critical".into(),
            ])
        }
    }

    struct EagerJudge;

    #[async_trait]
    impl FollowupJudge for EagerJudge {
        async fn judge(
            &self,
            _role: Role,
            _question: &str,
            _answer: &str,
        ) -> Result<FollowupVerdict, JudgeError> {
            Ok(FollowupVerdict {
                needs_followup: true,
                reason: Some("vague".into()),
                question: Some("Could you quantify that?".into()),
            })
        }
    }

    // --- harness ----------------------------------------------------------

    struct Engine {
        start: StartSessionUseCase,
        submit: SubmitAnswerUseCase,
        end: EndSessionUseCase,
    }

    fn engine_with(
        script: &[&str],
        judge: Arc<dyn FollowupJudge>,
        params: EngineParams,
    ) -> Engine {
        let store: Arc<dyn SessionStore> = Arc::new(TestStore::new());
        let random: Arc<dyn RandomSource> = Arc::new(SequenceRandom::first());
        let synthesizer = Arc::new(QuestionSynthesizer::new(
            Some(Arc::new(ScriptedGenerator::new(script))),
            Arc::clone(&random),
            params.clone(),
        ));

        Engine {
            start: StartSessionUseCase::new(
                Arc::new(StubAnalyzer),
                Arc::clone(&synthesizer),
                Arc::clone(&store),
                params.clone(),
            ),
            submit: SubmitAnswerUseCase::new(
                Arc::clone(&synthesizer),
                FollowupEvaluator::new(judge, params),
                Arc::clone(&store),
                random,
            ),
            end: EndSessionUseCase::new(store),
        }
    }

    fn input(roles: Vec<Role>, limit: SessionLimit, followups: bool) -> StartSessionInput {
        StartSessionInput {
            document: "A thorough plan describing expansion and revenue goals.".into(),
            meta: SessionMeta::default(),
            roles,
            limit,
            options: SessionOptions {
                followups_enabled: followups,
            },
        }
    }

    async fn answer(engine: &Engine, session_id: &str, text: &str) -> Prompt {
        engine
            .submit
            .execute(SubmitAnswerInput {
                session_id: session_id.to_string(),
                answer: text.to_string(),
                modality: AnswerModality::Text,
            })
            .await
            .unwrap()
    }

    const DISTINCT_QUESTIONS: &[&str] = &[
        "What makes the alpha claim credible under pressure?",
        "Where does funding come from during slower quarters?",
        "Who owns execution once rollout begins next month?",
        "Which rivals respond fastest when prices change sharply?",
    ];

    // --- tests ------------------------------------------------------------

    #[tokio::test]
    async fn test_two_role_limit_two_scenario() {
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(NoFollowupJudge),
            EngineParams::default(),
        );

        let started = engine
            .start
            .execute(input(
                vec![Role::Ceo, Role::Cfo],
                SessionLimit::Questions(2),
                true,
            ))
            .await
            .unwrap();
        assert_eq!(started.first_question.role, Role::Ceo);

        // Turn 2: CFO asks, no follow-up (answer deemed adequate).
        let second = answer(&engine, &started.session_id, "We will grow through partnerships.").await;
        match &second {
            Prompt::Question(view) => assert_eq!(view.role, Role::Cfo),
            other => panic!("expected question, got {other:?}"),
        }

        // Next count (3) exceeds the limit (2): closing from the CEO.
        let third = answer(&engine, &started.session_id, "Margins improve in year two.").await;
        match &third {
            Prompt::Closing(view) => assert_eq!(view.role, Role::Ceo),
            other => panic!("expected closing, got {other:?}"),
        }

        // The session is ended; further answers are rejected.
        let err = engine
            .submit
            .execute(SubmitAnswerInput {
                session_id: started.session_id.clone(),
                answer: "one more".into(),
                modality: AnswerModality::Text,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::SessionEnded(_)));

        let summary = engine.end.execute(&started.session_id).await.unwrap();
        assert_eq!(summary.total_questions, 2);
        assert_eq!(summary.total_answers, 2);
        assert_eq!(summary.roles_involved, vec!["CEO", "CFO"]);
    }

    #[tokio::test]
    async fn test_limit_never_overshoots() {
        let limit = 3u32;
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(NoFollowupJudge),
            EngineParams::default(),
        );

        let started = engine
            .start
            .execute(input(
                vec![Role::Ceo, Role::Cfo, Role::Cto],
                SessionLimit::Questions(limit),
                false,
            ))
            .await
            .unwrap();

        let mut questions = 1u32;
        let mut closed = false;
        for i in 0..limit + 1 {
            let prompt = answer(
                &engine,
                &started.session_id,
                &format!("Detailed answer number {i} covering the point raised."),
            )
            .await;
            match prompt {
                Prompt::Question(_) => questions += 1,
                Prompt::Closing(_) => {
                    closed = true;
                    break;
                }
                Prompt::FollowUp(_) => panic!("follow-ups disabled"),
            }
        }

        assert!(closed);
        assert_eq!(questions, limit, "an (N+1)-th question must never be asked");
    }

    #[tokio::test]
    async fn test_followup_offered_once_then_rotation_continues() {
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(EagerJudge),
            EngineParams::default(),
        );

        let started = engine
            .start
            .execute(input(
                vec![Role::Ceo, Role::Cfo],
                SessionLimit::Questions(6),
                true,
            ))
            .await
            .unwrap();

        // Turn 1 is odd: no follow-up even though the judge is eager.
        let p1 = answer(
            &engine,
            &started.session_id,
            "A long opening answer with plenty of substance to evaluate.",
        )
        .await;
        assert!(matches!(p1, Prompt::Question(_)));

        // Turn 2 is even: the eager judge gets its follow-up.
        let p2 = answer(
            &engine,
            &started.session_id,
            "Another long answer that the judge will find vague anyway.",
        )
        .await;
        let followup_role = match &p2 {
            Prompt::FollowUp(view) => {
                assert!(view.is_followup);
                view.role
            }
            other => panic!("expected follow-up, got {other:?}"),
        };

        // Answering the follow-up never chains a second one.
        let p3 = answer(
            &engine,
            &started.session_id,
            "A thorough clarification with numbers and specifics included.",
        )
        .await;
        match &p3 {
            Prompt::Question(view) => assert_ne!(view.role, followup_role),
            other => panic!("expected rotation to continue, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_circuit_breaker_forces_close() {
        // Disable de-duplication so the degenerate generator output
        // reaches the log unmodified.
        let params = EngineParams {
            dedup_window: 0,
            ..EngineParams::default()
        };
        let engine = engine_with(
            &["Same question repeated every single time?"],
            Arc::new(NoFollowupJudge),
            params,
        );

        let started = engine
            .start
            .execute(input(
                vec![Role::Ceo, Role::Cfo],
                SessionLimit::Questions(10),
                false,
            ))
            .await
            .unwrap();

        // Two more identical questions land in the log.
        for i in 0..2 {
            let prompt = answer(
                &engine,
                &started.session_id,
                &format!("Answer number {i} to the repeated question."),
            )
            .await;
            assert!(matches!(prompt, Prompt::Question(_)));
        }

        // Three identical questions recorded: the very next event must
        // close the session despite the remaining limit.
        let prompt = answer(&engine, &started.session_id, "Yet another answer.").await;
        assert!(prompt.is_closing());
    }

    #[tokio::test]
    async fn test_empty_answer_rejected_without_state_change() {
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(NoFollowupJudge),
            EngineParams::default(),
        );
        let started = engine
            .start
            .execute(input(vec![Role::Ceo], SessionLimit::Questions(5), false))
            .await
            .unwrap();

        let err = engine
            .submit
            .execute(SubmitAnswerInput {
                session_id: started.session_id.clone(),
                answer: "   ".into(),
                modality: AnswerModality::Text,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::EmptyAnswer));

        // The pending question is still answerable.
        let prompt = answer(&engine, &started.session_id, "A real answer this time.").await;
        assert!(matches!(prompt, Prompt::Question(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_rejected() {
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(NoFollowupJudge),
            EngineParams::default(),
        );
        let err = engine
            .submit
            .execute(SubmitAnswerInput {
                session_id: "no-such-session".into(),
                answer: "hello".into(),
                modality: AnswerModality::Text,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_audio_answers_counted_in_summary() {
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(NoFollowupJudge),
            EngineParams::default(),
        );
        let started = engine
            .start
            .execute(input(vec![Role::Ceo], SessionLimit::Questions(3), false))
            .await
            .unwrap();

        engine
            .submit
            .execute(SubmitAnswerInput {
                session_id: started.session_id.clone(),
                answer: "A spoken answer, transcribed.".into(),
                modality: AnswerModality::Audio,
            })
            .await
            .unwrap();

        let summary = engine.end.execute(&started.session_id).await.unwrap();
        assert_eq!(summary.audio_answers, 1);
        assert_eq!(summary.text_answers, 0);
    }

    #[tokio::test]
    async fn test_start_requires_roles_and_document() {
        let engine = engine_with(
            DISTINCT_QUESTIONS,
            Arc::new(NoFollowupJudge),
            EngineParams::default(),
        );

        let err = engine
            .start
            .execute(input(vec![], SessionLimit::Questions(2), false))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NoRoles));

        let mut empty_doc = input(vec![Role::Ceo], SessionLimit::Questions(2), false);
        empty_doc.document = "  ".into();
        let err = engine.start.execute(empty_doc).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyDocument));
    }
}
