//! ApplicationPipeline — score a resume against a job's skills and record the result.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::applications::store::ApplicationStore;
use crate::db::PersistenceError;
use crate::matching::{MatchError, MatchingEngine};
use crate::models::application::ApplicationRow;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct ApplicationPipeline {
    engine: MatchingEngine,
    store: Arc<dyn ApplicationStore>,
}

impl ApplicationPipeline {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self {
            engine: MatchingEngine::new(),
            store,
        }
    }

    /// Scores the pair and persists exactly one new application.
    ///
    /// Not idempotent: every call writes a fresh record with a fresh id. A scoring failure
    /// aborts before the write; a write failure discards the score.
    pub async fn apply(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        resume_text: &str,
        skills_text: &str,
    ) -> Result<f64, ApplyError> {
        let score = match self.engine.score(resume_text, skills_text) {
            Ok(score) => score,
            Err(err) => {
                warn!(%candidate_id, %job_id, "application rejected: {err}");
                return Err(err.into());
            }
        };

        let record = ApplicationRow {
            id: Uuid::new_v4(),
            candidate_id,
            job_id,
            score,
            applied_at: Utc::now(),
        };
        self.store.create_application(&record).await?;

        info!(
            application_id = %record.id,
            %candidate_id,
            %job_id,
            score,
            "application recorded"
        );
        Ok(score)
    }

    pub async fn get(&self, application_id: Uuid) -> Result<Option<ApplicationRow>, PersistenceError> {
        self.store.get_application(application_id).await
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, PersistenceError> {
        self.store.list_applications_for_job(job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, MissingReferenceStore};

    const RESUME: &str = "Python developer with SQL experience";
    const SKILLS: &str = "Python SQL database";

    fn pipeline() -> (ApplicationPipeline, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (ApplicationPipeline::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_apply_persists_one_record_with_returned_score() {
        let (pipeline, store) = pipeline();
        let (candidate_id, job_id) = (Uuid::new_v4(), Uuid::new_v4());

        let score = pipeline
            .apply(candidate_id, job_id, RESUME, SKILLS)
            .await
            .unwrap();

        assert_eq!(score, 41.12);
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].candidate_id, candidate_id);
        assert_eq!(records[0].job_id, job_id);
        assert_eq!(records[0].score, score);
    }

    #[tokio::test]
    async fn test_apply_round_trips_through_store() {
        let (pipeline, store) = pipeline();
        let score = pipeline
            .apply(Uuid::new_v4(), Uuid::new_v4(), RESUME, SKILLS)
            .await
            .unwrap();

        let id = store.records()[0].id;
        let stored = pipeline.get(id).await.unwrap().expect("record present");
        assert_eq!(stored.score, score);
    }

    #[tokio::test]
    async fn test_apply_is_not_idempotent() {
        let (pipeline, store) = pipeline();
        let (candidate_id, job_id) = (Uuid::new_v4(), Uuid::new_v4());

        let first = pipeline.apply(candidate_id, job_id, RESUME, SKILLS).await.unwrap();
        let second = pipeline.apply(candidate_id, job_id, RESUME, SKILLS).await.unwrap();

        assert_eq!(first, second);
        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
    }

    #[tokio::test]
    async fn test_empty_vocabulary_writes_nothing() {
        let (pipeline, store) = pipeline();

        let result = pipeline.apply(Uuid::new_v4(), Uuid::new_v4(), "", "").await;

        assert!(matches!(
            result,
            Err(ApplyError::Match(MatchError::EmptyVocabulary))
        ));
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_disjoint_texts_still_record_zero_score() {
        let (pipeline, store) = pipeline();
        let score = pipeline
            .apply(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "Java backend engineer",
                "Python frontend designer",
            )
            .await
            .unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates() {
        let pipeline = ApplicationPipeline::new(Arc::new(MissingReferenceStore));

        match pipeline.apply(Uuid::new_v4(), Uuid::new_v4(), RESUME, SKILLS).await {
            Err(ApplyError::Persistence(PersistenceError::MissingReference(_))) => {}
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_for_job_orders_by_score() {
        let (pipeline, _store) = pipeline();
        let job_id = Uuid::new_v4();

        pipeline
            .apply(Uuid::new_v4(), job_id, "Java backend engineer", SKILLS)
            .await
            .unwrap();
        pipeline.apply(Uuid::new_v4(), job_id, SKILLS, SKILLS).await.unwrap();
        pipeline.apply(Uuid::new_v4(), job_id, RESUME, SKILLS).await.unwrap();
        pipeline
            .apply(Uuid::new_v4(), Uuid::new_v4(), RESUME, SKILLS)
            .await
            .unwrap();

        let scores: Vec<f64> = pipeline
            .list_for_job(job_id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.score)
            .collect();
        assert_eq!(scores, vec![100.0, 41.12, 0.0]);
    }
}
