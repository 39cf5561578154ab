//! Submission repository for checklist records.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewSubmission, Submission};
use crate::types::{OffsetPage, OffsetPagination, SubmissionKind};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for submission database operations.
///
/// Every read is scoped to a single owner; there is no query that returns
/// another account's submissions.
pub trait SubmissionRepository {
    /// Inserts a submission in a single statement and returns the stored row.
    fn create_submission(
        &mut self,
        new_submission: NewSubmission,
    ) -> impl Future<Output = PgResult<Submission>> + Send;

    /// Lists an owner's submissions of one kind, newest first.
    fn list_submissions(
        &mut self,
        owner_id: Uuid,
        kind: SubmissionKind,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<OffsetPage<Submission>>> + Send;

    /// Counts an owner's submissions of one kind.
    fn count_submissions(
        &mut self,
        owner_id: Uuid,
        kind: SubmissionKind,
    ) -> impl Future<Output = PgResult<i64>> + Send;
}

impl SubmissionRepository for PgConnection {
    async fn create_submission(&mut self, new_submission: NewSubmission) -> PgResult<Submission> {
        use schema::submissions;

        let submission = diesel::insert_into(submissions::table)
            .values(&new_submission)
            .returning(Submission::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            submission_id = %submission.id,
            owner_id = %submission.owner_id,
            kind = %submission.kind,
            "submission created"
        );

        Ok(submission)
    }

    async fn list_submissions(
        &mut self,
        owner_id: Uuid,
        kind: SubmissionKind,
        pagination: OffsetPagination,
    ) -> PgResult<OffsetPage<Submission>> {
        use schema::submissions::{self, dsl};

        let items = submissions::table
            .filter(dsl::owner_id.eq(owner_id))
            .filter(dsl::kind.eq(kind))
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Submission::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        let total = self.count_submissions(owner_id, kind).await?;

        Ok(OffsetPage::new(items, total))
    }

    async fn count_submissions(&mut self, owner_id: Uuid, kind: SubmissionKind) -> PgResult<i64> {
        use schema::submissions::{self, dsl};

        submissions::table
            .filter(dsl::owner_id.eq(owner_id))
            .filter(dsl::kind.eq(kind))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }
}
