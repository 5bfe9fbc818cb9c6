//! Resume metadata queries. Ownership lives on the owning profile, so list
//! scoping joins through `candidate_profiles`.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::authz::ScopeFilter;
use crate::models::resume::{ResumeMetadataCreate, ResumeMetadataRow, ResumeMetadataUpdate};
use crate::profiles::store::push_scope_condition;

#[derive(Debug, Clone, Default)]
pub struct ResumeListFilters {
    pub profile_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub is_primary: Option<bool>,
}

pub async fn find_resume(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ResumeMetadataRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeMetadataRow>("SELECT * FROM resume_metadata WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts new metadata. A new primary resume demotes the profile's other
/// active resumes first, so at most one active primary exists per profile.
pub async fn insert_resume(
    pool: &PgPool,
    req: &ResumeMetadataCreate,
) -> Result<ResumeMetadataRow, sqlx::Error> {
    if req.is_primary {
        demote_other_primaries(pool, req.profile_id, None).await?;
    }

    sqlx::query_as::<_, ResumeMetadataRow>(
        r#"
        INSERT INTO resume_metadata
            (id, profile_id, file_name, file_size, mime_type,
             s3_key, s3_bucket, is_primary, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.profile_id)
    .bind(&req.file_name)
    .bind(req.file_size)
    .bind(&req.mime_type)
    .bind(&req.s3_key)
    .bind(&req.s3_bucket)
    .bind(req.is_primary)
    .bind(&req.notes)
    .fetch_one(pool)
    .await
}

pub async fn update_resume(
    pool: &PgPool,
    id: Uuid,
    req: &ResumeMetadataUpdate,
) -> Result<ResumeMetadataRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeMetadataRow>(
        r#"
        UPDATE resume_metadata SET
            file_name  = COALESCE($2, file_name),
            is_active  = COALESCE($3, is_active),
            is_primary = COALESCE($4, is_primary),
            notes      = COALESCE($5, notes),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.file_name)
    .bind(req.is_active)
    .bind(req.is_primary)
    .bind(&req.notes)
    .fetch_one(pool)
    .await
}

/// Soft delete: the row stays for audit, `is_active` flips off.
pub async fn soft_delete_resume(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE resume_metadata SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Clears the primary flag on a profile's other active resumes.
pub async fn demote_other_primaries(
    pool: &PgPool,
    profile_id: Uuid,
    except: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "UPDATE resume_metadata SET is_primary = FALSE WHERE profile_id = ",
    );
    qb.push_bind(profile_id);
    qb.push(" AND is_active = TRUE");
    if let Some(id) = except {
        qb.push(" AND id <> ");
        qb.push_bind(id);
    }
    qb.build().execute(pool).await?;
    Ok(())
}

/// Scoped listing, newest upload first.
pub async fn list_resumes(
    pool: &PgPool,
    scope: &ScopeFilter,
    filters: &ResumeListFilters,
) -> Result<Vec<ResumeMetadataRow>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        r#"
        SELECT r.* FROM resume_metadata r
        JOIN candidate_profiles p ON p.id = r.profile_id
        WHERE "#,
    );
    push_scope_condition(&mut qb, scope, "p.user_id", "p.organization_id");

    if let Some(profile_id) = filters.profile_id {
        qb.push(" AND r.profile_id = ");
        qb.push_bind(profile_id);
    }
    if let Some(is_active) = filters.is_active {
        qb.push(" AND r.is_active = ");
        qb.push_bind(is_active);
    }
    if let Some(is_primary) = filters.is_primary {
        qb.push(" AND r.is_primary = ");
        qb.push_bind(is_primary);
    }

    qb.push(" ORDER BY r.uploaded_at DESC");
    qb.build_query_as::<ResumeMetadataRow>().fetch_all(pool).await
}
