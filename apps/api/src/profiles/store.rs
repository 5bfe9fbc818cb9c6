//! Profile queries. Every collection query starts from the actor's scope
//! filter; caller filters are appended as additional `AND` conditions and can
//! only narrow the result set.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::authz::ScopeFilter;
use crate::models::profile::{ProfileCreate, ProfileRow, ProfileUpdate};

/// Caller-supplied list filters, already parsed and normalized.
#[derive(Debug, Clone, Default)]
pub struct ProfileListFilters {
    pub user_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(params: PageParams, total: i64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            pages: (total + params.limit - 1) / params.limit,
        }
    }
}

/// Renders a scope filter as a SQL condition over the given columns.
/// `ScopeFilter::Nothing` becomes a constant-false condition — the absence of
/// a matching rule must never degrade to an unrestricted query.
pub fn push_scope_condition(
    qb: &mut QueryBuilder<'_, Postgres>,
    scope: &ScopeFilter,
    user_col: &str,
    org_col: &str,
) {
    match scope {
        ScopeFilter::OwnerIs(user_id) => {
            qb.push(user_col);
            qb.push(" = ");
            qb.push_bind(*user_id);
        }
        ScopeFilter::OrganizationIs(org_id) => {
            qb.push(org_col);
            qb.push(" = ");
            qb.push_bind(*org_id);
        }
        ScopeFilter::Nothing => {
            qb.push("FALSE");
        }
    }
}

fn push_profile_conditions(
    qb: &mut QueryBuilder<'_, Postgres>,
    scope: &ScopeFilter,
    filters: &ProfileListFilters,
) {
    push_scope_condition(qb, scope, "user_id", "organization_id");

    if let Some(user_id) = filters.user_id {
        qb.push(" AND user_id = ");
        qb.push_bind(user_id);
    }
    if let Some(org_id) = filters.organization_id {
        qb.push(" AND organization_id = ");
        qb.push_bind(org_id);
    }
    if let Some(location) = &filters.location {
        qb.push(" AND location ILIKE ");
        qb.push_bind(format!("%{location}%"));
    }
    if !filters.skills.is_empty() {
        let lowered: Vec<String> = filters.skills.iter().map(|s| s.to_lowercase()).collect();
        qb.push(" AND EXISTS (SELECT 1 FROM unnest(skills) AS s WHERE lower(s) = ANY(");
        qb.push_bind(lowered);
        qb.push("))");
    }
    if let Some(is_active) = filters.is_active {
        qb.push(" AND is_active = ");
        qb.push_bind(is_active);
    }
}

pub async fn insert_profile(pool: &PgPool, req: &ProfileCreate) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO candidate_profiles
            (id, user_id, organization_id, first_name, last_name, email, phone,
             location, summary, skills, experience, education,
             linked_in_url, portfolio_url, github_url, website_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(req.organization_id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.location)
    .bind(&req.summary)
    .bind(&req.skills)
    .bind(Json(&req.experience))
    .bind(Json(&req.education))
    .bind(&req.linked_in_url)
    .bind(&req.portfolio_url)
    .bind(&req.github_url)
    .bind(&req.website_url)
    .fetch_one(pool)
    .await
}

pub async fn find_profile(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM candidate_profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_profile_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM candidate_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Applies a partial update; absent fields keep their current value.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    req: &ProfileUpdate,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE candidate_profiles SET
            first_name    = COALESCE($2, first_name),
            last_name     = COALESCE($3, last_name),
            phone         = COALESCE($4, phone),
            location      = COALESCE($5, location),
            summary       = COALESCE($6, summary),
            skills        = COALESCE($7, skills),
            experience    = COALESCE($8, experience),
            education     = COALESCE($9, education),
            linked_in_url = COALESCE($10, linked_in_url),
            portfolio_url = COALESCE($11, portfolio_url),
            github_url    = COALESCE($12, github_url),
            website_url   = COALESCE($13, website_url),
            updated_at    = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.phone)
    .bind(&req.location)
    .bind(&req.summary)
    .bind(&req.skills)
    .bind(req.experience.as_ref().map(Json))
    .bind(req.education.as_ref().map(Json))
    .bind(&req.linked_in_url)
    .bind(&req.portfolio_url)
    .bind(&req.github_url)
    .bind(&req.website_url)
    .fetch_one(pool)
    .await
}

/// Scoped, filtered, paginated listing: newest first, plus the unpaginated
/// total for the pagination block.
pub async fn list_profiles(
    pool: &PgPool,
    scope: &ScopeFilter,
    filters: &ProfileListFilters,
    page: PageParams,
) -> Result<(Vec<ProfileRow>, i64), sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM candidate_profiles WHERE ");
    push_profile_conditions(&mut qb, scope, filters);
    qb.push(" ORDER BY created_at DESC LIMIT ");
    qb.push_bind(page.limit);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset());
    let rows = qb.build_query_as::<ProfileRow>().fetch_all(pool).await?;

    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM candidate_profiles WHERE ");
    push_profile_conditions(&mut count_qb, scope, filters);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    Ok((rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_nothing_renders_constant_false() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM t WHERE ");
        push_scope_condition(&mut qb, &ScopeFilter::Nothing, "user_id", "organization_id");
        assert_eq!(qb.sql(), "SELECT * FROM t WHERE FALSE");
    }

    #[test]
    fn test_scope_owner_binds_user_column() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM t WHERE ");
        push_scope_condition(
            &mut qb,
            &ScopeFilter::OwnerIs(Uuid::new_v4()),
            "user_id",
            "organization_id",
        );
        assert_eq!(qb.sql(), "SELECT * FROM t WHERE user_id = $1");
    }

    #[test]
    fn test_scope_org_uses_given_column_prefix() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT r.* FROM r JOIN p WHERE ");
        push_scope_condition(
            &mut qb,
            &ScopeFilter::OrganizationIs(Uuid::new_v4()),
            "p.user_id",
            "p.organization_id",
        );
        assert_eq!(qb.sql(), "SELECT r.* FROM r JOIN p WHERE p.organization_id = $1");
    }

    #[test]
    fn test_caller_filters_append_after_scope() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM candidate_profiles WHERE ");
        let filters = ProfileListFilters {
            location: Some("Berlin".to_string()),
            skills: vec!["Go".to_string()],
            is_active: Some(true),
            ..ProfileListFilters::default()
        };
        push_profile_conditions(&mut qb, &ScopeFilter::OwnerIs(Uuid::new_v4()), &filters);

        let sql = qb.sql();
        // The scope condition comes first; every caller filter is ANDed on top.
        assert!(sql.starts_with("SELECT * FROM candidate_profiles WHERE user_id = $1"));
        assert!(sql.contains("AND location ILIKE $2"));
        assert!(sql.contains("lower(s) = ANY($3)"));
        assert!(sql.contains("AND is_active = $4"));
    }

    #[test]
    fn test_caller_filters_cannot_replace_scope() {
        // A caller asking for another organization still gets the scope
        // condition ANDed in front — the intersection, not a substitution.
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM candidate_profiles WHERE ");
        let filters = ProfileListFilters {
            organization_id: Some(Uuid::new_v4()),
            ..ProfileListFilters::default()
        };
        push_profile_conditions(&mut qb, &ScopeFilter::OrganizationIs(Uuid::new_v4()), &filters);
        assert!(qb
            .sql()
            .starts_with("SELECT * FROM candidate_profiles WHERE organization_id = $1 AND organization_id = $2"));
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(PageParams { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageParams { page: 3, limit: 10 }.offset(), 20);
        assert_eq!(PageParams { page: 2, limit: 25 }.offset(), 25);
    }

    #[test]
    fn test_pagination_page_count_rounds_up() {
        let params = PageParams { page: 1, limit: 10 };
        assert_eq!(Pagination::new(params, 0).pages, 0);
        assert_eq!(Pagination::new(params, 1).pages, 1);
        assert_eq!(Pagination::new(params, 10).pages, 1);
        assert_eq!(Pagination::new(params, 11).pages, 2);
        assert_eq!(Pagination::new(params, 95).pages, 10);
    }
}
