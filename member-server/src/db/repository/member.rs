//! Member Repository
//!
//! Every write path normalizes furigana to half-width Katakana and the
//! phone number to E.164 before the row is persisted - on create and on
//! update, not only on explicit calls.

use super::{RepoError, RepoResult};
use shared::kana;
use shared::models::{Member, MemberCreate, MemberUpdate};
use shared::phone::JapanPhone;
use sqlx::sqlite::Sqlite;
use sqlx::{QueryBuilder, SqliteConnection, SqlitePool};

const MEMBER_SELECT: &str = "SELECT id, member_no, id_document, name, furigana, gender, birth_year, birth_month, birth_day, phone, zip_code, prefecture, city, address1, address2, created_at FROM member";

/// Listing filter - explicit per-request state (no session persistence)
#[derive(Debug, Default, Clone)]
pub struct MemberFilter {
    /// 会員番号 contains
    pub member_no: Option<String>,
    /// 氏名 contains
    pub name: Option<String>,
    /// "member_no" | "name"; anything else falls back to created_at
    pub order_by: Option<String>,
    pub desc: bool,
    pub limit: i64,
    pub offset: i64,
}

fn push_where(qb: &mut QueryBuilder<'_, Sqlite>, filter: &MemberFilter) {
    let mut has_where = false;
    if let Some(member_no) = &filter.member_no {
        qb.push(" WHERE member_no LIKE ");
        qb.push_bind(format!("%{member_no}%"));
        has_where = true;
    }
    if let Some(name) = &filter.name {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("name LIKE ");
        qb.push_bind(format!("%{name}%"));
    }
}

fn order_clause(filter: &MemberFilter) -> &'static str {
    match (filter.order_by.as_deref(), filter.desc) {
        (Some("member_no"), false) => " ORDER BY member_no ASC",
        (Some("member_no"), true) => " ORDER BY member_no DESC",
        (Some("name"), false) => " ORDER BY name ASC",
        (Some("name"), true) => " ORDER BY name DESC",
        // デフォルトは新しい順
        _ => " ORDER BY created_at DESC",
    }
}

pub async fn find_page(pool: &SqlitePool, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
    let mut qb = QueryBuilder::new(MEMBER_SELECT);
    push_where(&mut qb, filter);
    qb.push(order_clause(filter));
    qb.push(" LIMIT ");
    qb.push_bind(filter.limit);
    qb.push(" OFFSET ");
    qb.push_bind(filter.offset);

    let rows = qb.build_query_as::<Member>().fetch_all(pool).await?;
    Ok(rows)
}

pub async fn count(pool: &SqlitePool, filter: &MemberFilter) -> RepoResult<i64> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM member");
    push_where(&mut qb, filter);
    let total: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(total)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Normalize a phone input to E.164, mapping parse failures to a
/// repository validation error.
fn normalize_phone(input: &str) -> RepoResult<String> {
    JapanPhone::parse(input)
        .map(|p| p.e164())
        .map_err(|e| RepoError::Validation(format!("phone: {e}")))
}

pub async fn create(pool: &SqlitePool, data: MemberCreate) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    // Persistence-time normalization (runs on every save)
    let furigana = kana::to_half_width(&data.furigana);
    let phone = data.phone.as_deref().map(normalize_phone).transpose()?;

    sqlx::query(
        "INSERT INTO member (id, member_no, id_document, name, furigana, gender, birth_year, birth_month, birth_day, phone, zip_code, prefecture, city, address1, address2, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.member_no)
    .bind(data.id_document)
    .bind(&data.name)
    .bind(&furigana)
    .bind(data.gender)
    .bind(data.birth_year)
    .bind(data.birth_month)
    .bind(data.birth_day)
    .bind(&phone)
    .bind(&data.zip_code)
    .bind(&data.prefecture)
    .bind(&data.city)
    .bind(&data.address1)
    .bind(&data.address2)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MemberUpdate) -> RepoResult<Member> {
    // Re-normalize on edit; created_at is immutable and never touched
    let furigana = data.furigana.as_deref().map(kana::to_half_width);
    let phone = data.phone.as_deref().map(normalize_phone).transpose()?;

    let rows = sqlx::query(
        "UPDATE member SET \
           member_no = COALESCE(?, member_no), \
           id_document = COALESCE(?, id_document), \
           name = COALESCE(?, name), \
           furigana = COALESCE(?, furigana), \
           gender = COALESCE(?, gender), \
           birth_year = COALESCE(?, birth_year), \
           birth_month = COALESCE(?, birth_month), \
           birth_day = COALESCE(?, birth_day), \
           phone = COALESCE(?, phone), \
           zip_code = COALESCE(?, zip_code), \
           prefecture = COALESCE(?, prefecture), \
           city = COALESCE(?, city), \
           address1 = COALESCE(?, address1), \
           address2 = COALESCE(?, address2) \
         WHERE id = ?",
    )
    .bind(&data.member_no)
    .bind(data.id_document)
    .bind(&data.name)
    .bind(&furigana)
    .bind(data.gender)
    .bind(data.birth_year)
    .bind(data.birth_month)
    .bind(data.birth_day)
    .bind(&phone)
    .bind(&data.zip_code)
    .bind(&data.prefecture)
    .bind(&data.city)
    .bind(&data.address1)
    .bind(&data.address2)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM member WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Export support (runs inside one transaction) ────────────────────

/// Load the full record set in store iteration order (no explicit sort).
pub async fn find_all_for_export(conn: &mut SqliteConnection) -> RepoResult<Vec<Member>> {
    let rows = sqlx::query_as::<_, Member>(MEMBER_SELECT)
        .fetch_all(conn)
        .await?;
    Ok(rows)
}

/// Delete exactly the given IDs; returns the number of rows removed.
pub async fn delete_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut qb = QueryBuilder::new("DELETE FROM member WHERE id IN (");
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(id);
    }
    qb.push(")");
    let result = qb.build().execute(conn).await?;
    Ok(result.rows_affected())
}
