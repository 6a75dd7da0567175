//! Member API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::member;
use crate::db::repository::member::MemberFilter;
use crate::utils::validation::{
    MAX_MEMBER_NO_LEN, MAX_NAME_LEN, MAX_PREFECTURE_CHARS, MAX_ZIP_LEN, validate_alphanumeric,
    validate_code, validate_digits, validate_hiragana, validate_katakana, validate_optional_text,
    validate_range, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{
    GENDER_CODES, ID_DOCUMENT_CODES, MemberCreate, MemberUpdate, MemberView,
};
use shared::phone::JapanPhone;

/// Query params for the member listing - explicit per-request state,
/// nothing is persisted in a session
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 会員番号 (部分一致)
    pub member_no: Option<String>,
    /// 氏名 (部分一致)
    pub name: Option<String>,
    /// 並び順: member_no | name (default: 登録日の新しい順)
    pub order_by: Option<String>,
    #[serde(default)]
    pub desc: bool,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Paginated listing response
#[derive(Debug, Serialize)]
pub struct MemberPage {
    pub items: Vec<MemberView>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// GET /api/members - 会員一覧 (検索・並び替え・ページング)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<MemberPage>>> {
    if let Some(order_by) = query.order_by.as_deref()
        && !matches!(order_by, "member_no" | "name")
    {
        return Err(AppError::validation(format!(
            "order_by must be member_no or name, got {order_by}"
        )));
    }
    if query.page < 1 {
        return Err(AppError::validation("page must be >= 1"));
    }
    if !(1..=100).contains(&query.page_size) {
        return Err(AppError::validation("page_size must be between 1 and 100"));
    }

    let filter = MemberFilter {
        member_no: query.member_no,
        name: query.name,
        order_by: query.order_by,
        desc: query.desc,
        limit: query.page_size,
        offset: (query.page - 1) * query.page_size,
    };

    let total = member::count(&state.pool, &filter).await?;
    let members = member::find_page(&state.pool, &filter).await?;

    Ok(ok(MemberPage {
        items: members.iter().map(|m| m.to_view()).collect(),
        total,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// GET /api/members/:id - 会員詳細
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<MemberView>>> {
    let m = member::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {id}")))?;
    Ok(ok(m.to_view()))
}

/// POST /api/members - 会員登録
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<Json<AppResponse<MemberView>>> {
    validate_create(&payload)?;
    let m = member::create(&state.pool, payload).await?;
    Ok(ok(m.to_view()))
}

/// PUT /api/members/:id - 会員更新
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MemberUpdate>,
) -> AppResult<Json<AppResponse<MemberView>>> {
    validate_update(&payload)?;
    let m = member::update(&state.pool, id, payload).await?;
    Ok(ok(m.to_view()))
}

/// DELETE /api/members/:id - 会員削除 (物理削除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let result = member::delete(&state.pool, id).await?;
    Ok(ok(result))
}

// ── Payload validation ──────────────────────────────────────────────

fn validate_phone_input(value: &str) -> AppResult<()> {
    JapanPhone::parse(value)
        .map(|_| ())
        .map_err(|e| AppError::validation(format!("phone: {e}")))
}

fn validate_create(p: &MemberCreate) -> AppResult<()> {
    validate_required_text(&p.member_no, "member_no", MAX_MEMBER_NO_LEN)?;
    validate_alphanumeric(&p.member_no, "member_no")?;

    validate_required_text(&p.name, "name", MAX_NAME_LEN)?;
    validate_hiragana(&p.name, "name")?;

    validate_required_text(&p.furigana, "furigana", MAX_NAME_LEN)?;
    validate_katakana(&p.furigana, "furigana")?;

    validate_code(p.gender, "gender", &GENDER_CODES)?;
    validate_code(p.id_document, "id_document", &ID_DOCUMENT_CODES)?;

    // 年月日の組み合わせが実在日かどうかは検証しない (取込仕様に合わせる)
    validate_range(p.birth_year, "birth_year", 1900, 2100)?;
    validate_range(p.birth_month, "birth_month", 1, 12)?;
    validate_range(p.birth_day, "birth_day", 1, 31)?;

    if let Some(phone) = &p.phone {
        validate_phone_input(phone)?;
    }

    validate_required_text(&p.zip_code, "zip_code", MAX_ZIP_LEN)?;
    validate_digits(&p.zip_code, "zip_code")?;
    validate_required_text(&p.prefecture, "prefecture", MAX_PREFECTURE_CHARS)?;
    validate_required_text(&p.city, "city", MAX_NAME_LEN)?;
    validate_required_text(&p.address1, "address1", MAX_NAME_LEN)?;
    validate_optional_text(&p.address2, "address2", MAX_NAME_LEN)?;
    Ok(())
}

fn validate_update(p: &MemberUpdate) -> AppResult<()> {
    if let Some(member_no) = &p.member_no {
        validate_required_text(member_no, "member_no", MAX_MEMBER_NO_LEN)?;
        validate_alphanumeric(member_no, "member_no")?;
    }
    if let Some(name) = &p.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        validate_hiragana(name, "name")?;
    }
    if let Some(furigana) = &p.furigana {
        validate_required_text(furigana, "furigana", MAX_NAME_LEN)?;
        validate_katakana(furigana, "furigana")?;
    }
    if let Some(gender) = p.gender {
        validate_code(gender, "gender", &GENDER_CODES)?;
    }
    if let Some(id_document) = p.id_document {
        validate_code(id_document, "id_document", &ID_DOCUMENT_CODES)?;
    }
    if let Some(birth_year) = p.birth_year {
        validate_range(birth_year, "birth_year", 1900, 2100)?;
    }
    if let Some(birth_month) = p.birth_month {
        validate_range(birth_month, "birth_month", 1, 12)?;
    }
    if let Some(birth_day) = p.birth_day {
        validate_range(birth_day, "birth_day", 1, 31)?;
    }
    if let Some(phone) = &p.phone {
        validate_phone_input(phone)?;
    }
    if let Some(zip_code) = &p.zip_code {
        validate_required_text(zip_code, "zip_code", MAX_ZIP_LEN)?;
        validate_digits(zip_code, "zip_code")?;
    }
    if let Some(prefecture) = &p.prefecture {
        validate_required_text(prefecture, "prefecture", MAX_PREFECTURE_CHARS)?;
    }
    if let Some(city) = &p.city {
        validate_required_text(city, "city", MAX_NAME_LEN)?;
    }
    if let Some(address1) = &p.address1 {
        validate_required_text(address1, "address1", MAX_NAME_LEN)?;
    }
    validate_optional_text(&p.address2, "address2", MAX_NAME_LEN)?;
    Ok(())
}
