//! Member Model

use serde::{Deserialize, Serialize};

use crate::phone::JapanPhone;

/// 性別コード: 男性
pub const GENDER_MALE: i64 = 1;
/// 性別コード: 女性
pub const GENDER_FEMALE: i64 = 2;

/// Valid gender codes (1: 男性, 2: 女性)
pub const GENDER_CODES: [i64; 2] = [GENDER_MALE, GENDER_FEMALE];

/// Valid identity document codes (1: 免許証, 4: パスポート, 5: その他)
pub const ID_DOCUMENT_CODES: [i64; 3] = [1, 4, 5];

/// Member entity (会員)
///
/// `phone` is stored in E.164 (`+81…`); `furigana` is stored in
/// half-width Katakana (normalized by the repository on every save).
/// `created_at` is set once at creation and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    /// 会員番号 - business key for the export; not unique at the DB layer
    pub member_no: String,
    /// 証明の種類 (1: 免許証, 4: パスポート, 5: その他)
    pub id_document: i64,
    /// 氏名 (全角ひらがな)
    pub name: String,
    /// フリガナ (半角カタカナ at rest)
    pub furigana: String,
    /// 性別 (1: 男性, 2: 女性)
    pub gender: i64,
    pub birth_year: i64,
    pub birth_month: i64,
    pub birth_day: i64,
    /// 電話番号 (E.164)
    pub phone: Option<String>,
    /// 郵便番号
    pub zip_code: String,
    /// 都道府県
    pub prefecture: String,
    /// 市区町村
    pub city: String,
    pub address1: String,
    pub address2: Option<String>,
    /// 登録日 (Unix millis)
    pub created_at: i64,
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub member_no: String,
    pub id_document: i64,
    pub name: String,
    pub furigana: String,
    pub gender: i64,
    pub birth_year: i64,
    pub birth_month: i64,
    pub birth_day: i64,
    pub phone: Option<String>,
    pub zip_code: String,
    pub prefecture: String,
    pub city: String,
    pub address1: String,
    pub address2: Option<String>,
}

/// Update member payload (partial; omitted fields keep their value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub member_no: Option<String>,
    pub id_document: Option<i64>,
    pub name: Option<String>,
    pub furigana: Option<String>,
    pub gender: Option<i64>,
    pub birth_year: Option<i64>,
    pub birth_month: Option<i64>,
    pub birth_day: Option<i64>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub prefecture: Option<String>,
    pub city: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
}

/// Member as serialized to API clients - phone rewritten from E.164 to
/// domestic digits (`+81` → leading `0`), everything else as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberView {
    pub id: i64,
    pub member_no: String,
    pub id_document: i64,
    pub name: String,
    pub furigana: String,
    pub gender: i64,
    pub birth_year: i64,
    pub birth_month: i64,
    pub birth_day: i64,
    pub phone: Option<String>,
    pub zip_code: String,
    pub prefecture: String,
    pub city: String,
    pub address1: String,
    pub address2: Option<String>,
    pub created_at: i64,
}

impl Member {
    /// Domestic digit form of the stored phone number.
    ///
    /// Stored values are normalized E.164, so parsing only fails for
    /// rows written before normalization existed; those are passed
    /// through as stored.
    pub fn phone_domestic(&self) -> Option<String> {
        self.phone.as_deref().map(|p| {
            JapanPhone::parse(p)
                .map(|jp| jp.domestic_digits())
                .unwrap_or_else(|_| p.to_string())
        })
    }

    pub fn to_view(&self) -> MemberView {
        MemberView {
            id: self.id,
            member_no: self.member_no.clone(),
            id_document: self.id_document,
            name: self.name.clone(),
            furigana: self.furigana.clone(),
            gender: self.gender,
            birth_year: self.birth_year,
            birth_month: self.birth_month,
            birth_day: self.birth_day,
            phone: self.phone_domestic(),
            zip_code: self.zip_code.clone(),
            prefecture: self.prefecture.clone(),
            city: self.city.clone(),
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Member {
        Member {
            id: 1,
            member_no: "A001".into(),
            id_document: 1,
            name: "しものとだいすけ".into(),
            furigana: "ｼﾓﾉﾄﾀﾞｲｽｹ".into(),
            gender: GENDER_MALE,
            birth_year: 1995,
            birth_month: 7,
            birth_day: 3,
            phone: Some("+819012345678".into()),
            zip_code: "1500001".into(),
            prefecture: "東京都".into(),
            city: "渋谷区".into(),
            address1: "神宮前1-1-1".into(),
            address2: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_view_rewrites_phone_to_domestic() {
        let view = sample().to_view();
        assert_eq!(view.phone.as_deref(), Some("09012345678"));
    }

    #[test]
    fn test_view_without_phone() {
        let mut m = sample();
        m.phone = None;
        assert_eq!(m.to_view().phone, None);
    }
}
