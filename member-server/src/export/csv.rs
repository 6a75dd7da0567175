//! CSV artifact construction
//!
//! The column layout is a compatibility contract with the downstream
//! membership import tool and is reproduced byte-for-byte: fixed header,
//! CRLF row terminators, minimal quoting, Shift-JIS encoding (the tool
//! does not read Unicode). Columns the register has no data for stay
//! blank; 有効フラグ and 入会店舗コード are constant `1`.

use chrono::NaiveDate;
use shared::models::Member;
use shared::phone::JapanPhone;

use super::ExportError;

/// ダウンロードファイル名 (取込ツール側の既定名)
pub const EXPORT_FILENAME: &str = "会員データ取込用.csv";

/// Fixed header row of the import schema
pub const CSV_HEADER: [&str; 30] = [
    "会員証コード(10桁)",
    "有効フラグ(0:無効 1:有効)",
    "会員コード(10桁)",
    "会員名称",
    "郵便番号",
    "住所1",
    "住所2",
    "TEL",
    "携帯電話",
    "連絡先(住所)",
    "連絡先TEL",
    "ＥメールアドレスＰＣ",
    "Ｅメールアドレス携帯",
    "会員名（カナ）",
    "コメント1",
    "入会日付(yyyy-mm-dd)",
    "会員有効日付(yyyy-mm-dd)",
    "生年月日(yyyy-mm-dd)",
    "性別(1:男 2:女)",
    "ランク(任意)",
    "警告区分(0:一般 7:警告1 8:警告2 9:ブラック)",
    "地域コード",
    "最終来店日付(yyyy-mm-dd)",
    "証明の種類(0:なし 1:免許証 2:保険証 3:学生証 4:パスポート)",
    "入会店舗コード",
    "ポイント残",
    "DM可否(0:可 1:不可)",
    "ポイント有効期限",
    "インボイス登録番号",
    "インボイス登録年月日",
];

/// National-format phone for the TEL / 携帯電話 columns.
///
/// Members without a phone number export blank columns; a stored value
/// that fails to parse aborts the whole export before anything is
/// deleted.
fn phone_column(member: &Member) -> Result<String, ExportError> {
    match member.phone.as_deref() {
        None => Ok(String::new()),
        Some(raw) => JapanPhone::parse(raw)
            .map(|p| p.national())
            .map_err(|source| ExportError::Phone {
                member_no: member.member_no.clone(),
                source,
            }),
    }
}

/// One data row, padded to the full header width.
fn member_row(member: &Member, join_date: &str) -> Result<[String; 30], ExportError> {
    let phone = phone_column(member)?;
    // 生年月日は YYYY/M/D (ゼロ埋めなし)
    let birth = format!(
        "{}/{}/{}",
        member.birth_year, member.birth_month, member.birth_day
    );
    let combined_address = format!(
        "{}{}{}",
        member.city,
        member.address1,
        member.address2.as_deref().unwrap_or("")
    );

    Ok([
        member.member_no.clone(),          // 会員証コード
        "1".to_string(),                   // 有効フラグ
        member.member_no.clone(),          // 会員コード
        member.name.clone(),               // 会員名称
        member.zip_code.clone(),           // 郵便番号
        member.prefecture.clone(),         // 住所1
        combined_address,                  // 住所2 (市区町村+番地+建物)
        phone.clone(),                     // TEL
        phone,                             // 携帯電話
        String::new(),                     // 連絡先(住所)
        String::new(),                     // 連絡先TEL
        String::new(),                     // ＥメールアドレスＰＣ
        String::new(),                     // Ｅメールアドレス携帯
        member.furigana.clone(),           // 会員名（カナ）
        String::new(),                     // コメント1
        join_date.to_string(),             // 入会日付
        String::new(),                     // 会員有効日付
        birth,                             // 生年月日
        member.gender.to_string(),         // 性別
        String::new(),                     // ランク
        String::new(),                     // 警告区分
        String::new(),                     // 地域コード
        String::new(),                     // 最終来店日付
        member.id_document.to_string(),    // 証明の種類
        "1".to_string(),                   // 入会店舗コード
        String::new(),                     // ポイント残
        String::new(),                     // DM可否
        String::new(),                     // ポイント有効期限
        String::new(),                     // インボイス登録番号
        String::new(),                     // インボイス登録年月日
    ])
}

/// Build the complete Shift-JIS artifact: header + one row per member,
/// in the order given.
pub fn build_artifact(members: &[Member], today: NaiveDate) -> Result<Vec<u8>, ExportError> {
    let join_date = today.format("%Y-%m-%d").to_string();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for member in members {
        writer.write_record(member_row(member, &join_date)?)?;
    }
    writer.flush().map_err(ExportError::Io)?;

    let utf8 = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let utf8 = String::from_utf8(utf8).map_err(|_| ExportError::Encoding)?;

    let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&utf8);
    if had_errors {
        return Err(ExportError::Encoding);
    }
    Ok(encoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::GENDER_MALE;

    fn sample(member_no: &str, phone: Option<&str>) -> Member {
        Member {
            id: 1,
            member_no: member_no.to_string(),
            id_document: 1,
            name: "しものとだいすけ".into(),
            furigana: "ｼﾓﾉﾄﾀﾞｲｽｹ".into(),
            gender: GENDER_MALE,
            birth_year: 1995,
            birth_month: 7,
            birth_day: 3,
            phone: phone.map(|p| p.to_string()),
            zip_code: "1500001".into(),
            prefecture: "東京都".into(),
            city: "渋谷区".into(),
            address1: "神宮前1-1-1".into(),
            address2: Some("コーポ101".into()),
            created_at: 0,
        }
    }

    fn decode(bytes: &[u8]) -> String {
        let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
        assert!(!had_errors);
        text.into_owned()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_header_only_for_no_members() {
        let bytes = build_artifact(&[], today()).unwrap();
        let text = decode(&bytes);
        let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("会員証コード(10桁),有効フラグ(0:無効 1:有効),"));
        assert_eq!(lines[0].split(',').count(), CSV_HEADER.len());
    }

    #[test]
    fn test_row_layout() {
        let bytes = build_artifact(&[sample("A001", Some("+819012345678"))], today()).unwrap();
        let text = decode(&bytes);
        let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);

        let cols: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(cols.len(), CSV_HEADER.len());
        assert_eq!(cols[0], "A001");
        assert_eq!(cols[1], "1");
        assert_eq!(cols[2], "A001");
        assert_eq!(cols[3], "しものとだいすけ");
        assert_eq!(cols[5], "東京都");
        assert_eq!(cols[6], "渋谷区神宮前1-1-1コーポ101");
        // TEL and 携帯電話 carry the same national format
        assert_eq!(cols[7], "090-1234-5678");
        assert_eq!(cols[8], cols[7]);
        assert_eq!(cols[13], "ｼﾓﾉﾄﾀﾞｲｽｹ");
        assert_eq!(cols[15], "2026-08-25");
        // 生年月日はゼロ埋めなし
        assert_eq!(cols[17], "1995/7/3");
        assert_eq!(cols[18], "1");
        assert_eq!(cols[23], "1");
        assert_eq!(cols[24], "1");
    }

    #[test]
    fn test_member_without_phone_exports_blank_columns() {
        let bytes = build_artifact(&[sample("A002", None)], today()).unwrap();
        let text = decode(&bytes);
        let row = text.split("\r\n").nth(1).unwrap();
        let cols: Vec<&str> = row.split(',').collect();
        assert_eq!(cols[7], "");
        assert_eq!(cols[8], "");
    }

    #[test]
    fn test_unparseable_phone_is_fatal() {
        let mut m = sample("A003", Some("garbage"));
        m.phone = Some("garbage".into());
        let err = build_artifact(&[m], today()).unwrap_err();
        assert!(matches!(err, ExportError::Phone { ref member_no, .. } if member_no == "A003"));
    }

    #[test]
    fn test_half_width_kana_is_single_byte_in_shift_jis() {
        let bytes = build_artifact(&[sample("A001", None)], today()).unwrap();
        // ｼ (U+FF7C) encodes to the single byte 0xBC in Shift-JIS
        assert!(bytes.windows(2).any(|w| w == [0xBC, 0xD3])); // ｼﾓ
    }
}
