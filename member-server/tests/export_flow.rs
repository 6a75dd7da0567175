//! Export-and-purge workflow tests (in-memory SQLite)

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;

use member_server::db::MIGRATOR;
use member_server::db::repository::member;
use member_server::export::workflow::{self, ExportDecision, ExportOutcome};
use shared::models::MemberCreate;

async fn test_pool() -> SqlitePool {
    // single connection so every query sees the same :memory: database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

fn payload(member_no: &str) -> MemberCreate {
    MemberCreate {
        member_no: member_no.to_string(),
        id_document: 1,
        name: "たなかようこ".into(),
        furigana: "タナカヨウコ".into(),
        gender: 2,
        birth_year: 1990,
        birth_month: 1,
        birth_day: 15,
        phone: Some("090-1234-5678".into()),
        zip_code: "1500001".into(),
        prefecture: "東京都".into(),
        city: "渋谷区".into(),
        address1: "神宮前1-1-1".into(),
        address2: None,
    }
}

async fn store_size(pool: &SqlitePool) -> i64 {
    member::count(pool, &Default::default()).await.unwrap()
}

fn decode(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
    assert!(!had_errors);
    text.into_owned()
}

#[tokio::test]
async fn unconfirmed_requests_are_idempotent_and_side_effect_free() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let lock = Mutex::new(());

    member::create(&pool, payload("A001")).await.unwrap();
    member::create(&pool, payload("A002")).await.unwrap();

    for _ in 0..3 {
        let outcome = workflow::run(&pool, dir.path(), &lock, None).await.unwrap();
        match outcome {
            ExportOutcome::AwaitingConfirmation(members) => assert_eq!(members.len(), 2),
            other => panic!("expected AwaitingConfirmation, got {other:?}"),
        }
    }

    assert_eq!(store_size(&pool).await, 2);
    // no artifact was produced
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn cancel_has_no_side_effects() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let lock = Mutex::new(());

    member::create(&pool, payload("A001")).await.unwrap();

    let outcome = workflow::run(&pool, dir.path(), &lock, Some(ExportDecision::Cancel))
        .await
        .unwrap();
    assert!(matches!(outcome, ExportOutcome::Cancelled));

    assert_eq!(store_size(&pool).await, 1);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn confirmed_export_purges_exactly_the_exported_set() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let lock = Mutex::new(());

    for member_no in ["A001", "A002", "A003"] {
        member::create(&pool, payload(member_no)).await.unwrap();
    }
    assert_eq!(store_size(&pool).await, 3);

    let outcome = workflow::run(&pool, dir.path(), &lock, Some(ExportDecision::Confirm))
        .await
        .unwrap();

    let artifact = match outcome {
        ExportOutcome::Exported(a) => a,
        other => panic!("expected Exported, got {other:?}"),
    };
    assert_eq!(artifact.exported, 3);
    assert_eq!(artifact.filename, "会員データ取込用.csv");

    // header + 3 data rows
    let text = decode(&artifact.bytes);
    let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 4);
    let mut member_nos: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    member_nos.sort();
    assert_eq!(member_nos, ["A001", "A002", "A003"]);
    assert!(lines[1].split(',').nth(2).is_some_and(|c| c.starts_with('A')));

    // store is empty, server-side copy exists
    assert_eq!(store_size(&pool).await, 0);
    let copy = dir.path().join("会員データ取込用.csv");
    assert_eq!(std::fs::read(copy).unwrap(), artifact.bytes);

    // second confirmed attempt hits the empty-set warning, no artifact
    let second = workflow::run(&pool, dir.path(), &lock, Some(ExportDecision::Confirm))
        .await
        .unwrap();
    assert!(matches!(second, ExportOutcome::EmptySet));
    assert_eq!(store_size(&pool).await, 0);
}

#[tokio::test]
async fn confirm_on_empty_store_warns_and_writes_nothing() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let lock = Mutex::new(());

    let outcome = workflow::run(&pool, dir.path(), &lock, Some(ExportDecision::Confirm))
        .await
        .unwrap();
    assert!(matches!(outcome, ExportOutcome::EmptySet));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unparseable_stored_phone_aborts_without_deleting() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let lock = Mutex::new(());

    member::create(&pool, payload("A001")).await.unwrap();
    // Corrupt the stored value under the repository (normalization would
    // normally prevent this).
    sqlx::query("UPDATE member SET phone = 'not-a-number'")
        .execute(&pool)
        .await
        .unwrap();

    let result = workflow::run(&pool, dir.path(), &lock, Some(ExportDecision::Confirm)).await;
    assert!(result.is_err());

    // nothing was deleted, no artifact left behind
    assert_eq!(store_size(&pool).await, 1);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
