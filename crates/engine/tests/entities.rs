use sea_orm::Database;

use engine::{Engine, EngineError};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

#[tokio::test]
async fn create_user_normalizes_email() {
    let engine = engine_with_db().await;

    let detail = engine
        .create_user("Alice", "  Alice@Example.COM ")
        .await
        .unwrap();

    assert_eq!(detail.user.email, "alice@example.com");
    assert!(detail.movements.is_empty());
    assert!(detail.accounts.is_empty());
}

#[tokio::test]
async fn duplicate_email_rejected_case_insensitively() {
    let engine = engine_with_db().await;
    engine.create_user("Bob", "bob@mail.com").await.unwrap();

    let err = engine
        .create_user("Robert", "BOB@mail.com")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::Duplicate("Email already registered: bob@mail.com".to_string())
    );
}

#[tokio::test]
async fn update_user_keeps_own_email_without_conflict() {
    let engine = engine_with_db().await;
    let detail = engine.create_user("Carol", "carol@mail.com").await.unwrap();

    let updated = engine
        .update_user(detail.user.id, "Caroline", "carol@mail.com")
        .await
        .unwrap();

    assert_eq!(updated.user.name, "Caroline");
    assert_eq!(updated.user.email, "carol@mail.com");
}

#[tokio::test]
async fn update_user_rejects_taken_email() {
    let engine = engine_with_db().await;
    engine.create_user("Dan", "dan@mail.com").await.unwrap();
    let other = engine.create_user("Eve", "eve@mail.com").await.unwrap();

    let err = engine
        .update_user(other.user.id, "Eve", "dan@mail.com")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::Duplicate("Email already registered: dan@mail.com".to_string())
    );
}

#[tokio::test]
async fn user_by_email_normalizes_lookup() {
    let engine = engine_with_db().await;
    engine.create_user("Frank", "frank@mail.com").await.unwrap();

    let summary = engine.user_by_email(" FRANK@mail.com ").await.unwrap();
    assert_eq!(summary.email, "frank@mail.com");

    let err = engine.user_by_email("nobody@mail.com").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound("User with email nobody@mail.com not found".to_string())
    );
}

#[tokio::test]
async fn delete_user_then_get_is_not_found() {
    let engine = engine_with_db().await;
    let detail = engine.create_user("Gone", "gone@mail.com").await.unwrap();

    engine.delete_user(detail.user.id).await.unwrap();

    let err = engine.user(detail.user.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound(format!("User with ID {} not found", detail.user.id))
    );
}

#[tokio::test]
async fn category_name_stored_uppercase() {
    let engine = engine_with_db().await;

    let category = engine.create_category("  hogar ").await.unwrap();

    assert_eq!(category.name, "HOGAR");
}

#[tokio::test]
async fn duplicate_category_rejected_case_insensitively() {
    let engine = engine_with_db().await;
    engine.create_category("hogar").await.unwrap();

    let err = engine.create_category("Hogar").await.unwrap_err();

    assert_eq!(
        err,
        EngineError::Duplicate("The category 'Hogar' already exists".to_string())
    );
}

#[tokio::test]
async fn update_category_keeps_own_name_without_conflict() {
    let engine = engine_with_db().await;
    let category = engine.create_category("viajes").await.unwrap();

    let updated = engine.update_category(category.id, "Viajes").await.unwrap();

    assert_eq!(updated.name, "VIAJES");
}

#[tokio::test]
async fn blank_category_name_rejected() {
    let engine = engine_with_db().await;

    let err = engine.create_category("   ").await.unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidRequest("Category name must not be empty".to_string())
    );
}

#[tokio::test]
async fn account_number_is_normalized_on_create() {
    let engine = engine_with_db().await;
    let owner = engine.create_user("Hank", "hank@mail.com").await.unwrap();

    let detail = engine
        .create_account("Santander", " 00 0011-11 ", owner.user.id)
        .await
        .unwrap();

    assert_eq!(detail.account.account_number, "00001111");
    assert_eq!(detail.account.balance, 0.0);
}

#[tokio::test]
async fn duplicate_account_number_rejected_after_normalization() {
    let engine = engine_with_db().await;
    let owner = engine.create_user("Ivy", "ivy@mail.com").await.unwrap();
    engine
        .create_account("Santander", "00001111", owner.user.id)
        .await
        .unwrap();

    let err = engine
        .create_account("BBVA", "0000-11 11", owner.user.id)
        .await
        .unwrap_err();

    // The lookup compares normalized numbers; the message echoes the input.
    assert_eq!(
        err,
        EngineError::Duplicate("Account number already exists: 0000-11 11".to_string())
    );
}

#[tokio::test]
async fn update_account_keeps_own_number_without_conflict() {
    let engine = engine_with_db().await;
    let owner = engine.create_user("Lea", "lea@mail.com").await.unwrap();
    let detail = engine
        .create_account("Santander", "00001111", owner.user.id)
        .await
        .unwrap();

    let updated = engine
        .update_account(detail.account.id, "BBVA", "00 0011-11")
        .await
        .unwrap();

    assert_eq!(updated.account.bank, "BBVA");
    assert_eq!(updated.account.account_number, "00001111");
}

#[tokio::test]
async fn create_account_for_missing_user_is_not_found() {
    let engine = engine_with_db().await;

    let err = engine.create_account("BBVA", "123", 99).await.unwrap_err();

    assert_eq!(err, EngineError::NotFound("User not found".to_string()));
}

#[tokio::test]
async fn list_accounts_by_user_requires_owner() {
    let engine = engine_with_db().await;

    let err = engine.list_accounts_by_user(42).await.unwrap_err();

    assert_eq!(
        err,
        EngineError::NotFound("User with ID 42 not found".to_string())
    );
}

#[tokio::test]
async fn user_summary_totals_account_balances() {
    let engine = engine_with_db().await;
    let owner = engine.create_user("Jack", "jack@mail.com").await.unwrap();
    engine
        .create_account("Santander", "111", owner.user.id)
        .await
        .unwrap();
    engine
        .create_account("BBVA", "222", owner.user.id)
        .await
        .unwrap();

    let summary = engine.user_summary(owner.user.id).await.unwrap();

    assert_eq!(summary.total_balance, 0.0);
}

#[tokio::test]
async fn credit_card_lifecycle() {
    let engine = engine_with_db().await;
    let owner = engine.create_user("Kim", "kim@mail.com").await.unwrap();

    let fields = engine::CreditCardFields {
        name: "Visa".to_string(),
        last_four_digits: "4242".to_string(),
        statement_close: "5".to_string(),
        max_payment_due: "20".to_string(),
    };
    let detail = engine
        .create_credit_card(fields, owner.user.id)
        .await
        .unwrap();
    assert_eq!(detail.card.name, "Visa");
    assert_eq!(detail.user.id, owner.user.id);

    let fields = engine::CreditCardFields {
        name: "Visa Gold".to_string(),
        last_four_digits: "4242".to_string(),
        statement_close: "7".to_string(),
        max_payment_due: "22".to_string(),
    };
    let updated = engine
        .update_credit_card(detail.card.id, fields)
        .await
        .unwrap();
    assert_eq!(updated.card.name, "Visa Gold");
    assert_eq!(updated.user.id, owner.user.id);

    engine.delete_credit_card(detail.card.id).await.unwrap();
    let err = engine.credit_card(detail.card.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound(format!(
            "Credit card with ID {} not found",
            detail.card.id
        ))
    );
}

#[tokio::test]
async fn create_credit_card_for_missing_user_is_not_found() {
    let engine = engine_with_db().await;

    let fields = engine::CreditCardFields {
        name: "Visa".to_string(),
        last_four_digits: "4242".to_string(),
        statement_close: "5".to_string(),
        max_payment_due: "20".to_string(),
    };
    let err = engine.create_credit_card(fields, 7).await.unwrap_err();

    assert_eq!(err, EngineError::NotFound("User not found".to_string()));
}
