use sea_orm::Database;

use engine::{Engine, EngineError, MovementDraft, MovementKind};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

/// User, category and account every movement test starts from.
async fn seed(engine: &Engine) -> (i64, i64, i64) {
    let owner = engine.create_user("Alice", "alice@mail.com").await.unwrap();
    let category = engine.create_category("hogar").await.unwrap();
    let account = engine
        .create_account("Santander", "00001111", owner.user.id)
        .await
        .unwrap();
    (owner.user.id, category.id, account.account.id)
}

fn draft(kind: MovementKind, amount: f64, user_id: i64, category_id: i64) -> MovementDraft {
    MovementDraft {
        kind,
        amount,
        note: None,
        user_id,
        category_id,
        credit_card_id: None,
        account_id: None,
    }
}

#[tokio::test]
async fn income_raises_account_balance() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    let movement = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Income, 100.0, user_id, category_id)
        })
        .await
        .unwrap();

    assert_eq!(movement.kind, MovementKind::Income);
    assert_eq!(movement.amount, 100.0);
    let account = movement.account.unwrap();
    assert_eq!(account.balance, 100.0);
    assert_eq!(movement.user.total_balance, 100.0);
}

#[tokio::test]
async fn expense_lowers_account_balance() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Income, 100.0, user_id, category_id)
        })
        .await
        .unwrap();

    let movement = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Expense, 40.0, user_id, category_id)
        })
        .await
        .unwrap();

    assert_eq!(movement.account.unwrap().balance, 60.0);
}

#[tokio::test]
async fn expense_equal_to_balance_empties_account() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Income, 75.0, user_id, category_id)
        })
        .await
        .unwrap();

    let movement = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Expense, 75.0, user_id, category_id)
        })
        .await
        .unwrap();

    assert_eq!(movement.account.unwrap().balance, 0.0);
}

#[tokio::test]
async fn insufficient_balance_persists_nothing() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    let err = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Expense, 50.0, user_id, category_id)
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidRequest("Insufficient balance in account".to_string())
    );
    assert!(engine.list_movements().await.unwrap().is_empty());
    assert_eq!(engine.account(account_id).await.unwrap().account.balance, 0.0);
}

#[tokio::test]
async fn movement_without_account_touches_no_balance() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    let movement = engine
        .create_movement(draft(MovementKind::Expense, 500.0, user_id, category_id))
        .await
        .unwrap();

    assert!(movement.account.is_none());
    assert_eq!(engine.account(account_id).await.unwrap().account.balance, 0.0);
}

#[tokio::test]
async fn missing_category_persists_nothing() {
    let engine = engine_with_db().await;
    let (user_id, _category_id, account_id) = seed(&engine).await;

    let err = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Income, 10.0, user_id, 999)
        })
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::NotFound("Category not found".to_string()));
    assert!(engine.list_movements().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_credit_card_is_not_found() {
    let engine = engine_with_db().await;
    let (user_id, category_id, _account_id) = seed(&engine).await;

    let err = engine
        .create_movement(MovementDraft {
            credit_card_id: Some(999),
            ..draft(MovementKind::Expense, 10.0, user_id, category_id)
        })
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::NotFound("CreditCard not found".to_string()));
}

#[tokio::test]
async fn non_positive_amount_rejected() {
    let engine = engine_with_db().await;
    let (user_id, category_id, _account_id) = seed(&engine).await;

    let err = engine
        .create_movement(draft(MovementKind::Income, 0.0, user_id, category_id))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidRequest("Movement amount must be greater than zero".to_string())
    );
}

#[tokio::test]
async fn blank_note_stored_as_none() {
    let engine = engine_with_db().await;
    let (user_id, category_id, _account_id) = seed(&engine).await;

    let movement = engine
        .create_movement(MovementDraft {
            note: Some("   ".to_string()),
            ..draft(MovementKind::Income, 5.0, user_id, category_id)
        })
        .await
        .unwrap();

    assert!(movement.note.is_none());
}

#[tokio::test]
async fn update_movement_does_not_touch_balance() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    let movement = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Income, 100.0, user_id, category_id)
        })
        .await
        .unwrap();

    let updated = engine
        .update_movement(
            movement.id,
            MovementDraft {
                account_id: Some(account_id),
                note: Some("corrected".to_string()),
                ..draft(MovementKind::Income, 500.0, user_id, category_id)
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.amount, 500.0);
    assert_eq!(updated.note.as_deref(), Some("corrected"));
    assert_eq!(updated.date, movement.date);
    assert_eq!(engine.account(account_id).await.unwrap().account.balance, 100.0);
}

#[tokio::test]
async fn delete_movement_keeps_balance() {
    let engine = engine_with_db().await;
    let (user_id, category_id, account_id) = seed(&engine).await;

    let movement = engine
        .create_movement(MovementDraft {
            account_id: Some(account_id),
            ..draft(MovementKind::Income, 100.0, user_id, category_id)
        })
        .await
        .unwrap();

    engine.delete_movement(movement.id).await.unwrap();

    let err = engine.movement(movement.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound(format!("Movement with ID {} not found", movement.id))
    );
    assert_eq!(engine.account(account_id).await.unwrap().account.balance, 100.0);
}

#[tokio::test]
async fn list_movements_by_user_and_category_filters() {
    let engine = engine_with_db().await;
    let (user_id, category_id, _account_id) = seed(&engine).await;
    let other_category = engine.create_category("viajes").await.unwrap();

    engine
        .create_movement(draft(MovementKind::Income, 10.0, user_id, category_id))
        .await
        .unwrap();
    engine
        .create_movement(draft(MovementKind::Income, 20.0, user_id, other_category.id))
        .await
        .unwrap();

    let movements = engine
        .list_movements_by_user_and_category(user_id, category_id)
        .await
        .unwrap();

    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].amount, 10.0);

    let err = engine
        .list_movements_by_user_and_category(user_id, 999)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound("Category with ID 999 not found".to_string())
    );
}
