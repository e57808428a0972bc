mod common;

use sea_orm::{ConnectionTrait, Statement};

use common::{count, engine_with_db};
use engine::{AccountNew, EngineError, Login};

fn alice(password: &str) -> AccountNew {
    AccountNew {
        username: "alice".to_string(),
        password: password.to_string(),
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
    }
}

#[tokio::test]
async fn registered_account_can_log_in() {
    let (engine, _db) = engine_with_db().await;

    engine.register(alice("wonderland")).await.unwrap();

    let login = engine.login("alice", "wonderland").await.unwrap();
    assert!(matches!(login, Login::Granted { .. }));
}

#[tokio::test]
async fn password_is_stored_as_a_digest() {
    let (engine, db) = engine_with_db().await;
    engine.register(alice("wonderland")).await.unwrap();

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT password FROM accounts WHERE username = ?",
            vec!["alice".into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let stored: String = row.try_get("", "password").unwrap();

    assert_ne!(stored, "wonderland");
    assert!(bcrypt::verify("wonderland", &stored).unwrap());
}

#[tokio::test]
async fn duplicate_username_conflicts_whatever_the_password() {
    let (engine, db) = engine_with_db().await;
    engine.register(alice("wonderland")).await.unwrap();

    for password in ["wonderland", "another", "x"] {
        let err = engine.register(alice(password)).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::ExistingKey("Username already exists".to_string())
        );
    }
    assert_eq!(count(&db, "accounts").await, 1);
}

#[tokio::test]
async fn usernames_are_compared_exactly() {
    let (engine, db) = engine_with_db().await;
    engine.register(alice("wonderland")).await.unwrap();

    let mut shouted = alice("wonderland");
    shouted.username = "ALICE".to_string();
    engine.register(shouted).await.unwrap();

    let mut padded = alice("wonderland");
    padded.username = " alice".to_string();
    engine.register(padded).await.unwrap();

    assert_eq!(count(&db, "accounts").await, 3);
}

#[tokio::test]
async fn concurrent_registrations_keep_one_account() {
    let (engine, db) = engine_with_db().await;

    let (first, second) = tokio::join!(
        engine.register(alice("first")),
        engine.register(alice("second"))
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| {
        r.as_ref().err() == Some(&EngineError::ExistingKey("Username already exists".to_string()))
    }));
    assert_eq!(count(&db, "accounts").await, 1);
}

#[tokio::test]
async fn register_requires_every_field() {
    let (engine, db) = engine_with_db().await;

    let blanks: [fn(&mut AccountNew); 4] = [
        |a| a.username.clear(),
        |a| a.password.clear(),
        |a| a.first_name.clear(),
        |a| a.last_name.clear(),
    ];
    for blank in blanks {
        let mut account = alice("wonderland");
        blank(&mut account);
        let err = engine.register(account).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingField("All fields are required".to_string())
        );
    }
    assert_eq!(count(&db, "accounts").await, 0);
}

#[tokio::test]
async fn wrong_password_looks_like_unknown_user() {
    let (engine, _db) = engine_with_db().await;
    engine.register(alice("wonderland")).await.unwrap();

    let wrong_password = engine.login("alice", "looking-glass").await.unwrap();
    let unknown_user = engine.login("bob", "wonderland").await.unwrap();

    assert_eq!(wrong_password, Login::Rejected);
    assert_eq!(unknown_user, Login::Rejected);
}

#[tokio::test]
async fn login_without_credentials_is_not_an_error() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine.login("", "wonderland").await.unwrap(),
        Login::MissingCredentials
    );
    assert_eq!(
        engine.login("alice", "").await.unwrap(),
        Login::MissingCredentials
    );
}

#[tokio::test]
async fn login_opens_a_session_that_logout_closes() {
    let (engine, db) = engine_with_db().await;
    engine.register(alice("wonderland")).await.unwrap();

    let Login::Granted { token } = engine.login("alice", "wonderland").await.unwrap() else {
        panic!("login should succeed");
    };
    assert_eq!(count(&db, "sessions").await, 1);

    assert!(engine.close_session(&token).await.unwrap());
    assert!(!engine.close_session(&token).await.unwrap());
    assert_eq!(count(&db, "sessions").await, 0);
}

#[tokio::test]
async fn rejected_login_opens_no_session() {
    let (engine, db) = engine_with_db().await;
    engine.register(alice("wonderland")).await.unwrap();

    engine.login("alice", "looking-glass").await.unwrap();

    assert_eq!(count(&db, "sessions").await, 0);
}
