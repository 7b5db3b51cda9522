//! Integration tests for bounty persistence and the join rules.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use starklytics_db::models::bounty::CreateBounty;
use starklytics_db::models::user::CreateUser;
use starklytics_db::repositories::{BountyRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$test".to_string(),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_bounty(title: &str, max_participants: i32) -> CreateBounty {
    CreateBounty {
        title: title.to_string(),
        description: None,
        amount: 100.0,
        token: None,
        deadline: Utc::now() + Duration::days(7),
        difficulty: None,
        max_participants: Some(max_participants),
        rpc_endpoint: "https://rpc.example".to_string(),
        metadata: None,
    }
}

// ---------------------------------------------------------------------------
// Creation defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_applies_defaults(pool: PgPool) {
    let creator = create_user(&pool, "creator").await;
    let bounty = BountyRepo::create(&pool, creator, &new_bounty("Find whales", 3))
        .await
        .unwrap();

    assert_eq!(bounty.token, "STRK");
    assert_eq!(bounty.difficulty, "beginner");
    assert_eq!(bounty.current_participants, 0);
    assert_eq!(bounty.max_participants, 3);
    assert!(bounty.winner_id.is_none());
}

// ---------------------------------------------------------------------------
// Join rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn join_increments_participant_count(pool: PgPool) {
    let creator = create_user(&pool, "creator").await;
    let analyst = create_user(&pool, "analyst").await;
    let bounty = BountyRepo::create(&pool, creator, &new_bounty("Find whales", 3))
        .await
        .unwrap();

    let participant = BountyRepo::join(&pool, bounty.id, analyst)
        .await
        .unwrap()
        .expect("join should succeed with free capacity");
    assert_eq!(participant.status, "joined");

    let refreshed = BountyRepo::find_by_id(&pool, bounty.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.current_participants, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn join_refused_when_full(pool: PgPool) {
    let creator = create_user(&pool, "creator").await;
    let a = create_user(&pool, "a").await;
    let b = create_user(&pool, "b").await;
    let bounty = BountyRepo::create(&pool, creator, &new_bounty("Tiny", 1))
        .await
        .unwrap();

    assert!(BountyRepo::join(&pool, bounty.id, a).await.unwrap().is_some());
    assert!(
        BountyRepo::join(&pool, bounty.id, b).await.unwrap().is_none(),
        "a full bounty must refuse further joins"
    );

    // The refused join must not bump the counter.
    let refreshed = BountyRepo::find_by_id(&pool, bounty.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.current_participants, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_join_violates_unique_constraint(pool: PgPool) {
    let creator = create_user(&pool, "creator").await;
    let analyst = create_user(&pool, "analyst").await;
    let bounty = BountyRepo::create(&pool, creator, &new_bounty("Find whales", 3))
        .await
        .unwrap();

    BountyRepo::join(&pool, bounty.id, analyst)
        .await
        .unwrap()
        .unwrap();

    let err = BountyRepo::join(&pool, bounty.id, analyst)
        .await
        .expect_err("joining twice must fail");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }

    // The rolled-back duplicate must not bump the counter.
    let refreshed = BountyRepo::find_by_id(&pool, bounty.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.current_participants, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn join_refused_for_unknown_bounty(pool: PgPool) {
    let analyst = create_user(&pool, "analyst").await;
    assert!(BountyRepo::join(&pool, 999_999, analyst)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn participants_list_in_join_order(pool: PgPool) {
    let creator = create_user(&pool, "creator").await;
    let a = create_user(&pool, "a").await;
    let b = create_user(&pool, "b").await;
    let bounty = BountyRepo::create(&pool, creator, &new_bounty("Find whales", 5))
        .await
        .unwrap();

    BountyRepo::join(&pool, bounty.id, a).await.unwrap().unwrap();
    BountyRepo::join(&pool, bounty.id, b).await.unwrap().unwrap();

    let participants = BountyRepo::list_participants(&pool, bounty.id).await.unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].participant_id, a);
    assert_eq!(participants[1].participant_id, b);
}
