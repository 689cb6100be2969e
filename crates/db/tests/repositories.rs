//! Repository integration tests against an in-memory SQLite database.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use trifold_core::forms::{ArtistForm, ShowSubmission, VenueForm};
use trifold_core::quiz::QuizFilter;
use trifold_core::recipe::{Ingredient, Recipe};
use trifold_core::types::DbId;
use trifold_db::models::question::NewQuestion;
use trifold_db::models::show::Timeline;
use trifold_db::repositories::{
    ArtistRepo, DrinkRepo, QuestionRepo, ShowRepo, VenueRepo,
};
use trifold_db::DbPool;

async fn test_pool() -> DbPool {
    let pool = trifold_db::create_pool("sqlite::memory:", 1).await.unwrap();
    trifold_db::run_migrations(&pool).await.unwrap();
    pool
}

fn venue(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1 Main St".into(),
        genres: vec!["Jazz".into(), "Folk".into()],
        ..Default::default()
    }
}

fn artist(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        genres: vec!["Rock n Roll".into()],
        ..Default::default()
    }
}

async fn add_venue(pool: &DbPool, name: &str, city: &str, state: &str) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    VenueRepo::create(&mut conn, &venue(name, city, state))
        .await
        .unwrap()
        .id
}

async fn add_artist(pool: &DbPool, name: &str) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    ArtistRepo::create(&mut conn, &artist(name)).await.unwrap().id
}

async fn add_show(pool: &DbPool, artist_id: DbId, venue_id: DbId, offset_days: i64) {
    let mut conn = pool.acquire().await.unwrap();
    ShowRepo::create(
        &mut conn,
        &ShowSubmission {
            artist_id,
            venue_id,
            start_time: Utc::now() + Duration::days(offset_days),
        },
    )
    .await
    .unwrap();
}

async fn add_question(pool: &DbPool, text: &str, category: DbId) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    QuestionRepo::create(
        &mut conn,
        &NewQuestion {
            question: text.into(),
            answer: "answer".into(),
            category: Some(category),
            difficulty: Some(2),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Venues and shows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn venue_round_trips_genres() {
    let pool = test_pool().await;
    let id = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;

    let row = VenueRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.genres, "Jazz,Folk");
    assert!(!row.seeking_talent);
    assert!(VenueRepo::find_by_id(&pool, id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn listing_counts_only_upcoming_shows() {
    let pool = test_pool().await;
    let v = add_venue(&pool, "Hall", "Austin", "TX").await;
    let a = add_artist(&pool, "Band").await;
    add_show(&pool, a, v, -3).await;
    add_show(&pool, a, v, 2).await;
    add_show(&pool, a, v, 5).await;

    let rows = VenueRepo::list_by_area(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn listing_orders_by_state_then_city() {
    let pool = test_pool().await;
    add_venue(&pool, "B", "San Francisco", "CA").await;
    add_venue(&pool, "C", "New York", "NY").await;
    add_venue(&pool, "A", "Oakland", "CA").await;

    let names: Vec<String> = VenueRepo::list_by_area(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let pool = test_pool().await;
    add_venue(&pool, "Festival Hall", "Austin", "TX").await;
    add_venue(&pool, "Theatre", "Austin", "TX").await;
    add_venue(&pool, "100% Jazz", "Austin", "TX").await;

    let hits = VenueRepo::search(&pool, "fest").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Festival Hall");

    let literal = VenueRepo::search(&pool, "%").await.unwrap();
    assert_eq!(literal.len(), 1, "wildcards in the term match literally");
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
    let pool = test_pool().await;
    add_venue(&pool, "CAFÉ ÉTÉ", "Montréal", "QC").await;
    add_artist(&pool, "Ólafur Arnalds").await;
    add_question(&pool, "Who wrote ÉTUDES?", 2).await;

    assert_eq!(VenueRepo::search(&pool, "été").await.unwrap().len(), 1);
    assert_eq!(ArtistRepo::search(&pool, "ólafur").await.unwrap().len(), 1);
    assert_eq!(QuestionRepo::search(&pool, "études").await.unwrap().len(), 1);
}

#[tokio::test]
async fn past_and_upcoming_partition_all_shows() {
    let pool = test_pool().await;
    let v = add_venue(&pool, "Hall", "Austin", "TX").await;
    let a = add_artist(&pool, "Band").await;
    for offset in [-10, -1, 1, 10, 20] {
        add_show(&pool, a, v, offset).await;
    }

    let past = ShowRepo::for_venue(&pool, v, Timeline::Past).await.unwrap();
    let upcoming = ShowRepo::for_venue(&pool, v, Timeline::Upcoming)
        .await
        .unwrap();
    assert_eq!(past.len(), 2);
    assert_eq!(upcoming.len(), 3);
    assert!(past.iter().all(|s| s.artist_name == "Band"));

    let by_artist_past = ShowRepo::for_artist(&pool, a, Timeline::Past).await.unwrap();
    let by_artist_upcoming = ShowRepo::for_artist(&pool, a, Timeline::Upcoming)
        .await
        .unwrap();
    assert_eq!(by_artist_past.len() + by_artist_upcoming.len(), 5);
    assert!(by_artist_upcoming
        .windows(2)
        .all(|w| w[0].start_time <= w[1].start_time));
}

#[tokio::test]
async fn show_with_missing_artist_is_rejected() {
    let pool = test_pool().await;
    let v = add_venue(&pool, "Hall", "Austin", "TX").await;

    let mut conn = pool.acquire().await.unwrap();
    let result = ShowRepo::create(
        &mut conn,
        &ShowSubmission {
            artist_id: 42,
            venue_id: v,
            start_time: Utc::now(),
        },
    )
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

#[tokio::test]
async fn delete_with_shows_cascades_in_transaction() {
    let pool = test_pool().await;
    let v = add_venue(&pool, "Hall", "Austin", "TX").await;
    let a = add_artist(&pool, "Band").await;
    add_show(&pool, a, v, 1).await;

    let mut tx = pool.begin().await.unwrap();
    assert!(VenueRepo::delete_with_shows(&mut tx, v).await.unwrap());
    tx.commit().await.unwrap();

    assert_eq!(VenueRepo::count(&pool).await.unwrap(), 0);
    assert!(ShowRepo::list_upcoming(&pool).await.unwrap().is_empty());

    let mut tx = pool.begin().await.unwrap();
    assert!(!VenueRepo::delete_with_shows(&mut tx, v).await.unwrap());
}

#[tokio::test]
async fn dropped_transaction_rolls_back() {
    let pool = test_pool().await;
    {
        let mut tx = pool.begin().await.unwrap();
        VenueRepo::create(&mut tx, &venue("Ghost", "Austin", "TX"))
            .await
            .unwrap();
    }
    assert_eq!(VenueRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Trivia
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quiz_skips_previous_and_respects_category() {
    let pool = test_pool().await;
    let q1 = add_question(&pool, "Science one", 1).await;
    let q2 = add_question(&pool, "Art one", 2).await;
    let q3 = add_question(&pool, "Science two", 1).await;

    let any = QuizFilter {
        category: None,
        exclude: vec![q1],
    };
    assert_eq!(
        QuestionRepo::next_for_quiz(&pool, &any).await.unwrap().unwrap().id,
        q2
    );

    let science = QuizFilter {
        category: Some(1),
        exclude: vec![q1],
    };
    assert_eq!(
        QuestionRepo::next_for_quiz(&pool, &science)
            .await
            .unwrap()
            .unwrap()
            .id,
        q3
    );

    let exhausted = QuizFilter {
        category: Some(1),
        exclude: vec![q1, q3],
    };
    assert!(QuestionRepo::next_for_quiz(&pool, &exhausted)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn question_without_category_fails_and_leaves_no_row() {
    let pool = test_pool().await;
    let mut tx = pool.begin().await.unwrap();
    let result = QuestionRepo::create(
        &mut tx,
        &NewQuestion {
            question: "Orphan?".into(),
            answer: "Yes".into(),
            category: None,
            difficulty: Some(1),
        },
    )
    .await;
    assert!(result.is_err());
    drop(tx);

    assert_eq!(QuestionRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn question_search_and_delete() {
    let pool = test_pool().await;
    let id = add_question(&pool, "What is the Heaviest organ?", 1).await;
    add_question(&pool, "Who painted it?", 2).await;

    let hits = QuestionRepo::search(&pool, "heav").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, id);

    let mut conn = pool.acquire().await.unwrap();
    assert!(QuestionRepo::delete(&mut conn, id).await.unwrap());
    assert!(!QuestionRepo::delete(&mut conn, id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Drinks
// ---------------------------------------------------------------------------

fn water() -> Recipe {
    Recipe(vec![Ingredient {
        name: "water".into(),
        color: "blue".into(),
        parts: 1,
    }])
}

#[tokio::test]
async fn duplicate_drink_title_is_rejected() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();
    DrinkRepo::create(&mut conn, "Water", &water()).await.unwrap();
    let dup = DrinkRepo::create(&mut conn, "Water", &water()).await;
    assert_matches!(dup, Err(sqlx::Error::Database(_)));
    drop(conn);

    assert_eq!(DrinkRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn drink_update_applies_only_given_fields() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let drink = DrinkRepo::create(&mut conn, "Water", &water()).await.unwrap();

    let renamed = DrinkRepo::update(&mut conn, drink.id, Some("Still Water"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.title, "Still Water");
    assert_eq!(renamed.recipe, drink.recipe);

    assert!(DrinkRepo::update(&mut conn, drink.id + 1, Some("x"), None)
        .await
        .unwrap()
        .is_none());

    let long = renamed.long().unwrap();
    assert_eq!(long.recipe[0].color, "blue");
    let short = renamed.short().unwrap();
    assert_eq!(short.recipe[0].name, "water");
}
