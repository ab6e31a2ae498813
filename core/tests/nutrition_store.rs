use calsnap_core::{
    domain::{
        food_analysis::{
            entities::{Ingredient, NutritionRecord},
            extractor,
        },
        food_entry::{
            entities::{MacroTotals, MacroType},
            errors::StoreError,
            services::NutritionStore,
        },
    },
    infrastructure::{
        db::sqlite::{Sqlite, SqliteConfig},
        food_entry::SqliteFoodEntryRepository,
    },
};
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use uuid::Uuid;

async fn store() -> NutritionStore<SqliteFoodEntryRepository> {
    let sqlite = Sqlite::new(SqliteConfig {
        database_url: "sqlite::memory:".to_string(),
    })
    .await
    .expect("in-memory sqlite");

    NutritionStore::new(SqliteFoodEntryRepository::new(sqlite.get_db()))
}

fn record(title: &str, calories: u32) -> NutritionRecord {
    NutritionRecord {
        title: title.to_string(),
        protein_grams: 20,
        carbs_grams: 40,
        fats_grams: 10,
        health_score: 75,
        ingredients: vec![
            Ingredient::new("Chicken", 165.0),
            Ingredient::new("Rice", 130.5),
        ],
        dish_count: 1,
        total_calories: calories,
    }
}

fn noon(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn create_then_list_by_day_round_trips() {
    let store = store().await;
    let date = DateTime::from_timestamp(1_715_688_000, 456_789_123).unwrap();

    let created = store
        .create(record("Chicken Rice", 540), Some(vec![0xFF, 0xD8, 0xFF, 0xE0]), Some(date))
        .await
        .unwrap();

    let listed = store.list_by_day_in(date, &Utc).await.unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(listed[0].record.ingredients[1].calories, 130.5);
    assert_eq!(listed[0].image_data.as_deref(), Some(&[0xFF, 0xD8, 0xFF, 0xE0][..]));
}

#[tokio::test]
async fn create_defaults_to_now_in_local_day() {
    let store = store().await;
    let created = store.create(record("Snack", 120), None, None).await.unwrap();

    let today = store.list_by_day(Utc::now()).await.unwrap();
    assert!(today.iter().any(|entry| entry.id == created.id));
    assert_eq!(created.image_data, None);
}

#[tokio::test]
async fn update_keeps_omitted_image_and_date() {
    let store = store().await;
    let created = store
        .create(record("Salad", 300), Some(vec![1, 2, 3]), Some(noon(14)))
        .await
        .unwrap();

    store
        .update(created.id, record("Caesar Salad", 410), None, None)
        .await
        .unwrap();

    let listed = store.list_by_day_in(noon(14), &Utc).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].record.title, "Caesar Salad");
    assert_eq!(listed[0].record.total_calories, 410);
    assert_eq!(listed[0].image_data, Some(vec![1, 2, 3]));
    assert_eq!(listed[0].date_added, created.date_added);
}

#[tokio::test]
async fn update_can_move_an_entry_to_another_day() {
    let store = store().await;
    let created = store.create(record("Soup", 250), None, Some(noon(14))).await.unwrap();

    store
        .update(created.id, record("Soup", 250), Some(vec![7]), Some(noon(15)))
        .await
        .unwrap();

    assert!(store.list_by_day_in(noon(14), &Utc).await.unwrap().is_empty());
    let moved = store.list_by_day_in(noon(15), &Utc).await.unwrap();
    assert_eq!(moved[0].image_data, Some(vec![7]));
}

#[tokio::test]
async fn update_unknown_id_leaves_count_unchanged() {
    let store = store().await;
    store.create(record("Toast", 180), None, Some(noon(14))).await.unwrap();
    let unknown = Uuid::new_v4();

    let error = store
        .update(unknown, record("Bagel", 250), None, None)
        .await
        .unwrap_err();

    assert_eq!(error, StoreError::NotFound(unknown));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn update_macro_changes_exactly_one_field() {
    let store = store().await;
    let created = store.create(record("Steak", 700), None, Some(noon(14))).await.unwrap();

    store.update_macro(created.id, MacroType::Protein, 55).await.unwrap();

    let updated = store.get(created.id).await.unwrap();
    assert_eq!(updated.record.protein_grams, 55);
    assert_eq!(updated.record.carbs_grams, created.record.carbs_grams);
    assert_eq!(updated.record.fats_grams, created.record.fats_grams);
    assert_eq!(updated.record.total_calories, created.record.total_calories);
    assert_eq!(updated.record.title, created.record.title);
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let store = store().await;
    let created = store.create(record("Donut", 260), None, None).await.unwrap();

    store.delete(created.id).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(
        store.delete(created.id).await.unwrap_err(),
        StoreError::NotFound(created.id)
    );
    assert_eq!(
        store.get(created.id).await.unwrap_err(),
        StoreError::NotFound(created.id)
    );
}

#[tokio::test]
async fn aggregate_sums_one_day() {
    let store = store().await;
    store.create(record("Lunch", 500), None, Some(noon(14))).await.unwrap();
    store
        .create(record("Dinner", 300), None, Some(noon(14) + TimeDelta::hours(7)))
        .await
        .unwrap();
    store.create(record("Next day", 900), None, Some(noon(15))).await.unwrap();

    let totals = store.aggregate_macros_in(noon(14), &Utc).await.unwrap();

    assert_eq!(
        totals,
        MacroTotals {
            calories: 800,
            protein: 40,
            carbs: 80,
            fats: 20,
        }
    );
}

#[tokio::test]
async fn aggregate_of_empty_day_is_zero() {
    let store = store().await;
    store.create(record("Lunch", 500), None, Some(noon(14))).await.unwrap();

    assert_eq!(
        store.aggregate_macros_in(noon(20), &Utc).await.unwrap(),
        MacroTotals::default()
    );
    assert_eq!(
        store.aggregate_macros(noon(1) - TimeDelta::days(365)).await.unwrap(),
        MacroTotals::default()
    );
}

#[tokio::test]
async fn day_boundaries_follow_the_time_zone() {
    let store = store().await;
    let late = Utc.with_ymd_and_hms(2024, 5, 14, 23, 30, 0).unwrap();
    store.create(record("Late snack", 200), None, Some(late)).await.unwrap();

    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    assert_eq!(store.list_by_day_in(noon(14), &Utc).await.unwrap().len(), 1);
    assert!(store.list_by_day_in(noon(14), &tokyo).await.unwrap().is_empty());
    assert_eq!(store.list_by_day_in(noon(15), &tokyo).await.unwrap().len(), 1);
}

#[tokio::test]
async fn listings_are_most_recent_first() {
    let store = store().await;
    for (title, hour) in [("Breakfast", 8), ("Dinner", 19), ("Lunch", 13)] {
        let date = Utc.with_ymd_and_hms(2024, 5, 14, hour, 0, 0).unwrap();
        store.create(record(title, 400), None, Some(date)).await.unwrap();
    }
    store.create(record("Yesterday", 400), None, Some(noon(13))).await.unwrap();

    let day: Vec<String> = store
        .list_by_day_in(noon(14), &Utc)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.record.title)
        .collect();
    assert_eq!(day, vec!["Dinner", "Lunch", "Breakfast"]);

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all.last().unwrap().record.title, "Yesterday");
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn extracted_record_can_be_logged() {
    let store = store().await;
    let raw = "```json\n{\"title\":\"Apple\",\"proteinGrams\":0,\"carbsGrams\":25,\"fatsGrams\":0,\"healthScore\":95,\"ingredients\":[{\"name\":\"Apple\",\"calories\":95}],\"dishCount\":1,\"totalCalories\":95}\n```";
    let record = extractor::extract(raw).unwrap();

    let created = store.create(record.clone(), None, Some(noon(14))).await.unwrap();

    assert_eq!(store.get(created.id).await.unwrap().record, record);
}
