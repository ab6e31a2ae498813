use std::sync::Arc;

use tracing::info;

use crate::{
    domain::{
        common::CalSnapConfig,
        food_analysis::{services::AnalysisOrchestrator, value_objects::AnalysisOptions},
        food_entry::services::NutritionStore,
    },
    infrastructure::{
        db::sqlite::{Sqlite, SqliteConfig},
        food_entry::SqliteFoodEntryRepository,
        llm::OpenAIChatClient,
    },
};

pub type CalSnapOrchestrator = AnalysisOrchestrator<OpenAIChatClient>;
pub type CalSnapStore = NutritionStore<SqliteFoodEntryRepository>;

/// Everything the UI talks to, built once at startup and shared by handle.
#[derive(Clone)]
pub struct CalSnapService {
    pub orchestrator: Arc<CalSnapOrchestrator>,
    pub store: Arc<CalSnapStore>,
}

pub async fn create_service(config: CalSnapConfig) -> Result<CalSnapService, anyhow::Error> {
    let sqlite = Sqlite::new(SqliteConfig {
        database_url: config.database.url.clone(),
    })
    .await?;

    let store = NutritionStore::new(SqliteFoodEntryRepository::new(sqlite.get_db()));
    let orchestrator = AnalysisOrchestrator::new(
        OpenAIChatClient::from(&config.llm),
        AnalysisOptions::from(&config.llm),
    );

    info!(
        model = %config.llm.model,
        timeout_secs = config.llm.timeout.as_secs(),
        "calsnap core initialized"
    );

    Ok(CalSnapService {
        orchestrator: Arc::new(orchestrator),
        store: Arc::new(store),
    })
}
