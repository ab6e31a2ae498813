use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::food_analysis::{
    entities::{AnalysisError, NutritionRecord},
    extractor,
    ports::{FoodAnalysisService, LLMClient},
    request_builder,
    schema::NutritionSchema,
    value_objects::{AnalysisOptions, AnalysisState},
};

/// Drives one food analysis: build request, call the model, extract.
///
/// The orchestrator never retries and never writes anywhere; its only side
/// effect is the published [`AnalysisState`].
pub struct AnalysisOrchestrator<L: LLMClient> {
    llm_client: L,
    schema: NutritionSchema,
    options: AnalysisOptions,
    state: watch::Sender<AnalysisState>,
}

impl<L: LLMClient> AnalysisOrchestrator<L> {
    pub fn new(llm_client: L, options: AnalysisOptions) -> Self {
        let (state, _) = watch::channel(AnalysisState::Idle);
        Self {
            llm_client,
            schema: NutritionSchema::default(),
            options,
            state,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn state(&self) -> AnalysisState {
        *self.state.borrow()
    }

    /// Receiver the UI can watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    /// Back to `Idle` once the UI has consumed a terminal state.
    pub fn reset(&self) {
        if !self.state().is_in_flight() {
            self.state.send_replace(AnalysisState::Idle);
        }
    }

    pub async fn analyze(&self, image_data: &[u8]) -> Result<NutritionRecord, AnalysisError> {
        if self.state().is_in_flight() {
            warn!("analysis started while another one is still in flight");
        }

        let mut guard = InFlightGuard::new(&self.state);
        let result = self.run(image_data, &mut guard).await;

        match &result {
            Ok(record) => {
                info!(
                    title = %record.title,
                    total_calories = record.total_calories,
                    ingredients = record.ingredients.len(),
                    "food analysis succeeded"
                );
                guard.finish(AnalysisState::Succeeded);
            }
            Err(e) => {
                error!("food analysis failed: {}", e);
                guard.finish(AnalysisState::Failed);
            }
        }

        result
    }

    async fn run(
        &self,
        image_data: &[u8],
        guard: &mut InFlightGuard<'_>,
    ) -> Result<NutritionRecord, AnalysisError> {
        let request = request_builder::build(image_data, &self.schema, &self.options.params)?;
        debug!(image_bytes = image_data.len(), model = %request.model, "sending analysis request");

        guard.enter(AnalysisState::Requesting);
        let raw_response =
            match tokio::time::timeout(self.options.timeout, self.llm_client.complete(request))
                .await
            {
                Ok(response) => response?,
                Err(_) => return Err(AnalysisError::Timeout(self.options.timeout)),
            };

        guard.enter(AnalysisState::Extracting);
        debug!(response_len = raw_response.len(), "extracting model response");

        let record = extractor::extract_with_schema(&raw_response, &self.schema)?;
        Ok(record)
    }
}

impl<L: LLMClient> FoodAnalysisService for AnalysisOrchestrator<L> {
    async fn analyze(&self, image_data: Vec<u8>) -> Result<NutritionRecord, AnalysisError> {
        AnalysisOrchestrator::analyze(self, &image_data).await
    }
}

/// Puts the state back to `Idle` if the analysis future is dropped before it
/// reaches a terminal state.
struct InFlightGuard<'a> {
    state: &'a watch::Sender<AnalysisState>,
    finished: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(state: &'a watch::Sender<AnalysisState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    fn enter(&mut self, next: AnalysisState) {
        self.state.send_replace(next);
    }

    fn finish(&mut self, terminal: AnalysisState) {
        self.finished = true;
        self.state.send_replace(terminal);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("food analysis abandoned before completion");
            self.state.send_replace(AnalysisState::Idle);
        }
    }
}
