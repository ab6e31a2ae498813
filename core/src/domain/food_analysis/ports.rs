use std::future::Future;

use crate::domain::food_analysis::entities::{
    AnalysisError, ChatCompletionRequest, NutritionRecord, TransportError,
};

/// LLM Client trait for calling the vision model
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends the request and returns the raw text of the top choice.
    fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Service trait for food analysis
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    fn analyze(
        &self,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<NutritionRecord, AnalysisError>> + Send;
}
