use base64::{Engine as _, engine::general_purpose};

use crate::domain::food_analysis::{
    entities::{
        ChatCompletionRequest, ContentItem, ImageUrl, JsonSchemaWrapper, RequestBuildError,
        RequestMessage, ResponseFormat,
    },
    schema::NutritionSchema,
    value_objects::GenerationParams,
};

pub const SYSTEM_INSTRUCTION: &str = "You are an AI food analyzer. Analyze the image and answer only with the nutritional information as JSON matching the provided schema.";
pub const USER_INSTRUCTION: &str =
    "Analyze this food image and list all visible food items with their estimated calories.";

const IMAGE_MIME_TYPE: &str = "image/jpeg";
const IMAGE_DETAIL: &str = "high";

/// Builds the chat-completions request for one food photo.
///
/// Pure construction: the whole image is encoded, nothing is sent.
pub fn build(
    image_bytes: &[u8],
    schema: &NutritionSchema,
    params: &GenerationParams,
) -> Result<ChatCompletionRequest, RequestBuildError> {
    let rendered_schema = schema.render()?;

    Ok(ChatCompletionRequest {
        model: params.model.clone(),
        temperature: params.temperature,
        max_tokens: params.max_tokens,
        response_format: ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaWrapper {
                name: schema.name.to_string(),
                schema: rendered_schema,
            },
        },
        messages: vec![
            RequestMessage::system(SYSTEM_INSTRUCTION),
            RequestMessage::user_items(vec![
                ContentItem::Text {
                    text: USER_INSTRUCTION.to_string(),
                },
                ContentItem::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_uri(image_bytes),
                        detail: IMAGE_DETAIL.to_string(),
                    },
                },
            ]),
        ],
    })
}

pub fn image_data_uri(image_bytes: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(image_bytes);
    format!("data:{IMAGE_MIME_TYPE};base64,{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::entities::{MessageContent, Role};

    fn build_default(image: &[u8]) -> ChatCompletionRequest {
        build(image, &NutritionSchema::default(), &GenerationParams::default()).unwrap()
    }

    #[test]
    fn test_messages_order_and_roles() {
        let request = build_default(b"jpeg-bytes");

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(
            request.messages[0].content,
            MessageContent::Text(SYSTEM_INSTRUCTION.to_string())
        );
        assert_eq!(request.messages[1].role, Role::User);

        match &request.messages[1].content {
            MessageContent::Items(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[0], ContentItem::Text { .. }));
                match &items[1] {
                    ContentItem::ImageUrl { image_url } => {
                        assert_eq!(image_url.url, "data:image/jpeg;base64,anBlZy1ieXRlcw==");
                        assert_eq!(image_url.detail, "high");
                    }
                    other => panic!("Expected image item, got {:?}", other),
                }
            }
            other => panic!("Expected content items, got {:?}", other),
        }
    }

    #[test]
    fn test_generation_params() {
        let request = build_default(b"x");

        assert_eq!(request.model, "gpt-4o-mini");
        assert!(request.temperature <= 0.3);
        assert_eq!(request.max_tokens, 400);
        assert_eq!(request.response_format.format_type, "json_schema");
        assert_eq!(request.response_format.json_schema.name, "FoodNutritionAnalysis");
        assert_eq!(request.response_format.json_schema.schema["type"], "object");
    }

    #[test]
    fn test_large_image_is_not_truncated() {
        let image: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
        let uri = image_data_uri(&image);

        let encoded = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build_default(b"same image");
        let second = build_default(b"same image");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_wire_format() {
        let request = build_default(b"x");
        let wire = serde_json::to_value(&request).unwrap();

        assert_eq!(wire["max_tokens"], 400);
        assert_eq!(wire["response_format"]["type"], "json_schema");
        assert_eq!(wire["messages"][0]["role"], "system");
        assert_eq!(wire["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            wire["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,eA=="
        );
    }
}
