use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::food_analysis::entities::ExtractionError;

pub const SCHEMA_NAME: &str = "FoodNutritionAnalysis";
const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";
const SCHEMA_DESCRIPTION: &str = "Detailed macro and calorie breakdown for a food dish";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    /// Array whose items are objects with the given fields.
    ObjectArray(&'static [FieldDef]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl FieldDef {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            minimum: None,
            maximum: None,
        }
    }

    const fn at_least(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    const fn at_most(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

pub const INGREDIENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("name", FieldKind::String),
    FieldDef::new("calories", FieldKind::Number),
];

/// Field table of a nutrition record. Must mirror `NutritionRecord`.
pub const NUTRITION_FIELDS: &[FieldDef] = &[
    FieldDef::new("title", FieldKind::String),
    FieldDef::new("proteinGrams", FieldKind::Integer).at_least(0),
    FieldDef::new("carbsGrams", FieldKind::Integer).at_least(0),
    FieldDef::new("fatsGrams", FieldKind::Integer).at_least(0),
    FieldDef::new("healthScore", FieldKind::Integer)
        .at_least(0)
        .at_most(100),
    FieldDef::new("ingredients", FieldKind::ObjectArray(INGREDIENT_FIELDS)),
    FieldDef::new("dishCount", FieldKind::Integer).at_least(0),
    FieldDef::new("totalCalories", FieldKind::Integer).at_least(0),
];

/// The nutrition schema the model is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutritionSchema {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl Default for NutritionSchema {
    fn default() -> Self {
        Self {
            name: SCHEMA_NAME,
            fields: NUTRITION_FIELDS,
        }
    }
}

#[derive(Debug, Serialize)]
struct ObjectSchema {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    draft: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    #[serde(rename = "type")]
    kind: &'static str,
    required: Vec<&'static str>,
    properties: BTreeMap<&'static str, PropertySchema>,
}

#[derive(Debug, Serialize)]
struct PropertySchema {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<ObjectSchema>>,
}

impl NutritionSchema {
    /// Renders the schema as the JSON-schema object expected by the
    /// `json_schema` response format.
    pub fn render(&self) -> Result<Value, serde_json::Error> {
        let mut root = object_schema(self.fields);
        root.draft = Some(SCHEMA_DRAFT);
        root.description = Some(SCHEMA_DESCRIPTION);
        serde_json::to_value(root)
    }

    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Checks a decoded JSON value against the field table.
    ///
    /// Reports the first violation with the path of the offending field.
    pub fn validate(&self, value: &Value) -> Result<(), ExtractionError> {
        match value {
            Value::Object(_) => validate_object(value, self.fields, ""),
            _ => Err(ExtractionError::mismatch(
                "$",
                format!("expected an object, found {}", kind_of(value)),
            )),
        }
    }
}

fn object_schema(fields: &'static [FieldDef]) -> ObjectSchema {
    let properties = fields
        .iter()
        .map(|field| (field.name, property_schema(field)))
        .collect();

    ObjectSchema {
        draft: None,
        description: None,
        kind: "object",
        required: fields.iter().map(|f| f.name).collect(),
        properties,
    }
}

fn property_schema(field: &FieldDef) -> PropertySchema {
    let (kind, items) = match field.kind {
        FieldKind::String => ("string", None),
        FieldKind::Integer => ("integer", None),
        FieldKind::Number => ("number", None),
        FieldKind::ObjectArray(item_fields) => ("array", Some(Box::new(object_schema(item_fields)))),
    };

    PropertySchema {
        kind,
        minimum: field.minimum,
        maximum: field.maximum,
        items,
    }
}

fn validate_object(
    value: &Value,
    fields: &[FieldDef],
    prefix: &str,
) -> Result<(), ExtractionError> {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        match value.get(field.name) {
            None | Some(Value::Null) => {
                return Err(ExtractionError::mismatch(path, "missing required field"));
            }
            Some(found) => validate_field(found, field, &path)?,
        }
    }

    Ok(())
}

fn validate_field(value: &Value, field: &FieldDef, path: &str) -> Result<(), ExtractionError> {
    match field.kind {
        FieldKind::String => {
            if !value.is_string() {
                return Err(expected(path, "string", value));
            }
        }
        FieldKind::Number => {
            if !value.is_number() {
                return Err(expected(path, "number", value));
            }
        }
        FieldKind::Integer => {
            let number = match value.as_i64() {
                Some(n) => n,
                None if value.is_u64() => {
                    return Err(ExtractionError::mismatch(path, "integer out of range"));
                }
                None => return Err(expected(path, "integer", value)),
            };

            if let Some(minimum) = field.minimum {
                if number < minimum {
                    return Err(ExtractionError::mismatch(
                        path,
                        format!("{number} is below the minimum of {minimum}"),
                    ));
                }
            }
            if let Some(maximum) = field.maximum {
                if number > maximum {
                    return Err(ExtractionError::mismatch(
                        path,
                        format!("{number} is above the maximum of {maximum}"),
                    ));
                }
            }
            if number > i64::from(u32::MAX) {
                return Err(ExtractionError::mismatch(path, "integer out of range"));
            }
        }
        FieldKind::ObjectArray(item_fields) => {
            let items = value
                .as_array()
                .ok_or_else(|| expected(path, "array", value))?;

            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                if !item.is_object() {
                    return Err(expected(&item_path, "object", item));
                }
                validate_object(item, item_fields, &item_path)?;
            }
        }
    }

    Ok(())
}

fn expected(path: &str, kind: &str, found: &Value) -> ExtractionError {
    ExtractionError::mismatch(path, format!("expected {kind}, found {}", kind_of(found)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
