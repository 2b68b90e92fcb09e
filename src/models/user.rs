use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::AppError;

/// Free-form fields sent by the client. The collection has no schema.
pub type UserFields = Map<String, Value>;

/// A stored user: the store-generated `_id` plus whatever the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: UserFields,
}

impl UserDocument {
    /// Converts a raw MongoDB document into its JSON-facing shape.
    ///
    /// ObjectIds in `_id` are rendered as plain hex strings; every other value
    /// goes through relaxed extended JSON.
    pub fn from_bson(mut doc: Document) -> Self {
        let id = match doc.remove("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(Bson::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let fields = match Bson::Document(doc).into_relaxed_extjson() {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self { id, fields }
    }
}

/// Drops any client-supplied `_id`; ids are generated by the store only.
pub fn strip_id(mut fields: UserFields) -> UserFields {
    fields.remove("_id");
    fields
}

/// Encodes client fields as a BSON document ready for insert or `$set`.
///
/// Integers above `i64::MAX` have no BSON integer type and are stored as doubles.
pub fn fields_to_bson(mut fields: UserFields) -> Result<Document, AppError> {
    fields.values_mut().for_each(widen_oversized_integers);
    Ok(bson::to_document(&fields)?)
}

fn widen_oversized_integers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => {
            if let Some(wide) = n.as_f64().and_then(serde_json::Number::from_f64) {
                *n = wide;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(widen_oversized_integers),
        Value::Object(map) => map.values_mut().for_each(widen_oversized_integers),
        _ => {}
    }
}

pub fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}
