use serde::Deserialize;

use crate::database::models::Entity;
use crate::error::ApiError;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Request body accepted by create and replace. Any `id` in the body is ignored;
/// the store or the path decides it.
#[derive(Debug, Default, Deserialize)]
pub struct EntityPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EntityPayload {
    /// Check the payload and turn it into an entity carrying `id`.
    ///
    /// The name is trimmed before any check and stored trimmed. Lengths count
    /// characters, not bytes.
    pub fn into_entity<T: Entity>(self, id: i32) -> Result<T, ApiError> {
        let name = self.name.unwrap_or_default().trim().to_string();
        let description = self.description.unwrap_or_default();
        let label = T::LABEL;

        if name.is_empty() {
            return Err(ApiError::validation_error(format!("{} name is required", label)));
        }

        let name_chars = name.chars().count();
        if name_chars < NAME_MIN_CHARS {
            return Err(ApiError::validation_error(format!(
                "{} name must be at least {} characters",
                label, NAME_MIN_CHARS
            )));
        }
        if name_chars > NAME_MAX_CHARS {
            return Err(ApiError::validation_error(format!(
                "{} name must not exceed {} characters",
                label, NAME_MAX_CHARS
            )));
        }
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(ApiError::validation_error(format!(
                "{} description must not exceed {} characters",
                label, DESCRIPTION_MAX_CHARS
            )));
        }

        Ok(T::from_fields(id, name, description))
    }
}
