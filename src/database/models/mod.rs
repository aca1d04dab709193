#[macro_use]
mod macros {
    /// Implements [`Entity`](super::Entity) for a struct with `id`, `name` and
    /// `description` fields.
    macro_rules! impl_entity {
        ($model:ty, $table:literal, $label:literal) => {
            impl $crate::database::models::Entity for $model {
                const TABLE: &'static str = $table;
                const LABEL: &'static str = $label;

                fn from_fields(id: i32, name: String, description: String) -> Self {
                    Self { id, name, description }
                }

                fn id(&self) -> i32 {
                    self.id
                }

                fn set_id(&mut self, id: i32) {
                    self.id = id;
                }

                fn name(&self) -> &str {
                    &self.name
                }

                fn description(&self) -> &str {
                    &self.description
                }
            }
        };
    }
}

pub mod category;
pub mod product;

pub use category::Category;
pub use product::Product;

use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, FromRow};

/// A catalog record persisted in its own table with a store-generated id.
///
/// Both repository variants and the generic handlers are written against this
/// trait, so adding a resource means adding a model and one `impl Entity`.
pub trait Entity:
    Clone + Send + Sync + Unpin + Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + 'static
{
    /// Table holding the rows. Only ever interpolated from this constant.
    const TABLE: &'static str;

    /// Human-readable name used in response messages, e.g. "Category"
    const LABEL: &'static str;

    fn from_fields(id: i32, name: String, description: String) -> Self;

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    fn name(&self) -> &str;

    fn description(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_carry_their_table_and_label() {
        assert_eq!((Category::TABLE, Category::LABEL), ("categories", "Category"));
        assert_eq!((Product::TABLE, Product::LABEL), ("products", "Product"));
    }

    #[test]
    fn from_fields_and_set_id() {
        let mut product = Product::from_fields(0, "Kettle".into(), "Steel".into());
        product.set_id(5);
        assert_eq!(product.id(), 5);
        assert_eq!(product.name(), "Kettle");
        assert_eq!(product.description(), "Steel");
    }
}
