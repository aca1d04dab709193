// handlers/mod.rs - HTTP layer
//
// catalog:    generic CRUD handlers shared by every entity (/api/categories, /api/products)
// system:     service info and health (/, /health)
// validation: request payload rules applied before the service is called
pub mod catalog;
pub mod system;
pub mod validation;
