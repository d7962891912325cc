//! Template Store - named YAML documents on disk
//!
//! Each template is a schema-less [`TemplateValue`] persisted as
//! `{dir}/{name}.yaml`. The [`TemplateStore`] exposes total operations
//! (`store` returns `bool`, `load` returns `Option`) alongside fallible
//! `try_*` variants that report a [`TemplateError`].

mod error;
mod store;
mod value;

pub use error::TemplateError;
pub use store::{DEFAULT_TEMPLATE_DIR, MAX_NESTING_DEPTH, TEMPLATE_EXTENSION, TemplateStore};
pub use value::{MERGE_KEY, TemplateValue};
