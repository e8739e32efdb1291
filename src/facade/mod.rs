//! The public facade: typed fields, their encoding into engine fields,
//! encoder key overrides and the [`Log`] capability set.

pub mod configuration;
pub mod field_encoder;
pub mod field_value;
pub mod logger;

pub use configuration::{apply_config, Configuration};
pub use field_encoder::encode_fields;
pub use field_value::{FieldValue, LogField};
pub use logger::{Log, Logger};
