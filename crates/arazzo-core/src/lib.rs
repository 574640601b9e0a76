pub mod extensions;
pub mod field_path;
pub mod validation;

pub use extensions::{is_extension_key, ExtensionKeyError, Extensions, EXTENSION_PREFIX};
pub use field_path::{FieldPath, FieldPathParseError, FieldPathSegment};
pub use validation::{ValidationError, ValidationResult};
