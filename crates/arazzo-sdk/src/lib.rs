pub mod bridge;
pub mod documents;
pub mod encode;
pub mod parse;
pub mod validate;

pub use arazzo_core::{Extensions, FieldPath, ValidationError, ValidationResult};
pub use bridge::BridgeOptions;
pub use documents::{
    ArazzoDocument, Components, Criterion, CriterionExpressionType, CriterionKind, CriterionType,
    FailureAction, FailureActionOrReusable, FailureActionType, Info, Parameter, ParameterLocation,
    ParameterOrReusable, PayloadReplacement, RequestBody, ReusableObject, SourceDescription,
    SourceDescriptionType, Step, StepParameter, SuccessAction, SuccessActionOrReusable,
    SuccessActionType, Workflow,
};
pub use encode::{encode_document, encode_document_with_options, EncodeError, EncodeOptions};
pub use parse::{
    decode_document, decode_document_with_options, BlockDecodeError, DecodeError, DecodeOptions,
    DocumentFormat,
};
pub use validate::validate_document;
