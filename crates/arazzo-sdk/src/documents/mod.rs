mod actions;
mod components;
mod criterion;
mod document;
mod enums;
mod parameter;
mod request_body;
mod reusable;
mod step;
mod workflow;

pub use actions::{FailureAction, FailureActionOrReusable, SuccessAction, SuccessActionOrReusable};
pub use components::Components;
pub use criterion::{
    Criterion, CriterionExpressionType, CriterionKind, JSONPATH_VERSION, XPATH_VERSIONS,
};
pub use document::{ArazzoDocument, Info, SourceDescription};
pub use enums::{
    CriterionType, FailureActionType, ParameterLocation, SourceDescriptionType, SuccessActionType,
};
pub use parameter::{Parameter, ParameterOrReusable};
pub use request_body::{PayloadReplacement, RequestBody};
pub use reusable::ReusableObject;
pub use step::{Step, StepParameter};
pub use workflow::Workflow;
