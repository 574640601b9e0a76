use super::enums::CriterionType;
use arazzo_core::Extensions;
use serde::{Deserialize, Serialize};

pub const JSONPATH_VERSION: &str = "draft-goessner-dispatch-jsonpath-00";
pub const XPATH_VERSIONS: [&str; 3] = ["xpath-10", "xpath-20", "xpath-30"];

/// Expression type with a pinned version, written as sibling `type` and
/// `version` fields of the criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionExpressionType {
    pub kind: CriterionType,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionKind {
    Plain(CriterionType),
    Expression(CriterionExpressionType),
}

impl CriterionKind {
    pub fn criterion_type(&self) -> &CriterionType {
        match self {
            CriterionKind::Plain(kind) => kind,
            CriterionKind::Expression(expression) => &expression.kind,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            CriterionKind::Plain(_) => None,
            CriterionKind::Expression(expression) => Some(expression.version.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCriterion", into = "RawCriterion")]
pub struct Criterion {
    pub context: Option<String>,
    pub condition: String,
    pub kind: Option<CriterionKind>,
    pub extensions: Extensions,
}

impl Criterion {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, context: impl Into<String>, kind: CriterionType) -> Self {
        self.context = Some(context.into());
        self.kind = Some(CriterionKind::Plain(kind));
        self
    }

    pub fn with_expression_type(
        mut self,
        context: impl Into<String>,
        kind: CriterionType,
        version: impl Into<String>,
    ) -> Self {
        self.context = Some(context.into());
        self.kind = Some(CriterionKind::Expression(CriterionExpressionType {
            kind,
            version: version.into(),
        }));
        self
    }

    pub fn criterion_type(&self) -> Option<&CriterionType> {
        self.kind.as_ref().map(CriterionKind::criterion_type)
    }
}

#[derive(Serialize, Deserialize)]
struct RawCriterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    #[serde(default)]
    condition: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<CriterionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(flatten, default)]
    extensions: Extensions,
}

impl From<RawCriterion> for Criterion {
    fn from(raw: RawCriterion) -> Self {
        // A version without a type has nothing to qualify and is dropped.
        let kind = match (raw.kind, raw.version) {
            (Some(kind), Some(version)) => Some(CriterionKind::Expression(
                CriterionExpressionType { kind, version },
            )),
            (Some(kind), None) => Some(CriterionKind::Plain(kind)),
            (None, _) => None,
        };
        Self {
            context: raw.context,
            condition: raw.condition,
            kind,
            extensions: raw.extensions,
        }
    }
}

impl From<Criterion> for RawCriterion {
    fn from(criterion: Criterion) -> Self {
        let (kind, version) = match criterion.kind {
            Some(CriterionKind::Plain(kind)) => (Some(kind), None),
            Some(CriterionKind::Expression(expression)) => {
                (Some(expression.kind), Some(expression.version))
            }
            None => (None, None),
        };
        Self {
            context: criterion.context,
            condition: criterion.condition,
            kind,
            version,
            extensions: criterion.extensions,
        }
    }
}

#[cfg(test)]
#[path = "criterion_test.rs"]
mod tests;
