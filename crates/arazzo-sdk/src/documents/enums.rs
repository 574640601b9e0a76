use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// String-backed enumeration that keeps unrecognized values in `Other`, so
/// decoding never rejects a value and validation can report it instead.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const KNOWN: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

string_enum!(SourceDescriptionType {
    Arazzo => "arazzo",
    OpenApi => "openapi",
});

string_enum!(ParameterLocation {
    Path => "path",
    Query => "query",
    Header => "header",
    Cookie => "cookie",
});

string_enum!(CriterionType {
    Simple => "simple",
    Regex => "regex",
    JsonPath => "jsonpath",
    XPath => "xpath",
});

string_enum!(SuccessActionType {
    End => "end",
    Goto => "goto",
});

string_enum!(FailureActionType {
    End => "end",
    Goto => "goto",
    Retry => "retry",
});

#[cfg(test)]
#[path = "enums_test.rs"]
mod tests;
