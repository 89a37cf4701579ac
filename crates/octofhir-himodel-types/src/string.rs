//! String-like primitives: string, code, id and markdown
//!
//! All four kinds share one representation and compare with each other as
//! plain strings. Each kind validates literals against its own grammar.

use crate::data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use octofhir_himodel_diagnostics::{ErrorCode, HIM0005, HIM0006, HIM0007, HIM0008, ModelError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static STRING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\r\n\t\x{0020}-\x{FFFF}]*$").expect("valid string pattern"));

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s]+(\s[^\s]+)*$").expect("valid code pattern"));

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("valid id pattern"));

/// Which string-like primitive a [`FhirString`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    String,
    Code,
    Id,
    Markdown,
}

impl StringKind {
    pub const ALL: [StringKind; 4] = [Self::String, Self::Code, Self::Id, Self::Markdown];

    pub const fn data_type(self) -> DataType {
        match self {
            Self::String => DataType::String,
            Self::Code => DataType::Code,
            Self::Id => DataType::Id,
            Self::Markdown => DataType::Markdown,
        }
    }

    pub const fn type_spec(self) -> TypeSpecId {
        match self {
            Self::String => TypeSpecId::STRING,
            Self::Code => TypeSpecId::CODE,
            Self::Id => TypeSpecId::ID,
            Self::Markdown => TypeSpecId::MARKDOWN,
        }
    }

    pub const fn name(self) -> &'static str {
        self.data_type().name()
    }

    const fn error_code(self) -> ErrorCode {
        match self {
            Self::String => HIM0005,
            Self::Code => HIM0006,
            Self::Id => HIM0007,
            Self::Markdown => HIM0008,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::String | Self::Markdown => &STRING_PATTERN,
            Self::Code => &CODE_PATTERN,
            Self::Id => &ID_PATTERN,
        }
    }

    /// Whether `value` is acceptable for this kind
    pub fn is_valid(self, value: &str) -> bool {
        self.pattern().is_match(value)
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string-like primitive value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FhirString {
    kind: StringKind,
    value: String,
    absent: bool,
}

impl FhirString {
    /// Validate `value` against the grammar of `kind`
    pub fn parse(kind: StringKind, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !kind.is_valid(&value) {
            log::debug!("rejected {} literal '{}'", kind, value);
            return Err(ModelError::parse(kind.error_code(), kind.name(), value));
        }
        Ok(Self::new_unchecked(kind, value))
    }

    /// # Panics
    ///
    /// Panics if `value` does not match the grammar of `kind`.
    pub fn new(kind: StringKind, value: impl Into<String>) -> Self {
        match Self::parse(kind, value) {
            Ok(string) => string,
            Err(err) => panic!("{}", err),
        }
    }

    /// Skip grammar validation
    pub fn new_unchecked(kind: StringKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            absent: false,
        }
    }

    pub fn nil(kind: StringKind) -> Self {
        Self {
            kind,
            value: String::new(),
            absent: true,
        }
    }

    pub fn string(value: impl Into<String>) -> Result<Self> {
        Self::parse(StringKind::String, value)
    }

    pub fn code(value: impl Into<String>) -> Result<Self> {
        Self::parse(StringKind::Code, value)
    }

    pub fn id(value: impl Into<String>) -> Result<Self> {
        Self::parse(StringKind::Id, value)
    }

    pub fn markdown(value: impl Into<String>) -> Result<Self> {
        Self::parse(StringKind::Markdown, value)
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }

    /// The raw text; empty when nil
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub(crate) fn equal_string(&self, other: &FhirString) -> bool {
        self.absent == other.absent && self.value == other.value
    }

    pub(crate) fn equivalent_string(&self, other: &FhirString) -> bool {
        self.absent == other.absent
            && normalize_whitespace(&self.value) == normalize_whitespace(&other.value)
    }
}

/// Trim and collapse every run of whitespace to a single space
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Accessor for FhirString {
    fn data_type(&self) -> DataType {
        self.kind.data_type()
    }

    fn type_spec(&self) -> TypeSpecId {
        self.kind.type_spec()
    }

    fn is_empty(&self) -> bool {
        self.absent
    }
}

impl PrimitiveAccessor for FhirString {
    fn is_nil(&self) -> bool {
        self.absent
    }
}

impl ValueComparison for FhirString {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::String(other) => self.equal_string(other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::String(other) => self.equivalent_string(other),
            _ => false,
        }
    }
}

impl fmt::Display for FhirString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
