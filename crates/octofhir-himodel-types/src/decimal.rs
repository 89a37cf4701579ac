//! Fixed-point decimal values

use crate::data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, RoundingMode};
use octofhir_himodel_diagnostics::{HIM0004, HIM0200, ModelError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("valid decimal pattern")
});

/// An arbitrary-precision decimal that keeps the scale it was written with.
///
/// `47.10` and `47.1` are equivalent but not equal: strict equality also
/// compares the number of fractional digits. The stored scale is never
/// negative, so `1e3` is held as `1000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FhirDecimal {
    value: BigDecimal,
    absent: bool,
}

impl FhirDecimal {
    pub const GRAMMAR: &'static str = "decimal";

    pub fn new(value: BigDecimal) -> Self {
        let value = if value.as_bigint_and_exponent().1 < 0 {
            value.with_scale(0)
        } else {
            value
        };
        Self {
            value,
            absent: false,
        }
    }

    pub fn nil() -> Self {
        Self {
            value: BigDecimal::from(0i64),
            absent: true,
        }
    }

    /// Parse a decimal literal. Exponent notation is accepted on input.
    pub fn parse(literal: &str) -> Result<Self> {
        let parsed = if DECIMAL_PATTERN.is_match(literal) {
            BigDecimal::from_str(literal).ok()
        } else {
            None
        };
        match parsed {
            Some(value) => Ok(Self::new(value)),
            None => {
                log::debug!("rejected {} literal '{}'", Self::GRAMMAR, literal);
                Err(ModelError::parse(HIM0004, Self::GRAMMAR, literal))
            }
        }
    }

    /// Build from a literal that is already known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the literal is not a decimal.
    pub fn from_trusted(literal: &str) -> Self {
        match Self::parse(literal) {
            Ok(decimal) => decimal,
            Err(err) => panic!("{}", err),
        }
    }

    /// The backing decimal; zero when absent
    pub fn decimal(&self) -> &BigDecimal {
        &self.value
    }

    /// Number of fractional digits
    pub fn scale(&self) -> i64 {
        self.value.as_bigint_and_exponent().1
    }

    /// Round half away from zero to `scale` fractional digits
    pub fn round_to(&self, scale: i64) -> BigDecimal {
        self.value.with_scale_round(scale, RoundingMode::HalfUp)
    }

    /// Convert to a 96-bit fixed-point decimal. Fails when digits would be lost.
    pub fn to_decimal(&self) -> Result<Decimal> {
        if self.absent {
            return Err(ModelError::construction(
                HIM0200,
                "an absent decimal has no value",
            ));
        }
        let plain = self.to_string();
        Decimal::from_str_exact(&plain).map_err(|_| {
            ModelError::construction(
                HIM0200,
                format!("{} does not fit a 96-bit decimal", plain),
            )
        })
    }

    pub(crate) fn equivalent_decimal(&self, other: &FhirDecimal) -> bool {
        match (self.absent, other.absent) {
            (true, true) => true,
            // Rounding to the finer of the two scales loses no digit of either
            // operand, which leaves numeric equality with trailing zeros dropped.
            (false, false) => self.value.normalized() == other.value.normalized(),
            _ => false,
        }
    }

    pub(crate) fn equal_decimal(&self, other: &FhirDecimal) -> bool {
        self.absent == other.absent
            && (self.absent || (self.scale() == other.scale() && self.value == other.value))
    }
}

/// Digits with the decimal point placed `scale` positions from the right
fn render_plain(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let scale = usize::try_from(scale).unwrap_or(0);
    let mut rendered = digits.magnitude().to_string();
    if scale > 0 {
        if rendered.len() <= scale {
            rendered.insert_str(0, &"0".repeat(scale + 1 - rendered.len()));
        }
        rendered.insert(rendered.len() - scale, '.');
    }
    if digits.sign() == Sign::Minus {
        rendered.insert(0, '-');
    }
    rendered
}

impl From<BigDecimal> for FhirDecimal {
    fn from(value: BigDecimal) -> Self {
        Self::new(value)
    }
}

impl From<Decimal> for FhirDecimal {
    fn from(value: Decimal) -> Self {
        Self::new(BigDecimal::new(
            BigInt::from(value.mantissa()),
            i64::from(value.scale()),
        ))
    }
}

impl From<i32> for FhirDecimal {
    fn from(value: i32) -> Self {
        Self::new(BigDecimal::from(value))
    }
}

impl From<i64> for FhirDecimal {
    fn from(value: i64) -> Self {
        Self::new(BigDecimal::from(value))
    }
}

impl TryFrom<f64> for FhirDecimal {
    type Error = ModelError;

    /// Uses the shortest representation that round-trips the float, so
    /// `0.1` becomes `0.1` and not its binary expansion.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(ModelError::construction(
                HIM0200,
                format!("{} has no decimal representation", value),
            ));
        }
        let shortest = value.to_string();
        BigDecimal::from_str(&shortest).map(Self::new).map_err(|_| {
            ModelError::construction(
                HIM0200,
                format!("{} has no decimal representation", shortest),
            )
        })
    }
}

impl FromStr for FhirDecimal {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Accessor for FhirDecimal {
    fn data_type(&self) -> DataType {
        DataType::Decimal
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::DECIMAL
    }

    fn is_empty(&self) -> bool {
        self.absent
    }
}

impl PrimitiveAccessor for FhirDecimal {
    fn is_nil(&self) -> bool {
        self.absent
    }
}

impl ValueComparison for FhirDecimal {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Decimal(other) => self.equal_decimal(other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Decimal(other) => self.equivalent_decimal(other),
            _ => false,
        }
    }
}

/// Fixed-point rendering; never uses exponent notation
impl fmt::Display for FhirDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absent {
            return Ok(());
        }
        f.write_str(&render_plain(&self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(literal: &str) -> FhirDecimal {
        FhirDecimal::parse(literal).unwrap()
    }

    #[rstest]
    #[case("0", "0")]
    #[case("-12.50", "-12.50")]
    #[case("+3.0", "3.0")]
    #[case("1.5e3", "1500")]
    #[case("1.5e-3", "0.0015")]
    #[case("47.100", "47.100")]
    #[case("1.5E+2", "150")]
    #[case("-0.0", "0.0")]
    fn test_parse_and_render(#[case] literal: &str, #[case] rendered: &str) {
        assert_eq!(dec(literal).to_string(), rendered);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.2.3")]
    #[case("1e")]
    #[case("1_000")]
    #[case(" 1")]
    #[case("0x10")]
    fn test_parse_invalid(#[case] literal: &str) {
        assert_eq!(FhirDecimal::parse(literal).unwrap_err().code(), HIM0004);
    }

    #[test]
    fn test_equivalent_least_precision() {
        assert!(dec("47.10").equivalent_decimal(&dec("47.1")));
        assert!(!dec("47.12").equivalent_decimal(&dec("47.1")));
        assert!(dec("1.0").equivalent_decimal(&dec("1")));
    }

    #[test]
    fn test_equal_requires_same_scale() {
        assert!(dec("47.10").equal_decimal(&dec("47.10")));
        assert!(!dec("47.10").equal_decimal(&dec("47.1")));
        assert!(FhirDecimal::nil().equal_decimal(&FhirDecimal::nil()));
        assert!(!FhirDecimal::nil().equal_decimal(&dec("0")));
    }

    #[test]
    fn test_round_to_half_away_from_zero() {
        assert_eq!(dec("2.25").round_to(1), BigDecimal::from_str("2.3").unwrap());
        assert_eq!(dec("-2.25").round_to(1), BigDecimal::from_str("-2.3").unwrap());
    }

    #[rstest]
    #[case("0.12345678901234567890123456789012")]
    #[case("79228162514264337593543950336")]
    #[case("-79228162514264337593543950336.000000000000000000000000000001")]
    fn test_wide_literals_keep_every_digit(#[case] literal: &str) {
        assert_eq!(dec(literal).to_string(), literal);
    }

    #[test]
    fn test_large_exponents() {
        assert_eq!(dec("1e30").to_string(), format!("1{}", "0".repeat(30)));
        assert_eq!(dec("1e30").scale(), 0);
        assert_eq!(dec("1e-30").to_string(), format!("0.{}1", "0".repeat(29)));
        assert_eq!(dec("1e-30").scale(), 30);
        assert!(dec("1e-30").equivalent_decimal(&dec(&format!("0.{}100", "0".repeat(29)))));
        assert!(!dec("1e-30").equivalent_decimal(&dec("0")));
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(dec("12.50").to_decimal().unwrap(), Decimal::from_str("12.50").unwrap());
        assert_eq!(dec("12.50").to_decimal().unwrap().scale(), 2);
        assert_eq!(
            dec("0.12345678901234567890123456789012").to_decimal().unwrap_err().code(),
            HIM0200
        );
        assert_eq!(dec("1e30").to_decimal().unwrap_err().code(), HIM0200);
        assert!(FhirDecimal::nil().to_decimal().is_err());
    }

    #[test]
    fn test_from_rust_decimal() {
        let value = FhirDecimal::from(Decimal::from_str("-47.100").unwrap());
        assert_eq!(value.to_string(), "-47.100");
        assert!(value.equal_decimal(&dec("-47.100")));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(FhirDecimal::try_from(0.1).unwrap().to_string(), "0.1");
        assert_eq!(FhirDecimal::try_from(-2.5).unwrap().to_string(), "-2.5");
        assert!(FhirDecimal::try_from(f64::NAN).is_err());
        assert_eq!(FhirDecimal::try_from(f64::INFINITY).unwrap_err().code(), HIM0200);
        let large = FhirDecimal::try_from(1e300).unwrap().to_string();
        assert_eq!(large.len(), 301);
        assert!(large.starts_with('1'));
    }

    #[test]
    fn test_from_integers() {
        assert_eq!(FhirDecimal::from(42).to_string(), "42");
        assert_eq!(FhirDecimal::from(-7i64).scale(), 0);
    }

    #[test]
    fn test_nil_renders_empty() {
        assert_eq!(FhirDecimal::nil().to_string(), "");
    }
}
