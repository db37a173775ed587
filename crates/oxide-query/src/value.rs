//! Scalar values that can be bound into a rendered statement.
//!
//! [`SqlValue`] is the closed set of scalar shapes the tree accepts. Host
//! types enter through [`ToSqlValue`], so an unsupported type is rejected
//! at compile time rather than at render time.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike, Utc};
use serde::Serialize;

/// A scalar SQL value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    Uint(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Timestamp with its original offset.
    Time(DateTime<FixedOffset>),
}

impl SqlValue {
    /// Returns true for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Formats the value as inline SQL text.
    ///
    /// **Warning**: strings are quoted verbatim, without any escaping. The
    /// output is meant for debugging and logging, never for execution.
    #[must_use]
    pub fn to_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Uint(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => format!("'{s}'"),
            Self::Time(t) => format!("'{}'", format_utc(&t.with_timezone(&Utc))),
        }
    }
}

/// Formats a UTC timestamp as `YYYY-MM-DD HH:MM:SS[.ffffff]+00`.
///
/// The fractional part is only present when the timestamp has sub-second
/// precision; trailing zeros are trimmed and precision stops at microseconds.
fn format_utc(t: &DateTime<Utc>) -> String {
    let mut out = t.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = t.nanosecond() % 1_000_000_000 / 1_000;
    if micros != 0 {
        let fraction = format!("{micros:06}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push_str("+00");
    out
}

/// Trait for host types that convert into SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(impl ToSqlValue for $t {
            fn to_sql_value(self) -> SqlValue {
                SqlValue::Int(i64::from(self))
            }
        })*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(impl ToSqlValue for $t {
            fn to_sql_value(self) -> SqlValue {
                SqlValue::Uint(u64::from(self))
            }
        })*
    };
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for DateTime<FixedOffset> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Time(self)
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Time(self.fixed_offset())
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Time(self.and_utc().fixed_offset())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> SqlValue {
        SqlValue::Time(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[test]
    fn test_inline_text() {
        assert_eq!("a".to_sql_value().to_inline(), "'a'");
        // Debug formatting does not escape quotes.
        assert_eq!("it's".to_sql_value().to_inline(), "'it's'");
    }

    #[test]
    fn test_inline_numbers() {
        assert_eq!(42_i32.to_sql_value().to_inline(), "42");
        assert_eq!((-100_i64).to_sql_value().to_inline(), "-100");
        assert_eq!(u64::MAX.to_sql_value().to_inline(), "18446744073709551615");
        assert_eq!(2.5_f64.to_sql_value().to_inline(), "2.5");
        assert_eq!(0.1_f64.to_sql_value().to_inline(), "0.1");
        assert_eq!(3.0_f64.to_sql_value().to_inline(), "3");
    }

    #[test]
    fn test_inline_bool_and_null() {
        assert_eq!(true.to_sql_value().to_inline(), "true");
        assert_eq!(false.to_sql_value().to_inline(), "false");
        assert_eq!(None::<i32>.to_sql_value().to_inline(), "NULL");
    }

    #[test]
    fn test_inline_time_converted_to_utc() {
        assert_eq!(
            time("2017-11-23T17:47:27+01:00").to_inline(),
            "'2017-11-23 16:47:27+00'"
        );
    }

    #[test]
    fn test_inline_time_fraction() {
        assert_eq!(
            time("2017-11-23T16:47:27.123456789Z").to_inline(),
            "'2017-11-23 16:47:27.123456+00'"
        );
        assert_eq!(
            time("2017-11-23T16:47:27.5Z").to_inline(),
            "'2017-11-23 16:47:27.5+00'"
        );
        // Sub-microsecond precision is dropped entirely.
        assert_eq!(
            time("2017-11-23T16:47:27.000000400Z").to_inline(),
            "'2017-11-23 16:47:27+00'"
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(7_u8.to_sql_value(), SqlValue::Uint(7));
        assert_eq!(7_i8.to_sql_value(), SqlValue::Int(7));
        assert_eq!(Some("x").to_sql_value(), SqlValue::Text(String::from("x")));
        assert!(None::<String>.to_sql_value().is_null());
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            SqlValue::Int(1),
            SqlValue::Text(String::from("a")),
            SqlValue::Null,
        ])
        .unwrap();
        assert_eq!(json, r#"[1,"a",null]"#);
    }
}
