//! Native literal payloads
//!
//! Values of the specialized datatypes are stored in their native form. The
//! storage only hashes and compares them; lexical parsing and XSD value
//! semantics belong to the caller.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};
use num_bigint::BigInt;

use super::identifier::LiteralType;

// ═══════════════════════════════════════════════════════════════════════════
// Payload types
// ═══════════════════════════════════════════════════════════════════════════

/// `f64` with bitwise identity. All NaNs collapse to one payload.
#[derive(Debug, Clone, Copy)]
pub struct Double(pub f64);

impl Double {
    fn bits(self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Double {}

impl Hash for Double {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl PartialOrd for Double {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        // -0.0 and 0.0 differ under eq
        match self.0.partial_cmp(&other.0)? {
            Ordering::Equal => Some(self.0.total_cmp(&other.0)),
            ordering => Some(ordering),
        }
    }
}

fn offset_key(offset: &Option<FixedOffset>) -> Option<i32> {
    offset.map(|o| o.local_minus_utc())
}

/// `xsd:date`: calendar date with optional timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateValue {
    pub date: NaiveDate,
    pub offset: Option<FixedOffset>,
}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some((self.date, offset_key(&self.offset)).cmp(&(other.date, offset_key(&other.offset))))
    }
}

/// `xsd:dateTime`: local date-time with optional timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    pub datetime: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl PartialOrd for DateTimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            (self.datetime, offset_key(&self.offset))
                .cmp(&(other.datetime, offset_key(&other.offset))),
        )
    }
}

/// `xsd:gYearMonth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8,
    pub offset: Option<FixedOffset>,
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            (self.year, self.month, offset_key(&self.offset))
                .cmp(&(other.year, other.month, offset_key(&other.offset))),
        )
    }
}

/// `xsd:duration`: month component plus exact time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration {
    pub months: i64,
    pub time: TimeDelta,
}

// ═══════════════════════════════════════════════════════════════════════════
// LiteralValue
// ═══════════════════════════════════════════════════════════════════════════

/// Payload of a literal whose datatype has a native representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Integer(BigInt),
    NonNegativeInteger(BigInt),
    PositiveInteger(BigInt),
    NonPositiveInteger(BigInt),
    NegativeInteger(BigInt),
    Long(i64),
    UnsignedLong(u64),
    Decimal(BigDecimal),
    Double(Double),
    Base64Binary(Vec<u8>),
    HexBinary(Vec<u8>),
    Date(DateValue),
    DateTime(DateTimeValue),
    DateTimeStamp(DateTime<FixedOffset>),
    GYearMonth(YearMonth),
    Duration(Duration),
    DayTimeDuration(TimeDelta),
    YearMonthDuration(i64),
}

impl LiteralValue {
    pub fn datatype(&self) -> LiteralType {
        match self {
            LiteralValue::Integer(_) => LiteralType::INTEGER,
            LiteralValue::NonNegativeInteger(_) => LiteralType::NON_NEGATIVE_INTEGER,
            LiteralValue::PositiveInteger(_) => LiteralType::POSITIVE_INTEGER,
            LiteralValue::NonPositiveInteger(_) => LiteralType::NON_POSITIVE_INTEGER,
            LiteralValue::NegativeInteger(_) => LiteralType::NEGATIVE_INTEGER,
            LiteralValue::Long(_) => LiteralType::LONG,
            LiteralValue::UnsignedLong(_) => LiteralType::UNSIGNED_LONG,
            LiteralValue::Decimal(_) => LiteralType::DECIMAL,
            LiteralValue::Double(_) => LiteralType::DOUBLE,
            LiteralValue::Base64Binary(_) => LiteralType::BASE64_BINARY,
            LiteralValue::HexBinary(_) => LiteralType::HEX_BINARY,
            LiteralValue::Date(_) => LiteralType::DATE,
            LiteralValue::DateTime(_) => LiteralType::DATE_TIME,
            LiteralValue::DateTimeStamp(_) => LiteralType::DATE_TIME_STAMP,
            LiteralValue::GYearMonth(_) => LiteralType::G_YEAR_MONTH,
            LiteralValue::Duration(_) => LiteralType::DURATION,
            LiteralValue::DayTimeDuration(_) => LiteralType::DAY_TIME_DURATION,
            LiteralValue::YearMonthDuration(_) => LiteralType::YEAR_MONTH_DURATION,
        }
    }

    pub fn datatype_iri(&self) -> &'static str {
        // every variant maps to a reserved tag
        self.datatype().reserved_iri().unwrap_or_default()
    }
}

impl PartialOrd for LiteralValue {
    /// Values of different datatypes are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use LiteralValue as V;
        match (self, other) {
            (V::Integer(a), V::Integer(b))
            | (V::NonNegativeInteger(a), V::NonNegativeInteger(b))
            | (V::PositiveInteger(a), V::PositiveInteger(b))
            | (V::NonPositiveInteger(a), V::NonPositiveInteger(b))
            | (V::NegativeInteger(a), V::NegativeInteger(b)) => Some(a.cmp(b)),
            (V::Long(a), V::Long(b)) => Some(a.cmp(b)),
            (V::UnsignedLong(a), V::UnsignedLong(b)) => Some(a.cmp(b)),
            (V::Decimal(a), V::Decimal(b)) => Some(a.cmp(b)),
            (V::Double(a), V::Double(b)) => a.partial_cmp(b),
            (V::Base64Binary(a), V::Base64Binary(b)) | (V::HexBinary(a), V::HexBinary(b)) => {
                Some(a.cmp(b))
            }
            (V::Date(a), V::Date(b)) => a.partial_cmp(b),
            (V::DateTime(a), V::DateTime(b)) => a.partial_cmp(b),
            (V::DateTimeStamp(a), V::DateTimeStamp(b)) => Some(a.cmp(b)),
            (V::GYearMonth(a), V::GYearMonth(b)) => a.partial_cmp(b),
            (V::Duration(a), V::Duration(b)) => Some(a.cmp(b)),
            (V::DayTimeDuration(a), V::DayTimeDuration(b)) => Some(a.cmp(b)),
            (V::YearMonthDuration(a), V::YearMonthDuration(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════

fn write_offset(f: &mut fmt::Formatter<'_>, offset: &Option<FixedOffset>) -> fmt::Result {
    match offset {
        Some(o) if o.local_minus_utc() == 0 => f.write_str("Z"),
        Some(o) => write!(f, "{}", o),
        None => Ok(()),
    }
}

fn write_duration(f: &mut fmt::Formatter<'_>, months: i64, time: TimeDelta) -> fmt::Result {
    let negative = months < 0 || time < TimeDelta::zero();
    let months = months.unsigned_abs();
    let time = if time < TimeDelta::zero() { -time } else { time };

    if negative {
        f.write_str("-")?;
    }
    f.write_str("P")?;

    let (years, months) = (months / 12, months % 12);
    if years > 0 {
        write!(f, "{}Y", years)?;
    }
    if months > 0 {
        write!(f, "{}M", months)?;
    }

    let days = time.num_days();
    if days > 0 {
        write!(f, "{}D", days)?;
    }

    let seconds = time.num_seconds() - days * 86_400;
    let nanos = time.subsec_nanos();
    let (hours, minutes, seconds) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    let date_part_empty = years == 0 && months == 0 && days == 0;
    if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 && !date_part_empty {
        return Ok(());
    }

    f.write_str("T")?;
    if hours > 0 {
        write!(f, "{}H", hours)?;
    }
    if minutes > 0 {
        write!(f, "{}M", minutes)?;
    }
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        write!(f, "{}.{}S", seconds, fraction.trim_end_matches('0'))
    } else if seconds > 0 || (hours == 0 && minutes == 0) {
        write!(f, "{}S", seconds)
    } else {
        Ok(())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Integer(v)
            | LiteralValue::NonNegativeInteger(v)
            | LiteralValue::PositiveInteger(v)
            | LiteralValue::NonPositiveInteger(v)
            | LiteralValue::NegativeInteger(v) => write!(f, "{}", v),
            LiteralValue::Long(v) => write!(f, "{}", v),
            LiteralValue::UnsignedLong(v) => write!(f, "{}", v),
            LiteralValue::Decimal(v) => write!(f, "{}", v),
            LiteralValue::Double(Double(v)) => {
                if v.is_nan() {
                    f.write_str("NaN")
                } else if v.is_infinite() {
                    f.write_str(if *v > 0.0 { "INF" } else { "-INF" })
                } else {
                    write!(f, "{:E}", v)
                }
            }
            LiteralValue::Base64Binary(bytes) => f.write_str(&STANDARD.encode(bytes)),
            LiteralValue::HexBinary(bytes) => {
                for byte in bytes {
                    write!(f, "{:02X}", byte)?;
                }
                Ok(())
            }
            LiteralValue::Date(v) => {
                write!(f, "{}", v.date.format("%Y-%m-%d"))?;
                write_offset(f, &v.offset)
            }
            LiteralValue::DateTime(v) => {
                write!(f, "{}", v.datetime.format("%Y-%m-%dT%H:%M:%S%.f"))?;
                write_offset(f, &v.offset)
            }
            LiteralValue::DateTimeStamp(v) => {
                write!(f, "{}", v.naive_local().format("%Y-%m-%dT%H:%M:%S%.f"))?;
                write_offset(f, &Some(*v.offset()))
            }
            LiteralValue::GYearMonth(v) => {
                write!(f, "{:04}-{:02}", v.year, v.month)?;
                write_offset(f, &v.offset)
            }
            LiteralValue::Duration(v) => write_duration(f, v.months, v.time),
            LiteralValue::DayTimeDuration(v) => write_duration(f, 0, *v),
            LiteralValue::YearMonthDuration(months) => write_duration(f, *months, TimeDelta::zero()),
        }
    }
}
