//! Per-datatype literal storage
//!
//! Each datatype with a native payload gets its own interning map. Literal
//! operations pick the map with a `match` on the datatype tag; literals of
//! every other datatype go to the lexical fallback map.

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, TimeDelta};
use num_bigint::BigInt;

use super::bidir_map::BiDirMap;
use super::node_type_storage::{self as protocol, NodeTypeStorage, StorageFamily};
use crate::domain::{
    DateTimeValue, DateValue, Double, Duration, InternedEntry, LiteralId, LiteralType,
    LiteralValue, NodeId, SpecializedEntry, YearMonth,
};

/// Fresh literal map: ids are 42-bit and start at `MIN_LITERAL_ID`.
pub(crate) fn literal_map<E: InternedEntry>() -> BiDirMap<E> {
    let mut mapping = BiDirMap::with_id_limit(LiteralId::MAX);
    mapping.reserve_until(NodeId::MIN_LITERAL_ID.value());
    mapping
}

macro_rules! specialized_literal_storage {
    ($($field:ident: $variant:ident($payload:ty) => $tag:ident),* $(,)?) => {
        /// Datatypes with specialized storage, in dispatch order.
        pub const SPECIALIZED_DATATYPES: &[LiteralType] = &[$(LiteralType::$tag),*];

        /// One interning map per specialized datatype.
        pub struct SpecializedLiteralStorage<F: StorageFamily> {
            $($field: F::Storage<SpecializedEntry<$payload>>,)*
        }

        impl<F: StorageFamily> SpecializedLiteralStorage<F> {
            pub fn new() -> Self {
                Self {
                    $($field: F::storage(literal_map()),)*
                }
            }

            /// Id of `value` in its datatype's map, interning it if needed.
            pub fn lookup_or_insert(&self, value: &LiteralValue) -> (LiteralId, bool) {
                let (id, inserted) = match value {
                    $(LiteralValue::$variant(payload) => protocol::lookup_or_insert(&self.$field, payload),)*
                };
                (LiteralId::new(id), inserted)
            }

            pub fn lookup(&self, value: &LiteralValue) -> LiteralId {
                let id = match value {
                    $(LiteralValue::$variant(payload) => protocol::lookup(&self.$field, payload),)*
                };
                LiteralId::new(id)
            }

            pub fn resolve(&self, datatype: LiteralType, id: LiteralId) -> Option<LiteralValue> {
                match datatype {
                    $(LiteralType::$tag => protocol::resolve(&self.$field, id.value())
                        .map(|entry| LiteralValue::$variant(entry.value().clone())),)*
                    _ => None,
                }
            }

            pub fn erase(&self, datatype: LiteralType, id: LiteralId) -> bool {
                match datatype {
                    $(LiteralType::$tag => protocol::erase(&self.$field, id.value()),)*
                    _ => false,
                }
            }

            /// Reserves room for `additional` literals of `datatype`; a no-op
            /// for datatypes without specialized storage.
            pub fn reserve(&self, datatype: LiteralType, additional: usize) {
                match datatype {
                    $(LiteralType::$tag => self.$field.with_exclusive(|mapping| mapping.reserve(additional)),)*
                    _ => {}
                }
            }

            pub fn len(&self) -> usize {
                0 $(+ protocol::len(&self.$field))*
            }

            pub fn shrink_to_fit(&self) {
                $(protocol::shrink_to_fit(&self.$field);)*
            }
        }
    };
}

specialized_literal_storage! {
    integer: Integer(BigInt) => INTEGER,
    non_negative_integer: NonNegativeInteger(BigInt) => NON_NEGATIVE_INTEGER,
    positive_integer: PositiveInteger(BigInt) => POSITIVE_INTEGER,
    non_positive_integer: NonPositiveInteger(BigInt) => NON_POSITIVE_INTEGER,
    negative_integer: NegativeInteger(BigInt) => NEGATIVE_INTEGER,
    long: Long(i64) => LONG,
    unsigned_long: UnsignedLong(u64) => UNSIGNED_LONG,
    decimal: Decimal(BigDecimal) => DECIMAL,
    double: Double(Double) => DOUBLE,
    base64_binary: Base64Binary(Vec<u8>) => BASE64_BINARY,
    hex_binary: HexBinary(Vec<u8>) => HEX_BINARY,
    date: Date(DateValue) => DATE,
    date_time: DateTime(DateTimeValue) => DATE_TIME,
    date_time_stamp: DateTimeStamp(DateTime<FixedOffset>) => DATE_TIME_STAMP,
    g_year_month: GYearMonth(YearMonth) => G_YEAR_MONTH,
    duration: Duration(Duration) => DURATION,
    day_time_duration: DayTimeDuration(TimeDelta) => DAY_TIME_DURATION,
    year_month_duration: YearMonthDuration(i64) => YEAR_MONTH_DURATION,
}

const fn build_specialization_lut() -> [bool; 64] {
    let mut lut = [false; 64];
    let mut i = 0;
    while i < SPECIALIZED_DATATYPES.len() {
        lut[SPECIALIZED_DATATYPES[i].to_underlying() as usize] = true;
        i += 1;
    }
    lut
}

static SPECIALIZATION_LUT: [bool; 64] = build_specialization_lut();

/// Whether literals of `datatype` live in a specialized map.
#[inline]
pub fn has_specialized_storage(datatype: LiteralType) -> bool {
    SPECIALIZATION_LUT[datatype.to_underlying() as usize]
}

impl<F: StorageFamily> Default for SpecializedLiteralStorage<F> {
    fn default() -> Self {
        Self::new()
    }
}
