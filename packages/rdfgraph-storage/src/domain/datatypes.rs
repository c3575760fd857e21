//! Reserved datatype IRIs
//!
//! Ids `1..48` of every IRI map are reserved. Each reserved IRI is seeded at
//! the id equal to its [`LiteralType`] tag, so a literal's datatype can be
//! recovered from its id without touching the IRI map.

use super::identifier::{LiteralType, NodeId};

pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

impl LiteralType {
    pub const DEFAULT_GRAPH: LiteralType = LiteralType::from_parts(false, 1);
    pub const STRING: LiteralType = LiteralType::from_parts(false, 2);
    pub const LANG_STRING: LiteralType = LiteralType::from_parts(false, 3);
    pub const BOOLEAN: LiteralType = LiteralType::from_parts(false, 4);
    pub const BASE64_BINARY: LiteralType = LiteralType::from_parts(false, 5);
    pub const HEX_BINARY: LiteralType = LiteralType::from_parts(false, 6);
    pub const DATE: LiteralType = LiteralType::from_parts(false, 7);
    pub const TIME: LiteralType = LiteralType::from_parts(false, 8);
    pub const DATE_TIME: LiteralType = LiteralType::from_parts(false, 9);
    pub const DATE_TIME_STAMP: LiteralType = LiteralType::from_parts(false, 10);
    pub const G_YEAR: LiteralType = LiteralType::from_parts(false, 11);
    pub const G_MONTH: LiteralType = LiteralType::from_parts(false, 12);
    pub const G_DAY: LiteralType = LiteralType::from_parts(false, 13);
    pub const G_YEAR_MONTH: LiteralType = LiteralType::from_parts(false, 14);
    pub const G_MONTH_DAY: LiteralType = LiteralType::from_parts(false, 15);
    pub const DURATION: LiteralType = LiteralType::from_parts(false, 16);
    pub const DAY_TIME_DURATION: LiteralType = LiteralType::from_parts(false, 17);
    pub const YEAR_MONTH_DURATION: LiteralType = LiteralType::from_parts(false, 18);
    pub const RDF_TYPE: LiteralType = LiteralType::from_parts(false, 19);

    pub const FLOAT: LiteralType = LiteralType::from_parts(true, 0);
    pub const DOUBLE: LiteralType = LiteralType::from_parts(true, 1);
    pub const DECIMAL: LiteralType = LiteralType::from_parts(true, 2);
    pub const INTEGER: LiteralType = LiteralType::from_parts(true, 3);
    pub const NON_POSITIVE_INTEGER: LiteralType = LiteralType::from_parts(true, 4);
    pub const LONG: LiteralType = LiteralType::from_parts(true, 5);
    pub const NON_NEGATIVE_INTEGER: LiteralType = LiteralType::from_parts(true, 6);
    pub const NEGATIVE_INTEGER: LiteralType = LiteralType::from_parts(true, 7);
    pub const INT: LiteralType = LiteralType::from_parts(true, 8);
    pub const UNSIGNED_LONG: LiteralType = LiteralType::from_parts(true, 9);
    pub const POSITIVE_INTEGER: LiteralType = LiteralType::from_parts(true, 10);
    pub const SHORT: LiteralType = LiteralType::from_parts(true, 11);
    pub const UNSIGNED_INT: LiteralType = LiteralType::from_parts(true, 12);
    pub const BYTE: LiteralType = LiteralType::from_parts(true, 13);
    pub const UNSIGNED_SHORT: LiteralType = LiteralType::from_parts(true, 14);
    pub const UNSIGNED_BYTE: LiteralType = LiteralType::from_parts(true, 15);

    /// Reserved IRI of a fixed type, `None` for `OTHER` and unassigned tags.
    pub fn reserved_iri(self) -> Option<&'static str> {
        RESERVED_DATATYPES
            .iter()
            .find(|entry| entry.literal_type == self)
            .map(|entry| entry.iri)
    }
}

/// One reserved IRI and the tag it is seeded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedDatatype {
    pub iri: &'static str,
    pub literal_type: LiteralType,
}

impl ReservedDatatype {
    pub const fn iri_id(&self) -> NodeId {
        self.literal_type.to_iri_node_id()
    }
}

macro_rules! reserved {
    ($($iri:expr => $ty:ident),* $(,)?) => {
        pub const RESERVED_DATATYPES: &[ReservedDatatype] = &[
            $(ReservedDatatype { iri: $iri, literal_type: LiteralType::$ty }),*
        ];
    };
}

reserved! {
    "" => DEFAULT_GRAPH,
    "http://www.w3.org/2001/XMLSchema#string" => STRING,
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString" => LANG_STRING,
    "http://www.w3.org/2001/XMLSchema#boolean" => BOOLEAN,
    "http://www.w3.org/2001/XMLSchema#base64Binary" => BASE64_BINARY,
    "http://www.w3.org/2001/XMLSchema#hexBinary" => HEX_BINARY,
    "http://www.w3.org/2001/XMLSchema#date" => DATE,
    "http://www.w3.org/2001/XMLSchema#time" => TIME,
    "http://www.w3.org/2001/XMLSchema#dateTime" => DATE_TIME,
    "http://www.w3.org/2001/XMLSchema#dateTimeStamp" => DATE_TIME_STAMP,
    "http://www.w3.org/2001/XMLSchema#gYear" => G_YEAR,
    "http://www.w3.org/2001/XMLSchema#gMonth" => G_MONTH,
    "http://www.w3.org/2001/XMLSchema#gDay" => G_DAY,
    "http://www.w3.org/2001/XMLSchema#gYearMonth" => G_YEAR_MONTH,
    "http://www.w3.org/2001/XMLSchema#gMonthDay" => G_MONTH_DAY,
    "http://www.w3.org/2001/XMLSchema#duration" => DURATION,
    "http://www.w3.org/2001/XMLSchema#dayTimeDuration" => DAY_TIME_DURATION,
    "http://www.w3.org/2001/XMLSchema#yearMonthDuration" => YEAR_MONTH_DURATION,
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" => RDF_TYPE,
    "http://www.w3.org/2001/XMLSchema#float" => FLOAT,
    "http://www.w3.org/2001/XMLSchema#double" => DOUBLE,
    "http://www.w3.org/2001/XMLSchema#decimal" => DECIMAL,
    "http://www.w3.org/2001/XMLSchema#integer" => INTEGER,
    "http://www.w3.org/2001/XMLSchema#nonPositiveInteger" => NON_POSITIVE_INTEGER,
    "http://www.w3.org/2001/XMLSchema#long" => LONG,
    "http://www.w3.org/2001/XMLSchema#nonNegativeInteger" => NON_NEGATIVE_INTEGER,
    "http://www.w3.org/2001/XMLSchema#negativeInteger" => NEGATIVE_INTEGER,
    "http://www.w3.org/2001/XMLSchema#int" => INT,
    "http://www.w3.org/2001/XMLSchema#unsignedLong" => UNSIGNED_LONG,
    "http://www.w3.org/2001/XMLSchema#positiveInteger" => POSITIVE_INTEGER,
    "http://www.w3.org/2001/XMLSchema#short" => SHORT,
    "http://www.w3.org/2001/XMLSchema#unsignedInt" => UNSIGNED_INT,
    "http://www.w3.org/2001/XMLSchema#byte" => BYTE,
    "http://www.w3.org/2001/XMLSchema#unsignedShort" => UNSIGNED_SHORT,
    "http://www.w3.org/2001/XMLSchema#unsignedByte" => UNSIGNED_BYTE,
}

/// Tag of a reserved IRI.
pub fn reserved_id_of(iri: &str) -> Option<LiteralType> {
    RESERVED_DATATYPES
        .iter()
        .find(|entry| entry.iri == iri)
        .map(|entry| entry.literal_type)
}
