//! Packed node identifiers
//!
//! Every node is addressed by a 64-bit [`NodeBackendHandle`]:
//!
//! ```text
//!  63    61 60  59           50 49  48 47                               0
//! +--------+---+---------------+------+----------------------------------+
//! |  free  |inl|  storage id   | kind |             node id              |
//! +--------+---+---------------+------+----------------------------------+
//! ```
//!
//! For literals the 48-bit node id is itself split:
//!
//! ```text
//!  47        42 41                                  0
//! +------------+-------------------------------------+
//! | literal ty |             literal id              |
//! +------------+-------------------------------------+
//! ```
//!
//! All encodings are plain integer arithmetic over `u64`; nothing relies on
//! struct layout.

use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// NodeKind
// ═══════════════════════════════════════════════════════════════════════════

/// Kind of an RDF node. Discriminant order is the cross-kind sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeKind {
    Variable = 0,
    BlankNode = 1,
    Iri = 2,
    Literal = 3,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Variable,
        NodeKind::BlankNode,
        NodeKind::Iri,
        NodeKind::Literal,
    ];

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self as u64
    }

    /// Decodes the low two bits.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        match bits & 0b11 {
            0 => NodeKind::Variable,
            1 => NodeKind::BlankNode,
            2 => NodeKind::Iri,
            _ => NodeKind::Literal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Variable => "variable",
            NodeKind::BlankNode => "blank_node",
            NodeKind::Iri => "iri",
            NodeKind::Literal => "literal",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LiteralType
// ═══════════════════════════════════════════════════════════════════════════

/// 6-bit datatype tag carried inside literal ids.
///
/// `0` is "other": the datatype is a user IRI stored out of band. Bit 5 marks
/// the numeric datatypes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LiteralType(u8);

impl LiteralType {
    pub const BITS: u32 = 6;
    pub const NUMERIC_FLAG: u8 = 1 << 5;
    pub const OTHER: LiteralType = LiteralType(0);

    /// `(is_numeric << 5) | type_id`; `type_id` must fit in 5 bits.
    #[inline]
    pub const fn from_parts(is_numeric: bool, type_id: u8) -> Self {
        debug_assert!(type_id < Self::NUMERIC_FLAG);
        let flag = if is_numeric { Self::NUMERIC_FLAG } else { 0 };
        LiteralType(flag | (type_id & (Self::NUMERIC_FLAG - 1)))
    }

    #[inline]
    pub const fn from_underlying(value: u8) -> Option<Self> {
        if value < (1 << Self::BITS) {
            Some(LiteralType(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn to_underlying(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_fixed(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.0 & Self::NUMERIC_FLAG != 0
    }

    #[inline]
    pub const fn type_id(self) -> u8 {
        self.0 & (Self::NUMERIC_FLAG - 1)
    }

    /// Reserved datatype IRIs live at the id equal to their tag, so an IRI id
    /// below [`NodeId::MIN_IRI_ID`] converts directly.
    #[inline]
    pub const fn from_iri_node_id(id: NodeId) -> Self {
        if id.value() < NodeId::MIN_IRI_ID.value() {
            LiteralType(id.value() as u8)
        } else {
            LiteralType::OTHER
        }
    }

    /// IRI id of a fixed datatype. `OTHER` maps to the null id.
    #[inline]
    pub const fn to_iri_node_id(self) -> NodeId {
        NodeId::new(self.0 as u64)
    }
}

impl fmt::Debug for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiteralType({})", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LiteralId / NodeId
// ═══════════════════════════════════════════════════════════════════════════

/// 42-bit id handed out by a literal map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LiteralId(u64);

impl LiteralId {
    pub const BITS: u32 = 42;
    pub const MAX: u64 = (1 << Self::BITS) - 1;

    #[inline]
    pub const fn new(value: u64) -> Self {
        debug_assert!(value <= Self::MAX);
        LiteralId(value & Self::MAX)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// 48-bit per-kind node id; `0` is null.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(u64);

impl NodeId {
    pub const BITS: u32 = 48;
    pub const MAX: u64 = (1 << Self::BITS) - 1;

    pub const NULL: NodeId = NodeId(0);
    pub const MIN_BNODE_ID: NodeId = NodeId(1);
    pub const MIN_VARIABLE_ID: NodeId = NodeId(1);
    pub const MIN_LITERAL_ID: LiteralId = LiteralId(1);
    /// First IRI id that is not reserved for a fixed datatype.
    pub const MIN_IRI_ID: NodeId = NodeId(48);
    pub const DEFAULT_GRAPH_ID: NodeId = NodeId(1);

    #[inline]
    pub const fn new(value: u64) -> Self {
        debug_assert!(value <= Self::MAX);
        NodeId(value & Self::MAX)
    }

    #[inline]
    pub const fn from_literal(literal_id: LiteralId, literal_type: LiteralType) -> Self {
        NodeId(((literal_type.to_underlying() as u64) << LiteralId::BITS) | literal_id.value())
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Only meaningful for literal ids.
    #[inline]
    pub const fn literal_id(self) -> LiteralId {
        LiteralId(self.0 & LiteralId::MAX)
    }

    /// Only meaningful for literal ids.
    #[inline]
    pub const fn literal_type(self) -> LiteralType {
        LiteralType((self.0 >> LiteralId::BITS) as u8)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// NodeStorageId
// ═══════════════════════════════════════════════════════════════════════════

/// Index of a storage instance in the global registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeStorageId(u16);

impl NodeStorageId {
    pub const BITS: u32 = 10;
    pub const MAX_INSTANCES: usize = 1 << Self::BITS;

    pub const fn new(value: u16) -> Option<Self> {
        if (value as usize) < Self::MAX_INSTANCES {
            Some(NodeStorageId(value))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::MAX_INSTANCES);
        NodeStorageId(index as u16)
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeStorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// NodeBackendHandle
// ═══════════════════════════════════════════════════════════════════════════

/// 64-bit handle naming one node in one storage instance.
///
/// Handles compare by raw value, which is only meaningful between handles of
/// the same storage instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeBackendHandle(u64);

impl NodeBackendHandle {
    const KIND_SHIFT: u32 = NodeId::BITS;
    const STORAGE_SHIFT: u32 = Self::KIND_SHIFT + 2;
    const INLINED_SHIFT: u32 = Self::STORAGE_SHIFT + NodeStorageId::BITS;
    const FREE_SHIFT: u32 = Self::INLINED_SHIFT + 1;

    pub const FREE_BITS: u32 = 64 - Self::FREE_SHIFT;

    pub const fn new(id: NodeId, kind: NodeKind, storage: NodeStorageId) -> Self {
        NodeBackendHandle(
            id.value()
                | (kind.to_bits() << Self::KIND_SHIFT)
                | ((storage.value() as u64) << Self::STORAGE_SHIFT),
        )
    }

    pub const fn new_inlined(id: NodeId, kind: NodeKind, storage: NodeStorageId) -> Self {
        let handle = Self::new(id, kind, storage);
        NodeBackendHandle(handle.0 | (1 << Self::INLINED_SHIFT))
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        NodeBackendHandle(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn node_id(self) -> NodeId {
        NodeId(self.0 & NodeId::MAX)
    }

    #[inline]
    pub const fn kind(self) -> NodeKind {
        NodeKind::from_bits(self.0 >> Self::KIND_SHIFT)
    }

    #[inline]
    pub const fn storage_id(self) -> NodeStorageId {
        NodeStorageId(((self.0 >> Self::STORAGE_SHIFT) as u16) & ((1 << NodeStorageId::BITS) - 1))
    }

    #[inline]
    pub const fn is_inlined(self) -> bool {
        (self.0 >> Self::INLINED_SHIFT) & 1 == 1
    }

    #[inline]
    pub const fn free_tagging_bits(self) -> u8 {
        (self.0 >> Self::FREE_SHIFT) as u8
    }

    /// Bits above `FREE_BITS` are dropped.
    pub const fn with_free_tagging_bits(self, bits: u8) -> Self {
        let mask = (1u64 << Self::FREE_SHIFT) - 1;
        let bits = (bits as u64) & ((1 << Self::FREE_BITS) - 1);
        NodeBackendHandle((self.0 & mask) | (bits << Self::FREE_SHIFT))
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.node_id().is_null()
    }

    pub const fn is_iri(self) -> bool {
        matches!(self.kind(), NodeKind::Iri)
    }

    pub const fn is_blank_node(self) -> bool {
        matches!(self.kind(), NodeKind::BlankNode)
    }

    pub const fn is_literal(self) -> bool {
        matches!(self.kind(), NodeKind::Literal)
    }

    pub const fn is_variable(self) -> bool {
        matches!(self.kind(), NodeKind::Variable)
    }
}

impl fmt::Debug for NodeBackendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBackendHandle")
            .field("node_id", &self.node_id().value())
            .field("kind", &self.kind())
            .field("storage", &self.storage_id().value())
            .field("inlined", &self.is_inlined())
            .finish()
    }
}
