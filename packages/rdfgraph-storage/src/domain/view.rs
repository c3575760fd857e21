//! Views and interned entries
//!
//! A *view* borrows the data identifying a node and is what callers hand to
//! `find_or_make_*_id`. An *entry* owns the same data inside an interning
//! map. Every entry type converts to and from its view, and two entries are
//! the same node exactly when their views are equal.

use std::hash::Hash;
use std::sync::Arc;

use super::identifier::{LiteralType, NodeId};
use super::value::LiteralValue;

/// Owned value stored by an interning map.
pub trait InternedEntry: Send + Sync + 'static {
    type View<'a>: Copy + Eq + Hash
    where
        Self: 'a;

    fn view(&self) -> Self::View<'_>;

    /// `self.view() == view`, spelled per type so the two lifetimes unify.
    fn matches(&self, view: Self::View<'_>) -> bool;

    fn from_view(view: Self::View<'_>) -> Self;
}

// ═══════════════════════════════════════════════════════════════════════════
// IRI / blank node / variable
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IriView<'a> {
    pub identifier: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IriEntry {
    identifier: Box<str>,
}

impl IriEntry {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl InternedEntry for IriEntry {
    type View<'a> = IriView<'a>;

    fn view(&self) -> IriView<'_> {
        IriView {
            identifier: &self.identifier,
        }
    }

    fn matches(&self, view: IriView<'_>) -> bool {
        self.view() == view
    }

    fn from_view(view: IriView<'_>) -> Self {
        IriEntry {
            identifier: view.identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNodeView<'a> {
    pub identifier: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankNodeEntry {
    identifier: Box<str>,
}

impl BlankNodeEntry {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl InternedEntry for BlankNodeEntry {
    type View<'a> = BlankNodeView<'a>;

    fn view(&self) -> BlankNodeView<'_> {
        BlankNodeView {
            identifier: &self.identifier,
        }
    }

    fn matches(&self, view: BlankNodeView<'_>) -> bool {
        self.view() == view
    }

    fn from_view(view: BlankNodeView<'_>) -> Self {
        BlankNodeEntry {
            identifier: view.identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableView<'a> {
    pub name: &'a str,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    name: Box<str>,
    is_anonymous: bool,
}

impl VariableEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }
}

impl InternedEntry for VariableEntry {
    type View<'a> = VariableView<'a>;

    fn view(&self) -> VariableView<'_> {
        VariableView {
            name: &self.name,
            is_anonymous: self.is_anonymous,
        }
    }

    fn matches(&self, view: VariableView<'_>) -> bool {
        self.view() == view
    }

    fn from_view(view: VariableView<'_>) -> Self {
        VariableEntry {
            name: view.name.into(),
            is_anonymous: view.is_anonymous,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════════

/// Literal identified by its lexical form. `datatype_id` is the id of the
/// datatype IRI in the same storage; `language_tag` is empty unless the
/// datatype is `rdf:langString`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LexicalLiteralView<'a> {
    pub datatype_id: NodeId,
    pub lexical_form: &'a str,
    pub language_tag: &'a str,
}

impl LexicalLiteralView<'_> {
    pub fn literal_type(&self) -> LiteralType {
        LiteralType::from_iri_node_id(self.datatype_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalLiteralEntry {
    datatype_id: NodeId,
    lexical_form: Box<str>,
    language_tag: Box<str>,
}

impl LexicalLiteralEntry {
    pub fn datatype_id(&self) -> NodeId {
        self.datatype_id
    }

    pub fn lexical_form(&self) -> &str {
        &self.lexical_form
    }

    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }
}

impl InternedEntry for LexicalLiteralEntry {
    type View<'a> = LexicalLiteralView<'a>;

    fn view(&self) -> LexicalLiteralView<'_> {
        LexicalLiteralView {
            datatype_id: self.datatype_id,
            lexical_form: &self.lexical_form,
            language_tag: &self.language_tag,
        }
    }

    fn matches(&self, view: LexicalLiteralView<'_>) -> bool {
        self.view() == view
    }

    fn from_view(view: LexicalLiteralView<'_>) -> Self {
        LexicalLiteralEntry {
            datatype_id: view.datatype_id,
            lexical_form: view.lexical_form.into(),
            language_tag: view.language_tag.into(),
        }
    }
}

/// Native payload of one specialized datatype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializedEntry<T> {
    value: T,
}

impl<T> SpecializedEntry<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> InternedEntry for SpecializedEntry<T>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
{
    type View<'a> = &'a T;

    fn view(&self) -> &T {
        &self.value
    }

    fn matches(&self, view: &T) -> bool {
        self.value == *view
    }

    fn from_view(view: &T) -> Self {
        SpecializedEntry { value: view.clone() }
    }
}

/// Either representation a literal can be interned under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralView<'a> {
    Lexical(LexicalLiteralView<'a>),
    Value(&'a LiteralValue),
}

impl LiteralView<'_> {
    pub fn literal_type(&self) -> LiteralType {
        match self {
            LiteralView::Lexical(lexical) => lexical.literal_type(),
            LiteralView::Value(value) => value.datatype(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Resolved backends
// ═══════════════════════════════════════════════════════════════════════════

pub type IriBackend = Arc<IriEntry>;
pub type BlankNodeBackend = Arc<BlankNodeEntry>;
pub type VariableBackend = Arc<VariableEntry>;

/// Result of resolving a literal id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralBackend {
    Lexical(Arc<LexicalLiteralEntry>),
    Value(LiteralValue),
}

impl LiteralBackend {
    pub fn view(&self) -> LiteralView<'_> {
        match self {
            LiteralBackend::Lexical(entry) => LiteralView::Lexical(entry.view()),
            LiteralBackend::Value(value) => LiteralView::Value(value),
        }
    }
}
