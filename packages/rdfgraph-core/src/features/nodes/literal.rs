use std::fmt;
use std::ops::Deref;

use rdfgraph_storage::{
    LexicalLiteralView, LiteralBackend, LiteralType, LiteralValue, LiteralView, NodeId, NodeKind,
    NodeStorage,
};

use super::compare::{datatype_iri, expect_backend};
use super::{Iri, Node};
use crate::errors::{GraphError, GraphResult};

/// A literal node.
///
/// Literals whose datatype has specialized storage in their backend are
/// held as values; all others as (datatype, lexical form, language tag).
/// The datatype tag is also carried in the node id, so
/// [`Literal::literal_type`] never touches the storage.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Literal {
    node: Node,
}

impl Literal {
    /// An `xsd:string` literal.
    pub fn make_simple(lexical_form: &str, storage: &NodeStorage) -> Self {
        Self::make_lexical(
            LiteralType::STRING.to_iri_node_id(),
            lexical_form,
            "",
            storage,
        )
    }

    /// An `rdf:langString` literal. The tag is stored as given.
    pub fn make_lang_tagged(
        lexical_form: &str,
        language_tag: &str,
        storage: &NodeStorage,
    ) -> GraphResult<Self> {
        if language_tag.is_empty() {
            return Err(GraphError::InvalidLiteral(format!(
                "\"{}\" has an empty language tag",
                lexical_form
            )));
        }
        Ok(Self::make_lexical(
            LiteralType::LANG_STRING.to_iri_node_id(),
            lexical_form,
            language_tag,
            storage,
        ))
    }

    /// A literal of an arbitrary datatype, kept in lexical form.
    ///
    /// Datatypes the backend holds as values are rejected: parsing lexical
    /// forms is left to the caller, who should use [`Literal::from_value`].
    pub fn make_typed(
        lexical_form: &str,
        datatype: &Iri,
        storage: &NodeStorage,
    ) -> GraphResult<Self> {
        if datatype.is_null() {
            return Err(GraphError::InvalidLiteral(format!(
                "\"{}\" has a null datatype",
                lexical_form
            )));
        }
        let datatype = datatype.to_node_storage(storage);
        let literal_type = datatype.literal_type();

        if literal_type == LiteralType::LANG_STRING {
            return Err(GraphError::InvalidLiteral(format!(
                "\"{}\"^^rdf:langString needs a language tag",
                lexical_form
            )));
        }
        if storage.has_specialized_storage_for(literal_type) {
            return Err(GraphError::InvalidLiteral(format!(
                "\"{}\"^^{} is stored by value; build it with Literal::from_value",
                lexical_form, datatype
            )));
        }

        Ok(Self::make_lexical(datatype.id(), lexical_form, "", storage))
    }

    pub fn from_value(value: &LiteralValue, storage: &NodeStorage) -> Self {
        let id = intern_value(storage, value, true);
        Self::from_node_unchecked(Node::new(id, NodeKind::Literal, storage.id()))
    }

    fn make_lexical(
        datatype_id: NodeId,
        lexical_form: &str,
        language_tag: &str,
        storage: &NodeStorage,
    ) -> Self {
        let id = storage.find_or_make_literal_id(LiteralView::Lexical(LexicalLiteralView {
            datatype_id,
            lexical_form,
            language_tag,
        }));
        Self::from_node_unchecked(Node::new(id, NodeKind::Literal, storage.id()))
    }

    pub(crate) fn from_node_unchecked(node: Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    pub fn backend(&self) -> LiteralBackend {
        expect_backend(self.node.storage().find_literal_backend(self.node.id()))
    }

    pub fn literal_type(&self) -> LiteralType {
        self.node.id().literal_type()
    }

    pub fn datatype(&self) -> Iri {
        let datatype_id = match self.backend() {
            LiteralBackend::Lexical(entry) => entry.datatype_id(),
            LiteralBackend::Value(value) => value.datatype().to_iri_node_id(),
        };
        Iri::from_node_unchecked(Node::new(datatype_id, NodeKind::Iri, self.node.storage_id()))
    }

    /// Lexical form; value literals are rendered canonically.
    pub fn lexical_form(&self) -> String {
        match self.backend() {
            LiteralBackend::Lexical(entry) => entry.lexical_form().to_owned(),
            LiteralBackend::Value(value) => value.to_string(),
        }
    }

    pub fn language_tag(&self) -> Option<String> {
        match self.backend() {
            LiteralBackend::Lexical(entry) if !entry.language_tag().is_empty() => {
                Some(entry.language_tag().to_owned())
            }
            _ => None,
        }
    }

    /// Native value, for literals held by specialized storage.
    pub fn value(&self) -> Option<LiteralValue> {
        match self.backend() {
            LiteralBackend::Value(value) => Some(value),
            LiteralBackend::Lexical(_) => None,
        }
    }

    pub fn to_node_storage(&self, target: &NodeStorage) -> Literal {
        Self::from_node_unchecked(self.node.to_node_storage(target))
    }

    pub fn try_get_in_node_storage(&self, target: &NodeStorage) -> Literal {
        Self::from_node_unchecked(self.node.try_get_in_node_storage(target))
    }
}

/// Interns (or looks up, when `create` is false) a value literal. Backends
/// without specialized storage for the value's datatype get its rendered
/// lexical form instead.
pub(super) fn intern_value(storage: &NodeStorage, value: &LiteralValue, create: bool) -> NodeId {
    let lexical_form;
    let view = if storage.has_specialized_storage_for(value.datatype()) {
        LiteralView::Value(value)
    } else {
        lexical_form = value.to_string();
        LiteralView::Lexical(LexicalLiteralView {
            datatype_id: value.datatype().to_iri_node_id(),
            lexical_form: &lexical_form,
            language_tag: "",
        })
    };

    if create {
        storage.find_or_make_literal_id(view)
    } else {
        storage.find_literal_id(view)
    }
}

impl Deref for Literal {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Node {
        literal.node
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Literal({:?})", self.node)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, lexical_form: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in lexical_form.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            _ => fmt::Write::write_char(f, c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Literal {
    /// `"lex"` for `xsd:string`, `"lex"@tag` for language-tagged strings and
    /// `"lex"^^<datatype>` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.is_null() {
            return f.write_str("null");
        }
        match self.backend() {
            LiteralBackend::Value(value) => {
                write_escaped(f, &value.to_string())?;
                write!(f, "^^<{}>", value.datatype_iri())
            }
            LiteralBackend::Lexical(entry) => {
                write_escaped(f, entry.lexical_form())?;
                if !entry.language_tag().is_empty() {
                    return write!(f, "@{}", entry.language_tag());
                }
                if entry.datatype_id() == LiteralType::STRING.to_iri_node_id() {
                    return Ok(());
                }
                let datatype = datatype_iri(&self.node.storage(), entry.datatype_id());
                write!(f, "^^<{}>", datatype)
            }
        }
    }
}
