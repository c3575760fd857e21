//! Data comparison of two nodes of the same kind, possibly from different
//! storages.

use std::cmp::Ordering;

use rdfgraph_storage::{LiteralBackend, LiteralType, NodeId, NodeKind, NodeStorage};

use super::Node;

pub(super) fn expect_backend<T>(result: rdfgraph_storage::Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{}", err))
}

pub(super) fn compare_across(a: &Node, b: &Node) -> Option<Ordering> {
    debug_assert_eq!(a.kind(), b.kind());
    let (left, right) = (a.storage(), b.storage());

    match a.kind() {
        NodeKind::Iri => {
            let x = expect_backend(left.find_iri_backend(a.id()));
            let y = expect_backend(right.find_iri_backend(b.id()));
            Some(x.identifier().cmp(y.identifier()))
        }
        NodeKind::BlankNode => {
            let x = expect_backend(left.find_bnode_backend(a.id()));
            let y = expect_backend(right.find_bnode_backend(b.id()));
            Some(x.identifier().cmp(y.identifier()))
        }
        NodeKind::Variable => {
            let x = expect_backend(left.find_variable_backend(a.id()));
            let y = expect_backend(right.find_variable_backend(b.id()));
            Some(
                x.name()
                    .cmp(y.name())
                    .then(x.is_anonymous().cmp(&y.is_anonymous())),
            )
        }
        NodeKind::Literal => {
            let x = expect_backend(left.find_literal_backend(a.id()));
            let y = expect_backend(right.find_literal_backend(b.id()));
            match (&x, &y) {
                (LiteralBackend::Value(x), LiteralBackend::Value(y)) => x.partial_cmp(y),
                (LiteralBackend::Lexical(x), LiteralBackend::Lexical(y)) => {
                    let datatype = datatype_iri(&left, x.datatype_id())
                        .cmp(&datatype_iri(&right, y.datatype_id()));
                    Some(
                        datatype
                            .then_with(|| x.lexical_form().cmp(y.lexical_form()))
                            .then_with(|| x.language_tag().cmp(y.language_tag())),
                    )
                }
                _ => None,
            }
        }
    }
}

/// Identifier of a literal's datatype IRI.
pub(super) fn datatype_iri(storage: &NodeStorage, datatype_id: NodeId) -> String {
    let datatype = LiteralType::from_iri_node_id(datatype_id);
    match datatype.reserved_iri() {
        Some(iri) => iri.to_owned(),
        None => expect_backend(storage.find_iri_backend(datatype_id))
            .identifier()
            .to_owned(),
    }
}
