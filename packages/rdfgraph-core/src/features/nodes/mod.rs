//! Node handles
//!
//! [`Node`] is the untyped 64-bit handle; [`Iri`], [`BlankNode`],
//! [`Literal`] and [`Variable`] are kind-checked views of it. All five are
//! `Copy` and resolve their data lazily through the storage registry.

mod blank_node;
mod compare;
mod iri;
mod literal;
mod node;
mod variable;

pub use blank_node::BlankNode;
pub use iri::Iri;
pub use literal::Literal;
pub use node::Node;
pub use variable::Variable;

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use pretty_assertions::assert_eq;
    use rdfgraph_storage::{LiteralType, LiteralValue, NodeStorage, SyncReferenceBackend};

    #[test]
    fn test_node_kinds_and_casts() {
        let storage = NodeStorage::new_sync().unwrap();
        let iri = Iri::make("http://example.org/a", &storage);
        let bnode = BlankNode::make("b0", &storage);
        let variable = Variable::make("x", false, &storage);
        let literal = Literal::make_simple("hello", &storage);

        let node: Node = iri.into();
        assert!(node.is_iri());
        assert_eq!(node.as_iri(), Some(iri));
        assert!(node.as_literal().is_none());

        assert!(Node::from(bnode).is_blank_node());
        assert!(Node::from(variable).is_variable());
        assert!(Node::from(literal).is_literal());
        assert_eq!(node.storage_id(), storage.id());
    }

    #[test]
    fn test_null_node() {
        let null = Node::null();
        assert!(null.is_null());
        assert!(!null.is_iri());
        assert_eq!(null, Node::default());
        assert_eq!(null.to_string(), "null");
    }

    #[test]
    fn test_display() {
        let storage = NodeStorage::new_sync().unwrap();
        assert_eq!(
            Iri::make("http://example.org/a", &storage).to_string(),
            "<http://example.org/a>"
        );
        assert_eq!(BlankNode::make("b0", &storage).to_string(), "_:b0");
        assert_eq!(Variable::make("x", false, &storage).to_string(), "?x");
        assert_eq!(Variable::make("x", true, &storage).to_string(), "_:x");
        assert_eq!(
            Literal::make_simple("say \"hi\"", &storage).to_string(),
            r#""say \"hi\"""#
        );
        assert_eq!(
            Literal::make_lang_tagged("chat", "fr", &storage)
                .unwrap()
                .to_string(),
            "\"chat\"@fr"
        );
        assert_eq!(
            Literal::from_value(&LiteralValue::Long(42), &storage).to_string(),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#long>"
        );
    }

    #[test]
    fn test_reserved_iris() {
        let storage = NodeStorage::new_sync().unwrap();
        let rdf_type = Iri::rdf_type(&storage);
        assert_eq!(
            rdf_type.identifier(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(
            Iri::make("http://www.w3.org/1999/02/22-rdf-syntax-ns#type", &storage),
            rdf_type
        );

        let default_graph = Iri::default_graph(&storage);
        assert!(default_graph.is_default_graph());
        assert_eq!(default_graph.identifier(), "");

        let int = Iri::from_datatype(LiteralType::INT, &storage).unwrap();
        assert_eq!(int.literal_type(), LiteralType::INT);
        assert!(Iri::from_datatype(LiteralType::OTHER, &storage).is_none());
    }

    #[test]
    fn test_literal_accessors() {
        let storage = NodeStorage::new_sync().unwrap();

        let simple = Literal::make_simple("hello", &storage);
        assert_eq!(simple.lexical_form(), "hello");
        assert_eq!(simple.language_tag(), None);
        assert_eq!(simple.literal_type(), LiteralType::STRING);
        assert_eq!(
            simple.datatype().identifier(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
        assert!(simple.value().is_none());

        let tagged = Literal::make_lang_tagged("hallo", "de", &storage).unwrap();
        assert_eq!(tagged.language_tag().as_deref(), Some("de"));
        assert_eq!(tagged.literal_type(), LiteralType::LANG_STRING);

        let value = LiteralValue::Integer(BigInt::from(-7));
        let integer = Literal::from_value(&value, &storage);
        assert_eq!(integer.value(), Some(value));
        assert_eq!(integer.lexical_form(), "-7");
        assert_eq!(integer.literal_type(), LiteralType::INTEGER);
        assert_eq!(integer.datatype(), Iri::from_datatype(LiteralType::INTEGER, &storage).unwrap());
    }

    #[test]
    fn test_make_typed() {
        let storage = NodeStorage::new_sync().unwrap();
        let custom = Iri::make("http://example.org/dt", &storage);

        let literal = Literal::make_typed("abc", &custom, &storage).unwrap();
        assert_eq!(literal.datatype(), custom);
        assert_eq!(literal.literal_type(), LiteralType::OTHER);
        assert_eq!(literal.to_string(), "\"abc\"^^<http://example.org/dt>");

        let integer = Iri::from_datatype(LiteralType::INTEGER, &storage).unwrap();
        assert!(Literal::make_typed("1", &integer, &storage).is_err());

        let lang_string = Iri::from_datatype(LiteralType::LANG_STRING, &storage).unwrap();
        assert!(Literal::make_typed("x", &lang_string, &storage).is_err());
        assert!(Literal::make_lang_tagged("x", "", &storage).is_err());

        let string = Iri::from_datatype(LiteralType::STRING, &storage).unwrap();
        assert_eq!(
            Literal::make_typed("same", &string, &storage).unwrap(),
            Literal::make_simple("same", &storage)
        );
    }

    #[test]
    fn test_cross_storage_equality() {
        let left = NodeStorage::new_sync().unwrap();
        let right = NodeStorage::new_unsync().unwrap();

        // shift ids in one storage so handles differ
        Iri::make("http://example.org/padding", &right);

        let a = Iri::make("http://example.org/a", &left);
        let b = Iri::make("http://example.org/a", &right);
        assert_ne!(a.handle(), b.handle());
        assert_eq!(a, b);
        assert_ne!(a, Iri::make("http://example.org/z", &right));

        let x = Literal::from_value(&LiteralValue::Long(5), &left);
        let y = Literal::from_value(&LiteralValue::Long(5), &right);
        assert_eq!(x, y);

        assert_ne!(Node::from(a), Node::from(BlankNode::make("http://example.org/a", &right)));
    }

    #[test]
    fn test_ordering() {
        let storage = NodeStorage::new_sync().unwrap();
        let variable: Node = Variable::make("v", false, &storage).into();
        let bnode: Node = BlankNode::make("b", &storage).into();
        let iri: Node = Iri::make("http://example.org/a", &storage).into();
        let literal: Node = Literal::make_simple("a", &storage).into();

        assert!(Node::null() < variable);
        assert!(variable < bnode);
        assert!(bnode < iri);
        assert!(iri < literal);

        let a = Iri::make("http://example.org/a", &storage);
        let b = Iri::make("http://example.org/b", &storage);
        assert!(a < b);

        let one = Literal::from_value(&LiteralValue::Long(1), &storage);
        let two = Literal::from_value(&LiteralValue::Long(2), &storage);
        assert!(one < two);

        // lexical and value literals are unordered
        let lexical = Literal::make_simple("1", &storage);
        assert_eq!(one.partial_cmp(&lexical), None);
        // values of different datatypes are unordered
        let big = Literal::from_value(&LiteralValue::Integer(BigInt::from(1)), &storage);
        assert_eq!(one.partial_cmp(&big), None);
    }

    #[test]
    fn test_transfer() {
        let source = NodeStorage::new_sync().unwrap();
        let target = NodeStorage::new_sync().unwrap();

        let custom = Iri::make("http://example.org/dt", &source);
        let literal = Literal::make_typed("v", &custom, &source).unwrap();
        let bnode = BlankNode::make("b1", &source);

        assert!(Node::from(literal).try_get_in_node_storage(&target).is_null());

        let moved = Node::from(literal).to_node_storage(&target);
        assert_eq!(moved.storage_id(), target.id());
        assert_eq!(moved, Node::from(literal));
        let moved = moved.as_literal().unwrap();
        assert_eq!(moved.datatype().identifier(), "http://example.org/dt");
        assert_eq!(moved.datatype().storage_id(), target.id());

        assert_eq!(
            Node::from(literal).try_get_in_node_storage(&target).handle(),
            moved.handle()
        );

        let same = Node::from(bnode).to_node_storage(&source);
        assert_eq!(same.handle(), bnode.handle());

        let variable = Variable::make("q", true, &source);
        let moved = Node::from(variable).to_node_storage(&target).as_variable().unwrap();
        assert_eq!(moved.name(), "q");
        assert!(moved.is_anonymous());
    }

    #[test]
    #[should_panic(expected = "no longer alive")]
    fn test_dead_storage_panics() {
        // fixed slot so no concurrently created storage can take it over
        let iri = {
            let storage = NodeStorage::register_backend_at(1010, SyncReferenceBackend::new()).unwrap();
            Iri::make("http://example.org/gone", &storage)
        };
        let _ = iri.identifier();
    }
}
