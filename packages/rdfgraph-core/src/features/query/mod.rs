//! Statements, patterns and solutions

mod pattern;
mod solution;
mod statement;

pub use pattern::{QuadPattern, TriplePattern};
pub use solution::Solution;
pub use statement::{Quad, Statement};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nodes::{BlankNode, Iri, Literal, Node, Variable};
    use rdfgraph_storage::NodeStorage;

    #[test]
    fn test_statement_validity() {
        let storage = NodeStorage::new_sync().unwrap();
        let s = Iri::make("http://example.org/s", &storage);
        let p = Iri::make("http://example.org/p", &storage);
        let b = BlankNode::make("b", &storage);
        let o = Literal::make_simple("o", &storage);
        let x = Variable::make("x", false, &storage);

        assert!(Statement::new(s, p, o).valid());
        assert!(Statement::new(b, p, s).valid());
        assert!(!Statement::new(o, p, s).valid());
        assert!(!Statement::new(s, b, o).valid());
        assert!(!Statement::new(s, p, x).valid());
        assert!(!Statement::new(s, p, Node::null()).valid());

        assert!(Quad::new(s, s, p, o).valid());
        assert!(Quad::in_default_graph(Statement::new(s, p, o)).valid());
        assert!(Quad::new(b, s, p, o).valid());
        assert!(!Quad::new(o, s, p, o).valid());
        assert!(!Quad::new(x, s, p, o).valid());
    }

    #[test]
    fn test_pattern_validity_and_variables() {
        let storage = NodeStorage::new_sync().unwrap();
        let s = Iri::make("http://example.org/s", &storage);
        let o = Literal::make_simple("o", &storage);
        let x = Variable::make("x", false, &storage);
        let y = Variable::make("y", false, &storage);
        let g = Variable::make("g", false, &storage);

        let pattern = TriplePattern::new(x, y, x);
        assert!(pattern.valid());
        assert_eq!(pattern.variables(), vec![x, y]);

        assert!(!TriplePattern::new(o, y, x).valid());
        assert!(!TriplePattern::new(s, o, x).valid());

        let quad = QuadPattern::new(g, s, y, o);
        assert!(quad.valid());
        assert_eq!(quad.variables(), vec![g, y]);
        assert!(!QuadPattern::new(o, s, y, o).valid());
        let b = BlankNode::make("g", &storage);
        assert!(QuadPattern::new(b, s, y, o).valid());
    }

    #[test]
    fn test_solution_bindings() {
        let storage = NodeStorage::new_sync().unwrap();
        let x = Variable::make("x", false, &storage);
        let y = Variable::make("y", false, &storage);
        let a: Node = Iri::make("http://example.org/a", &storage).into();
        let b: Node = Iri::make("http://example.org/b", &storage).into();

        let mut solution = Solution::with_capacity(2);
        assert!(solution.is_empty());
        solution.push(x, a);
        solution.push(y, b);
        solution.push(x, b);

        assert_eq!(solution.len(), 3);
        assert_eq!(solution.get(&x), Some(a));
        assert_eq!(solution[2], b);
        assert_eq!(solution.variable(0), Some(x));
        assert_eq!(solution.variable(3), None);
        assert_eq!(solution.iter().count(), 3);
        assert_eq!(
            solution.to_string(),
            "{?x -> <http://example.org/a>, ?y -> <http://example.org/b>, ?x -> <http://example.org/b>}"
        );
    }
}
