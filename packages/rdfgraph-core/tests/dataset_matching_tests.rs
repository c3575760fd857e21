//! Dataset pattern matching
//!
//! Bound vs. variable graph positions, graph-variable binding order and
//! cross-storage patterns.

use pretty_assertions::assert_eq;
use rdfgraph_core::*;

struct Scenario {
    storage: NodeStorage,
    dataset: Dataset,
    g1: Iri,
    g2: Iri,
    s: Iri,
    p: Iri,
    o: Literal,
}

/// Graphs `g1` and `g2`, each holding `(s, p, o)`.
fn scenario() -> Scenario {
    let storage = NodeStorage::new_sync().unwrap();
    let g1 = Iri::make("http://example.org/g1", &storage);
    let g2 = Iri::make("http://example.org/g2", &storage);
    let s = Iri::make("http://example.org/s", &storage);
    let p = Iri::make("http://example.org/p", &storage);
    let o = Literal::make_simple("o", &storage);

    let mut dataset = Dataset::with_storage(storage.clone());
    dataset.add(&Quad::new(g1, s, p, o)).unwrap();
    dataset.add(&Quad::new(g2, s, p, o)).unwrap();

    Scenario {
        storage,
        dataset,
        g1,
        g2,
        s,
        p,
        o,
    }
}

#[test]
fn test_variable_graph_yields_one_solution_per_graph() {
    let sc = scenario();
    let g = Variable::make("g", false, &sc.storage);
    let o = Variable::make("o", false, &sc.storage);

    let solutions: Vec<Solution> = sc
        .dataset
        .match_pattern(&QuadPattern::new(g, sc.s, sc.p, o))
        .unwrap()
        .collect();
    assert_eq!(solutions.len(), 2);

    let mut graphs = Vec::new();
    for solution in &solutions {
        assert_eq!(solution.len(), 2);
        assert_eq!(solution.variable(0), Some(g));
        assert_eq!(solution.get(&o), Some(Node::from(sc.o)));
        graphs.push(solution[0]);
    }
    graphs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(graphs, vec![Node::from(sc.g1), Node::from(sc.g2)]);
}

#[test]
fn test_bound_graph_yields_one_solution() {
    let sc = scenario();
    let o = Variable::make("o", false, &sc.storage);

    let solutions: Vec<Solution> = sc
        .dataset
        .match_pattern(&QuadPattern::new(sc.g1, sc.s, sc.p, o))
        .unwrap()
        .collect();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].len(), 1);
    assert_eq!(solutions[0][0], Node::from(sc.o));
}

#[test]
fn test_graph_variable_reused_in_triple_binds_each_position() {
    let storage = NodeStorage::new_sync().unwrap();
    let g1 = Iri::make("http://example.org/g1", &storage);
    let g2 = Iri::make("http://example.org/g2", &storage);
    let p = Iri::make("http://example.org/p", &storage);
    let o = Literal::make_simple("o", &storage);

    let mut dataset = Dataset::with_storage(storage.clone());
    dataset.add(&Quad::new(g1, g1, p, o)).unwrap();
    dataset.add(&Quad::new(g2, g1, p, o)).unwrap();

    // the graph variable is not substituted into the triple positions
    let g = Variable::make("g", false, &storage);
    let mut solutions: Vec<Solution> = dataset
        .match_pattern(&QuadPattern::new(g, g, p, o))
        .unwrap()
        .collect();
    assert_eq!(solutions.len(), 2);
    solutions.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap());

    for (solution, name) in solutions.iter().zip([g1, g2]) {
        assert_eq!(solution.len(), 2);
        assert_eq!(solution.variable(0), Some(g));
        assert_eq!(solution.variable(1), Some(g));
        assert_eq!(solution[0], Node::from(name));
        assert_eq!(solution[1], Node::from(g1));
    }
}

#[test]
fn test_graph_variable_binds_graph_and_subject() {
    let sc = scenario();
    let mut dataset = Dataset::with_storage(sc.storage.clone());
    dataset.add(&Quad::new(sc.g1, sc.s, sc.p, sc.o)).unwrap();

    let g = Variable::make("g", false, &sc.storage);
    let o = Variable::make("o", false, &sc.storage);
    let solutions: Vec<Solution> = dataset
        .match_pattern(&QuadPattern::new(g, g, sc.p, o))
        .unwrap()
        .collect();
    assert_eq!(solutions.len(), 1);

    let bindings: Vec<(Variable, Node)> = solutions[0].iter().copied().collect();
    assert_eq!(
        bindings,
        vec![
            (g, Node::from(sc.g1)),
            (g, Node::from(sc.s)),
            (o, Node::from(sc.o)),
        ]
    );
}

#[test]
fn test_pattern_from_other_storage() {
    let sc = scenario();
    let other = NodeStorage::new_unsync().unwrap();
    let g = Variable::make("g", false, &other);
    let s = Iri::make("http://example.org/s", &other);
    let o = Variable::make("o", false, &other);

    let pattern = QuadPattern::new(g, s, Iri::make("http://example.org/p", &other), o);
    let count = sc.dataset.match_pattern(&pattern).unwrap().count();
    assert_eq!(count, 2);

    let missing = QuadPattern::new(g, Iri::make("http://example.org/nope", &other), sc.p, o);
    assert_eq!(sc.dataset.match_pattern(&missing).unwrap().count(), 0);
}

#[test]
fn test_default_graph_pattern() {
    let mut sc = scenario();
    let extra = Literal::make_simple("default", &sc.storage);
    sc.dataset
        .add_to_default(&Statement::new(sc.s, sc.p, extra))
        .unwrap();

    let o = Variable::make("o", false, &sc.storage);
    let solutions: Vec<Solution> = sc
        .dataset
        .match_pattern(&QuadPattern::new(Node::null(), sc.s, sc.p, o))
        .unwrap()
        .collect();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get(&o), Some(Node::from(extra)));

    assert_eq!(sc.dataset.len(), 3);
    assert_eq!(sc.dataset.graph_names().count(), 3);
}

#[test]
fn test_invalid_quad_pattern() {
    let sc = scenario();
    let o = Variable::make("o", false, &sc.storage);
    let result = sc
        .dataset
        .match_pattern(&QuadPattern::new(sc.o, sc.s, sc.p, o));
    assert!(matches!(result, Err(GraphError::InvalidPattern(_))));
}

#[test]
fn test_iter_round_trips_through_add() {
    let sc = scenario();
    let mut copy = Dataset::with_storage(NodeStorage::new_sync().unwrap());
    for quad in sc.dataset.iter() {
        copy.add(&quad).unwrap();
    }
    assert_eq!(copy.len(), sc.dataset.len());
    for quad in sc.dataset.iter() {
        assert!(copy.contains(&quad));
    }
    assert_eq!(copy.len_of(&sc.g2.to_node_storage(copy.storage())), 1);
}
