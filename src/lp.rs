//! The abstract linear-programming collaborator.
//!
//! This crate does not solve linear programs: `§4.9` names the LP layer an
//! interface the embedder fulfills with a solver of their choosing. What
//! lives here is the problem-description side of that interface
//! (variables, linear constraints, a linear objective) plus two builders,
//! `OptimalSubgraph` and `OptimalVertexSet`, that translate a graph
//! question ("pick the min-cost spanning-structure-compatible arc subset",
//! "pick the max-weight independent vertex set") into an `LpProblem`
//! without ever touching a simplex tableau themselves. Grounded on the
//! "interface with many implementations" design note in the design notes
//! and on [`crate::graph::GraphCapability`]'s own capability-trait shape:
//! an `LpSolver` is read-only from this crate's point of view, the same
//! way a graph adaptor is read-only with respect to its underlying graph.

use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};

/// One decision variable: a bounded real quantity the solver chooses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub lower: f64,
    pub upper: f64,
}

impl Variable {
    pub fn new(lower: f64, upper: f64) -> Self {
        Variable { lower, upper }
    }

    /// A binary `0/1` selection variable, the common case for
    /// arc-inclusion and vertex-inclusion decisions.
    pub fn binary() -> Self {
        Variable::new(0.0, 1.0)
    }
}

/// The comparison a linear constraint enforces against its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

/// A single linear constraint: `sum(coefficient * variable) <sense> rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub terms: Vec<(usize, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// Whether the objective is minimized or maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// A linear program: bounded variables, linear constraints over them, and
/// a linear objective. Plain data — no solving logic lives on this type.
#[derive(Debug, Clone)]
pub struct LpProblem {
    pub sense: Sense,
    pub variables: Vec<Variable>,
    pub objective: Vec<f64>,
    pub constraints: Vec<Constraint>,
}

impl LpProblem {
    pub fn new(sense: Sense) -> Self {
        LpProblem {
            sense,
            variables: Vec::new(),
            objective: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Add a variable with the given objective coefficient, returning its
    /// index for use in later `Constraint::terms`.
    pub fn add_variable(&mut self, variable: Variable, objective_coefficient: f64) -> usize {
        let idx = self.variables.len();
        self.variables.push(variable);
        self.objective.push(objective_coefficient);
        idx
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// The collaborator's half of the interface: an external solver reads an
/// `LpProblem` and returns a value for every variable. This crate never
/// implements `LpSolver` itself; tests exercise `OptimalSubgraph` and
/// `OptimalVertexSet` against a trivial in-crate stub (see the module's
/// test submodule) that stands in for a real MIP/LP backend.
pub trait LpSolver {
    /// Solve `problem`, returning one value per variable in `problem`'s
    /// index order, or `None` if no solution was found (infeasible or the
    /// solver gave up).
    fn solve(&mut self, problem: &LpProblem) -> Option<Vec<f64>>;
}

/// Builds an `LpProblem` whose optimal `0/1` solution selects a subset of
/// arcs of a graph, subject to caller-supplied per-node degree constraints
/// (the generic "optimal subgraph" shape behind min-cost matching-like and
/// spanning-structure-like selection problems) and an arc cost.
///
/// This builder only constructs and reads back the problem; `solve` must
/// be given an [`LpSolver`] implementation by the embedder.
pub struct OptimalSubgraph<'a, G: ?Sized> {
    graph: &'a G,
    arcs: Vec<ArcId>,
    arc_var: Vec<usize>,
    problem: LpProblem,
}

impl<'a, G> OptimalSubgraph<'a, G>
where
    G: GraphCapability + ?Sized,
{
    /// Build the base problem: one binary variable per arc in `filter`,
    /// objective coefficient given by `cost`.
    pub fn new<C>(graph: &'a G, filter: ArcFilter, sense: Sense, mut cost: C) -> Self
    where
        C: FnMut(ArcId) -> f64,
    {
        let mut problem = LpProblem::new(sense);
        let arcs: Vec<ArcId> = graph.arcs(filter).collect();
        let mut arc_var = Vec::with_capacity(arcs.len());
        for &arc in &arcs {
            let coefficient = cost(arc);
            let idx = problem.add_variable(Variable::binary(), coefficient);
            arc_var.push(idx);
        }
        OptimalSubgraph {
            graph,
            arcs,
            arc_var,
            problem,
        }
    }

    /// Constrain the number of selected arcs incident to `node` (restricted
    /// to `filter`) to be `<=`, `>=`, or `==` `degree`. Used e.g. to express
    /// "at most one matched arc per node" (a matching) or "exactly two
    /// incident selected arcs" (a Hamiltonian-cycle relaxation).
    pub fn constrain_degree(&mut self, node: NodeId, filter: ArcFilter, sense: ConstraintSense, degree: f64) {
        let terms = self
            .graph
            .incident(node, filter)
            .filter_map(|arc| {
                self.arcs
                    .iter()
                    .position(|&a| a == arc)
                    .map(|i| (self.arc_var[i], 1.0))
            })
            .collect();
        self.problem.add_constraint(Constraint {
            terms,
            sense,
            rhs: degree,
        });
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    /// Solve via `solver` and read the result back as the set of arcs whose
    /// variable the solver set to (approximately) `1`.
    pub fn solve(&self, solver: &mut dyn LpSolver) -> Option<Vec<ArcId>> {
        let values = solver.solve(&self.problem)?;
        Some(
            self.arcs
                .iter()
                .zip(self.arc_var.iter())
                .filter(|(_, &var)| values[var] > 0.5)
                .map(|(&arc, _)| arc)
                .collect(),
        )
    }
}

/// Builds an `LpProblem` whose optimal `0/1` solution selects a subset of
/// nodes, subject to a per-node weight objective and caller-supplied
/// pairwise exclusion constraints (the generic shape behind independent-set
/// and vertex-cover style selection problems).
pub struct OptimalVertexSet<'a, G: ?Sized> {
    graph: &'a G,
    nodes: Vec<NodeId>,
    node_var: Vec<usize>,
    problem: LpProblem,
}

impl<'a, G> OptimalVertexSet<'a, G>
where
    G: GraphCapability + ?Sized,
{
    pub fn new<W>(graph: &'a G, sense: Sense, mut weight: W) -> Self
    where
        W: FnMut(NodeId) -> f64,
    {
        let mut problem = LpProblem::new(sense);
        let nodes: Vec<NodeId> = graph.nodes().collect();
        let mut node_var = Vec::with_capacity(nodes.len());
        for &node in &nodes {
            let coefficient = weight(node);
            let idx = problem.add_variable(Variable::binary(), coefficient);
            node_var.push(idx);
        }
        OptimalVertexSet {
            graph,
            nodes,
            node_var,
            problem,
        }
    }

    fn var_of(&self, node: NodeId) -> Option<usize> {
        self.nodes
            .iter()
            .position(|&n| n == node)
            .map(|i| self.node_var[i])
    }

    /// Forbid `u` and `v` from both being selected: `x_u + x_v <= 1`. Used
    /// to build independent-set style problems from every edge of the
    /// graph's conflict relation.
    pub fn forbid_pair(&mut self, u: NodeId, v: NodeId) {
        let (Some(iu), Some(iv)) = (self.var_of(u), self.var_of(v)) else {
            return;
        };
        self.problem.add_constraint(Constraint {
            terms: vec![(iu, 1.0), (iv, 1.0)],
            sense: ConstraintSense::LessEqual,
            rhs: 1.0,
        });
    }

    /// Every edge of the graph (under `filter`) forbids its two endpoints
    /// from being selected together, the standard construction for an
    /// independent-set problem.
    pub fn forbid_every_edge(&mut self, filter: ArcFilter) {
        let edges: Vec<(NodeId, NodeId)> = self
            .graph
            .arcs(filter)
            .map(|arc| (self.graph.u(arc), self.graph.v(arc)))
            .collect();
        for (u, v) in edges {
            self.forbid_pair(u, v);
        }
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    pub fn solve(&self, solver: &mut dyn LpSolver) -> Option<Vec<NodeId>> {
        let values = solver.solve(&self.problem)?;
        Some(
            self.nodes
                .iter()
                .zip(self.node_var.iter())
                .filter(|(_, &var)| values[var] > 0.5)
                .map(|(&node, _)| node)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, MutableGraph};
    use crate::id::Directedness;

    /// A brute-force stub solver for the tiny problems these tests build:
    /// not a production LP backend, just enough to exercise the builders'
    /// read-back path end to end.
    struct BruteForceBinary;

    impl LpSolver for BruteForceBinary {
        fn solve(&mut self, problem: &LpProblem) -> Option<Vec<f64>> {
            let n = problem.variable_count();
            if n > 20 {
                return None;
            }
            let mut best: Option<(f64, Vec<f64>)> = None;
            for mask in 0u32..(1 << n) {
                let assignment: Vec<f64> = (0..n)
                    .map(|i| if mask & (1 << i) != 0 { 1.0 } else { 0.0 })
                    .collect();
                if !satisfies(problem, &assignment) {
                    continue;
                }
                let value: f64 = problem
                    .objective
                    .iter()
                    .zip(assignment.iter())
                    .map(|(c, x)| c * x)
                    .sum();
                let better = match (&best, problem.sense) {
                    (None, _) => true,
                    (Some((b, _)), Sense::Minimize) => value < *b,
                    (Some((b, _)), Sense::Maximize) => value > *b,
                };
                if better {
                    best = Some((value, assignment));
                }
            }
            best.map(|(_, a)| a)
        }
    }

    fn satisfies(problem: &LpProblem, assignment: &[f64]) -> bool {
        problem.constraints.iter().all(|c| {
            let lhs: f64 = c.terms.iter().map(|&(i, coeff)| coeff * assignment[i]).sum();
            match c.sense {
                ConstraintSense::LessEqual => lhs <= c.rhs + 1e-9,
                ConstraintSense::GreaterEqual => lhs >= c.rhs - 1e-9,
                ConstraintSense::Equal => (lhs - c.rhs).abs() <= 1e-9,
            }
        })
    }

    #[test]
    fn optimal_subgraph_picks_a_matching() {
        // A path A-B-C-D with unit-cost edges; "at most one incident
        // selected edge per node" should pick two disjoint edges.
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let d = g.add_node();
        g.add_arc(a, b, Directedness::Undirected).unwrap();
        g.add_arc(b, c, Directedness::Undirected).unwrap();
        g.add_arc(c, d, Directedness::Undirected).unwrap();

        let mut builder = OptimalSubgraph::new(&g, ArcFilter::Edge, Sense::Maximize, |_: ArcId| 1.0f64);
        for node in [a, b, c, d] {
            builder.constrain_degree(node, ArcFilter::Edge, ConstraintSense::LessEqual, 1.0);
        }
        let selected = builder.solve(&mut BruteForceBinary).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn optimal_vertex_set_is_independent() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Undirected).unwrap();
        g.add_arc(b, c, Directedness::Undirected).unwrap();

        let mut builder = OptimalVertexSet::new(&g, Sense::Maximize, |_: NodeId| 1.0f64);
        builder.forbid_every_edge(ArcFilter::Edge);
        let selected = builder.solve(&mut BruteForceBinary).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected.contains(&a));
        assert!(selected.contains(&c));
        assert!(!selected.contains(&b));
    }
}
