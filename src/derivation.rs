//! Derivation engine.
//!
//! Depth-first expansion of the derivation tree. Every node runs the same
//! sequence of checks (equality, inequality, repetition, depth bound, length
//! analysis, splitting) before one of the four transformation rules is
//! dispatched on the leading symbols of its equation.

use log::debug;

use crate::equation::Equation;
use crate::length::{check_length_rules, LengthVerdict};
use crate::letters::LetterGenerator;
use crate::node::{DerivationTree, NodeStatus, RuleTag};
use crate::options::{AlgorithmMode, PrintOptions, SolveOptions};
use crate::reference::NodeId;
use crate::solver::Verdict;
use crate::substitution::Substitution;
use crate::symbol::Symbol;
use crate::system::EqSystem;
use crate::trace::{TraceError, TraceSink};

/// State of one solver run.
pub(crate) struct Derivation<'s> {
    tree: DerivationTree,
    sink: &'s mut dyn TraceSink,
    letters: LetterGenerator,
    options: SolveOptions,
    print_options: PrintOptions,
    mode: AlgorithmMode,
    cycle_range: usize,
    has_solution: bool,
    cycled: bool,
}

/// What a finished run leaves behind.
pub(crate) struct Outcome {
    pub tree: DerivationTree,
    pub has_solution: bool,
    pub cycled: bool,
}

impl<'s> Derivation<'s> {
    pub fn new(
        tree: DerivationTree,
        sink: &'s mut dyn TraceSink,
        letters: LetterGenerator,
        options: SolveOptions,
        print_options: PrintOptions,
        mode: AlgorithmMode,
    ) -> Self {
        let cycle_range = options.effective_cycle_range();
        Self {
            tree,
            sink,
            letters,
            options,
            print_options,
            mode,
            cycle_range,
            has_solution: false,
            cycled: false,
        }
    }

    pub fn finish(self) -> Outcome {
        Outcome {
            tree: self.tree,
            has_solution: self.has_solution,
            cycled: self.cycled,
        }
    }

    /// Expands the whole tree and returns the status of the root.
    pub fn run(&mut self) -> Result<NodeStatus, TraceError> {
        let root = self.tree.root();
        self.sink.start_description()?;
        let label = self.label(root);
        self.sink.write_node(root, &label)?;

        let parsed = self.tree.node(root).system().clone();
        let status = match parsed.as_single() {
            Some(eq) => {
                let mut reduced = eq.clone();
                reduced.reduce();
                if &reduced != eq {
                    let child = self.add_node(root, EqSystem::single(reduced), Substitution::reducing(), RuleTag::Reduce)?;
                    let status = self.expand(child)?;
                    self.tree.set_status(root, status);
                    status
                } else {
                    self.expand(root)?
                }
            }
            None => self.expand(root)?,
        };

        self.sink.end_description()?;
        Ok(status)
    }

    fn expand(&mut self, id: NodeId) -> Result<NodeStatus, TraceError> {
        let system = self.tree.node(id).system().clone();
        let status = match system.as_single() {
            Some(eq) => self.expand_equation(id, eq)?,
            None => self.expand_system(id, &system)?,
        };
        debug!("expand(id = {}) -> {:?}", id, status);
        self.tree.set_status(id, status);
        Ok(status)
    }

    fn expand_equation(&mut self, id: NodeId, eq: &Equation) -> Result<NodeStatus, TraceError> {
        debug!("expand_equation(id = {}, eq = {})", id, eq);

        if eq.check_equality() {
            self.has_solution = true;
            return Ok(NodeStatus::True);
        }
        if eq.check_inequality() {
            return Ok(NodeStatus::False);
        }
        if let Some(ancestor) = self.find_repetition(id, eq) {
            debug!("expand_equation: {} repeats {}", id, ancestor);
            self.sink.write_dotted_edge(id, ancestor)?;
            return Ok(NodeStatus::Repeated(ancestor));
        }
        if self.tree.node(id).depth() > self.cycle_range {
            debug!("expand_equation: depth bound {} reached at {}", self.cycle_range, id);
            self.cycled = true;
            return Ok(NodeStatus::Cycled);
        }

        if self.options.length_analysis {
            match check_length_rules(eq) {
                LengthVerdict::Unsatisfiable => return Ok(NodeStatus::False),
                LengthVerdict::Forced { variable, length } => {
                    if let Some(substitution) = self.forced_substitution(variable, length) {
                        return self.branch(id, eq, vec![(substitution, RuleTag::Forced)]);
                    }
                }
                LengthVerdict::Inconclusive => {}
            }
        }

        if self.options.split_by_equidecomposability && eq.is_quadratic() {
            let split = eq.split_by_equidecomposability();
            if split.len() > 1 {
                let child = self.add_node(id, split, Substitution::splitting(), RuleTag::Split)?;
                return self.expand(child);
            }
        }

        self.dispatch(id, eq)
    }

    /// Conjunction over the members of a split system.
    fn expand_system(&mut self, id: NodeId, system: &EqSystem) -> Result<NodeStatus, TraceError> {
        debug!("expand_system(id = {}, members = {})", id, system.len());

        if system.check_inequality() {
            return Ok(NodeStatus::False);
        }

        let mut statuses = Vec::with_capacity(system.len());
        for member in system.equations() {
            let mut member = member.clone();
            member.reduce();
            let child = self.add_node(id, EqSystem::single(member), Substitution::splitting(), RuleTag::Split)?;
            let status = self.expand(child)?;
            statuses.push(status);
            if status.verdict() == Verdict::False && !self.options.full_system {
                break;
            }
        }
        Ok(NodeStatus::conjunction(&statuses))
    }

    fn dispatch(&mut self, id: NodeId, eq: &Equation) -> Result<NodeStatus, TraceError> {
        let (left, right) = match eq.leading() {
            (Some(left), Some(right)) => (left.clone(), right.clone()),
            _ => return self.nullify(id, eq),
        };

        match (left.is_variable(), right.is_variable()) {
            (true, true) => {
                let alternatives = self.rule_one(left, right);
                self.branch(id, eq, alternatives)
            }
            (true, false) => self.branch(id, eq, rule_two(left, right)),
            (false, true) => self.branch(id, eq, rule_two(right, left)),
            // Reduced equations never share a leading symbol.
            (false, false) => Ok(NodeStatus::False),
        }
    }

    /// Rule 1: both sides start with a variable.
    fn rule_one(&mut self, left: Symbol, right: Symbol) -> Vec<(Substitution, RuleTag)> {
        let unify = Substitution::new(left.clone(), vec![right.clone()]);
        let (grow_left, grow_right) = match self.mode {
            AlgorithmMode::Standard => (
                Substitution::new(left.clone(), vec![right.clone(), left.clone()]),
                Substitution::new(right.clone(), vec![left.clone(), right.clone()]),
            ),
            AlgorithmMode::Finite => {
                let w = self.letters.fresh();
                let w2 = self.letters.fresh();
                (
                    Substitution::new(left.clone(), vec![right.clone(), w, left.clone()]),
                    Substitution::new(right.clone(), vec![left, w2, right]),
                )
            }
        };
        vec![
            (unify, RuleTag::Unify),
            (grow_left, RuleTag::PrependLeft),
            (grow_right, RuleTag::PrependRight),
        ]
    }

    /// Disjunction over alternative substitutions applied to `eq`.
    fn branch(
        &mut self,
        id: NodeId,
        eq: &Equation,
        alternatives: Vec<(Substitution, RuleTag)>,
    ) -> Result<NodeStatus, TraceError> {
        let mut statuses = Vec::with_capacity(alternatives.len());
        for (substitution, tag) in alternatives {
            let result = eq.substitute(&substitution);
            let child = self.add_node(id, EqSystem::single(result), substitution, tag)?;
            let status = self.expand(child)?;
            statuses.push(status);
            if status == NodeStatus::True && !self.options.full_graph {
                break;
            }
        }
        Ok(NodeStatus::disjunction(&statuses))
    }

    /// Rule 3: one side is empty, so every variable on the other side is null.
    fn nullify(&mut self, id: NodeId, eq: &Equation) -> Result<NodeStatus, TraceError> {
        let (result, nulled) = eq.substitute_vars_with_empty();
        debug!("nullify(id = {}, variables = {})", id, nulled.len());

        let mut chain = Vec::with_capacity(nulled.len());
        let mut current = eq.clone();
        let mut parent = id;
        for (i, variable) in nulled.iter().enumerate() {
            current = if i + 1 == nulled.len() {
                result.clone()
            } else {
                current.substitute(&Substitution::to_empty(variable.clone()))
            };
            parent = self.add_node(
                parent,
                EqSystem::single(current.clone()),
                Substitution::applying(variable.clone()),
                RuleTag::Nullify,
            )?;
            chain.push(parent);
        }

        let Some(&last) = chain.last() else {
            return Ok(NodeStatus::False);
        };
        let status = self.expand(last)?;
        for &node in &chain {
            self.tree.set_status(node, status);
        }
        Ok(status)
    }

    fn forced_substitution(&mut self, variable: Symbol, length: usize) -> Option<Substitution> {
        debug!("forced_substitution(variable = {}, length = {})", variable, length);
        if length == 0 {
            return Some(Substitution::to_empty(variable));
        }
        match self.mode {
            AlgorithmMode::Finite => {
                let letters = (0..length).map(|_| self.letters.fresh()).collect();
                Some(Substitution::new(variable, letters))
            }
            AlgorithmMode::Standard => None,
        }
    }

    /// Nearest ancestor whose equation is the same as `eq` up to letter renaming.
    fn find_repetition(&self, id: NodeId, eq: &Equation) -> Option<NodeId> {
        self.tree.ancestors(id).find(|&ancestor| {
            self.tree
                .node(ancestor)
                .equation()
                .is_some_and(|other| other.check_sameness(eq))
        })
    }

    fn add_node(
        &mut self,
        parent: NodeId,
        system: EqSystem,
        substitution: Substitution,
        tag: RuleTag,
    ) -> Result<NodeId, TraceError> {
        let edge_label = substitution.to_string();
        let id = self.tree.add_child(parent, system, substitution, tag);
        debug!("add_node(parent = {}, id = {}, edge = {})", parent, id, edge_label);

        let label = self.label(id);
        self.sink.write_node(id, &label)?;
        self.sink.write_labeled_edge(parent, id, &edge_label)?;
        Ok(id)
    }

    fn label(&self, id: NodeId) -> String {
        let node = self.tree.node(id);
        let mut label = String::new();
        if self.print_options.show_paths {
            label.push_str(&format!("[{}] ", node.path_string()));
        }
        label.push_str(&node.system().to_string());
        if self.print_options.show_structure {
            let (vars, consts, letters) = node.system().equations().iter().fold((0, 0, 0), |(v, c, l), eq| {
                let s = eq.structure();
                (v + s.vars_total(), c + s.consts_total(), l + s.letters_total())
            });
            label.push_str(&format!(" (vars: {}, consts: {}, letters: {})", vars, consts, letters));
        }
        label
    }
}

/// Rules 2 and 4: `variable` faces the ground symbol `head`.
fn rule_two(variable: Symbol, head: Symbol) -> Vec<(Substitution, RuleTag)> {
    vec![
        (Substitution::to_empty(variable.clone()), RuleTag::Erase),
        (Substitution::new(variable.clone(), vec![head, variable]), RuleTag::Prefix),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::trace::NoTrace;

    use test_log::test;

    fn run(consts: &str, vars: &str, text: &str, options: SolveOptions) -> (NodeStatus, Outcome) {
        let consts = Alphabet::parse(consts).unwrap();
        let vars = Alphabet::parse(vars).unwrap();
        let eq = Equation::parse(text, &consts, &vars).unwrap();
        run_equation(&consts, &vars, eq, options)
    }

    fn run_equation(consts: &Alphabet, vars: &Alphabet, eq: Equation, options: SolveOptions) -> (NodeStatus, Outcome) {
        let mode = options.mode().unwrap();
        let mut sink = NoTrace;
        let mut engine = Derivation::new(
            DerivationTree::new(EqSystem::single(eq)),
            &mut sink,
            LetterGenerator::new(consts, vars),
            options,
            PrintOptions::default(),
            mode,
        );
        let status = engine.run().unwrap();
        (status, engine.finish())
    }

    #[test]
    fn test_unify_first() {
        let (status, outcome) = run("{a}", "{u, v}", "u a v = v a u", SolveOptions::default());
        assert_eq!(status, NodeStatus::True);
        assert!(outcome.has_solution);
        assert!(!outcome.cycled);

        let tree = &outcome.tree;
        let first = tree.node(tree.root()).children()[0];
        assert_eq!(tree.node(first).path(), &[RuleTag::Unify]);
        // Only the first branch is explored.
        assert_eq!(tree.node(tree.root()).children().len(), 1);
    }

    #[test]
    fn test_full_graph_explores_all_branches() {
        let options = SolveOptions::default().with_full_graph(true).with_cycle_range(6);
        let (status, outcome) = run("{a}", "{u, v}", "u a v = v a u", options);
        assert_eq!(status, NodeStatus::True);
        assert_eq!(outcome.tree.node(outcome.tree.root()).children().len(), 3);
    }

    #[test]
    fn test_reducing_child() {
        let (status, outcome) = run("{a, b}", "{u}", "a u = a b", SolveOptions::default());
        assert_eq!(status, NodeStatus::True);
        let tree = &outcome.tree;
        let child = tree.node(tree.root()).children()[0];
        assert_eq!(tree.node(child).path(), &[RuleTag::Reduce]);
        assert_eq!(tree.node(child).system().to_string(), "u = b");
        assert_eq!(tree.node(tree.root()).status(), NodeStatus::True);
    }

    #[test]
    fn test_repetition_is_false() {
        let (status, outcome) = run("{a, b}", "{v}", "v b = a v", SolveOptions::default());
        assert_eq!(status, NodeStatus::False);
        assert!(outcome
            .tree
            .iter()
            .any(|(_, node)| matches!(node.status(), NodeStatus::Repeated(_))));
    }

    #[test]
    fn test_nullify_chain() {
        let (status, outcome) = run("{a}", "{u, v}", "u v u = $", SolveOptions::default());
        assert_eq!(status, NodeStatus::True);
        let tree = &outcome.tree;
        let nullified: Vec<_> = tree
            .iter()
            .filter(|(_, node)| node.path().last() == Some(&RuleTag::Nullify))
            .collect();
        assert_eq!(nullified.len(), 2);
        assert!(nullified.iter().all(|(_, node)| node.status() == NodeStatus::True));
    }

    #[test]
    fn test_depth_bound() {
        let options = SolveOptions::default().with_cycle_range(20);
        let (status, outcome) = run("{a, b}", "{u}", "u u a = b u u", options);
        assert_eq!(status, NodeStatus::Cycled);
        assert!(outcome.cycled);
        assert!(!outcome.has_solution);
        assert!(outcome.tree.iter().all(|(_, node)| node.depth() <= 21));
    }

    #[test]
    fn test_finite_mode_inserts_letters() {
        let options = SolveOptions::default().with_algorithm_mode("Finite").with_full_graph(true).with_cycle_range(3);
        let (_, outcome) = run("{}", "{u, v}", "u v = v u", options);
        let tree = &outcome.tree;
        let grow = tree
            .iter()
            .find(|(_, node)| node.path() == [RuleTag::PrependLeft])
            .map(|(id, _)| id)
            .unwrap();
        let substitution = tree.node(grow).substitution().unwrap();
        assert_eq!(substitution.right_part()[1], Symbol::letter("A"));
    }

    #[test]
    fn test_length_forced_erase() {
        let options = SolveOptions::default().with_length_analysis(true);
        let (status, outcome) = run("{a}", "{u}", "u u a = a u", options);
        assert_eq!(status, NodeStatus::True);
        let tree = &outcome.tree;
        let child = tree.node(tree.root()).children()[0];
        assert_eq!(tree.node(child).path(), &[RuleTag::Forced]);
        assert_eq!(tree.node(child).substitution().unwrap().to_string(), "u -> $");
    }

    #[test]
    fn test_length_unsatisfiable() {
        let options = SolveOptions::default().with_length_analysis(true);
        let (status, outcome) = run("{a}", "{u, v}", "u a v = v u", options);
        assert_eq!(status, NodeStatus::False);
        assert_eq!(outcome.tree.len(), 1);
    }

    fn child_with_path(outcome: &Outcome, path: &[RuleTag]) -> NodeId {
        outcome
            .tree
            .iter()
            .find(|(_, node)| node.path() == path)
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn test_letter_head_prefixes_variable() {
        let options = SolveOptions::default().with_algorithm_mode("Finite").with_full_graph(true).with_cycle_range(3);
        let (_, outcome) = run("{}", "{u, v}", "u v = v u", options);
        let tree = &outcome.tree;

        let grown = child_with_path(&outcome, &[RuleTag::PrependLeft]);
        assert_eq!(tree.node(grown).system().to_string(), "A u v = v A u");

        let children: Vec<_> = tree.node(grown).children().iter().map(|&c| tree.node(c)).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].path(), &[RuleTag::PrependLeft, RuleTag::Erase]);
        assert_eq!(children[0].substitution().unwrap().to_string(), "v -> $");
        assert_eq!(children[1].path(), &[RuleTag::PrependLeft, RuleTag::Prefix]);
        assert_eq!(children[1].substitution().unwrap().to_string(), "v -> A v");
    }

    #[test]
    fn test_letter_against_constant_is_false() {
        let consts = Alphabet::parse("{a}").unwrap();
        let vars = Alphabet::parse("{u}").unwrap();
        let u = Symbol::variable("u");
        let eq = Equation::new(vec![Symbol::letter("A"), u.clone()], vec![Symbol::constant("a"), u]);

        let (status, outcome) = run_equation(&consts, &vars, eq, SolveOptions::default().with_algorithm_mode("Finite"));
        assert_eq!(status, NodeStatus::False);

        let tree = &outcome.tree;
        let reduced = child_with_path(&outcome, &[RuleTag::Reduce]);
        assert_eq!(tree.node(reduced).system().to_string(), "A = a");
        assert_eq!(tree.node(reduced).status(), NodeStatus::False);
        assert!(tree.node(reduced).children().is_empty());
    }

    #[test]
    fn test_length_forced_letters() {
        let options = SolveOptions::default().with_algorithm_mode("Finite").with_length_analysis(true);
        let (status, outcome) = run("{a, b}", "{u, v}", "u u v = a b u v", options);
        let tree = &outcome.tree;

        let reduced = child_with_path(&outcome, &[RuleTag::Reduce]);
        assert_eq!(tree.node(reduced).system().to_string(), "u = a b");
        let forced = child_with_path(&outcome, &[RuleTag::Reduce, RuleTag::Forced]);
        assert_eq!(tree.node(forced).substitution().unwrap().to_string(), "u -> A B");
        assert_eq!(tree.node(forced).system().to_string(), "A B = a b");
        // Fresh letters never match constants.
        assert_eq!(status, NodeStatus::False);

        // Standard mode cannot force a non-empty length and dispatches instead.
        let options = SolveOptions::default().with_length_analysis(true);
        let (status, outcome) = run("{a, b}", "{u, v}", "u u v = a b u v", options);
        assert_eq!(status, NodeStatus::True);
        let tree = &outcome.tree;
        let reduced = child_with_path(&outcome, &[RuleTag::Reduce]);
        let first = tree.node(reduced).children()[0];
        assert_eq!(tree.node(first).path(), &[RuleTag::Reduce, RuleTag::Erase]);
    }
}
