use std::fmt;

use crate::equation::Equation;

/// A conjunction of equations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EqSystem {
    equations: Vec<Equation>,
}

impl EqSystem {
    pub fn new(equations: Vec<Equation>) -> Self {
        Self { equations }
    }

    pub fn single(equation: Equation) -> Self {
        Self {
            equations: vec![equation],
        }
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// The only equation of a singleton system.
    pub fn as_single(&self) -> Option<&Equation> {
        match self.equations.as_slice() {
            [eq] => Some(eq),
            _ => None,
        }
    }

    /// Every member is already an identity.
    pub fn check_equality(&self) -> bool {
        self.equations.iter().all(Equation::check_equality)
    }

    /// Some member is already a ground contradiction.
    pub fn check_inequality(&self) -> bool {
        self.equations.iter().any(Equation::check_inequality)
    }
}

impl fmt::Display for EqSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, eq) in self.equations.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{}", eq)?;
        }
        Ok(())
    }
}
