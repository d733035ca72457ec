use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

use super::Bounds;

/// A struct that holds the results of a swarm minimization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Summary {
    /// The location bounds of the problem, `None` if there were none.
    pub bounds: Option<Bounds>,
    /// The names of the parameters, `None` if no names were set.
    pub parameter_names: Option<Vec<String>>,
    /// A message describing why the solve ended.
    pub message: String,
    /// The global best location.
    pub x: Vec<Float>,
    /// The (penalized) fitness at [`Summary::x`].
    pub fx: Float,
    /// Whether any particle ever satisfied all constraints.
    pub feasible: bool,
    /// Whether the fitness tolerance was reached.
    pub converged: bool,
    /// The number of generations run after initialization.
    pub generations: usize,
    /// The number of objective evaluations.
    pub objective_evals: usize,
    /// The number of constraint evaluations.
    pub constraint_evals: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = format!(
            "╒══════════════════════════════════════════════════════════════════════════════╕
│{:^78}│",
            "SWARM RESULTS",
        );
        let status = format!(
            "╞═══════════════════════════════════════════╤══════════════════════════════════╡
│ Status: {:<33} │ fval: {:+16.8E}           │",
            match (self.converged, self.feasible) {
                (true, _) => "Converged",
                (false, true) => "Feasible",
                (false, false) => "No feasible solution found",
            },
            self.fx,
        );
        let counts = format!(
            "├───────────────────────────────────────────┴──────────────────────────────────┤
│ Generations: {:<10} #f(x): {:<12} #g(x): {:<24} │",
            self.generations, self.objective_evals, self.constraint_evals,
        );
        let message = format!(
            "├──────────────────────────────────────────────────────────────────────────────┤
│ Message: {:<67} │",
            self.message,
        );
        let header =
            "├──────────────╥────────────────────────╥──────────────┬──────────────┬────────┤
│ Parameter    ║ Value                  ║       -Bound │       +Bound │ Limit? │
├──────────────╫────────────────────────╫──────────────┼──────────────┼────────┤"
                .to_string();
        let mut rows: Vec<String> = vec![];
        for (i, xi) in self.x.iter().enumerate() {
            let name = self
                .parameter_names
                .as_ref()
                .and_then(|names| names.get(i).cloned())
                .unwrap_or_else(|| format!("x_{}", i));
            let bound = self.bounds.as_ref().and_then(|b| b.get(i));
            let (lower, upper) =
                bound.map_or((Float::NEG_INFINITY, Float::INFINITY), |b| (b.lower(), b.upper()));
            rows.push(format!(
                "│ {:<12} ║ {:>+22.12E} ║ {:>+12.3E} │ {:>+12.3E} │ {:^6} │",
                name,
                xi,
                lower,
                upper,
                if bound.map_or(false, |b| b.at_bound(*xi)) {
                    "yes"
                } else {
                    ""
                }
            ));
        }
        let bottom =
            "└──────────────╨────────────────────────╨──────────────┴──────────────┴────────┘"
                .to_string();
        let out = [title, status, counts, message, header, rows.join("\n"), bottom].join("\n");
        write!(f, "{}", out)
    }
}
