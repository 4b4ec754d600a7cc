use serde::{Deserialize, Serialize};

pub const DEFAULT_ITERATIONS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of selection/simulation/backpropagation rounds per decision
    pub iterations: u32,

    /// Factor in front of ln(N) inside the UCB1 square root
    pub exploration: f64,

    /// Seed for the rollout rng. `None` draws one from the OS.
    pub seed: Option<u64>
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration: 2.0,
            seed: None
        }
    }
}
