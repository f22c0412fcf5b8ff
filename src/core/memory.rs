use super::steps::PlanStep;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ordered trace of the steps taken for one planning request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanMemory {
    steps: Vec<PlanStep>,
}

impl PlanMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to memory
    pub fn add_step(&mut self, step: PlanStep) {
        let description = step.describe();
        info!(target: "tripplanner::steps", "{}", description);
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<PlanStep> {
        self.steps
    }

}
