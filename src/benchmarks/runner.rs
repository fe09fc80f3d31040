// Comparison harness - times every candidate under every condition

use crate::benchmarks::timer::time_batch;
use crate::benchmarks::{Reporter, ResultCollection, ResultRow};
use crate::conditions::{Condition, Inputs};
use crate::errors::HarnessError;
use ahash::AHashMap;
use tracing::{debug, info};

/// Repeat count used when none is configured
pub const DEFAULT_NUMBER: usize = 100_000;

pub type Routine<'a> = Box<dyn FnMut(&Condition) -> Result<(), HarnessError> + 'a>;
pub type Setup<'a> = Box<dyn FnMut(&Condition) -> Result<(), HarnessError> + 'a>;

/// Box a setup closure for [`SetupPolicy::Aligned`]
pub fn setup<'a, F>(f: F) -> Setup<'a>
where
    F: FnMut(&Condition) -> Result<(), HarnessError> + 'a,
{
    Box::new(f)
}

/// One implementation under comparison
pub struct Candidate<'a> {
    label: String,
    routine: Routine<'a>,
}

impl<'a> Candidate<'a> {
    pub fn new<F>(label: impl Into<String>, routine: F) -> Self
    where
        F: FnMut(&Condition) -> Result<(), HarnessError> + 'a,
    {
        Self { label: label.into(), routine: Box::new(routine) }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The part of the label before its first parenthesis, e.g. `fib` for
    /// `fib({0})`
    pub fn name(&self) -> &str {
        match self.label.find('(') {
            Some(end) => self.label[..end].trim(),
            None => self.label.trim(),
        }
    }
}

/// How setups are attached to candidates
pub enum SetupPolicy<'a> {
    /// No setup for any candidate
    None,
    /// Setups looked up by candidate name (see [`Candidate::name`])
    ByName(AHashMap<String, Setup<'a>>),
    /// One setup per candidate, matched by position
    Aligned(Vec<Setup<'a>>),
}

impl<'a> SetupPolicy<'a> {
    pub fn by_name() -> Self {
        SetupPolicy::ByName(AHashMap::new())
    }

    /// Register a named setup. Turns any other policy into `ByName`.
    pub fn register<F>(self, name: impl Into<String>, setup: F) -> Self
    where
        F: FnMut(&Condition) -> Result<(), HarnessError> + 'a,
    {
        let mut setups = match self {
            SetupPolicy::ByName(setups) => setups,
            _ => AHashMap::new(),
        };
        setups.insert(name.into(), Box::new(setup));
        SetupPolicy::ByName(setups)
    }

    fn validate(&self, candidates: &[Candidate<'_>]) -> Result<(), HarnessError> {
        match self {
            SetupPolicy::None => Ok(()),
            SetupPolicy::ByName(setups) => {
                for candidate in candidates {
                    if !setups.contains_key(candidate.name()) {
                        return Err(HarnessError::UnknownSetup {
                            name: candidate.name().to_string(),
                            label: candidate.label().to_string(),
                        });
                    }
                }
                Ok(())
            }
            SetupPolicy::Aligned(setups) => {
                if setups.len() != candidates.len() {
                    return Err(HarnessError::SetupCountMismatch {
                        setups: setups.len(),
                        candidates: candidates.len(),
                    });
                }
                Ok(())
            }
        }
    }

    fn get_mut(&mut self, position: usize, name: &str) -> Option<&mut Setup<'a>> {
        match self {
            SetupPolicy::None => None,
            SetupPolicy::ByName(setups) => setups.get_mut(name),
            SetupPolicy::Aligned(setups) => setups.get_mut(position),
        }
    }
}

pub struct Harness {
    number: usize,
    print_conditions: bool,
}

impl Harness {
    pub fn new() -> Self {
        Self { number: DEFAULT_NUMBER, print_conditions: false }
    }

    /// Number of times each candidate runs per condition
    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    pub fn with_print_conditions(mut self, print_conditions: bool) -> Self {
        self.print_conditions = print_conditions;
        self
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// Expand `inputs` once and time every candidate under every condition
    pub fn compare(
        &self,
        candidates: &mut [Candidate<'_>],
        inputs: &Inputs,
        setups: SetupPolicy<'_>,
    ) -> Result<ResultCollection, HarnessError> {
        let conditions = inputs.expand();
        self.compare_conditions(candidates, &conditions, setups)
    }

    /// Time every candidate under an already expanded list of conditions
    pub fn compare_conditions(
        &self,
        candidates: &mut [Candidate<'_>],
        conditions: &[Condition],
        mut setups: SetupPolicy<'_>,
    ) -> Result<ResultCollection, HarnessError> {
        if self.number == 0 {
            return Err(HarnessError::InvalidRepeatCount);
        }
        let mut performance = ResultCollection::new();
        for candidate in candidates.iter() {
            if performance.insert(candidate.label.clone(), Vec::new()).is_some() {
                return Err(HarnessError::DuplicateLabel(candidate.label.clone()));
            }
        }
        setups.validate(candidates)?;

        if self.print_conditions {
            Reporter::print_conditions(conditions);
        }

        for (position, candidate) in candidates.iter_mut().enumerate() {
            info!("testing {}...", candidate.label);
            let mut rows = Vec::with_capacity(conditions.len());

            for condition in conditions {
                if let Some(setup) = setups.get_mut(position, candidate.name()) {
                    setup(condition)?;
                }
                let routine = &mut candidate.routine;
                let elapsed = time_batch(self.number, || routine(condition))?;
                debug!(label = %candidate.label, %condition, ?elapsed, "timed condition");
                rows.push(ResultRow::new(condition.clone(), elapsed));
            }

            performance.insert(candidate.label.clone(), rows);
        }

        Ok(performance)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
