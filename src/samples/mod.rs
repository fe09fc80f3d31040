// Sample payloads for the CLI: pairs of implementations worth comparing.

pub mod fibonacci;
pub mod ngrams;

use crate::benchmarks::runner::setup;
use crate::benchmarks::{Candidate, SetupPolicy};
use crate::conditions::Condition;
use crate::errors::HarnessError;
use fibonacci::{fib_naive, Memo};
use ngrams::{use_indexing, use_iterators};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    /// Sliding windows over a sequence: condition is (length, n)
    #[default]
    Ngrams,
    /// Naive vs memoised Fibonacci: condition is (n)
    Fibonacci,
}

impl Suite {
    pub fn name(&self) -> &str {
        match self {
            Suite::Ngrams => "ngrams",
            Suite::Fibonacci => "fibonacci",
        }
    }

    /// Candidates of the suite along with their setups
    pub fn build(self) -> (Vec<Candidate<'static>>, SetupPolicy<'static>) {
        match self {
            Suite::Ngrams => ngram_suite(),
            Suite::Fibonacci => fibonacci_suite(),
        }
    }
}

fn ngram_suite() -> (Vec<Candidate<'static>>, SetupPolicy<'static>) {
    let sequence: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

    let iterators_seq = Rc::clone(&sequence);
    let indexing_seq = Rc::clone(&sequence);
    let candidates = vec![
        Candidate::new("use_iterators(seq({0}), {1})", move |c: &Condition| {
            let n = c.usize(1)?;
            let seq = iterators_seq.borrow();
            black_box(use_iterators(black_box(seq.as_slice()), n));
            Ok(())
        }),
        Candidate::new("use_indexing(seq({0}), {1})", move |c: &Condition| {
            let n = c.usize(1)?;
            let seq = indexing_seq.borrow();
            black_box(use_indexing(black_box(seq.as_slice()), n));
            Ok(())
        }),
    ];

    // Both strategies read the same sequence, rebuilt to the condition's length
    let mut setups = SetupPolicy::by_name();
    for name in ["use_iterators", "use_indexing"] {
        let sequence = Rc::clone(&sequence);
        setups = setups.register(name, move |c: &Condition| {
            let length = c.get(0)?;
            let length = u32::try_from(length)
                .map_err(|_| HarnessError::ValueOutOfRange { index: 0, value: length })?;
            *sequence.borrow_mut() = (0..length).collect();
            Ok(())
        });
    }

    (candidates, setups)
}

fn fibonacci_suite() -> (Vec<Candidate<'static>>, SetupPolicy<'static>) {
    let memo = Rc::new(RefCell::new(Memo::new()));

    let memo_routine = Rc::clone(&memo);
    let candidates = vec![
        Candidate::new("fib_naive({0})", |c: &Condition| {
            let n = c.u64(0)?;
            black_box(fib_naive(black_box(n)));
            Ok(())
        }),
        Candidate::new("fib_memo({0})", move |c: &Condition| {
            let n = c.u64(0)?;
            black_box(memo_routine.borrow_mut().fib(black_box(n)));
            Ok(())
        }),
    ];

    // Each batch starts from an empty cache
    let setups = vec![
        setup(|_: &Condition| Ok(())),
        setup(move |_: &Condition| {
            memo.borrow_mut().clear();
            Ok(())
        }),
    ];

    (candidates, SetupPolicy::Aligned(setups))
}
