// Fibonacci numbers, naive and memoised
//
// fib(0) = 0, fib(1) = 1. Results wrap modulo 2^64 past fib(93).

use ahash::AHashMap;

pub fn fib_naive(n: u64) -> u64 {
    match n {
        0 | 1 => n,
        _ => fib_naive(n - 1).wrapping_add(fib_naive(n - 2)),
    }
}

/// Memoising Fibonacci; the cache persists across calls until cleared
#[derive(Debug, Default)]
pub struct Memo {
    cache: AHashMap<u64, u64>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fib(&mut self, n: u64) -> u64 {
        if n < 2 {
            return n;
        }
        if let Some(&cached) = self.cache.get(&n) {
            return cached;
        }
        let value = self.fib(n - 1).wrapping_add(self.fib(n - 2));
        self.cache.insert(n, value);
        value
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
