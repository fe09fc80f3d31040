// Sliding-window (n-gram) generation, two ways
//
// For n = 2: [s0, s1, s2, s3] -> [s0, s1], [s1, s2], [s2, s3]
// For n = 3: [s0, s1, s2, s3] -> [s0, s1, s2], [s1, s2, s3]
//
// Both return no windows when n is 0 or longer than the sequence.

/// Walk `n` staggered iterators in lockstep
pub fn use_iterators<T: Clone>(seq: &[T], n: usize) -> Vec<Vec<T>> {
    if n == 0 || seq.len() < n {
        return Vec::new();
    }

    let mut iters: Vec<_> = (0..n).map(|offset| seq.iter().skip(offset)).collect();
    let mut windows = Vec::with_capacity(seq.len() - n + 1);
    loop {
        let mut window = Vec::with_capacity(n);
        for iter in iters.iter_mut() {
            match iter.next() {
                Some(value) => window.push(value.clone()),
                None => return windows,
            }
        }
        windows.push(window);
    }
}

/// Build each window by indexing from its start position
pub fn use_indexing<T: Clone>(seq: &[T], n: usize) -> Vec<Vec<T>> {
    if n == 0 || seq.len() < n {
        return Vec::new();
    }

    let mut windows = Vec::with_capacity(seq.len() - n + 1);
    for start in 0..=seq.len() - n {
        windows.push((0..n).map(|j| seq[start + j].clone()).collect());
    }
    windows
}
