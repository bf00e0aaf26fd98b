/**
 * Random utilities.
 */

use std::cell::RefCell;
use std::ops::Range;
use std::time::SystemTime;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

thread_local! {
    static MY_RNG: RefCell<Mcg128Xsl64> = RefCell::new(Mcg128Xsl64::new(0));
    static CURR_SEED: RefCell<u64> = RefCell::new(0);
}

pub fn seed_from_system_time() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn current_seed() -> u64 {
    CURR_SEED.with(|s| {
        *s.borrow()
    })
}

pub fn set_seed(s: u64) {
    MY_RNG.with(|rng| {
        *rng.borrow_mut() = Mcg128Xsl64::seed_from_u64(s);
    });
    CURR_SEED.with(|se| {
        *se.borrow_mut() = s;
    });
}

/// Uniform in the range, the range must not be empty.
pub fn rand_range(r: &Range<usize>) -> usize {
    MY_RNG.with(|rng| {
        rng.borrow_mut().gen_range(r.start, r.end)
    })
}

pub fn rand_bool(probability: f64) -> bool {
    MY_RNG.with(|rng| {
        rng.borrow_mut().gen_bool(probability)
    })
}

pub fn sample<T>(s: &[T]) -> &T {
    assert!(!s.is_empty());
    let idx = rand_range(&(0..s.len()));
    &s[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        set_seed(42);
        let a: Vec<_> = (0..8).map(|_| rand_range(&(0..100))).collect();
        set_seed(42);
        let b: Vec<_> = (0..8).map(|_| rand_range(&(0..100))).collect();
        assert_eq!(a, b);
        assert_eq!(current_seed(), 42);
    }
}
