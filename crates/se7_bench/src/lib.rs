//! Benchmark utilities.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random ASCII field name of the given length.
pub fn random_name(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` random field names of the given length.
pub fn random_names(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_name(len)).collect()
}

/// Generate `count` random `i64` values.
pub fn random_values(count: usize) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}
