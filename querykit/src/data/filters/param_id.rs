//! Parameter name generation
//!
//! Every generated name is 32 ASCII letters: a per-process random salt followed
//! by a base-52 encoding of a process-wide counter. Names are unique for the
//! life of the process without tracking which ones were issued.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// Total length of a generated parameter name
pub const PARAM_ID_LEN: usize = 32;

/// Letters drawn once per process
const SALT_LEN: usize = 20;

/// Letters encoding the counter (52^12 > u64::MAX)
const COUNTER_LEN: usize = PARAM_ID_LEN - SALT_LEN;

const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

static SALT: LazyLock<String> = LazyLock::new(|| {
    let mut rng = rand::thread_rng();
    (0..SALT_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
});

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh parameter name
pub fn unique_parameter_id() -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let mut id = String::with_capacity(PARAM_ID_LEN);
    id.push_str(&SALT);
    id.push_str(&encode_counter(n));
    id
}

/// Fixed-width base-52 encoding, most significant letter first
fn encode_counter(mut n: u64) -> String {
    let mut letters = [ALPHABET[0]; COUNTER_LEN];
    for slot in letters.iter_mut().rev() {
        *slot = ALPHABET[(n % 52) as usize];
        n /= 52;
    }
    letters.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;

    #[test]
    fn test_id_is_32_letters() {
        let id = unique_parameter_id();
        assert_eq!(id.len(), PARAM_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| unique_parameter_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_ids_share_process_salt() {
        let a = unique_parameter_id();
        let b = unique_parameter_id();
        assert_eq!(&a[..SALT_LEN], &b[..SALT_LEN]);
        assert_ne!(&a[SALT_LEN..], &b[SALT_LEN..]);
    }

    #[test]
    fn test_ids_distinct_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| (0..250).map(|_| unique_parameter_id()).collect::<Vec<_>>()))
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 1000);
    }

    #[test]
    fn test_encode_counter() {
        assert_eq!(encode_counter(0), "aaaaaaaaaaaa");
        assert_eq!(encode_counter(1), "aaaaaaaaaaab");
        assert_eq!(encode_counter(51), "aaaaaaaaaaaZ");
        assert_eq!(encode_counter(52), "aaaaaaaaaaba");
        assert_eq!(encode_counter(u64::MAX).len(), COUNTER_LEN);
    }
}
