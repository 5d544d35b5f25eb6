/// Trial division over candidates of the form 6k ± 1
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the smallest prime strictly greater than `n`
pub fn next_prime(n: usize) -> usize {
    if n <= 1 {
        return 2;
    }

    let mut candidate = n + 1;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod test {
    use super::{is_prime, next_prime};

    #[test]
    fn small_numbers() {
        let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn squares_of_primes_are_composite() {
        for p in [5, 7, 11, 13, 29, 31] {
            assert!(!is_prime(p * p), "{} reported prime", p * p);
        }
        assert!(!is_prime(5 * 7));
        assert!(is_prime(7919));
    }

    #[test]
    fn next_prime_is_strictly_greater() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(13), 17);
        assert_eq!(next_prime(17), 19);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(7907), 7919);
    }

    #[test]
    fn capacity_sequence() {
        let mut cap = 13;
        let seq: Vec<usize> = (0..6)
            .map(|_| {
                cap = next_prime(cap);
                cap
            })
            .collect();
        assert_eq!(seq, vec![17, 19, 23, 29, 31, 37]);
    }
}
