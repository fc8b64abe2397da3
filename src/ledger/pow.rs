use sha2::{Digest, Sha256};

/// Search non-negative integers in increasing order for the first proof
/// satisfying [`valid_proof`] against `last_proof`.
///
/// CPU-bound and unbounded: blocks the caller until a proof is found.
pub fn find_proof(last_proof: u64, difficulty: u32) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof, difficulty) {
        proof += 1;
    }
    proof
}

/// The puzzle predicate: SHA-256 of the concatenated decimal texts of
/// `last_proof` and `proof` (no separator) must start with `difficulty`
/// leading zeros in hex.
///
/// The search above and chain validation must both call this exact
/// function.
pub fn valid_proof(last_proof: u64, proof: u64, difficulty: u32) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest
        .chars()
        .take(difficulty as usize)
        .all(|c| c == '0')
}

#[cfg(test)]
mod tests {
    use super::{find_proof, valid_proof};

    #[test]
    fn found_proof_satisfies_the_predicate() {
        for last_proof in [0u64, 100, 35_293] {
            let proof = find_proof(last_proof, 2);
            assert!(valid_proof(last_proof, proof, 2));
        }
    }

    #[test]
    fn zero_difficulty_accepts_the_first_candidate() {
        assert!(valid_proof(100, 0, 0));
        assert_eq!(find_proof(100, 0), 0);
    }

    #[test]
    fn harder_prefixes_imply_easier_ones() {
        let proof = find_proof(100, 2);
        assert!(valid_proof(100, proof, 1));
        assert!(valid_proof(100, proof, 0));
    }

    #[test]
    fn search_returns_the_smallest_valid_proof() {
        let proof = find_proof(7, 1);
        for candidate in 0..proof {
            assert!(!valid_proof(7, candidate, 1));
        }
    }
}
