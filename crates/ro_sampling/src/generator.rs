use rand::Rng;
use ro_sequence::Base;
use ro_sequence::NucleotideVec;

/// Draw `length` bases independently and uniformly from {A, C, G, T}.
pub fn random_sequence<R: Rng>(rng: &mut R, length: usize) -> NucleotideVec {
    (0..length).map(|_| rng.random::<Base>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_sequence_length() {
        let mut rng = StdRng::seed_from_u64(0);
        for len in [0, 1, 2, 61, 9999] {
            assert_eq!(random_sequence(&mut rng, len).len(), len);
        }
    }

    #[test]
    fn test_random_sequence_is_seeded() {
        let a = random_sequence(&mut StdRng::seed_from_u64(3), 100);
        let b = random_sequence(&mut StdRng::seed_from_u64(3), 100);
        let c = random_sequence(&mut StdRng::seed_from_u64(4), 100);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
