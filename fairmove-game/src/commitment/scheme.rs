/// Trait for commitment schemes
pub trait CommitmentScheme {
    type Key;
    type Commitment;

    fn commit(key: &Self::Key, message: &[u8]) -> crate::Result<Self::Commitment>;
    fn verify(commitment: &Self::Commitment, key: &Self::Key, message: &[u8]) -> bool;
}
