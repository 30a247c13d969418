pub struct TranscriptLabel;

/// The labels used in transcript generator
impl TranscriptLabel {
    pub const BETA: &'static str = "beta";
    pub const GAMMA: &'static str = "gamma";
    pub const ALPHA: &'static str = "alpha";
    pub const NU: &'static str = "nu";
    pub const LAMBDA: &'static str = "lambda";

    /// Challenges of a vector lookup, in derivation order.
    pub const VECTOR_CHALLENGES: [&'static str; 4] =
        [Self::BETA, Self::GAMMA, Self::ALPHA, Self::NU];
    /// Challenges of the column-folding step of a table lookup.
    pub const TABLE_CHALLENGES: [&'static str; 1] = [Self::LAMBDA];
}
