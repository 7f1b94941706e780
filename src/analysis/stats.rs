/// USD per 1K tokens, GPT-4-class pricing. Estimation only; never affects
/// scoring.
const INPUT_COST_PER_1K: f64 = 0.03;
const OUTPUT_COST_PER_1K: f64 = 0.06;

/// Usage counters accumulated over one orchestrator's lifetime.
/// Observational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub entries: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub failures: usize,
    /// Tokens reported by the judge across fresh calls. Cache hits add
    /// nothing.
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl RunStats {
    pub fn estimated_cost(&self) -> f64 {
        (self.input_tokens as f64 / 1000.0) * INPUT_COST_PER_1K
            + (self.output_tokens as f64 / 1000.0) * OUTPUT_COST_PER_1K
    }
}
