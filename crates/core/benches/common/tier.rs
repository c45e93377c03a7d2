use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

pub fn bench_tier() -> BenchTier {
    match env::var("BLOBMARK_BENCH_TIER").as_deref() {
        Ok("full") => BenchTier::Full,
        _ => BenchTier::Quick,
    }
}

/// Input sizes exercised at each tier.
pub fn bench_sizes(tier: BenchTier) -> &'static [usize] {
    match tier {
        BenchTier::Quick => &[1_000, 5_000],
        BenchTier::Full => &[1_000, 5_000, 20_000],
    }
}
