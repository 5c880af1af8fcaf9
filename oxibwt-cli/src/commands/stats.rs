//! Stats command implementation.

use crate::utils::{describe, read_input};
use oxibwt::BlockStats;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable block statistics.
#[derive(Debug, Serialize, Deserialize)]
struct StatsJson {
    source: String,
    size: usize,
    distinct_symbols: usize,
    input_runs: usize,
    bwt_runs: usize,
    primary_index: u32,
    zero_ranks: usize,
    zero_rank_ratio: f64,
    input_entropy: f64,
    mtf_entropy: f64,
    estimated_coded_size: usize,
}

impl StatsJson {
    fn from_stats(source: String, stats: &BlockStats) -> Self {
        Self {
            source,
            size: stats.len,
            distinct_symbols: stats.distinct_symbols,
            input_runs: stats.input_runs,
            bwt_runs: stats.bwt_runs,
            primary_index: stats.primary_index,
            zero_ranks: stats.zero_ranks,
            zero_rank_ratio: stats.zero_rank_ratio(),
            input_entropy: stats.input_entropy,
            mtf_entropy: stats.mtf_entropy,
            estimated_coded_size: stats.estimated_coded_len(),
        }
    }
}

pub fn cmd_stats(input: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let stats = BlockStats::analyze(&data)?;
    let source = describe(input, "stdin");

    if json {
        let report = StatsJson::from_stats(source, &stats);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Block: {} ({} bytes)", source, stats.len);
    println!("  Distinct symbols:  {}", stats.distinct_symbols);
    println!("  Primary index:     {}", stats.primary_index);
    println!("  Runs (input):      {}", stats.input_runs);
    println!("  Runs (BWT):        {}", stats.bwt_runs);
    println!(
        "  Zero MTF ranks:    {} ({:.1}%)",
        stats.zero_ranks,
        stats.zero_rank_ratio() * 100.0
    );
    println!("  Entropy (input):   {:.3} bits/byte", stats.input_entropy);
    println!("  Entropy (MTF):     {:.3} bits/byte", stats.mtf_entropy);
    println!(
        "  Order-0 bound:     {} bytes",
        stats.estimated_coded_len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_json_fields() {
        let stats = BlockStats::analyze(b"ABRACADABRA!").unwrap();
        let report = StatsJson::from_stats("abra.txt".to_string(), &stats);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["source"], "abra.txt");
        assert_eq!(value["size"], 12);
        assert_eq!(value["primary_index"], 3);
        assert_eq!(value["bwt_runs"], 8);

        let parsed: StatsJson = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.zero_ranks, 4);
    }
}
