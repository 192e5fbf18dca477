//! Synthetic DSV generators for benchmarking and testing the indexer.
//!
//! Every pattern produces a rectangular table: each record has the same
//! number of fields and no field contains the delimiter or a newline.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy)]
pub enum DsvPattern {
    /// Standard tabular data with mixed types
    Tabular,
    /// Numeric-heavy data (financial, scientific)
    Numeric,
    /// Wide tables (many columns)
    Wide,
    /// Narrow but long tables (few columns, many rows)
    Long,
}

const WIDE_COLUMNS: usize = 64;

/// Generate DSV of at least `target_size` bytes.
pub fn generate_dsv(
    target_size: usize,
    pattern: DsvPattern,
    seed: Option<u64>,
    delimiter: char,
    include_header: bool,
) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random));
    let mut out = String::with_capacity(target_size + 256);

    if include_header {
        let header = header_fields(pattern);
        push_record(&mut out, delimiter, header.iter().map(String::as_str));
    }

    let mut row_id = 1usize;
    while out.len() < target_size {
        let fields = record_fields(pattern, row_id, &mut rng);
        push_record(&mut out, delimiter, fields.iter().map(String::as_str));
        row_id += 1;
    }

    out
}

fn header_fields(pattern: DsvPattern) -> Vec<String> {
    let names: &[&str] = match pattern {
        DsvPattern::Tabular => &["id", "name", "email", "age", "score", "active", "created"],
        DsvPattern::Numeric => &["id", "open", "high", "low", "close", "volume"],
        DsvPattern::Long => &["id", "value"],
        DsvPattern::Wide => {
            return (0..WIDE_COLUMNS).map(|i| format!("col{i}")).collect();
        }
    };
    names.iter().map(|s| s.to_string()).collect()
}

fn record_fields(pattern: DsvPattern, row_id: usize, rng: &mut ChaCha8Rng) -> Vec<String> {
    match pattern {
        DsvPattern::Tabular => vec![
            row_id.to_string(),
            format!("User{row_id}"),
            format!("user{row_id}@example.com"),
            rng.gen_range(18..80).to_string(),
            rng.gen_range(0..10000).to_string(),
            rng.gen::<bool>().to_string(),
            format!("2024-{:02}-{:02}", row_id % 12 + 1, row_id % 28 + 1),
        ],
        DsvPattern::Numeric => {
            let open: f64 = rng.gen_range(10.0..500.0);
            let high = open * rng.gen_range(1.0..1.1);
            let low = open * rng.gen_range(0.9..1.0);
            let close = rng.gen_range(low..=high);
            vec![
                row_id.to_string(),
                format!("{open:.2}"),
                format!("{high:.2}"),
                format!("{low:.2}"),
                format!("{close:.2}"),
                rng.gen_range(100..1_000_000u32).to_string(),
            ]
        }
        DsvPattern::Wide => (0..WIDE_COLUMNS)
            .map(|_| rng.gen_range(0..1000u32).to_string())
            .collect(),
        DsvPattern::Long => vec![row_id.to_string(), rng.gen_range(0..100u32).to_string()],
    }
}

fn push_record<'a>(out: &mut String, delimiter: char, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(field);
    }
    out.push('\n');
}
