use anyhow::{Context, Result};

/// Seeded SplitMix64 stream; enough for reproducible sample rows.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);

    let names = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"];
    let cities = ["Oslo", "Lima", "Paris, FR", "Nairobi", "Osaka"];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["id", "name", "city", "age", "score", "member"])?;

    let n_rows = 200;
    for id in 0..n_rows {
        let age = 18 + rng.below(60);
        let score = (rng.next_f64() * 10_000.0).round() / 100.0;
        let member = if rng.below(2) == 0 { "True" } else { "False" };

        // Roughly one row in ten has a missing age or score.
        let age = if rng.below(10) == 0 { String::new() } else { age.to_string() };
        let score = if rng.below(10) == 0 { String::new() } else { score.to_string() };

        writer.write_record([
            id.to_string(),
            rng.pick(&names).to_string(),
            rng.pick(&cities).to_string(),
            age,
            score,
            member.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} rows to {output_path}");
    Ok(())
}
