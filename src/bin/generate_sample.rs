//! Writes a synthetic `spacex_launch_dash.csv` so the dashboard can be started
//! without the real launch records.
//!
//! Usage: `generate_sample [OUTPUT]`

use anyhow::{Context, Result};
use serde::Serialize;

const DEFAULT_OUTPUT: &str = "spacex_launch_dash.csv";
const LAUNCHES: usize = 56;

#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// (category, first flight, payload span in kg, success probability)
const ERAS: [(&str, usize, (f64, f64), f64); 5] = [
    ("v1.0", 1, (0.0, 700.0), 0.2),
    ("v1.1", 6, (500.0, 4_500.0), 0.4),
    ("FT", 21, (2_000.0, 9_600.0), 0.7),
    ("B4", 36, (2_000.0, 9_600.0), 0.6),
    ("B5", 46, (2_000.0, 9_600.0), 0.9),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

fn era_for(flight: usize) -> (&'static str, (f64, f64), f64) {
    let (category, _, span, p_success) = ERAS
        .iter()
        .rev()
        .find(|(_, first, _, _)| flight >= *first)
        .copied()
        .unwrap_or(ERAS[0]);
    (category, span, p_success)
}

fn site_for(category: &str, rng: &mut SimpleRng) -> &'static str {
    let roll = rng.next_f64();
    if roll < 0.2 {
        return "VAFB SLC-4E";
    }
    match category {
        "v1.0" | "v1.1" => "CCAFS LC-40",
        "FT" => "KSC LC-39A",
        _ if roll < 0.6 => "CCAFS SLC-40",
        _ => "KSC LC-39A",
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for i in 0..LAUNCHES {
        let flight_number = i + 1;
        let (category, (low, high), p_success) = era_for(flight_number);
        let row = SampleRow {
            index: i,
            flight_number,
            site: site_for(category, &mut rng),
            class: u8::from(rng.next_f64() < p_success),
            payload_kg: rng.uniform(low, high).round(),
            booster_version: format!("F9 {category} B{:04}", 1000 + flight_number),
            booster_category: category,
        };
        writer
            .serialize(&row)
            .with_context(|| format!("writing row {flight_number}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {LAUNCHES} launches to {output_path}");
    Ok(())
}
