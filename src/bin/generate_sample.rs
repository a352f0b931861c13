use trendview_core::{JsonFileSource, MeasurementStore, RawMeasurement};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    env_logger::init();

    let mut rng = SimpleRng::new(42);

    // 40 measurements: X drifts upwards, Y is held nearly constant, Z is
    // flat apart from a spike every 13th id that should land outside the
    // fences.
    let records: Vec<RawMeasurement> = (1..=40)
        .map(|id| {
            let drift = id as f64 * 0.05;
            let spike = if id % 13 == 0 { 8.0 } else { 0.0 };
            RawMeasurement {
                id,
                x: 10.0 + drift + rng.gauss(0.0, 0.2),
                y: 5.0 + rng.gauss(0.0, 0.001),
                z: rng.gauss(0.0, 0.3) + spike,
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&records).expect("Failed to serialise records");

    let output_path = "sample_measurements.json";
    std::fs::write(output_path, &json).expect("Failed to write output file");

    println!("Wrote {} measurements to {output_path}", records.len());

    // Replay the file through the store and summarise each axis.
    let mut store = MeasurementStore::new(JsonFileSource);
    if store.load_from_source(output_path).is_err() {
        eprintln!("Generated file failed validation: {}", store.error_text());
        std::process::exit(1);
    }
    for result in store.axis_results() {
        println!(
            "{}: median {:.3}, fences [{:.3}, {:.3}], max variation {:.3}, trend {}, {} outliers",
            result.axis,
            result.stats.median,
            result.stats.lower_fence,
            result.stats.upper_fence,
            result.max_variation,
            result.trend,
            result.outliers.len()
        );
    }
}
