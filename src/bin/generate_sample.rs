//! Writes a synthetic penguins CSV for development without the bundled
//! dataset. Measurements are drawn from per-species Gaussian
//! distributions loosely matching the Palmer Archipelago surveys.

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

struct SpeciesParams {
    species: &'static str,
    islands: &'static [&'static str],
    count: usize,
    bill_length: (f64, f64),
    bill_depth: (f64, f64),
    flipper_length: (f64, f64),
    body_mass: (f64, f64),
}

// (mean, std) per measurement
const PARAMS: [SpeciesParams; 3] = [
    SpeciesParams {
        species: "Adelie",
        islands: &["Torgersen", "Biscoe", "Dream"],
        count: 152,
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper_length: (190.0, 6.5),
        body_mass: (3700.0, 460.0),
    },
    SpeciesParams {
        species: "Chinstrap",
        islands: &["Dream"],
        count: 68,
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper_length: (196.0, 7.1),
        body_mass: (3733.0, 384.0),
    },
    SpeciesParams {
        species: "Gentoo",
        islands: &["Biscoe"],
        count: 124,
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper_length: (217.0, 6.5),
        body_mass: (5076.0, 504.0),
    },
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "penguins_sample.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "island",
            "bill_length_mm",
            "bill_depth_mm",
            "flipper_length_mm",
            "body_mass_g",
            "sex",
            "species",
        ])
        .expect("Failed to write header");

    let mut total = 0usize;
    for params in &PARAMS {
        for _ in 0..params.count {
            let island = params.islands[(rng.next_u64() as usize) % params.islands.len()];
            let sex = if rng.next_f64() < 0.5 { "Male" } else { "Female" };

            let (mu, sigma) = params.bill_length;
            let bill_length = (rng.gauss(mu, sigma) * 10.0).round() / 10.0;
            let (mu, sigma) = params.bill_depth;
            let bill_depth = (rng.gauss(mu, sigma) * 10.0).round() / 10.0;
            let (mu, sigma) = params.flipper_length;
            let flipper_length = rng.gauss(mu, sigma).round();
            let (mu, sigma) = params.body_mass;
            let body_mass = (rng.gauss(mu, sigma) / 25.0).round() * 25.0;

            let record = [
                island.to_string(),
                format!("{bill_length:.1}"),
                format!("{bill_depth:.1}"),
                format!("{flipper_length:.0}"),
                format!("{body_mass:.0}"),
                sex.to_string(),
                params.species.to_string(),
            ];
            writer.write_record(&record).expect("Failed to write row");
            total += 1;
        }
    }

    writer.flush().expect("Failed to flush output file");
    println!("Wrote {total} penguins to {output_path}");
}
