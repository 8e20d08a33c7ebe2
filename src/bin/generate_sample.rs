use std::path::Path;

use anyhow::{Context, Result};

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

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let cities = ["Yangon", "Naypyitaw", "Mandalay"];
    let customer_types = ["Member", "Normal"];
    let genders = ["Male", "Female"];
    let product_lines = [
        "Health and beauty",
        "Electronic accessories",
        "Home and lifestyle",
        "Sports and travel",
        "Food and beverages",
        "Fashion accessories",
    ];
    let payments = ["Ewallet", "Cash", "Credit card"];

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let output_path = out_dir.join("supermarket_sales.csv");

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record([
        "Invoice ID",
        "City",
        "Customer_type",
        "Gender",
        "Product line",
        "Unit price",
        "Quantity",
        "Total",
        "Date",
        "Time",
        "Payment",
        "Rating",
    ])?;

    let n_rows = 1000;
    for _ in 0..n_rows {
        let invoice = format!(
            "{:03}-{:02}-{:04}",
            rng.next_u64() % 1000,
            rng.next_u64() % 100,
            rng.next_u64() % 10000
        );
        let unit_price = 10.0 + rng.next_f64() * 90.0;
        let quantity = 1 + rng.next_u64() % 10;
        // Total includes the 5% sales tax.
        let total = unit_price * quantity as f64 * 1.05;

        let month = 1 + rng.next_u64() % 3;
        let day = 1 + rng.next_u64() % 28;
        // Store hours: 10:00 to 20:59.
        let hour = 10 + rng.next_u64() % 11;
        let minute = rng.next_u64() % 60;

        let rating = rng.gauss(7.0, 1.4).clamp(4.0, 10.0);

        writer.write_record([
            invoice,
            rng.pick(&cities).to_string(),
            rng.pick(&customer_types).to_string(),
            rng.pick(&genders).to_string(),
            rng.pick(&product_lines).to_string(),
            format!("{unit_price:.2}"),
            quantity.to_string(),
            format!("{total:.2}"),
            format!("2019-{month:02}-{day:02}"),
            format!("{hour:02}:{minute:02}"),
            rng.pick(&payments).to_string(),
            format!("{rating:.1}"),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} transactions to {}", output_path.display());
    Ok(())
}
