use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// (site, longitude, latitude)
const SITES: [(&str, f64, f64); 3] = [
    ("CCSFS SLC 40", -80.577366, 28.561857),
    ("KSC LC 39A", -80.603956, 28.608058),
    ("VAFB SLC 4E", -120.610829, 34.632093),
];
const ORBITS: [&str; 6] = ["LEO", "ISS", "PO", "GTO", "SSO", "MEO"];
const PADS: [&str; 3] = [
    "5e9e3032383ecb6bb234e7ca",
    "5e9e3032383ecb267a34e7c7",
    "5e9e3033383ecbb9e534e7cc",
];

const FLIGHTS: usize = 120;

#[derive(Default)]
struct Columns {
    flight_number: Vec<i64>,
    booster_version: Vec<String>,
    payload_mass: Vec<f64>,
    orbit: Vec<String>,
    launch_site: Vec<String>,
    outcome: Vec<String>,
    flights: Vec<i64>,
    grid_fins: Vec<bool>,
    reused: Vec<bool>,
    legs: Vec<bool>,
    landing_pad: Vec<Option<String>>,
    block: Vec<f64>,
    reused_count: Vec<i64>,
    serial: Vec<String>,
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    class: Vec<i64>,
}

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut c = Columns::default();

    for i in 0..FLIGHTS {
        // Later flights: newer boosters, more reuse, better landing odds.
        let progress = i as f64 / FLIGHTS as f64;
        let (serial, block) = if progress < 0.1 {
            (format!("B00{:02}", 3 + i), 1.0)
        } else if progress < 0.7 {
            (format!("B10{:02}", (i % 60) + 1), if progress < 0.4 { 3.0 } else { 5.0 })
        } else {
            (format!("B20{:02}", i % 40), 5.0)
        };
        let reused_count = if progress < 0.1 { 0 } else { (rng.next_u64() % 12) as i64 };
        let (site, lon, lat) = *rng.pick(&SITES);
        let orbit = *rng.pick(&ORBITS);
        let payload = match orbit {
            "GTO" => 3000.0 + rng.next_f64() * 4000.0,
            "ISS" => 1500.0 + rng.next_f64() * 2000.0,
            _ => 300.0 + rng.next_f64() * 9500.0,
        };
        let legs = progress >= 0.05;
        let success = legs && rng.chance(0.55 + 0.4 * progress);
        let landing = if !legs {
            "None None".to_string()
        } else if orbit == "GTO" || rng.chance(0.6) {
            format!("{} ASDS", if success { "True" } else { "False" })
        } else {
            format!("{} RTLS", if success { "True" } else { "False" })
        };

        c.flight_number.push(i as i64 + 1);
        c.booster_version.push("Falcon 9".to_string());
        c.payload_mass.push((payload * 10.0).round() / 10.0);
        c.orbit.push(orbit.to_string());
        c.launch_site.push(site.to_string());
        c.outcome.push(landing);
        c.flights.push(reused_count + 1);
        c.grid_fins.push(progress >= 0.1);
        c.reused.push(reused_count > 0);
        c.legs.push(legs);
        c.landing_pad
            .push(legs.then(|| rng.pick(&PADS).to_string()));
        c.block.push(block);
        c.reused_count.push(reused_count);
        c.serial.push(serial);
        c.longitude.push(lon);
        c.latitude.push(lat);
        c.class.push(success as i64);
    }

    c
}

fn strings(v: &[String]) -> ArrayRef {
    Arc::new(StringArray::from(v.iter().map(|s| s.as_str()).collect::<Vec<_>>()))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let c = generate(&mut rng);

    let schema = Arc::new(Schema::new(vec![
        Field::new("FlightNumber", DataType::Int64, false),
        Field::new("BoosterVersion", DataType::Utf8, false),
        Field::new("PayloadMass", DataType::Float64, false),
        Field::new("Orbit", DataType::Utf8, false),
        Field::new("LaunchSite", DataType::Utf8, false),
        Field::new("Outcome", DataType::Utf8, false),
        Field::new("Flights", DataType::Int64, false),
        Field::new("GridFins", DataType::Boolean, false),
        Field::new("Reused", DataType::Boolean, false),
        Field::new("Legs", DataType::Boolean, false),
        Field::new("LandingPad", DataType::Utf8, true),
        Field::new("Block", DataType::Float64, false),
        Field::new("ReusedCount", DataType::Int64, false),
        Field::new("Serial", DataType::Utf8, false),
        Field::new("Longitude", DataType::Float64, false),
        Field::new("Latitude", DataType::Float64, false),
        Field::new("Class", DataType::Int64, false),
    ]));

    let landing_pad: ArrayRef = Arc::new(StringArray::from(
        c.landing_pad.iter().map(|p| p.as_deref()).collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(c.flight_number)),
            strings(&c.booster_version),
            Arc::new(Float64Array::from(c.payload_mass)),
            strings(&c.orbit),
            strings(&c.launch_site),
            strings(&c.outcome),
            Arc::new(Int64Array::from(c.flights)),
            Arc::new(BooleanArray::from(c.grid_fins)),
            Arc::new(BooleanArray::from(c.reused)),
            Arc::new(BooleanArray::from(c.legs)),
            landing_pad,
            Arc::new(Float64Array::from(c.block)),
            Arc::new(Int64Array::from(c.reused_count)),
            strings(&c.serial),
            Arc::new(Float64Array::from(c.longitude)),
            Arc::new(Float64Array::from(c.latitude)),
            Arc::new(Int64Array::from(c.class)),
        ],
    )
    .context("building record batch")?;

    // Write Parquet
    let output_path = "sample_launches.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {FLIGHTS} launches to {output_path}");
    Ok(())
}
