use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRow};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one column per launch attribute (recommended)
/// * `.json`    – `[{ "FlightNumber": 1, "LaunchSite": "...", ... }, ...]`
/// * `.csv`     – header row with the same column names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    LaunchDataset::from_rows(rows)
        .with_context(|| format!("validating launches in {}", path.display()))
}

/// Write the dataset as records-oriented JSON (readable by [`load_file`]).
pub fn save_json(path: &Path, dataset: &LaunchDataset) -> Result<()> {
    let rows: Vec<LaunchRow> = dataset.records().iter().map(|r| r.to_row()).collect();
    let text = serde_json::to_string_pretty(&rows).context("serializing launches")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "FlightNumber": 1, "PayloadMass": 6123.5, "LaunchSite": "CCSFS SLC 40", "Class": 0, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<LaunchRow> = serde_json::from_str(&text).context("parsing JSON launches")?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut rows = Vec::new();
    // Data rows are numbered from 1; the header is not counted.
    for (row_no, result) in reader.deserialize::<LaunchRow>().enumerate() {
        let row = result.with_context(|| format!("CSV data row {}", row_no + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch attribute.
///
/// Numeric columns may be any integer or float width; `Flights` and
/// `LandingPad` are optional.  Works with files written by **Pandas**
/// (`df.to_parquet()`), **Polars**, and the `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = Columns::locate(&batch)?;

        for row in 0..batch.num_rows() {
            let launch = columns
                .row(row)
                .with_context(|| format!("Parquet row {}", rows.len()))?;
            rows.push(launch);
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Column handles for one record batch.
struct Columns {
    flight_number: Arc<dyn Array>,
    booster_version: Arc<dyn Array>,
    payload_mass: Arc<dyn Array>,
    orbit: Arc<dyn Array>,
    launch_site: Arc<dyn Array>,
    outcome: Arc<dyn Array>,
    flights: Option<Arc<dyn Array>>,
    grid_fins: Arc<dyn Array>,
    reused: Arc<dyn Array>,
    legs: Arc<dyn Array>,
    landing_pad: Option<Arc<dyn Array>>,
    block: Arc<dyn Array>,
    reused_count: Arc<dyn Array>,
    serial: Arc<dyn Array>,
    longitude: Arc<dyn Array>,
    latitude: Arc<dyn Array>,
    class: Arc<dyn Array>,
}

impl Columns {
    fn locate(batch: &RecordBatch) -> Result<Self> {
        let required = |name: &str| -> Result<Arc<dyn Array>> {
            batch
                .column_by_name(name)
                .cloned()
                .with_context(|| format!("Parquet file missing '{name}' column"))
        };
        let optional = |name: &str| batch.column_by_name(name).cloned();

        Ok(Columns {
            flight_number: required("FlightNumber")?,
            booster_version: required("BoosterVersion")?,
            payload_mass: required("PayloadMass")?,
            orbit: required("Orbit")?,
            launch_site: required("LaunchSite")?,
            outcome: required("Outcome")?,
            flights: optional("Flights"),
            grid_fins: required("GridFins")?,
            reused: required("Reused")?,
            legs: required("Legs")?,
            landing_pad: optional("LandingPad"),
            block: required("Block")?,
            reused_count: required("ReusedCount")?,
            serial: required("Serial")?,
            longitude: required("Longitude")?,
            latitude: required("Latitude")?,
            class: required("Class")?,
        })
    }

    fn row(&self, row: usize) -> Result<LaunchRow> {
        let flights = match &self.flights {
            Some(col) if !col.is_null(row) => to_u32(extract_f64(col, row, "Flights")?, "Flights")?,
            _ => 1,
        };
        let landing_pad = match &self.landing_pad {
            Some(col) if !col.is_null(row) => Some(extract_string(col, row, "LandingPad")?),
            _ => None,
        };

        Ok(LaunchRow {
            flight_number: to_u32(extract_f64(&self.flight_number, row, "FlightNumber")?, "FlightNumber")?,
            booster_version: extract_string(&self.booster_version, row, "BoosterVersion")?,
            payload_mass: extract_f64(&self.payload_mass, row, "PayloadMass")?,
            orbit: extract_string(&self.orbit, row, "Orbit")?,
            launch_site: extract_string(&self.launch_site, row, "LaunchSite")?,
            outcome: extract_string(&self.outcome, row, "Outcome")?,
            flights,
            grid_fins: extract_bool(&self.grid_fins, row, "GridFins")?,
            reused: extract_bool(&self.reused, row, "Reused")?,
            legs: extract_bool(&self.legs, row, "Legs")?,
            landing_pad,
            block: extract_f64(&self.block, row, "Block")?,
            reused_count: to_u32(extract_f64(&self.reused_count, row, "ReusedCount")?, "ReusedCount")?,
            serial: extract_string(&self.serial, row, "Serial")?,
            longitude: extract_f64(&self.longitude, row, "Longitude")?,
            latitude: extract_f64(&self.latitude, row, "Latitude")?,
            class: extract_f64(&self.class, row, "Class")?,
        })
    }
}

fn to_u32(v: f64, name: &str) -> Result<u32> {
    if v.fract() != 0.0 || v < 0.0 || v > u32::MAX as f64 {
        bail!("'{name}' must be a non-negative integer, got {v}");
    }
    Ok(v as u32)
}

/// Read any integer or float column as `f64`.
fn extract_f64(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::UInt64 => any.downcast_ref::<UInt64Array>().map(|a| a.value(row) as f64),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as f64),
        other => bail!("'{name}' has type {other:?}, expected a numeric column"),
    };
    value.with_context(|| format!("'{name}' could not be read as a number"))
}

fn extract_string(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .with_context(|| format!("'{name}' is not a StringArray"))?;
            Ok(s.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("'{name}' has type {other:?}, expected a string column"),
    }
}

fn extract_bool(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<bool> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    match col.data_type() {
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .with_context(|| format!("'{name}' is not a BooleanArray"))?;
            Ok(arr.value(row))
        }
        _ => match extract_f64(col, row, name)? {
            v if v == 0.0 => Ok(false),
            v if v == 1.0 => Ok(true),
            v => bail!("'{name}' must be boolean, got {v}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RecordError, SuccessClass};
    use crate::data::sample::sample_dataset;
    use arrow::array::{ArrayRef, Float32Array, LargeStringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    const CSV_HEADER: &str = "FlightNumber,BoosterVersion,PayloadMass,Orbit,LaunchSite,Outcome,Flights,GridFins,Reused,Legs,LandingPad,Block,ReusedCount,Serial,Longitude,Latitude,Class";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn csv_with_pandas_booleans() {
        let body = format!(
            "{CSV_HEADER}\n\
             1,Falcon 9,525.0,LEO,CCSFS SLC 40,None None,1,False,False,False,,1.0,0,B0005,-80.57,28.56,0\n\
             2,Falcon 9,3170.0,GTO,KSC LC 39A,True ASDS,2,True,True,True,5e9e30,5.0,1,B1051,-80.60,28.60,1\n"
        );
        let f = write_temp(".csv", &body);
        let ds = load_file(f.path()).unwrap();

        assert_eq!(ds.len(), 2);
        let recs = ds.records();
        assert_eq!(recs[0].landing_pad, None);
        assert!(!recs[0].grid_fins);
        assert!(recs[1].legs);
        assert_eq!(recs[1].flights, 2);
        assert_eq!(recs[1].class, SuccessClass::Success);
        assert_eq!(ds.sites(), ["CCSFS SLC 40", "KSC LC 39A"]);
    }

    #[test]
    fn json_round_trip_of_sample() {
        let ds = sample_dataset().unwrap();
        let f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        save_json(f.path(), &ds).unwrap();

        let back = load_file(f.path()).unwrap();
        assert_eq!(back.records(), ds.records());
    }

    #[test]
    fn json_without_flights_defaults_to_one() {
        let body = r#"[{"FlightNumber": 4, "BoosterVersion": "Falcon 9", "PayloadMass": 500,
            "Orbit": "PO", "LaunchSite": "VAFB SLC 4E", "Outcome": "False Ocean",
            "GridFins": false, "Reused": 0, "Legs": "True", "LandingPad": null,
            "Block": 1, "ReusedCount": 0, "Serial": "B1003",
            "Longitude": -120.61, "Latitude": 34.63, "Class": 0}]"#;
        let f = write_temp(".json", body);
        let ds = load_file(f.path()).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.flights, 1);
        assert!(rec.legs);
        assert!(!rec.reused);
    }

    #[test]
    fn invalid_class_surfaces_record_error() {
        let body = format!(
            "{CSV_HEADER}\n1,Falcon 9,525.0,LEO,CCSFS SLC 40,None None,1,False,False,False,,1.0,0,B0005,-80.57,28.56,3\n"
        );
        let f = write_temp(".csv", &body);
        let err = load_file(f.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::InvalidClass { flight: 1, value: 3.0 })
        );
    }

    #[test]
    fn csv_error_names_the_data_row() {
        let body = format!(
            "{CSV_HEADER}\n1,Falcon 9,heavy,LEO,CCSFS SLC 40,None None,1,False,False,False,,1.0,0,B0005,-80.57,28.56,0\n"
        );
        let f = write_temp(".csv", &body);
        let err = load_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV data row 1"));
    }

    // -- Parquet --

    /// Two launches with a deliberate mix of Arrow column types.
    fn col<A: Array + 'static>(name: &'static str, array: A) -> (&'static str, ArrayRef) {
        (name, Arc::new(array))
    }

    fn launch_columns() -> Vec<(&'static str, ArrayRef)> {
        vec![
            col("FlightNumber", Int32Array::from(vec![1, 2])),
            col("BoosterVersion", StringArray::from(vec!["Falcon 9", "Falcon 9"])),
            col("PayloadMass", Float64Array::from(vec![525.0, 3170.0])),
            col("Orbit", LargeStringArray::from(vec!["LEO", "GTO"])),
            col("LaunchSite", StringArray::from(vec!["CCSFS SLC 40", "KSC LC 39A"])),
            col("Outcome", StringArray::from(vec!["None None", "True ASDS"])),
            col("Flights", UInt32Array::from(vec![1, 3])),
            col("GridFins", BooleanArray::from(vec![false, true])),
            col("Reused", Int64Array::from(vec![0, 1])),
            col("Legs", BooleanArray::from(vec![false, true])),
            col("LandingPad", StringArray::from(vec![None, Some("5e9e30")])),
            col("Block", Float32Array::from(vec![1.0, 5.0])),
            col("ReusedCount", UInt64Array::from(vec![0, 2])),
            col("Serial", StringArray::from(vec!["B0005", "B1051"])),
            col("Longitude", Float64Array::from(vec![-80.57, -80.60])),
            col("Latitude", Float64Array::from(vec![28.56, 28.60])),
            col("Class", Int64Array::from(vec![0, 1])),
        ]
    }

    fn replace(
        mut columns: Vec<(&'static str, ArrayRef)>,
        name: &str,
        array: Option<ArrayRef>,
    ) -> Vec<(&'static str, ArrayRef)> {
        let idx = columns.iter().position(|(n, _)| *n == name).unwrap();
        match array {
            Some(a) => columns[idx].1 = a,
            None => {
                columns.remove(idx);
            }
        }
        columns
    }

    fn write_parquet(columns: Vec<(&'static str, ArrayRef)>) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(
            columns
                .iter()
                .map(|(name, a)| Field::new(*name, a.data_type().clone(), true))
                .collect::<Vec<_>>(),
        ));
        let batch =
            RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, a)| a).collect())
                .unwrap();

        let f = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(f.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        f
    }

    #[test]
    fn parquet_mixed_column_types() {
        let f = write_parquet(launch_columns());
        let ds = load_file(f.path()).unwrap();

        assert_eq!(ds.len(), 2);
        let recs = ds.records();
        assert_eq!(recs[0].flight_number, 1);
        assert_eq!(recs[0].orbit, "LEO");
        assert_eq!(recs[0].landing_pad, None);
        assert!(!recs[0].reused);
        assert_eq!(recs[0].class, SuccessClass::Failure);

        assert_eq!(recs[1].flights, 3);
        assert!(recs[1].reused);
        assert!(recs[1].legs);
        assert_eq!(recs[1].landing_pad.as_deref(), Some("5e9e30"));
        assert_eq!(recs[1].block, 5.0);
        assert_eq!(recs[1].reused_count, 2);
        assert_eq!(recs[1].class, SuccessClass::Success);
        assert_eq!(ds.sites(), ["CCSFS SLC 40", "KSC LC 39A"]);
    }

    #[test]
    fn parquet_without_flights_defaults_to_one() {
        let f = write_parquet(replace(launch_columns(), "Flights", None));
        let ds = load_file(f.path()).unwrap();
        assert!(ds.records().iter().all(|r| r.flights == 1));
    }

    #[test]
    fn parquet_all_null_landing_pad() {
        let pads: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>, None]));
        let f = write_parquet(replace(launch_columns(), "LandingPad", Some(pads)));
        let ds = load_file(f.path()).unwrap();
        assert!(ds.records().iter().all(|r| r.landing_pad.is_none()));
    }

    #[test]
    fn parquet_invalid_class_surfaces_record_error() {
        let class: ArrayRef = Arc::new(Int64Array::from(vec![0, 2]));
        let f = write_parquet(replace(launch_columns(), "Class", Some(class)));
        let err = load_file(f.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::InvalidClass { flight: 2, value: 2.0 })
        );
    }

    #[test]
    fn parquet_missing_serial_column() {
        let f = write_parquet(replace(launch_columns(), "Serial", None));
        let err = load_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Parquet file missing 'Serial' column"));
    }

    #[test]
    fn parquet_integer_flag_outside_zero_one() {
        let reused: ArrayRef = Arc::new(Int64Array::from(vec![0, 7]));
        let f = write_parquet(replace(launch_columns(), "Reused", Some(reused)));
        let err = load_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("'Reused' must be boolean"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let f = write_temp(".xlsx", "");
        let err = load_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn to_u32_rejects_fractions() {
        assert_eq!(to_u32(3.0, "x").unwrap(), 3);
        assert!(to_u32(2.5, "x").is_err());
        assert!(to_u32(-1.0, "x").is_err());
    }
}
