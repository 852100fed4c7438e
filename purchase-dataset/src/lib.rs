use std::{io::Read, path::Path};

use itertools::Itertools;
use log::info;
use purchase_types::{FilterField, Gender, Record};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO Error {0}")]
    Io(#[from] std::io::Error),
    #[error("Error reading csv {0}")]
    Csv(#[from] csv::Error),
    #[error("Error reading json {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported dataset format {0}, expected .csv or .json")]
    UnsupportedFormat(String),
}

/// One csv line. Every cell is taken as the literal text of the file, so category codes
/// such as `010` or `true` survive untouched.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(
        rename = "Purchase",
        default = "purchase_types::missing_purchase",
        deserialize_with = "purchase_types::purchase_text"
    )]
    purchase: f64,
    #[serde(rename = "City_Category")]
    city_category: String,
    #[serde(rename = "Occupation")]
    occupation: String,
}

impl From<CsvRow> for Record {
    fn from(row: CsvRow) -> Self {
        Record {
            age: row.age,
            gender: Gender::from(row.gender),
            purchase: row.purchase,
            city_category: row.city_category,
            occupation: row.occupation,
        }
    }
}

/// The full, immutable set of purchase records. Order is the order of the source file
/// and is what the chart's category order is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Loads a dataset from disk, picking the parser from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let dataset = match extension.as_str() {
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?)?,
            "json" => Self::from_json_slice(&std::fs::read(path)?)?,
            _ => return Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        };
        info!("loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Reads a csv table with a header row. Columns are matched by name and extra
    /// columns are ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = rdr
            .deserialize::<CsvRow>()
            .map_ok(Record::from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Reads a json array of row objects.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DatasetError> {
        Ok(Self {
            records: serde_json::from_slice(bytes)?,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every distinct value of `field`, in plain string order. Used to populate the
    /// filter dropdowns, so numeric occupations sort as text ("10" before "2").
    pub fn distinct_values(&self, field: FilterField) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.field(field))
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(feature = "embed")]
mod embedded {
    use once_cell::sync::OnceCell;

    use super::{Dataset, DatasetError};

    static SAMPLE: OnceCell<Dataset> = OnceCell::new();

    pub fn sample_csv() -> &'static [u8] {
        include_bytes!("../data/sample.csv")
    }

    /// The sample table compiled into the binary, parsed on first use.
    pub fn embedded() -> Result<&'static Dataset, DatasetError> {
        SAMPLE.get_or_try_init(|| Dataset::from_csv_reader(sample_csv()))
    }
}

#[cfg(feature = "embed")]
pub use embedded::{embedded, sample_csv};

#[cfg(test)]
mod tests {
    use std::io::Write;

    use purchase_types::Gender;

    use super::*;

    const CSV: &str = "User_ID,Product_ID,Gender,Age,Occupation,City_Category,Stay_In_Current_City_Years,Marital_Status,Product_Category_1,Product_Category_2,Product_Category_3,Purchase
1000001,P00069042,F,0-17,10,A,2,0,3,,,8370
1000002,P00285442,M,55+,16,C,4+,0,8,,,7969
1000003,P00193542,M,26-35,15,A,3,0,1,2,,15227
1000004,P00184942,M,46-50,7,B,2,1,1,8,17,19215
1000005,P00274942,M,26-35,2,A,1,1,8,,,
";

    #[test]
    fn test_csv_ignores_extra_columns() {
        let dataset = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 5);
        let first = &dataset.records()[0];
        assert_eq!(first.age, "0-17");
        assert_eq!(first.gender, Gender::Female);
        assert_eq!(first.occupation, "10");
        assert_eq!(first.purchase, 8370.0);
        // blank purchase coerces to zero
        assert_eq!(dataset.records()[4].purchase, 0.0);
    }

    #[test]
    fn test_csv_categories_kept_verbatim() {
        let csv = "Gender,Age,Occupation,City_Category,Purchase
M,26-35,010,true,inf
F,26-35,1.50,false,12
";
        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
        let records = dataset.records();
        assert_eq!(records[0].occupation, "010");
        assert_eq!(records[0].city_category, "true");
        assert!(records[0].purchase.is_nan());
        assert_eq!(records[1].occupation, "1.50");
        assert_eq!(records[1].city_category, "false");
        assert_eq!(records[1].purchase, 12.0);
        assert_eq!(
            dataset.distinct_values(FilterField::Occupation),
            vec!["010", "1.50"]
        );
    }

    #[test]
    fn test_csv_without_purchase_column() {
        let csv = "Gender,Age,Occupation,City_Category\nM,18-25,4,A\n";
        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
        assert!(dataset.records()[0].purchase.is_nan());
    }

    #[test]
    fn test_json_numbers_and_strings() {
        let json = br#"[
            {"Age":"18-25","Gender":"M","Purchase":"100","City_Category":"A","Occupation":4},
            {"Age":"18-25","Gender":"F","Purchase":50,"City_Category":"B","Occupation":"4"}
        ]"#;
        let dataset = Dataset::from_json_slice(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].purchase, 100.0);
        assert_eq!(dataset.records()[1].purchase, 50.0);
        assert_eq!(dataset.distinct_values(FilterField::Occupation), vec!["4"]);
    }

    #[test]
    fn test_distinct_values_sorted_as_text() {
        let dataset = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(
            dataset.distinct_values(FilterField::CityCategory),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            dataset.distinct_values(FilterField::Occupation),
            vec!["10", "15", "16", "2", "7"]
        );
        assert!(dataset.distinct_values(FilterField::All).is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 5);

        let other = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(matches!(
            Dataset::load(other.path()),
            Err(DatasetError::UnsupportedFormat(_))
        ));
    }

    #[cfg(feature = "embed")]
    #[test]
    fn test_embedded_sample() {
        let dataset = embedded().unwrap();
        assert!(!dataset.is_empty());
        assert_eq!(
            dataset.distinct_values(FilterField::CityCategory),
            vec!["A", "B", "C"]
        );
    }
}
