use super::table::RawTable;
use super::types::Sectors;
use crate::compute::error::{ModelError, ModelResult};
use crate::config::ExtractionConfig;
use nalgebra::DMatrix;
use tracing::debug;

/// The named vectors and sub-matrix the model runs on, all aligned to
/// `sectors`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub sectors: Sectors,
    pub output: Vec<f64>,
    pub demand: Vec<f64>,
    pub io_matrix: DMatrix<f64>,
    pub household_demand: Option<Vec<f64>>,
    pub labour_income: Option<Vec<f64>>,
}

impl ExtractedTable {
    pub fn sector_count(&self) -> usize { self.sectors.len() }

    /// Induced modelling needs both the household column and labour row.
    pub fn induced_available(&self) -> bool {
        self.household_demand.is_some() && self.labour_income.is_some()
    }
}

/// Resolved positions of every selection, validated up front.
struct Layout {
    names_col: usize,
    demand_col: usize,
    household_col: Option<usize>,
    output_row: usize,
    labour_row: Option<usize>,
    sector_cols: Vec<usize>,
}

pub struct TableExtractor<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> TableExtractor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    /// Splits `table` into the model's components.
    ///
    /// Sector columns are every column left of the demand column except the
    /// names column. With `n` of them, the first `n` rows are the sector
    /// rows and the output/labour rows are found by label.
    pub fn extract(&self, table: &RawTable) -> ModelResult<ExtractedTable> {
        self.check_selection()?;
        let layout = self.resolve(table)?;
        let n = layout.sector_cols.len();

        let labels = (0..n)
            .map(|r| {
                table.cell(r, layout.names_col).as_label()
                    .ok_or_else(|| ModelError::invalid(format!("sector row {} has no name", r)))
            })
            .collect::<ModelResult<Vec<_>>>()?;
        let sectors = Sectors::new(labels)?;
        check_alignment(table, &layout.sector_cols, &sectors)?;

        let read_row = |row: usize| -> ModelResult<Vec<f64>> {
            layout.sector_cols.iter().map(|&c| table.number(row, c)).collect()
        };
        let read_col = |col: usize| -> ModelResult<Vec<f64>> {
            (0..n).map(|r| table.number(r, col)).collect()
        };

        let output = read_row(layout.output_row)?;
        let demand = read_col(layout.demand_col)?;

        let mut io_matrix = DMatrix::zeros(n, n);
        for i in 0..n {
            for (j, &c) in layout.sector_cols.iter().enumerate() {
                io_matrix[(i, j)] = table.number(i, c)?;
            }
        }

        let household_demand = layout.household_col.map(read_col).transpose()?;
        let labour_income = layout.labour_row.map(read_row).transpose()?;

        debug!(
            sectors = n,
            induced = household_demand.is_some() && labour_income.is_some(),
            "extracted IO table"
        );

        Ok(ExtractedTable { sectors, output, demand, io_matrix, household_demand, labour_income })
    }

    /// Checks that need only the configuration, not the table.
    fn check_selection(&self) -> ModelResult<()> {
        let cfg = self.config;
        if cfg.names_column == cfg.demand_column {
            return Err(ModelError::invalid(format!(
                "sector-name column '{}' is also selected as the demand column", cfg.names_column
            )));
        }
        if cfg.output_row.is_empty() {
            return Err(ModelError::invalid("no total output row selected"));
        }
        if cfg.names_column == cfg.output_row {
            return Err(ModelError::invalid(format!(
                "sector-name column '{}' is also selected as the output row", cfg.names_column
            )));
        }
        if let Some(hh) = &cfg.household_column {
            if *hh == cfg.names_column || *hh == cfg.demand_column {
                return Err(ModelError::invalid(format!(
                    "household column '{}' overlaps the name or demand column", hh
                )));
            }
        }
        if cfg.labour_income_row.as_deref() == Some(cfg.output_row.as_str()) {
            return Err(ModelError::invalid(format!(
                "labour income row '{}' is also the output row", cfg.output_row
            )));
        }
        Ok(())
    }

    fn resolve(&self, table: &RawTable) -> ModelResult<Layout> {
        let cfg = self.config;
        let names_col = table.column_index(&cfg.names_column)?;
        let demand_col = table.column_index(&cfg.demand_column)?;
        let household_col = cfg.household_column.as_deref()
            .map(|c| table.column_index(c))
            .transpose()?;

        let sector_cols: Vec<usize> = (0..demand_col).filter(|&c| c != names_col).collect();
        let n = sector_cols.len();
        if n == 0 {
            return Err(ModelError::invalid(format!(
                "no sector columns precede the demand column '{}'", cfg.demand_column
            )));
        }
        if let Some(c) = household_col.filter(|c| sector_cols.contains(c)) {
            return Err(ModelError::invalid(format!(
                "household column '{}' is one of the sector columns", table.columns()[c]
            )));
        }
        if table.height() < n {
            return Err(ModelError::invalid(format!(
                "{} sector columns but only {} rows", n, table.height()
            )));
        }

        let find_row = |label: &str| -> ModelResult<usize> {
            let row = table.row_index(names_col, label)?;
            if row < n {
                return Err(ModelError::invalid(format!(
                    "row '{}' lies inside the {}x{} sector block", label, n, n
                )));
            }
            Ok(row)
        };
        let output_row = find_row(&cfg.output_row)?;
        let labour_row = cfg.labour_income_row.as_deref().map(find_row).transpose()?;

        Ok(Layout { names_col, demand_col, household_col, output_row, labour_row, sector_cols })
    }
}

/// Sector column headers that name the same sectors as the row labels must
/// list them in the same order, otherwise IO(i,j) would pair row `i` with the
/// wrong purchasing sector. Headers that are codes rather than the row
/// labels are left alone.
fn check_alignment(table: &RawTable, sector_cols: &[usize], sectors: &Sectors) -> ModelResult<()> {
    let headers: Vec<&str> = sector_cols.iter().map(|&c| table.columns()[c].as_str()).collect();
    let labels: Vec<&str> = sectors.as_slice().iter().map(String::as_str).collect();
    if headers == labels {
        return Ok(());
    }
    let mut sorted_headers = headers.clone();
    let mut sorted_labels = labels.clone();
    sorted_headers.sort_unstable();
    sorted_labels.sort_unstable();
    if sorted_headers == sorted_labels {
        return Err(ModelError::invalid(format!(
            "sector columns {:?} are ordered differently from sector rows {:?}", headers, labels
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    pub(crate) const NAMES: &str = "Industry Purchases / Industry Sales";
    pub(crate) const DEMAND: &str = "Total intermediate use";
    pub(crate) const HOUSEHOLD: &str = "Households final consumption expenditure";
    pub(crate) const OUTPUT: &str = "Total output at basic prices";
    pub(crate) const LABOUR: &str = "Compensation of employees";

    /// Two sectors, output [100, 50], households [30, 20], labour [40, 10].
    pub(crate) fn two_sector_table() -> RawTable {
        RawTable::from_labeled(
            NAMES,
            vec!["AGR".into(), "MAN".into(), LABOUR.into(), OUTPUT.into()],
            vec!["AGR".into(), "MAN".into(), DEMAND.into(), HOUSEHOLD.into()],
            vec![
                vec![10.0, 5.0, 15.0, 30.0],
                vec![20.0, 10.0, 30.0, 20.0],
                vec![40.0, 10.0, 0.0, 0.0],
                vec![100.0, 50.0, 0.0, 0.0],
            ],
        ).unwrap()
    }

    pub(crate) fn full_config() -> ExtractionConfig {
        ExtractionConfig::new(NAMES, DEMAND, OUTPUT).with_induced(HOUSEHOLD, LABOUR)
    }

    #[test]
    fn test_extracts_all_components() {
        let config = full_config();
        let extracted = TableExtractor::new(&config).extract(&two_sector_table()).unwrap();

        assert_eq!(extracted.sectors.as_slice(), &["AGR".to_string(), "MAN".to_string()]);
        assert_eq!(extracted.output, vec![100.0, 50.0]);
        assert_eq!(extracted.demand, vec![15.0, 30.0]);
        assert_eq!(extracted.io_matrix, DMatrix::from_row_slice(2, 2, &[10.0, 5.0, 20.0, 10.0]));
        assert_eq!(extracted.household_demand, Some(vec![30.0, 20.0]));
        assert_eq!(extracted.labour_income, Some(vec![40.0, 10.0]));
        assert!(extracted.induced_available());
    }

    #[test]
    fn test_optional_fields_absent() {
        let config = ExtractionConfig::new(NAMES, DEMAND, OUTPUT);
        let extracted = TableExtractor::new(&config).extract(&two_sector_table()).unwrap();
        assert!(extracted.household_demand.is_none());
        assert!(!extracted.induced_available());
    }

    #[test]
    fn test_names_column_need_not_be_first() {
        let table = RawTable::new(
            vec!["AGR".into(), "code".into(), "MAN".into(), DEMAND.into()],
            vec![
                vec![1.0.into(), "AGR".into(), 2.0.into(), 3.0.into()],
                vec![4.0.into(), "MAN".into(), 5.0.into(), 9.0.into()],
                vec![10.0.into(), "out".into(), 20.0.into(), 0.0.into()],
            ],
        ).unwrap();
        let config = ExtractionConfig::new("code", DEMAND, "out");
        let extracted = TableExtractor::new(&config).extract(&table).unwrap();
        assert_eq!(extracted.io_matrix, DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 5.0]));
        assert_eq!(extracted.output, vec![10.0, 20.0]);
    }

    #[rstest]
    #[case(ExtractionConfig::new(NAMES, NAMES, OUTPUT))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, NAMES))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, ""))]
    #[case(ExtractionConfig::new(NAMES, "Missing column", OUTPUT))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, "Missing row"))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, "AGR"))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, OUTPUT).with_induced(DEMAND, LABOUR))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, OUTPUT).with_induced(HOUSEHOLD, OUTPUT))]
    #[case(ExtractionConfig::new(NAMES, "AGR", OUTPUT))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, OUTPUT).with_induced("AGR", LABOUR))]
    #[case(ExtractionConfig::new(NAMES, DEMAND, OUTPUT).with_induced("MAN", LABOUR))]
    fn test_invalid_selection(#[case] config: ExtractionConfig) {
        let result = TableExtractor::new(&config).extract(&two_sector_table());
        assert!(matches!(result, Err(ModelError::InvalidSelection(_))), "{:?}", result);
    }

    #[test]
    fn test_permuted_sector_columns_rejected() {
        let table = RawTable::from_labeled(
            NAMES,
            vec!["AGR".into(), "MAN".into(), OUTPUT.into()],
            vec!["MAN".into(), "AGR".into(), DEMAND.into()],
            vec![
                vec![5.0, 10.0, 15.0],
                vec![10.0, 20.0, 30.0],
                vec![50.0, 100.0, 0.0],
            ],
        ).unwrap();
        let config = ExtractionConfig::new(NAMES, DEMAND, OUTPUT);
        let err = TableExtractor::new(&config).extract(&table).unwrap_err();
        assert!(matches!(&err, ModelError::InvalidSelection(msg) if msg.contains("ordered differently")), "{}", err);
    }

    #[test]
    fn test_ragged_json_table_is_an_error_not_a_panic() {
        let json = format!(
            r#"{{"columns":["{}","AGR","MAN","{}"],"rows":[["AGR",10,5,15],["MAN",20],["{}",100,50,0]]}}"#,
            NAMES, DEMAND, OUTPUT
        );
        let result = serde_json::from_str::<RawTable>(&json);
        assert!(result.is_err());
    }

    #[test]
    fn test_names_equal_demand_rejected_before_reading_table() {
        // An empty table would fail resolution; the selection check fires first.
        let config = ExtractionConfig::new("x", "x", OUTPUT);
        let err = TableExtractor::new(&config).extract(&RawTable::default()).unwrap_err();
        assert!(err.to_string().contains("demand column"));
    }
}
