//! Grid sweeps over the formula layer.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::field::{self, FieldError, DEFAULT_SCALE};

/// Default scale list when none is given.
pub const DEFAULT_A_VALUES: [f64; 1] = [DEFAULT_SCALE];

/// Default reference radius list, `[sqrt 3]`.
pub fn default_r_lock_values() -> Vec<f64> {
    vec![3.0_f64.sqrt()]
}

/// Column names of a [`SweepTable`], in output order.
pub const COLUMNS: [&str; 9] = [
    "n",
    "a",
    "r_lock",
    "radius",
    "angle_deg",
    "x",
    "y",
    "phi_ratio",
    "delta_r",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    N,
    A,
    RLock,
    Radius,
    AngleDeg,
    X,
    Y,
    PhiRatio,
    DeltaR,
}

impl Column {
    pub fn all() -> &'static [Column] {
        &[
            Column::N,
            Column::A,
            Column::RLock,
            Column::Radius,
            Column::AngleDeg,
            Column::X,
            Column::Y,
            Column::PhiRatio,
            Column::DeltaR,
        ]
    }

    pub fn name(&self) -> &'static str {
        COLUMNS[self.index()]
    }

    /// Position of this column in [`COLUMNS`]
    pub fn index(&self) -> usize {
        match self {
            Column::N => 0,
            Column::A => 1,
            Column::RLock => 2,
            Column::Radius => 3,
            Column::AngleDeg => 4,
            Column::X => 5,
            Column::Y => 6,
            Column::PhiRatio => 7,
            Column::DeltaR => 8,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Column::all()
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| format!("Unknown column: {}", s))
    }
}

/// One evaluated `(n, a, r_lock)` combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub n: i64,
    pub a: f64,
    pub r_lock: f64,
    pub radius: f64,
    pub angle_deg: f64,
    pub x: f64,
    pub y: f64,
    pub phi_ratio: f64,
    pub delta_r: f64,
}

impl SweepRow {
    /// Evaluate the formula layer for a single combination.
    pub fn evaluate(n: i64, a: f64, r_lock: f64) -> Result<Self, FieldError> {
        let radius = field::radius(n, a)?;
        let angle_deg = field::angle(n);
        let (x, y) = field::position(n, a)?;
        let phi_ratio = if r_lock == 0.0 { f64::NAN } else { radius / r_lock };

        Ok(Self {
            n,
            a,
            r_lock,
            radius,
            angle_deg,
            x,
            y,
            phi_ratio,
            delta_r: radius - r_lock,
        })
    }

    /// Value of a column as `f64`. `n` is widened.
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::N => self.n as f64,
            Column::A => self.a,
            Column::RLock => self.r_lock,
            Column::Radius => self.radius,
            Column::AngleDeg => self.angle_deg,
            Column::X => self.x,
            Column::Y => self.y,
            Column::PhiRatio => self.phi_ratio,
            Column::DeltaR => self.delta_r,
        }
    }
}

/// Ordered rows produced by [`ParameterSweep::run_grid`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SweepTable {
    rows: Vec<SweepRow>,
}

impl SweepTable {
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SweepRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SweepRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SweepRow> {
        self.rows.iter()
    }

    pub fn column(&self, column: Column) -> Vec<f64> {
        self.rows.iter().map(|r| r.get(column)).collect()
    }

    /// Rows where `column == value`.
    pub fn select(&self, column: Column, value: f64) -> Vec<&SweepRow> {
        self.rows.iter().filter(|r| r.get(column) == value).collect()
    }

    /// Number of NaN cells in a column
    pub fn null_count(&self, column: Column) -> usize {
        self.rows.iter().filter(|r| r.get(column).is_nan()).count()
    }

    /// A copy sorted ascending by `column`. Ties keep their sweep order.
    pub fn sorted_by(&self, column: Column) -> SweepTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|l, r| l.get(column).total_cmp(&r.get(column)));
        SweepTable { rows }
    }

    pub fn into_rows(self) -> Vec<SweepRow> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a SweepTable {
    type Item = &'a SweepRow;
    type IntoIter = std::slice::Iter<'a, SweepRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Evaluates the formula layer over `n_values × a_values × r_lock_values`.
///
/// Indices are not checked here; a non-positive `n` fails [`run_grid`](Self::run_grid).
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSweep {
    n_values: Vec<i64>,
    a_values: Vec<f64>,
    r_lock_values: Vec<f64>,
}

impl ParameterSweep {
    pub fn new(
        n_values: Vec<i64>,
        a_values: Option<Vec<f64>>,
        r_lock_values: Option<Vec<f64>>,
    ) -> Self {
        Self {
            n_values,
            a_values: a_values.unwrap_or_else(|| DEFAULT_A_VALUES.to_vec()),
            r_lock_values: r_lock_values.unwrap_or_else(default_r_lock_values),
        }
    }

    pub fn n_values(&self) -> &[i64] {
        &self.n_values
    }

    pub fn a_values(&self) -> &[f64] {
        &self.a_values
    }

    pub fn r_lock_values(&self) -> &[f64] {
        &self.r_lock_values
    }

    /// Rows `run_grid` will produce.
    pub fn combinations(&self) -> usize {
        self.n_values.len() * self.a_values.len() * self.r_lock_values.len()
    }

    /// Evaluate every combination, `n` outermost and `r_lock` innermost.
    ///
    /// Stops at the first invalid index.
    pub fn run_grid(&self) -> Result<SweepTable, FieldError> {
        debug!(
            "Running sweep: {} n x {} a x {} r_lock",
            self.n_values.len(),
            self.a_values.len(),
            self.r_lock_values.len()
        );

        let mut rows = Vec::with_capacity(self.combinations());
        for &n in &self.n_values {
            for &a in &self.a_values {
                for &r_lock in &self.r_lock_values {
                    rows.push(SweepRow::evaluate(n, a, r_lock)?);
                }
            }
        }

        debug!("Sweep produced {} rows", rows.len());
        Ok(SweepTable { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUCAS_N: [i64; 3] = [4, 7, 11];

    fn baseline() -> SweepTable {
        ParameterSweep::new(LUCAS_N.to_vec(), Some(vec![3.0]), Some(vec![3.0_f64.sqrt()]))
            .run_grid()
            .unwrap()
    }

    #[test]
    fn defaults_resolve_at_construction() {
        let sweep = ParameterSweep::new(vec![1, 2], None, None);
        assert_eq!(sweep.a_values(), &[3.0]);
        assert_eq!(sweep.r_lock_values(), &[3.0_f64.sqrt()]);
        assert_eq!(sweep.combinations(), 2);
    }

    #[test]
    fn single_row_scenario() {
        let r_lock = 3.0_f64.sqrt();
        let table = ParameterSweep::new(vec![1], Some(vec![3.0]), Some(vec![r_lock]))
            .run_grid()
            .unwrap();
        assert_eq!(table.len(), 1);
        let row = table.row(0).unwrap();
        assert_eq!(row.n, 1);
        assert!((row.radius - 3.0).abs() < 1e-10);
        assert!((row.phi_ratio - r_lock).abs() < 1e-10);
        assert!((row.delta_r - (3.0 - r_lock)).abs() < 1e-10);
        assert!((row.angle_deg - field::golden_angle()).abs() < 1e-10);
    }

    #[test]
    fn row_order_is_n_then_a_then_r_lock() {
        let table = ParameterSweep::new(vec![2, 1], Some(vec![1.0, 2.0]), Some(vec![5.0, 6.0]))
            .run_grid()
            .unwrap();
        let triples: Vec<(i64, f64, f64)> = table.iter().map(|r| (r.n, r.a, r.r_lock)).collect();
        assert_eq!(
            triples,
            vec![
                (2, 1.0, 5.0),
                (2, 1.0, 6.0),
                (2, 2.0, 5.0),
                (2, 2.0, 6.0),
                (1, 1.0, 5.0),
                (1, 1.0, 6.0),
                (1, 2.0, 5.0),
                (1, 2.0, 6.0),
            ]
        );
    }

    #[test]
    fn zero_r_lock_gives_nan_ratio() {
        let table = ParameterSweep::new(vec![4], Some(vec![3.0]), Some(vec![0.0]))
            .run_grid()
            .unwrap();
        let row = table.row(0).unwrap();
        assert!(row.phi_ratio.is_nan());
        assert!((row.delta_r - 6.0).abs() < 1e-10);
        assert_eq!(table.null_count(Column::PhiRatio), 1);
        assert_eq!(table.null_count(Column::DeltaR), 0);
    }

    #[test]
    fn invalid_index_fails_whole_sweep() {
        let sweep = ParameterSweep::new(vec![1, 0, 3], None, None);
        assert_eq!(sweep.run_grid(), Err(FieldError::InvalidIndex { n: 0 }));
    }

    #[test]
    fn empty_list_gives_empty_table() {
        let table = ParameterSweep::new(LUCAS_N.to_vec(), Some(vec![]), None)
            .run_grid()
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn select_by_column_value() {
        let table = baseline();
        let rows = table.select(Column::N, 7.0);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].radius - 3.0 * 7.0_f64.sqrt()).abs() < 1e-10);
        assert!(table.select(Column::N, 5.0).is_empty());
    }

    #[test]
    fn sorted_by_orders_rows() {
        let table = ParameterSweep::new(vec![11, 4, 7], None, None).run_grid().unwrap();
        let sorted = table.sorted_by(Column::N);
        assert_eq!(sorted.column(Column::N), vec![4.0, 7.0, 11.0]);
        // Source table is untouched
        assert_eq!(table.column(Column::N), vec![11.0, 4.0, 7.0]);
    }

    #[test]
    fn column_names_round_trip() {
        for (i, column) in Column::all().iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(column.name().parse::<Column>().unwrap(), *column);
        }
        assert!("theta".parse::<Column>().is_err());
        assert_eq!(" Phi_Ratio ".parse::<Column>().unwrap(), Column::PhiRatio);
    }

    #[test]
    fn repeated_runs_are_independent() {
        let sweep = ParameterSweep::new(LUCAS_N.to_vec(), None, None);
        let first = sweep.run_grid().unwrap();
        let other = ParameterSweep::new(vec![1], Some(vec![-1.0]), Some(vec![0.0]));
        assert_eq!(other.run_grid().unwrap().len(), 1);
        let rows = first.clone().into_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(first, sweep.run_grid().unwrap());
    }
}
