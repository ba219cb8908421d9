//! Dataset-level entry points: add a granularity column, or validate one.
use crate::calendar::build_calendar;
use crate::config::GranularityOptions;
use crate::error::{GranularityError, Result};
use crate::granularity::{build, derivable_pairs, GranularityColumn, GranularitySpec};
use crate::hierarchy::HierarchyTable;
use crate::store::{Categorical, Column, ColumnData, Dataset};
use crate::validation::GranularityValidator;
use log::debug;
use rayon::prelude::*;

/// Returns a copy of `dataset` with a categorical column named `name`.
///
/// If a column called `name` already exists it is reinterpreted as
/// categorical and nothing is recomputed. Otherwise calendar indices use the
/// built-in calendar units and every other index requires `table`.
pub fn create_granularity(dataset: &Dataset, name: &str, table: Option<&HierarchyTable>) -> Result<Dataset> {
    create_granularity_with(dataset, name, table, &GranularityOptions::default())
}

/// [`create_granularity`] with explicit calendar options.
pub fn create_granularity_with(
    dataset: &Dataset,
    name: &str,
    table: Option<&HierarchyTable>,
    options: &GranularityOptions,
) -> Result<Dataset> {
    let mut out = dataset.clone();
    apply(&mut out, name, compute(dataset, name, table, options)?)?;
    Ok(out)
}

/// Adds several granularities at once, computing them in parallel.
///
/// Either every column is added or the dataset is left untouched and the
/// first failing request (in `names` order) is reported.
pub fn create_granularities(
    dataset: &Dataset,
    names: &[&str],
    table: Option<&HierarchyTable>,
    options: &GranularityOptions,
) -> Result<Dataset> {
    let results: Vec<Result<Categorical>> = names
        .par_iter()
        .map(|name| compute(dataset, name, table, options))
        .collect();

    let mut out = dataset.clone();
    for (name, result) in names.iter().zip(results) {
        apply(&mut out, name, result?)?;
    }
    Ok(out)
}

/// Recomputes `name` over `table` and compares it with `reference_column`.
///
/// Returns `Ok(false)` on any mismatch.
pub fn validate_granularity(
    dataset: &Dataset,
    name: &str,
    table: &HierarchyTable,
    reference_column: &str,
) -> Result<bool> {
    let index = dataset.index_column()?;
    let name = name.trim();
    if name.is_empty() {
        return Err(GranularityError::MissingGranularityName);
    }

    let spec = derivable_pairs(table)
        .into_iter()
        .find(|spec| spec.name() == name)
        .ok_or_else(|| GranularityError::UnderivableGranularity { name: name.to_string() })?;
    let reference = dataset.require_column(reference_column)?;

    debug!("validating {} against column '{}'", spec, reference_column);
    let validator = GranularityValidator::new(table);
    match &index.data {
        ColumnData::Integer(values) => validator.validate(values, &reference.data, &spec),
        ColumnData::Float(values) => validator.validate(values, &reference.data, &spec),
        other => Err(GranularityError::NotATimeSeries {
            reason: format!(
                "index '{}' of type {} cannot be validated against a hierarchy",
                index.name,
                other.type_name()
            ),
        }),
    }
}

/// Builds the categorical contents of `name` without touching the dataset.
fn compute(
    dataset: &Dataset,
    name: &str,
    table: Option<&HierarchyTable>,
    options: &GranularityOptions,
) -> Result<Categorical> {
    let index = dataset.index_column()?;
    let name = name.trim();
    if name.is_empty() {
        return Err(GranularityError::MissingGranularityName);
    }

    if let Some(existing) = dataset.column(name) {
        debug!("'{}' already present, reinterpreting as categorical", name);
        return Ok(existing.data.to_categorical());
    }

    compute_from_index(&index.data, name, table, options)?.into_categorical()
}

/// Tagged dispatch on the index type: calendar indices go to the calendar
/// adapter, integer and float ones through the hierarchy in their own arithmetic.
fn compute_from_index(
    index: &ColumnData,
    name: &str,
    table: Option<&HierarchyTable>,
    options: &GranularityOptions,
) -> Result<GranularityColumn> {
    if let (Some(resolution), Some(stamps)) = (index.calendar_resolution(), index.as_timestamps()) {
        debug!("building calendar granularity {} at {:?} resolution", name, resolution);
        return build_calendar(&stamps, resolution, name, options);
    }

    let table = table.ok_or(GranularityError::MissingHierarchy)?;
    let spec = GranularitySpec::parse(name, table.unit_names().as_slice())?;

    debug!("building {} over a {}-level hierarchy", spec, table.len());
    match index {
        ColumnData::Integer(values) => build(values, &spec.fine, &spec.coarse, table),
        ColumnData::Float(values) => build(values, &spec.fine, &spec.coarse, table),
        other => Err(GranularityError::NotATimeSeries {
            reason: format!("index of type {} is neither numeric nor calendar", other.type_name()),
        }),
    }
}

fn apply(dataset: &mut Dataset, name: &str, column: Categorical) -> Result<()> {
    let name = name.trim();
    let data = ColumnData::Categorical(column);
    if dataset.column(name).is_some() {
        dataset.replace_column_data(name, data)
    } else {
        dataset.add_column(Column::new(name, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cricket(n: i64) -> (Dataset, HierarchyTable) {
        let ds = Dataset::from_columns([Column::new("ball", ColumnData::Integer((1..=n).collect()))])
            .unwrap()
            .with_index("ball")
            .unwrap();
        let table = HierarchyTable::new(["ball", "over", "inning", "match"], [1, 6, 20, 2]).unwrap();
        (ds, table)
    }

    #[test]
    fn test_adds_categorical_column() {
        let (ds, table) = cricket(12);
        let out = create_granularity(&ds, "ball_over", Some(&table)).unwrap();
        assert_eq!(out.ncols(), 2);
        match &out.require_column("ball_over").unwrap().data {
            ColumnData::Categorical(c) => {
                assert_eq!(c.labels().collect::<Vec<_>>()[5..8], ["6", "1", "2"]);
            }
            other => panic!("expected categorical, got {}", other.type_name()),
        }
        // The input is never modified.
        assert_eq!(ds.ncols(), 1);
    }

    #[test]
    fn test_structural_errors_come_first() {
        let (ds, table) = cricket(3);
        let no_index = Dataset::from_columns(ds.columns().to_vec()).unwrap();
        assert!(matches!(
            create_granularity(&no_index, "", Some(&table)),
            Err(GranularityError::NotATimeSeries { .. })
        ));
        assert!(matches!(
            create_granularity(&ds, " ", Some(&table)),
            Err(GranularityError::MissingGranularityName)
        ));
        assert!(matches!(
            create_granularity(&ds, "ball_over", None),
            Err(GranularityError::MissingHierarchy)
        ));
    }

    #[test]
    fn test_calendar_index_needs_no_hierarchy() {
        let days: Vec<NaiveDate> = (1..=10).map(|d| NaiveDate::from_ymd_opt(2024, 7, d).unwrap()).collect();
        let ds = Dataset::from_columns([Column::new("date", ColumnData::Date(days))])
            .unwrap()
            .with_index("date")
            .unwrap();

        let out = create_granularity(&ds, "day_week", None).unwrap();
        match &out.require_column("day_week").unwrap().data {
            // 2024-07-01 is a Monday
            ColumnData::Categorical(c) => assert_eq!(c.label(0), "Mon"),
            other => panic!("expected categorical, got {}", other.type_name()),
        }
        assert!(matches!(
            create_granularity(&ds, "hour_day", None),
            Err(GranularityError::UnitFinerThanIndex { .. })
        ));
        assert!(matches!(
            create_granularity(&ds, "day_inning", None),
            Err(GranularityError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let (ds, table) = cricket(240);
        let opts = GranularityOptions::default();

        let out = create_granularities(&ds, &["ball_over", "over_inning", "inning_match"], Some(&table), &opts)
            .unwrap();
        assert_eq!(out.ncols(), 4);

        let err = create_granularities(&ds, &["ball_over", "over_ball", "wicket_over"], Some(&table), &opts)
            .unwrap_err();
        assert!(matches!(err, GranularityError::InvalidOrder { .. }));
    }

    #[test]
    fn test_large_integer_index_keeps_exact_positions() {
        let big = 1i64 << 53;
        let ds = Dataset::from_columns([Column::new("t", ColumnData::Integer(vec![big + 1, big + 2]))])
            .unwrap()
            .with_index("t")
            .unwrap();
        let table = HierarchyTable::new(["ns", "pair"], [1, 2]).unwrap();

        let out = create_granularity(&ds, "ns_pair", Some(&table)).unwrap();
        match &out.require_column("ns_pair").unwrap().data {
            ColumnData::Categorical(c) => assert_eq!(c.labels().collect::<Vec<_>>(), ["1", "2"]),
            other => panic!("expected categorical, got {}", other.type_name()),
        }

        let mut with_ref = ds.clone();
        with_ref
            .add_column(Column::new("ref", ColumnData::Integer(vec![1, 2])))
            .unwrap();
        assert!(validate_granularity(&with_ref, "ns_pair", &table, "ref").unwrap());
    }

    #[test]
    fn test_validate_requires_reference_column() {
        let (ds, table) = cricket(12);
        assert!(matches!(
            validate_granularity(&ds, "ball_over", &table, "ball_over_ref"),
            Err(GranularityError::MissingColumn { .. })
        ));
        assert!(matches!(
            validate_granularity(&ds, "over_ball", &table, "ball"),
            Err(GranularityError::UnderivableGranularity { .. })
        ));
    }
}
