use contracts::dashboards::common::Control;
use contracts::shared::table::CellValue;

use crate::shared::table::Table;
use crate::shared::view::filter::{default_selection, numeric_options, RowFilter};
use crate::shared::view::profile::column_range;

/// One "minimum value" slider of an explorer
#[derive(Debug, Clone, Copy)]
pub struct SliderSpec<'a> {
    /// Request parameter name, echoed back as the control id
    pub id: &'a str,
    pub label: &'a str,
    pub column: &'a str,
    pub requested: Option<f64>,
}

/// Sliders for the columns that hold numeric data, and the thresholds they
/// imply. A column that is absent or has no numeric values gets neither.
///
/// An unset slider sits at the column minimum, so the default filter keeps
/// every row that has a value.
pub fn threshold_controls(
    table: &Table,
    sliders: &[SliderSpec<'_>],
    filter: RowFilter,
) -> (Vec<Control>, RowFilter) {
    let mut controls = Vec::with_capacity(sliders.len());
    let mut filter = filter;

    for spec in sliders {
        let (min, max) = match column_range(table, spec.column) {
            Ok(Some(range)) => range,
            Ok(None) | Err(_) => {
                tracing::debug!("Slider '{}' omitted: no numeric '{}'", spec.id, spec.column);
                continue;
            }
        };

        let value = spec.requested.unwrap_or(min);
        controls.push(Control::Slider {
            id: spec.id.to_string(),
            label: spec.label.to_string(),
            min,
            max,
            value,
        });
        filter = filter.at_least(spec.column, value);
    }

    (controls, filter)
}

/// Multi-select over the distinct numeric values of `column`.
///
/// `requested == None` selects the first three options; an explicit empty
/// list selects nothing, which disables the membership filter.
pub fn selection_control(
    table: &Table,
    id: &str,
    label: &str,
    column: &str,
    requested: Option<&[f64]>,
) -> Option<(Control, Vec<CellValue>)> {
    let options = numeric_options(table, column).ok()?;

    let selected = match requested {
        Some(values) => values.iter().map(|&v| CellValue::Number(v)).collect(),
        None => default_selection(&options),
    };

    let control = Control::MultiSelect {
        id: id.to_string(),
        label: label.to_string(),
        options,
        selected: selected.clone(),
    };

    Some((control, selected))
}
