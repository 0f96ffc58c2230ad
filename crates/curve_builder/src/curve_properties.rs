//! Curve-properties table: one row per curve, naming its interpolation
//! scheme and the solve stage it belongs to.

use curve_model::InterpolationMode;

use crate::error::BuildError;

const CURVE_PROPERTIES_TABLE_COLUMNS: [&str; 3] = ["Curve", "Interpolation", "Solve Stage"];

fn interpolation_mode_from_name(curve_id: &str, value: &str) -> Result<InterpolationMode, BuildError> {
    match value {
        "LinearLogDf" => Ok(InterpolationMode::LinearLogDf),
        "LinearCczr" => Ok(InterpolationMode::LinearCczr),
        "CubicLogDf" => Ok(InterpolationMode::CubicLogDf),
        other => Err(BuildError::UnknownInterpolationMode { curve_id: curve_id.to_string(), value: other.to_string() }),
    }
}

/// Parse a tab-separated curve-properties table: a header row naming
/// `Curve, Interpolation, Solve Stage` (any order), followed by one row
/// per curve. Blank lines are skipped. Returns `(curve_id,
/// interpolation_mode, solve_stage)` triples in file order.
pub fn parse_curve_properties_table(text: &str) -> Result<Vec<(String, InterpolationMode, i64)>, BuildError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or("");
    let cols: Vec<&str> = header.split('\t').collect();
    let idx = |name: &str| -> Result<usize, BuildError> {
        cols.iter().position(|c| *c == name).ok_or_else(|| BuildError::MissingTableColumn { column: name.to_string() })
    };

    let indices: Vec<usize> = CURVE_PROPERTIES_TABLE_COLUMNS.iter().map(|c| idx(c)).collect::<Result<_, _>>()?;
    let [i_curve, i_interp, i_stage] = indices[..] else { unreachable!() };

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let curve_id = fields[i_curve].to_string();
        let interpolation_mode = interpolation_mode_from_name(&curve_id, fields[i_interp])?;
        let stage: i64 = fields[i_stage]
            .trim()
            .parse()
            .map_err(|_| BuildError::InvalidSolveStage { curve_id: curve_id.clone(), value: fields[i_stage].to_string() })?;
        rows.push((curve_id, interpolation_mode, stage));
    }
    Ok(rows)
}
