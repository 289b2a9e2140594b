use std::path::PathBuf;

use evotour_engine::{DistanceMatrix, Route};
use serde::Serialize;

use crate::util::{self, Output};

/// Validation outcome for an externally supplied route.
#[derive(Debug, Clone, Serialize)]
struct CheckReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tour_length: Option<f64>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckArg {
    /// Distance matrix JSON file (an array of rows)
    #[arg(long)]
    matrix: PathBuf,
    /// Route JSON file: the visiting order as an array of city indices,
    /// without the fixed city 0
    #[arg(long)]
    route: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CheckArg) -> anyhow::Result<()> {
    let CheckArg {
        matrix,
        route,
        output,
    } = arg;

    let rows = util::read_json_file("distance matrix", matrix)?;
    let matrix = DistanceMatrix::from_rows(rows)?;
    let route: Route = util::read_json_file("route", route)?;

    let report = match route.validate(matrix.size()) {
        Ok(()) => CheckReport {
            valid: true,
            reason: None,
            tour_length: Some(route.tour_length(&matrix)),
        },
        Err(err) => CheckReport {
            valid: false,
            reason: Some(err.to_string()),
            tour_length: None,
        },
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
