//! Monthly revenue report endpoint.

use api_types::report::{GetReport, Report, ReportRow};
use axum::{Json, extract::State};
use engine::Period;

use crate::{ServerResult, ok, server::ServerState};

pub async fn get(
    State(state): State<ServerState>,
    Json(payload): Json<GetReport>,
) -> ServerResult<Report> {
    let period: Period = payload.period.parse()?;
    let rows = state.engine.report(period).await?;
    ok(Report {
        period: period.to_string(),
        rows: rows
            .into_iter()
            .map(|row| ReportRow {
                service_id: row.service_id,
                service_name: row.service_name,
                total_revenue: row.total_revenue,
            })
            .collect(),
    })
}
