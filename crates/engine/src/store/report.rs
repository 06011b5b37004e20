use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, OnConflict, Query},
};

use crate::{Period, ResultEngine, ServiceRevenue, error::StepExt, report};

use super::{build_err, column_i64, returning_one};

/// Adds `amount` to the period's revenue of `service_id`, creating the row
/// on first use. Returns the new total.
pub(crate) async fn add_report_record<C: ConnectionTrait>(
    db: &C,
    period: Period,
    service_id: i64,
    amount: i64,
) -> ResultEngine<i64> {
    const STEP: &str = "add report record";
    let mut stmt = Query::insert();
    stmt.into_table(report::Entity)
        .columns([
            report::Column::Period,
            report::Column::ServiceId,
            report::Column::TotalRevenue,
        ])
        .on_conflict(
            OnConflict::columns([report::Column::Period, report::Column::ServiceId])
                .value(
                    report::Column::TotalRevenue,
                    Expr::col((report::Entity, report::Column::TotalRevenue)).add(amount),
                )
                .to_owned(),
        )
        .returning_col(report::Column::TotalRevenue);
    stmt.values([
        Expr::value(period.to_string()),
        Expr::value(service_id),
        Expr::value(amount),
    ])
    .map_err(build_err)
    .step(STEP)?;

    let row = returning_one(db, &stmt, STEP)
        .await?
        .ok_or(DbErr::RecordNotInserted)
        .step(STEP)?;
    column_i64(&row, "total_revenue", STEP)
}

pub(crate) async fn report_for_period<C: ConnectionTrait>(
    db: &C,
    period: Period,
) -> ResultEngine<Vec<ServiceRevenue>> {
    let models = report::Entity::find()
        .filter(report::Column::Period.eq(period.to_string()))
        .order_by_asc(report::Column::ServiceId)
        .all(db)
        .await
        .step("read report")?;
    Ok(models.into_iter().map(ServiceRevenue::from).collect())
}
