use crate::{Period, ResultEngine, ServiceRevenue, store};

use super::{Engine, ensure_positive, logged};

impl Engine {
    /// Adds `amount` to the revenue of `service_id` in `period` and returns
    /// the new total.
    ///
    /// [`Engine::write_off`] does this as part of its own unit of work; this
    /// entry point is for corrections made by an operator.
    pub async fn add_report_record(
        &self,
        service_id: i64,
        amount: i64,
        period: Period,
    ) -> ResultEngine<i64> {
        ensure_positive(amount, "amount")?;
        let total = logged(
            "add report record",
            store::add_report_record(&self.database, period, service_id, amount).await,
        )?;
        tracing::info!(service_id, amount, total, %period, "report record added");
        Ok(total)
    }

    /// Revenue per service for `period`, ordered by service id.
    pub async fn report(&self, period: Period) -> ResultEngine<Vec<ServiceRevenue>> {
        logged(
            "report",
            store::report_for_period(&self.database, period).await,
        )
    }
}
