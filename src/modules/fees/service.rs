use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::fees::model::{
    CreateFeeDto, FEE_STATUSES, FEE_TYPES, Fee, FeeStatusSummary, PAYMENT_METHODS, PayFeeDto,
    UpdateFeeStatusDto,
};
use crate::utils::errors::AppError;

pub struct FeeService;

impl FeeService {
    #[instrument(skip(db, dto))]
    pub async fn create_fee(
        db: &PgPool,
        created_by: Uuid,
        dto: CreateFeeDto,
    ) -> Result<Fee, AppError> {
        if let Some(fee_type) = &dto.fee_type {
            if !FEE_TYPES.contains(&fee_type.as_str()) {
                return Err(AppError::bad_request(format!(
                    "Invalid fee type '{}'",
                    fee_type
                )));
            }
        }

        sqlx::query_as::<_, Fee>(
            "INSERT INTO fees (student_id, academic_year, fee_type, amount, due_date, remarks, created_by)
             VALUES ($1, $2, COALESCE($3, 'tuition'), $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(dto.student_id)
        .bind(&dto.academic_year)
        .bind(&dto.fee_type)
        .bind(dto.amount)
        .bind(dto.due_date)
        .bind(&dto.remarks)
        .bind(created_by)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found("Student not found");
                }
            }
            AppError::database(e)
        })
    }

    #[instrument(skip(db))]
    pub async fn list_fees(
        db: &PgPool,
        student_id: Option<Uuid>,
        status: Option<String>,
        academic_year: Option<String>,
    ) -> Result<Vec<Fee>, AppError> {
        sqlx::query_as::<_, Fee>(
            "SELECT * FROM fees
             WHERE ($1::uuid IS NULL OR student_id = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR academic_year = $3)
             ORDER BY due_date DESC",
        )
        .bind(student_id)
        .bind(status)
        .bind(academic_year)
        .fetch_all(db)
        .await
        .context("Failed to fetch fees")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn fees_for_student(db: &PgPool, student_id: Uuid) -> Result<Vec<Fee>, AppError> {
        sqlx::query_as::<_, Fee>(
            "SELECT * FROM fees WHERE student_id = $1 ORDER BY due_date DESC",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch student fees")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_fee(db: &PgPool, id: Uuid) -> Result<Fee, AppError> {
        sqlx::query_as::<_, Fee>("SELECT * FROM fees WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch fee")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Fee record not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_fee_status(
        db: &PgPool,
        updated_by: Uuid,
        id: Uuid,
        dto: UpdateFeeStatusDto,
    ) -> Result<Fee, AppError> {
        if !FEE_STATUSES.contains(&dto.status.as_str()) {
            return Err(AppError::bad_request(format!(
                "Invalid fee status '{}'",
                dto.status
            )));
        }
        if let Some(method) = &dto.payment_method {
            if !PAYMENT_METHODS.contains(&method.as_str()) {
                return Err(AppError::bad_request(format!(
                    "Invalid payment method '{}'",
                    method
                )));
            }
        }

        sqlx::query_as::<_, Fee>(
            "UPDATE fees
             SET status = $1,
                 paid_amount = COALESCE($2, paid_amount),
                 payment_method = COALESCE($3, payment_method),
                 remarks = COALESCE($4, remarks),
                 payment_date = CASE WHEN $1 = 'paid' THEN now() ELSE payment_date END,
                 updated_by = $5,
                 updated_at = now()
             WHERE id = $6
             RETURNING *",
        )
        .bind(&dto.status)
        .bind(dto.paid_amount)
        .bind(&dto.payment_method)
        .bind(&dto.remarks)
        .bind(updated_by)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update fee status")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Fee record not found"))
    }

    /// Parent payment. Ownership is checked against the fee's student, the
    /// payment is clamped into `paid`/`partial` by comparing against the
    /// billed amount, and a transaction id plus receipt number are issued.
    #[instrument(skip(db, dto))]
    pub async fn pay_fee(db: &PgPool, parent_id: Uuid, dto: PayFeeDto) -> Result<Fee, AppError> {
        if !PAYMENT_METHODS.contains(&dto.payment_method.as_str()) {
            return Err(AppError::bad_request(format!(
                "Invalid payment method '{}'",
                dto.payment_method
            )));
        }

        let fee = Self::get_fee(db, dto.fee_id).await?;

        let owns = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM students WHERE id = $1 AND parent_id = $2)",
        )
        .bind(fee.student_id)
        .bind(parent_id)
        .fetch_one(db)
        .await
        .context("Failed to check fee ownership")
        .map_err(AppError::database)?;
        if !owns {
            return Err(AppError::forbidden("Fee is not for your child"));
        }

        if fee.status == "paid" {
            return Err(AppError::bad_request("Fee is already paid"));
        }

        let new_paid = fee.paid_amount + dto.amount;
        let status = if new_paid >= fee.amount { "paid" } else { "partial" };
        let stamp = Utc::now().timestamp_millis();

        sqlx::query_as::<_, Fee>(
            "UPDATE fees
             SET paid_amount = $1,
                 status = $2,
                 payment_date = now(),
                 payment_method = $3,
                 transaction_id = $4,
                 receipt_number = $5,
                 updated_by = $6,
                 updated_at = now()
             WHERE id = $7
             RETURNING *",
        )
        .bind(new_paid)
        .bind(status)
        .bind(&dto.payment_method)
        .bind(format!("TXN-{}", stamp))
        .bind(format!("REC-{}", stamp))
        .bind(parent_id)
        .bind(dto.fee_id)
        .fetch_one(db)
        .await
        .context("Failed to record fee payment")
        .map_err(AppError::database)
    }

    /// Fees still owed by any of the given students, soonest due first.
    #[instrument(skip(db))]
    pub async fn pending_for_students(
        db: &PgPool,
        student_ids: &[Uuid],
    ) -> Result<Vec<Fee>, AppError> {
        sqlx::query_as::<_, Fee>(
            "SELECT * FROM fees
             WHERE student_id = ANY($1) AND status IN ('pending', 'overdue', 'partial')
             ORDER BY due_date",
        )
        .bind(student_ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch pending fees")
        .map_err(AppError::database)
    }
}

/// Count and amount totals per status, in vocabulary order. Statuses with no
/// records are omitted.
pub fn status_summary(fees: &[Fee]) -> Vec<FeeStatusSummary> {
    FEE_STATUSES
        .iter()
        .filter_map(|status| {
            let mut count = 0i64;
            let mut total_amount = 0.0;
            let mut paid_amount = 0.0;
            for fee in fees.iter().filter(|f| f.status == *status) {
                count += 1;
                total_amount += fee.amount;
                paid_amount += fee.paid_amount;
            }
            (count > 0).then(|| FeeStatusSummary {
                status: (*status).to_string(),
                count,
                total_amount,
                paid_amount,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fee(status: &str, amount: f64, paid_amount: f64) -> Fee {
        let now = Utc::now();
        Fee {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            academic_year: "2025-2026".into(),
            fee_type: "tuition".into(),
            amount,
            due_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            status: status.into(),
            paid_amount,
            payment_date: None,
            payment_method: None,
            transaction_id: None,
            receipt_number: None,
            remarks: None,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_summary_totals_count_and_amounts_per_status() {
        let fees = vec![
            fee("paid", 500.0, 500.0),
            fee("paid", 300.0, 300.0),
            fee("pending", 200.0, 0.0),
            fee("partial", 400.0, 150.0),
        ];

        let summary = status_summary(&fees);
        assert_eq!(summary.len(), 3);

        let paid = summary.iter().find(|s| s.status == "paid").unwrap();
        assert_eq!(paid.count, 2);
        assert_eq!(paid.total_amount, 800.0);
        assert_eq!(paid.paid_amount, 800.0);

        let partial = summary.iter().find(|s| s.status == "partial").unwrap();
        assert_eq!(partial.count, 1);
        assert_eq!(partial.paid_amount, 150.0);
    }

    #[test]
    fn status_summary_of_nothing_is_empty() {
        assert!(status_summary(&[]).is_empty());
    }
}
