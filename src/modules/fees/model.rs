use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const FEE_TYPES: &[&str] = &[
    "tuition",
    "transport",
    "library",
    "sports",
    "exam",
    "hostel",
    "other",
];
pub const FEE_STATUSES: &[&str] = &["paid", "pending", "overdue", "partial"];
pub const PAYMENT_METHODS: &[&str] = &["cash", "card", "online", "cheque", "bank_transfer"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: Uuid,
    pub student_id: Uuid,
    pub academic_year: String,
    pub fee_type: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: String,
    pub paid_amount: f64,
    pub payment_date: Option<chrono::DateTime<chrono::Utc>>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub receipt_number: Option<String>,
    pub remarks: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeeDto {
    pub student_id: Uuid,
    #[validate(length(min = 1))]
    pub academic_year: String,
    pub fee_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
}

/// Teacher-side status correction for a single fee.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeeStatusDto {
    #[validate(length(min = 1))]
    pub status: String,
    #[validate(range(min = 0.0))]
    pub paid_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub remarks: Option<String>,
}

/// Parent-side payment against one of their child's fees.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayFeeDto {
    pub fee_id: Uuid,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    #[validate(length(min = 1))]
    pub payment_method: String,
}

/// Count and amount totals for one fee status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeStatusSummary {
    pub status: String,
    pub count: i64,
    pub total_amount: f64,
    pub paid_amount: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeFilterParams {
    pub student_id: Option<Uuid>,
    pub status: Option<String>,
    pub academic_year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_dto_rejects_zero_amount() {
        let dto = PayFeeDto {
            fee_id: Uuid::new_v4(),
            amount: 0.0,
            payment_method: "cash".into(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn vocabularies_match_schema_constraints() {
        assert!(FEE_TYPES.contains(&"tuition"));
        assert!(FEE_STATUSES.contains(&"partial"));
        assert!(PAYMENT_METHODS.contains(&"bank_transfer"));
        assert!(!PAYMENT_METHODS.contains(&"crypto"));
    }
}
