//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application, so callers do not import from the `entity` crate directly.

/// Type alias for the insurance policy database model.
///
/// # Fields (from `entity::policy::Model`)
/// - `id` - Primary key
/// - `policy_number` - Business identifier of the policy (unique)
/// - `policy_value` - Total value of one cycle of the policy
/// - `number_of_payments` - Installments per cycle
/// - `payment_frequency_id` - Recurrence of the installments
/// - `start_date` - Policy start date
/// - `status_id` - Lifecycle status
/// - `created_at` / `updated_at` - Record timestamps
pub type PolicyModel = entity::policy::Model;

/// Type alias for the policy renewal database model.
///
/// Each renewal extends its policy's installment budget by one more cycle.
pub type PolicyRenewalModel = entity::policy_renewal::Model;

/// Type alias for the payment (installment) database model.
///
/// # Fields (from `entity::payment::Model`)
/// - `id` - Primary key
/// - `policy_id` - Owning policy
/// - `number_payment` - 1-based installment number, contiguous per policy
/// - `value` - Installment amount
/// - `pending_value` - Balance left in the current cycle after this installment
/// - `due_date` - Date the installment becomes payable
/// - `status_payment_id` - Payment status
/// - `created_at` - When the row was written
pub type PaymentModel = entity::payment::Model;
