pub use super::payment::Entity as Payment;
pub use super::policy::Entity as Policy;
pub use super::policy_renewal::Entity as PolicyRenewal;
