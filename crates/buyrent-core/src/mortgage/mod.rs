pub mod payment;
pub mod schedule;

pub use payment::{monthly_payment, monthly_rate, AmortizingLoan};
pub use schedule::{build_amortization_schedule, AmortizationYear, MortgageInput, MortgageOutput};
