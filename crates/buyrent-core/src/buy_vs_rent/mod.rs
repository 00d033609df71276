pub mod analysis;
pub mod assumptions;
pub mod buy;
pub mod comparison;
pub mod investment;
pub mod recommendation;
pub mod rent;

pub use analysis::{analyze_buy_vs_rent, compute_buy_vs_rent, BuyVsRentOutput};
pub use assumptions::{
    AnalysisWindow, BuyVsRentInput, HouseholdAssumptions, InvestmentAssumptions, LoanTerms,
    OwnershipCostAssumptions, RentAssumptions, validate_input, MAX_SERIES_YEARS,
};
pub use comparison::{YearlyComparison, YearlyComparisonRow};
pub use recommendation::{
    AffordabilityBand, PriceToRentBand, Recommendation, RecommendationPolicy,
    RecommendationReason, Verdict,
};
