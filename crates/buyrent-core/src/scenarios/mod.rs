pub mod sensitivity;

pub use sensitivity::{
    run_sensitivity, BuyVsRentSensitivityInput, SensitivityOutput, SensitivityParameter,
    SensitivityPoint, SensitivityVariable,
};
