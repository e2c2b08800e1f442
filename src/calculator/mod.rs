//! Financial calculators

pub mod savings;

pub use savings::{
    calculate as calculate_savings, SavingsInput, SavingsOutcome, SavingsPlan, TimelinePoint,
};
