//! Pay and tax calculations shared by the pay calculator, take-home pay
//! calculator and salary converter.
//!
//! Each module covers one step; [`PayCalculator`] runs them in order:
//!
//! 1. [`normalizer`] turns any pay cadence into annual gross.
//! 2. [`federal`], [`state`] and [`payroll`] compute the four tax components.
//! 3. [`distributor`] turns annual figures back into the requested cadence.
//!
//! [`converter`] is the gross-only sibling used by the salary converter.

pub mod common;
pub mod converter;
pub mod distributor;
pub mod federal;
pub mod normalizer;
pub mod pay_calculator;
pub mod payroll;
pub mod state;

pub use converter::SalaryConverter;
pub use distributor::{distribute, effective_tax_rate_percent};
pub use federal::{BracketScheduleError, FederalTaxSchedule};
pub use normalizer::annualize;
pub use pay_calculator::{PayCalculator, PayError};
pub use payroll::{PayrollTaxCalculator, PayrollTaxes};
pub use state::state_income_tax;
