//! Portfolio and investment-theory calculators.

pub mod capm;

pub use capm::{solve_capm, CapmInput, CapmOutput, CapmTarget};
