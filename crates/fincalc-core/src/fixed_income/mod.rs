//! Fixed income calculators.

pub mod bond_value;

pub use bond_value::{
    value_bond_order, BondOrderInput, BondValuationOutput, PaymentFrequency, ProfitBasis,
};
