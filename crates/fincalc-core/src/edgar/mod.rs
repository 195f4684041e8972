//! SEC EDGAR integration.

pub mod filings;

pub use filings::{
    locate_filing, open_filing, CikDirectory, CompanyFilings, EdgarIdentity, FilingMatch,
    FilingQuery,
};
