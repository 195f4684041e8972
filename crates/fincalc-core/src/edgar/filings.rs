//! SEC EDGAR filing lookup.
//!
//! Two sequential GETs — the ticker-to-CIK directory, then the per-CIK
//! submissions feed — followed by a prefix filter on filing date and form
//! type. The first match yields an archive URL for the filing's primary
//! document, which can be opened in the caller's default browser.
//!
//! The SEC requires automated requests to carry an identifying
//! `User-Agent`; callers supply a name and contact email through
//! [`EdgarIdentity`]. No retries, pagination, or caching: each lookup
//! performs exactly two requests.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::FinCalcResult;

const TICKER_DIRECTORY_URL: &str = "https://www.sec.gov/files/company_tickers.json";
const SUBMISSIONS_URL_BASE: &str = "https://data.sec.gov/submissions";
const ARCHIVES_URL_BASE: &str = "https://www.sec.gov/Archives/edgar/data";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Requester identification, required by the SEC's access policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgarIdentity {
    pub name: String,
    pub email: String,
}

impl EdgarIdentity {
    /// `User-Agent` value in the SEC's expected "Name (email)" form.
    pub fn user_agent(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

// ---------------------------------------------------------------------------
// Ticker directory
// ---------------------------------------------------------------------------

/// One record of the SEC company tickers file.
#[derive(Debug, Deserialize)]
struct CompanyTickerRecord {
    cik_str: u64,
    ticker: String,
    title: String,
}

/// Ticker-to-CIK directory built from the SEC company tickers file.
#[derive(Debug, Clone)]
pub struct CikDirectory {
    /// Uppercased ticker → (10-digit CIK, company title)
    ticker_to_cik: HashMap<String, (String, String)>,
}

impl CikDirectory {
    /// Download and parse the company ticker directory.
    pub fn fetch(client: &reqwest::blocking::Client) -> FinCalcResult<Self> {
        let response = client.get(TICKER_DIRECTORY_URL).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FinCalcError::Http {
                context: "fetching the SEC company ticker directory".into(),
                status: status.as_u16(),
            });
        }

        // The file is a map from a running index to company records
        let records: HashMap<String, CompanyTickerRecord> = response.json()?;
        Ok(Self::from_records(records.into_values()))
    }

    /// Parse a directory from raw JSON. Used by [`Self::fetch`] consumers
    /// that already hold the body, and by tests.
    pub fn from_json(json: &str) -> FinCalcResult<Self> {
        let records: HashMap<String, CompanyTickerRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records.into_values()))
    }

    fn from_records(records: impl IntoIterator<Item = CompanyTickerRecord>) -> Self {
        let mut ticker_to_cik = HashMap::new();
        for record in records {
            ticker_to_cik.insert(
                record.ticker.to_uppercase(),
                (pad_cik(&record.cik_str.to_string()), record.title),
            );
        }
        Self { ticker_to_cik }
    }

    /// Resolve a ticker (case-insensitive) to its zero-padded CIK.
    pub fn lookup(&self, ticker: &str) -> FinCalcResult<&str> {
        let key = ticker.to_uppercase();
        self.ticker_to_cik
            .get(&key)
            .map(|(cik, _title)| cik.as_str())
            .ok_or(FinCalcError::TickerNotFound(key))
    }

    /// Company title for a ticker, if present.
    pub fn title(&self, ticker: &str) -> Option<&str> {
        self.ticker_to_cik
            .get(&ticker.to_uppercase())
            .map(|(_cik, title)| title.as_str())
    }
}

/// Zero-pad a CIK to the 10 digits EDGAR URLs expect.
pub fn pad_cik(cik: &str) -> String {
    format!("{cik:0>10}")
}

// ---------------------------------------------------------------------------
// Submissions feed
// ---------------------------------------------------------------------------

/// Company filing history from the EDGAR submissions feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyFilings {
    pub cik: String,
    pub name: String,
    pub filings: FilingHistory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilingHistory {
    pub recent: RecentFilings,
}

/// The feed stores filings as parallel arrays; index i across all four
/// fields describes one filing, most recent first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    pub accession_number: Vec<String>,
    pub form: Vec<String>,
    pub filing_date: Vec<String>,
    pub primary_document: Vec<String>,
}

/// Filter criteria: prefix match on both the filing date and the form type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingQuery {
    /// Ticker symbol, e.g. "AAPL".
    pub ticker: String,
    /// Form type prefix, e.g. "10-K" (also matches "10-K/A").
    pub form: String,
    /// Filing year as a date prefix, e.g. "2022".
    pub year: String,
}

/// A located filing with its derived archive URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingMatch {
    pub form: String,
    pub filing_date: NaiveDate,
    pub accession_number: String,
    pub primary_document: String,
    pub document_url: String,
}

impl CompanyFilings {
    /// Download the submissions feed for a (padded) CIK.
    pub fn fetch(client: &reqwest::blocking::Client, cik: &str) -> FinCalcResult<Self> {
        let url = format!("{SUBMISSIONS_URL_BASE}/CIK{cik}.json");
        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FinCalcError::Http {
                context: format!("fetching the EDGAR submissions feed for CIK {cik}"),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }

    /// Parse a submissions feed from raw JSON.
    pub fn from_json(json: &str) -> FinCalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// First filing whose date starts with the query year and whose form
    /// starts with the query form. The feed is sorted most recent first, so
    /// this is the latest match.
    pub fn first_match(&self, query: &FilingQuery) -> FinCalcResult<FilingMatch> {
        let recent = &self.filings.recent;
        for (i, (form, date)) in recent.form.iter().zip(&recent.filing_date).enumerate() {
            if date.starts_with(&query.year) && form.starts_with(&query.form) {
                return self.filing_at(i);
            }
        }
        Err(FinCalcError::NoMatchingFiling {
            form: query.form.clone(),
            year: query.year.clone(),
        })
    }

    fn filing_at(&self, idx: usize) -> FinCalcResult<FilingMatch> {
        let recent = &self.filings.recent;
        let field = |values: &[String], name: &str| -> FinCalcResult<String> {
            values.get(idx).cloned().ok_or_else(|| {
                FinCalcError::Parse(format!("submissions feed missing {name} at index {idx}"))
            })
        };

        let raw_date = field(&recent.filing_date, "filingDate")?;
        let filing_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
            .map_err(|e| FinCalcError::Parse(format!("invalid filing date {raw_date}: {e}")))?;

        let accession_number = field(&recent.accession_number, "accessionNumber")?;
        let primary_document = field(&recent.primary_document, "primaryDocument")?;
        let document_url = document_url(&pad_cik(&self.cik), &accession_number, &primary_document);

        Ok(FilingMatch {
            form: field(&recent.form, "form")?,
            filing_date,
            accession_number,
            primary_document,
            document_url,
        })
    }
}

/// Archive URL for a filing's primary document. Accession-number hyphens
/// are stripped in the archive path.
pub fn document_url(cik: &str, accession_number: &str, primary_document: &str) -> String {
    let accession = accession_number.replace('-', "");
    format!("{ARCHIVES_URL_BASE}/{cik}/{accession}/{primary_document}")
}

// ---------------------------------------------------------------------------
// Lookup orchestration
// ---------------------------------------------------------------------------

/// Resolve a ticker to its latest matching filing: directory GET, CIK
/// lookup, submissions GET, prefix filter.
pub fn locate_filing(identity: &EdgarIdentity, query: &FilingQuery) -> FinCalcResult<FilingMatch> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(identity.user_agent())
        .build()?;

    let directory = CikDirectory::fetch(&client)?;
    let cik = directory.lookup(&query.ticker)?;
    let filings = CompanyFilings::fetch(&client, cik)?;
    filings.first_match(query)
}

/// Open the filing's primary document in the default browser.
pub fn open_filing(filing: &FilingMatch) -> FinCalcResult<()> {
    webbrowser::open(&filing.document_url).map_err(|e| FinCalcError::Browser(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DIRECTORY_FIXTURE: &str = r#"{
        "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
        "1": {"cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP"}
    }"#;

    const SUBMISSIONS_FIXTURE: &str = r#"{
        "cik": "320193",
        "name": "Apple Inc.",
        "filings": {
            "recent": {
                "accessionNumber": [
                    "0000320193-22-000059",
                    "0000320193-22-000007",
                    "0000320193-21-000105"
                ],
                "form": ["8-K", "10-K", "10-Q"],
                "filingDate": ["2022-05-02", "2022-02-01", "2021-07-28"],
                "primaryDocument": [
                    "aapl-8k.htm",
                    "aapl-20211225.htm",
                    "aapl-20210626.htm"
                ]
            }
        }
    }"#;

    fn query(form: &str, year: &str) -> FilingQuery {
        FilingQuery {
            ticker: "AAPL".into(),
            form: form.into(),
            year: year.into(),
        }
    }

    // -----------------------------------------------------------------------
    // 1. CIK padding
    // -----------------------------------------------------------------------
    #[test]
    fn test_pad_cik() {
        assert_eq!(pad_cik("320193"), "0000320193");
        assert_eq!(pad_cik("1234"), "0000001234");
        assert_eq!(pad_cik("1234567890"), "1234567890");
    }

    // -----------------------------------------------------------------------
    // 2. Directory lookup
    // -----------------------------------------------------------------------
    #[test]
    fn test_directory_lookup_pads_and_ignores_case() {
        let directory = CikDirectory::from_json(DIRECTORY_FIXTURE).unwrap();

        assert_eq!(directory.lookup("AAPL").unwrap(), "0000320193");
        assert_eq!(directory.lookup("aapl").unwrap(), "0000320193");
        assert_eq!(directory.title("aapl"), Some("Apple Inc."));
    }

    #[test]
    fn test_unknown_ticker_not_found() {
        let directory = CikDirectory::from_json(DIRECTORY_FIXTURE).unwrap();

        match directory.lookup("ZZZZ").unwrap_err() {
            FinCalcError::TickerNotFound(ticker) => assert_eq!(ticker, "ZZZZ"),
            other => panic!("Expected TickerNotFound, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // 3. Filing selection and URL derivation
    // -----------------------------------------------------------------------
    #[test]
    fn test_first_match_builds_archive_url() {
        let filings = CompanyFilings::from_json(SUBMISSIONS_FIXTURE).unwrap();
        let filing = filings.first_match(&query("10-K", "2022")).unwrap();

        assert_eq!(filing.form, "10-K");
        assert_eq!(
            filing.filing_date,
            NaiveDate::from_ymd_opt(2022, 2, 1).unwrap()
        );
        assert_eq!(filing.accession_number, "0000320193-22-000007");
        assert_eq!(
            filing.document_url,
            "https://www.sec.gov/Archives/edgar/data/0000320193/000032019322000007/aapl-20211225.htm"
        );
    }

    #[test]
    fn test_form_filter_is_prefix_match() {
        // A "10" query matches the first 10-* filing of the year
        let filings = CompanyFilings::from_json(SUBMISSIONS_FIXTURE).unwrap();
        let filing = filings.first_match(&query("10", "2022")).unwrap();
        assert_eq!(filing.form, "10-K");
    }

    #[test]
    fn test_year_filter_is_date_prefix_match() {
        let filings = CompanyFilings::from_json(SUBMISSIONS_FIXTURE).unwrap();
        let filing = filings.first_match(&query("10", "2021")).unwrap();
        assert_eq!(filing.form, "10-Q");
        assert_eq!(
            filing.filing_date,
            NaiveDate::from_ymd_opt(2021, 7, 28).unwrap()
        );
    }

    // -----------------------------------------------------------------------
    // 4. No match reports form and year; nothing to open
    // -----------------------------------------------------------------------
    #[test]
    fn test_no_match_reported() {
        let filings = CompanyFilings::from_json(SUBMISSIONS_FIXTURE).unwrap();

        match filings.first_match(&query("10-K", "2019")).unwrap_err() {
            FinCalcError::NoMatchingFiling { form, year } => {
                assert_eq!(form, "10-K");
                assert_eq!(year, "2019");
            }
            other => panic!("Expected NoMatchingFiling, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // 5. Identity header form
    // -----------------------------------------------------------------------
    #[test]
    fn test_user_agent_form() {
        let identity = EdgarIdentity {
            name: "John Doe".into(),
            email: "johndoe@example.com".into(),
        };
        assert_eq!(identity.user_agent(), "John Doe (johndoe@example.com)");
    }
}
