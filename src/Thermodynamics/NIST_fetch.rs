//! # NIST Chemistry WebBook Formation-Enthalpy Fetch
//!
//! ## Aim
//! Best-effort refresh of the built-in formation enthalpies from the NIST
//! Chemistry WebBook (https://webbook.nist.gov). Only the gas-phase standard
//! enthalpy of formation is extracted; everything else the WebBook publishes
//! is ignored here.
//!
//! ## Main Data Structures and Logic
//! - `NistEnthalpyParser<C>`: parser with dependency injection for the HTTP
//!   client (enables mocking in tests)
//! - Intelligent URL construction: detects CAS numbers, chemical formulas, or
//!   names
//! - Handles NIST's multi-page navigation (search results -> substance page
//!   -> gas phase thermochemistry page)
//! - CSS selectors locate the thermochemistry table; a regex pulls the first
//!   numeric token out of the value cell
//!
//! ## Usage
//! ```rust, ignore
//! let parser = NistEnthalpyParser::new();
//! let dh_f = parser.formation_enthalpy("CH4")?; // kJ/mol
//! ```

use log::{info, warn};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<String, reqwest::Error>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        self.get(url).send()?.text()
    }
}

/// error types for the enthalpy fetch
#[derive(Debug, Error)]
pub enum NistFetchError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Substance not found")]
    SubstanceNotFound,
    #[error("No gas phase formation enthalpy published for this substance")]
    EnthalpyNotPublished,
}

pub struct NistEnthalpyParser<C: HttpClient> {
    client: C,
}

impl NistEnthalpyParser<Client> {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// client with a short request timeout so a hung fetch fails fast and
    /// the built-in table takes over
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for NistEnthalpyParser<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> NistEnthalpyParser<C> {
    pub fn with_client(client: C) -> Self {
        Self { client }
    }

    /// gas-phase standard enthalpy of formation in kJ/mol
    pub fn formation_enthalpy(&self, substance: &str) -> Result<f64, NistFetchError> {
        let url = self.construct_url(substance)?;
        let html = self.fetch_page(&url)?;
        if !self.check_substance_exists(&html) {
            return Err(NistFetchError::SubstanceNotFound);
        }

        let url_of_substance = self.get_url_of_substance(&html, &url)?;
        let html_of_substance = self.fetch_page(&url_of_substance)?;

        let final_url = self.get_thermochemistry_url(&html_of_substance, &url_of_substance)?;
        let html_of_phase = self.fetch_page(&final_url)?;

        self.extract_formation_enthalpy(&html_of_phase)
    }

    pub fn construct_url(&self, substance: &str) -> Result<Url, NistFetchError> {
        let substance = substance.replace(' ', "");

        // Try to determine if it's a CAS number (contains '-')
        if substance.contains('-') {
            Ok(Url::parse(&format!(
                "https://webbook.nist.gov/cgi/cbook.cgi?ID={}&Units=SI",
                substance
            ))?)
        } else if substance.chars().any(|c| c.is_ascii_digit()) {
            // If contains numbers, assume it's a chemical formula
            Ok(Url::parse(&format!(
                "https://webbook.nist.gov/cgi/cbook.cgi?Formula={}&NoIon=on&Units=SI",
                substance
            ))?)
        } else {
            // Otherwise, assume it's a name
            Ok(Url::parse(&format!(
                "https://webbook.nist.gov/cgi/cbook.cgi?Name={}&Units=SI",
                substance
            ))?)
        }
    }

    fn fetch_page(&self, url: &Url) -> Result<String, NistFetchError> {
        Ok(self.client.get_text(url.as_str())?)
    }

    fn check_substance_exists(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        let selector = Selector::parse("h1").unwrap();

        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            if text.contains("Not Found") {
                return false;
            }
        }
        true
    }

    fn get_url_of_substance(&self, html: &str, original_url: &Url) -> Result<Url, NistFetchError> {
        let document = Html::parse_document(html);

        // Check if we're on a search results page
        if let Ok(selector) = Selector::parse("ol li a") {
            if let Some(first_result) = document.select(&selector).next() {
                if let Some(href) = first_result.value().attr("href") {
                    return Ok(Url::parse(&format!("https://webbook.nist.gov{}", href))?);
                }
            }
        }

        // If not on search results page, use original URL
        Ok(original_url.clone())
    }

    fn get_thermochemistry_url(
        &self,
        html: &str,
        url_of_substance: &Url,
    ) -> Result<Url, NistFetchError> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("a").unwrap();

        for element in document.select(&selector) {
            if element
                .text()
                .collect::<String>()
                .contains("Gas phase thermochemistry data")
            {
                if let Some(href) = element.value().attr("href") {
                    return url_of_substance
                        .join(href)
                        .map_err(NistFetchError::UrlError);
                }
            }
        }

        // If we couldn't find the link, return the original URL
        Ok(url_of_substance.clone())
    }

    fn extract_formation_enthalpy(&self, html: &str) -> Result<f64, NistFetchError> {
        let document = Html::parse_document(html);
        let table_selector = Selector::parse("table").unwrap();
        let row_selector = Selector::parse("tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();
        let number_re = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();

        for table in document.select(&table_selector) {
            for row in table.select(&row_selector) {
                let cells: Vec<String> = row
                    .select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>())
                    .collect();

                if cells.len() >= 2
                    && cells[0].contains("H°")
                    && cells[0].contains("f")
                    && cells[0].contains("gas")
                {
                    // value cells look like "-110.53 ± 0.17"
                    let value_str = cells[1].split('±').next().unwrap_or("").trim().to_string();
                    if let Some(m) = number_re.find(&value_str) {
                        if let Ok(value) = m.as_str().parse::<f64>() {
                            return Ok(value);
                        }
                    }
                }
            }
        }

        Err(NistFetchError::EnthalpyNotPublished)
    }
}

/// Fetch formation enthalpies for a list of species, best-effort: species
/// that cannot be resolved are skipped with a warning. Values are converted
/// from the WebBook's kJ/mol into the kJ/kmol the enthalpy table carries.
pub fn fetch_formation_enthalpies<C: HttpClient>(
    parser: &NistEnthalpyParser<C>,
    species: &[String],
) -> HashMap<String, f64> {
    let mut fetched = HashMap::new();
    for name in species {
        match parser.formation_enthalpy(name) {
            Ok(dh_f) => {
                info!("NIST formation enthalpy for {}: {} kJ/mol", name, dh_f);
                fetched.insert(name.clone(), dh_f * 1000.0);
            }
            Err(e) => {
                warn!("NIST fetch skipped for {}: {}", name, e);
            }
        }
    }
    fetched
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockClient {
        body: String,
    }

    impl HttpClient for MockClient {
        fn get_text(&self, _url: &str) -> Result<String, reqwest::Error> {
            Ok(self.body.clone())
        }
    }

    const THERMO_PAGE: &str = r#"
        <html><body>
        <h1>Carbon monoxide</h1>
        <table>
          <tr><th>Quantity</th><th>Value</th><th>Units</th></tr>
          <tr><td>ΔfH°gas</td><td>-110.53 ± 0.17</td><td>kJ/mol</td></tr>
          <tr><td>S°gas</td><td>197.66</td><td>J/mol*K</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn test_construct_url_by_kind() {
        let parser = NistEnthalpyParser::with_client(MockClient {
            body: String::new(),
        });
        let by_cas = parser.construct_url("630-08-0").unwrap();
        assert!(by_cas.as_str().contains("ID=630-08-0"));
        let by_formula = parser.construct_url("CO2").unwrap();
        assert!(by_formula.as_str().contains("Formula=CO2"));
        let by_name = parser.construct_url("methane").unwrap();
        assert!(by_name.as_str().contains("Name=methane"));
    }

    #[test]
    fn test_extract_formation_enthalpy_from_table() {
        let parser = NistEnthalpyParser::with_client(MockClient {
            body: THERMO_PAGE.to_string(),
        });
        let dh_f = parser.formation_enthalpy("CO").unwrap();
        assert!((dh_f - (-110.53)).abs() < 1e-9);
    }

    #[test]
    fn test_enthalpy_not_published() {
        let parser = NistEnthalpyParser::with_client(MockClient {
            body: "<html><body><h1>Argon</h1><table><tr><td>S°gas</td><td>154.8</td></tr></table></body></html>"
                .to_string(),
        });
        assert!(matches!(
            parser.formation_enthalpy("Ar"),
            Err(NistFetchError::EnthalpyNotPublished)
        ));
    }

    #[test]
    fn test_substance_not_found() {
        let parser = NistEnthalpyParser::with_client(MockClient {
            body: "<html><body><h1>Name Not Found</h1></body></html>".to_string(),
        });
        assert!(matches!(
            parser.formation_enthalpy("nonsense"),
            Err(NistFetchError::SubstanceNotFound)
        ));
    }

    #[test]
    fn test_fetch_is_best_effort() {
        let parser = NistEnthalpyParser::with_client(MockClient {
            body: THERMO_PAGE.to_string(),
        });
        let species = vec!["CO".to_string()];
        let fetched = fetch_formation_enthalpies(&parser, &species);
        // kJ/mol from the page scaled into kJ/kmol
        assert!((fetched["CO"] - (-110530.0)).abs() < 1.0);
    }
}
