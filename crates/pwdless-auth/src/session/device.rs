//! Client device detection from the `User-Agent` header.

use woothee::parser::Parser;

const UNKNOWN: &str = "UNKNOWN";

/// Device metadata stored on a refresh record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Whether the client is a phone.
    pub mobile: bool,
    /// `"<browser> on <os>"`.
    pub identifier: String,
}

impl DeviceInfo {
    /// Derives device metadata; a missing or unparseable agent yields
    /// `"UNKNOWN on UNKNOWN"`.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let parser = Parser::new();
        let parsed = user_agent
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .and_then(|ua| parser.parse(ua));

        match parsed {
            Some(result) => Self {
                mobile: matches!(result.category, "smartphone" | "mobilephone"),
                identifier: format!("{} on {}", or_unknown(result.name), or_unknown(result.os)),
            },
            None => Self {
                mobile: false,
                identifier: format!("{UNKNOWN} on {UNKNOWN}"),
            },
        }
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { UNKNOWN } else { value }
}
