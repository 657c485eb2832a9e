//! Region code value type.
//!
//! # Responsibility
//! - Hold a validated ISO 3166-1 alpha-2 region code.
//! - Provide English display names and ordered picker options.
//!
//! # Invariants
//! - Stored codes are always assigned ISO 3166-1 alpha-2 codes in uppercase.
//! - Every accepted code has a display name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static REGION_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid region code regex"));

static PICKER_OPTIONS: Lazy<Vec<RegionCode>> = Lazy::new(|| {
    let mut options = REGIONS
        .iter()
        .map(|(code, _)| RegionCode((*code).to_string()))
        .collect::<Vec<_>>();
    options.sort_by_cached_key(|region| collation_key(region.display_name()));
    options
});

// ISO 3166-1 alpha-2, officially assigned codes. Sorted by code for binary search.
const REGIONS: &[(&str, &str)] = &[
    ("AD", "Andorra"),
    ("AE", "United Arab Emirates"),
    ("AF", "Afghanistan"),
    ("AG", "Antigua & Barbuda"),
    ("AI", "Anguilla"),
    ("AL", "Albania"),
    ("AM", "Armenia"),
    ("AO", "Angola"),
    ("AQ", "Antarctica"),
    ("AR", "Argentina"),
    ("AS", "American Samoa"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("AW", "Aruba"),
    ("AX", "Åland Islands"),
    ("AZ", "Azerbaijan"),
    ("BA", "Bosnia & Herzegovina"),
    ("BB", "Barbados"),
    ("BD", "Bangladesh"),
    ("BE", "Belgium"),
    ("BF", "Burkina Faso"),
    ("BG", "Bulgaria"),
    ("BH", "Bahrain"),
    ("BI", "Burundi"),
    ("BJ", "Benin"),
    ("BL", "St. Barthélemy"),
    ("BM", "Bermuda"),
    ("BN", "Brunei"),
    ("BO", "Bolivia"),
    ("BQ", "Caribbean Netherlands"),
    ("BR", "Brazil"),
    ("BS", "Bahamas"),
    ("BT", "Bhutan"),
    ("BV", "Bouvet Island"),
    ("BW", "Botswana"),
    ("BY", "Belarus"),
    ("BZ", "Belize"),
    ("CA", "Canada"),
    ("CC", "Cocos (Keeling) Islands"),
    ("CD", "Congo - Kinshasa"),
    ("CF", "Central African Republic"),
    ("CG", "Congo - Brazzaville"),
    ("CH", "Switzerland"),
    ("CI", "Côte d’Ivoire"),
    ("CK", "Cook Islands"),
    ("CL", "Chile"),
    ("CM", "Cameroon"),
    ("CN", "China"),
    ("CO", "Colombia"),
    ("CR", "Costa Rica"),
    ("CU", "Cuba"),
    ("CV", "Cape Verde"),
    ("CW", "Curaçao"),
    ("CX", "Christmas Island"),
    ("CY", "Cyprus"),
    ("CZ", "Czechia"),
    ("DE", "Germany"),
    ("DJ", "Djibouti"),
    ("DK", "Denmark"),
    ("DM", "Dominica"),
    ("DO", "Dominican Republic"),
    ("DZ", "Algeria"),
    ("EC", "Ecuador"),
    ("EE", "Estonia"),
    ("EG", "Egypt"),
    ("EH", "Western Sahara"),
    ("ER", "Eritrea"),
    ("ES", "Spain"),
    ("ET", "Ethiopia"),
    ("FI", "Finland"),
    ("FJ", "Fiji"),
    ("FK", "Falkland Islands"),
    ("FM", "Micronesia"),
    ("FO", "Faroe Islands"),
    ("FR", "France"),
    ("GA", "Gabon"),
    ("GB", "United Kingdom"),
    ("GD", "Grenada"),
    ("GE", "Georgia"),
    ("GF", "French Guiana"),
    ("GG", "Guernsey"),
    ("GH", "Ghana"),
    ("GI", "Gibraltar"),
    ("GL", "Greenland"),
    ("GM", "Gambia"),
    ("GN", "Guinea"),
    ("GP", "Guadeloupe"),
    ("GQ", "Equatorial Guinea"),
    ("GR", "Greece"),
    ("GS", "South Georgia & South Sandwich Islands"),
    ("GT", "Guatemala"),
    ("GU", "Guam"),
    ("GW", "Guinea-Bissau"),
    ("GY", "Guyana"),
    ("HK", "Hong Kong SAR China"),
    ("HM", "Heard & McDonald Islands"),
    ("HN", "Honduras"),
    ("HR", "Croatia"),
    ("HT", "Haiti"),
    ("HU", "Hungary"),
    ("ID", "Indonesia"),
    ("IE", "Ireland"),
    ("IL", "Israel"),
    ("IM", "Isle of Man"),
    ("IN", "India"),
    ("IO", "British Indian Ocean Territory"),
    ("IQ", "Iraq"),
    ("IR", "Iran"),
    ("IS", "Iceland"),
    ("IT", "Italy"),
    ("JE", "Jersey"),
    ("JM", "Jamaica"),
    ("JO", "Jordan"),
    ("JP", "Japan"),
    ("KE", "Kenya"),
    ("KG", "Kyrgyzstan"),
    ("KH", "Cambodia"),
    ("KI", "Kiribati"),
    ("KM", "Comoros"),
    ("KN", "St. Kitts & Nevis"),
    ("KP", "North Korea"),
    ("KR", "South Korea"),
    ("KW", "Kuwait"),
    ("KY", "Cayman Islands"),
    ("KZ", "Kazakhstan"),
    ("LA", "Laos"),
    ("LB", "Lebanon"),
    ("LC", "St. Lucia"),
    ("LI", "Liechtenstein"),
    ("LK", "Sri Lanka"),
    ("LR", "Liberia"),
    ("LS", "Lesotho"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("LY", "Libya"),
    ("MA", "Morocco"),
    ("MC", "Monaco"),
    ("MD", "Moldova"),
    ("ME", "Montenegro"),
    ("MF", "St. Martin"),
    ("MG", "Madagascar"),
    ("MH", "Marshall Islands"),
    ("MK", "North Macedonia"),
    ("ML", "Mali"),
    ("MM", "Myanmar (Burma)"),
    ("MN", "Mongolia"),
    ("MO", "Macao SAR China"),
    ("MP", "Northern Mariana Islands"),
    ("MQ", "Martinique"),
    ("MR", "Mauritania"),
    ("MS", "Montserrat"),
    ("MT", "Malta"),
    ("MU", "Mauritius"),
    ("MV", "Maldives"),
    ("MW", "Malawi"),
    ("MX", "Mexico"),
    ("MY", "Malaysia"),
    ("MZ", "Mozambique"),
    ("NA", "Namibia"),
    ("NC", "New Caledonia"),
    ("NE", "Niger"),
    ("NF", "Norfolk Island"),
    ("NG", "Nigeria"),
    ("NI", "Nicaragua"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NP", "Nepal"),
    ("NR", "Nauru"),
    ("NU", "Niue"),
    ("NZ", "New Zealand"),
    ("OM", "Oman"),
    ("PA", "Panama"),
    ("PE", "Peru"),
    ("PF", "French Polynesia"),
    ("PG", "Papua New Guinea"),
    ("PH", "Philippines"),
    ("PK", "Pakistan"),
    ("PL", "Poland"),
    ("PM", "St. Pierre & Miquelon"),
    ("PN", "Pitcairn Islands"),
    ("PR", "Puerto Rico"),
    ("PS", "Palestinian Territories"),
    ("PT", "Portugal"),
    ("PW", "Palau"),
    ("PY", "Paraguay"),
    ("QA", "Qatar"),
    ("RE", "Réunion"),
    ("RO", "Romania"),
    ("RS", "Serbia"),
    ("RU", "Russia"),
    ("RW", "Rwanda"),
    ("SA", "Saudi Arabia"),
    ("SB", "Solomon Islands"),
    ("SC", "Seychelles"),
    ("SD", "Sudan"),
    ("SE", "Sweden"),
    ("SG", "Singapore"),
    ("SH", "St. Helena"),
    ("SI", "Slovenia"),
    ("SJ", "Svalbard & Jan Mayen"),
    ("SK", "Slovakia"),
    ("SL", "Sierra Leone"),
    ("SM", "San Marino"),
    ("SN", "Senegal"),
    ("SO", "Somalia"),
    ("SR", "Suriname"),
    ("SS", "South Sudan"),
    ("ST", "São Tomé & Príncipe"),
    ("SV", "El Salvador"),
    ("SX", "Sint Maarten"),
    ("SY", "Syria"),
    ("SZ", "Eswatini"),
    ("TC", "Turks & Caicos Islands"),
    ("TD", "Chad"),
    ("TF", "French Southern Territories"),
    ("TG", "Togo"),
    ("TH", "Thailand"),
    ("TJ", "Tajikistan"),
    ("TK", "Tokelau"),
    ("TL", "Timor-Leste"),
    ("TM", "Turkmenistan"),
    ("TN", "Tunisia"),
    ("TO", "Tonga"),
    ("TR", "Türkiye"),
    ("TT", "Trinidad & Tobago"),
    ("TV", "Tuvalu"),
    ("TW", "Taiwan"),
    ("TZ", "Tanzania"),
    ("UA", "Ukraine"),
    ("UG", "Uganda"),
    ("UM", "U.S. Outlying Islands"),
    ("US", "United States"),
    ("UY", "Uruguay"),
    ("UZ", "Uzbekistan"),
    ("VA", "Vatican City"),
    ("VC", "St. Vincent & Grenadines"),
    ("VE", "Venezuela"),
    ("VG", "British Virgin Islands"),
    ("VI", "U.S. Virgin Islands"),
    ("VN", "Vietnam"),
    ("VU", "Vanuatu"),
    ("WF", "Wallis & Futuna"),
    ("WS", "Samoa"),
    ("YE", "Yemen"),
    ("YT", "Mayotte"),
    ("ZA", "South Africa"),
    ("ZM", "Zambia"),
    ("ZW", "Zimbabwe"),
];

/// Two-letter region code selected in the profile region picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Parses user or host input into a region code.
    ///
    /// Input is trimmed and uppercased before validation, so `" us "` parses
    /// as `US`. Well-formed codes that are not assigned (`XX`) are rejected.
    pub fn parse(value: &str) -> Result<Self, RegionCodeError> {
        let normalized = value.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(RegionCodeError::Empty);
        }
        if !REGION_CODE_RE.is_match(&normalized) {
            return Err(RegionCodeError::Malformed(value.trim().to_string()));
        }
        if lookup(&normalized).is_none() {
            return Err(RegionCodeError::Unknown(normalized));
        }
        Ok(Self(normalized))
    }

    /// All assigned regions, ordered by display name the way the picker lists them.
    pub fn picker_options() -> &'static [RegionCode] {
        &PICKER_OPTIONS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English display name, e.g. `Finland` for `FI`.
    pub fn display_name(&self) -> &'static str {
        // Codes are validated on construction; the fallback is unreachable.
        lookup(&self.0).unwrap_or("")
    }
}

fn lookup(code: &str) -> Option<&'static str> {
    REGIONS
        .binary_search_by(|(candidate, _)| (*candidate).cmp(code))
        .ok()
        .map(|index| REGIONS[index].1)
}

/// Folds the accented letters used in region names so `Åland Islands` sorts
/// among the A's and `Türkiye` before `Turkmenistan`.
fn collation_key(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            'Å' | 'Ã' | 'ã' | 'å' => 'a',
            'ç' => 'c',
            'é' => 'e',
            'í' => 'i',
            'ô' => 'o',
            'ü' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl Display for RegionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionCode {
    type Err = RegionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = RegionCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegionCode> for String {
    fn from(value: RegionCode) -> Self {
        value.0
    }
}

/// Region code parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionCodeError {
    Empty,
    Malformed(String),
    /// Two letters, but not an assigned ISO 3166-1 code.
    Unknown(String),
}

impl Display for RegionCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "region code must not be empty"),
            Self::Malformed(value) => {
                write!(f, "region code must be two ASCII letters, got `{value}`")
            }
            Self::Unknown(value) => {
                write!(f, "`{value}` is not an assigned ISO 3166-1 region code")
            }
        }
    }
}

impl Error for RegionCodeError {}

#[cfg(test)]
mod tests {
    use super::{collation_key, RegionCode, RegionCodeError, REGIONS};

    #[test]
    fn parse_trims_and_uppercases() {
        let code = RegionCode::parse(" us ").expect("us should parse");
        assert_eq!(code.as_str(), "US");
    }

    #[test]
    fn parse_rejects_empty_and_malformed_values() {
        assert_eq!(RegionCode::parse("  "), Err(RegionCodeError::Empty));
        assert_eq!(
            RegionCode::parse("USA"),
            Err(RegionCodeError::Malformed("USA".to_string()))
        );
        assert!(RegionCode::parse("1A").is_err());
        assert!(RegionCode::parse("ÜS").is_err());
    }

    #[test]
    fn parse_rejects_unassigned_codes() {
        assert_eq!(
            RegionCode::parse("xx"),
            Err(RegionCodeError::Unknown("XX".to_string()))
        );
        assert!(RegionCode::parse("QZ").is_err());
    }

    #[test]
    fn display_name_covers_common_and_less_common_codes() {
        assert_eq!(RegionCode::parse("FI").unwrap().display_name(), "Finland");
        assert_eq!(RegionCode::parse("pl").unwrap().display_name(), "Poland");
        assert_eq!(
            RegionCode::parse("gb").unwrap().display_name(),
            "United Kingdom"
        );
        assert_eq!(RegionCode::parse("AX").unwrap().display_name(), "Åland Islands");
    }

    #[test]
    fn region_table_is_complete_and_sorted_for_lookup() {
        assert_eq!(REGIONS.len(), 249);
        assert!(REGIONS.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert!(REGIONS.iter().all(|(_, name)| !name.is_empty()));
    }

    #[test]
    fn picker_options_list_every_region_by_display_name() {
        let options = RegionCode::picker_options();
        assert_eq!(options.len(), REGIONS.len());

        let names = options
            .iter()
            .map(RegionCode::display_name)
            .collect::<Vec<_>>();
        assert_eq!(&names[..2], &["Afghanistan", "Åland Islands"]);
        assert_eq!(names.last(), Some(&"Zimbabwe"));
        assert!(names
            .windows(2)
            .all(|pair| collation_key(pair[0]) <= collation_key(pair[1])));
    }
}
