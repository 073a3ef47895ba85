//! Static country catalog and the aggregate-row exclusion heuristic.

use serde::{Deserialize, Serialize};

const ASIA: &[&str] = &[
    "Afghanistan",
    "Armenia",
    "Azerbaijan",
    "Bangladesh",
    "Bhutan",
    "Brunei",
    "Myanmar",
    "Cambodia",
    "China",
    "Cyprus",
    "Georgia",
    "India",
    "Indonesia",
    "Iraq",
    "Iran",
    "Israel",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kuwait",
    "Kyrgyzstan",
    "Laos",
    "Lebanon",
    "Malaysia",
    "Maldives",
    "Mongolia",
    "Nepal",
    "Oman",
    "Pakistan",
    "Palestine",
    "Philippines",
    "Qatar",
    "Russia",
    "Saudi Arabia",
    "Singapore",
    "Sri Lanka",
    "South Korea",
    "North Korea",
    "Thailand",
    "Timor-Leste",
    "Turkey",
    "Turkmenistan",
    "United Arab Emirates",
    "Uzbekistan",
    "Vietnam",
    "Yemen",
];

const EUROPE: &[&str] = &[
    "Albania",
    "Andorra",
    "Armenia",
    "Austria",
    "Azerbaijan",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Georgia",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Kazakhstan",
    "Kosovo",
    "Latvia",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Moldova",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "North Macedonia",
    "Norway",
    "Poland",
    "Portugal",
    "Romania",
    "Russia",
    "San Marino",
    "Serbia",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Turkey",
    "Ukraine",
    "United Kingdom",
    "Vatican City",
];

const AMERICAS: &[&str] = &[
    "Antigua and Barbuda",
    "Argentina",
    "Bahamas",
    "Barbados",
    "Belize",
    "Bolivia",
    "Brazil",
    "Canada",
    "Chile",
    "Colombia",
    "Costa Rica",
    "Cuba",
    "Dominica",
    "Dominican Republic",
    "Ecuador",
    "El Salvador",
    "Grenada",
    "Guatemala",
    "Guyana",
    "Haiti",
    "Honduras",
    "Jamaica",
    "Mexico",
    "Nicaragua",
    "Panama",
    "Paraguay",
    "Peru",
    "Saint Kitts and Nevis",
    "Saint Lucia",
    "Saint Vincent and the Grenadines",
    "Suriname",
    "Trinidad and Tobago",
    "United States",
    "Uruguay",
    "Venezuela",
];

const OCEANIA: &[&str] = &[
    "Australia",
    "Fiji",
    "Kiribati",
    "Marshall Islands",
    "Micronesia",
    "Nauru",
    "New Zealand",
    "Palau",
    "Papua New Guinea",
    "Samoa",
    "Solomon Islands",
    "Tonga",
    "Tuvalu",
    "Vanuatu",
];

const EXCLUDED_NAMES: &[&str] = &["world"];

/// Lowercase prefixes of aggregate rows (continents, income groups).
/// Any country whose name starts with one of these is dropped too.
const EXCLUDED_PREFIXES: &[&str] = &[
    "less", "upper", "lower", "high", "asia", "more", "world", "europe", "africa", "least",
    "latin", "low", "northern", "land",
];

const FALLBACK_COLOR: &str = "#6666FF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Asia,
    Europe,
    Americas,
    Oceania,
    /// No catalog lists African countries, so [`classify`] never yields this.
    Africa,
    Unclassified,
}

impl Region {
    /// Bar color for the region. Africa and unclassified rows share the
    /// fallback color, which is also Europe's.
    pub fn color(self) -> &'static str {
        match self {
            Region::Asia => "#6600FF",
            Region::Europe => "#6666FF",
            Region::Americas => "#FFCC33",
            Region::Oceania => "#CC6633",
            Region::Africa | Region::Unclassified => FALLBACK_COLOR,
        }
    }
}

/// Resolves the region of a country by exact, case-sensitive catalog lookup.
/// Catalogs are consulted in the order Asia, Europe, Americas, Oceania.
pub fn classify(country_name: &str) -> Region {
    let catalogs = [
        (ASIA, Region::Asia),
        (EUROPE, Region::Europe),
        (AMERICAS, Region::Americas),
        (OCEANIA, Region::Oceania),
    ];
    catalogs
        .into_iter()
        .find(|(names, _)| names.contains(&country_name))
        .map(|(_, region)| region)
        .unwrap_or(Region::Unclassified)
}

/// Whether a row is an aggregate that must not take part in the ranking.
pub fn is_excluded(country_name: &str) -> bool {
    let name = country_name.to_lowercase();
    EXCLUDED_NAMES.contains(&name.as_str())
        || EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_catalog_order() {
        assert_eq!(classify("China"), Region::Asia);
        assert_eq!(classify("France"), Region::Europe);
        assert_eq!(classify("Brazil"), Region::Americas);
        assert_eq!(classify("Fiji"), Region::Oceania);
        // Listed in both Asia and Europe.
        assert_eq!(classify("Russia"), Region::Asia);
        assert_eq!(classify("Turkey"), Region::Asia);
    }

    #[test]
    fn classification_is_exact_match() {
        assert_eq!(classify("china"), Region::Unclassified);
        assert_eq!(classify("Nigeria"), Region::Unclassified);
        assert_eq!(classify(""), Region::Unclassified);
    }

    #[test]
    fn african_rows_share_the_fallback_color() {
        assert_eq!(Region::Africa.color(), Region::Unclassified.color());
        assert_eq!(classify("Nigeria").color(), "#6666FF");
        assert_eq!(Region::Asia.color(), "#6600FF");
        assert_eq!(Region::Americas.color(), "#FFCC33");
        assert_eq!(Region::Oceania.color(), "#CC6633");
    }

    #[test]
    fn excludes_aggregate_names_and_prefixes() {
        for name in [
            "World",
            "Asia",
            "Asia (UN)",
            "Europe",
            "Africa (UN)",
            "Upper-middle-income countries",
            "Lower-middle-income countries",
            "High-income countries",
            "Low-income countries",
            "Least developed countries",
            "Less developed regions",
            "More developed regions",
            "Latin America and the Caribbean (UN)",
            "Northern America (UN)",
            "Land-locked developing countries (LLDC)",
        ] {
            assert!(is_excluded(name), "{name} should be excluded");
        }
    }

    #[test]
    fn prefix_heuristic_is_knowingly_broad() {
        assert!(is_excluded("Landia"));
        assert!(is_excluded("Lowland Republic"));
        assert!(!is_excluded("China"));
        assert!(!is_excluded("Oceania"));
        assert!(!is_excluded("South Africa"));
        assert!(!is_excluded("Netherlands"));
    }
}
