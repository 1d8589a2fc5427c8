use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid pattern"));
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid pattern"));
static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid pattern"));

/// Turn a dataset title into a snake_case table name.
///
/// "Accountable Care Organization Participants" becomes
/// "accountable_care_organization_participants".
pub fn table_name(title: &str) -> String {
    if title.is_empty() {
        return "unknown_dataset".to_string();
    }

    let lower = title.to_lowercase();
    let kept = DISALLOWED.replace_all(&lower, "");
    let joined = SEPARATORS.replace_all(&kept, "_");
    let collapsed = UNDERSCORES.replace_all(&joined, "_");
    collapsed.trim_matches('_').to_string()
}

pub fn tags(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

pub fn strip_mailto(email: &str) -> String {
    if email.is_empty() {
        return "N/A".to_string();
    }
    email.replace("mailto:", "")
}

/// File name for a table's source descriptor.
pub fn source_file_name(table_name: &str) -> String {
    format!("cms_{table_name}_sources.yml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_basic() {
        assert_eq!(
            table_name("Accountable Care Organization Participants"),
            "accountable_care_organization_participants"
        );
    }

    #[test]
    fn test_table_name_punctuation_and_hyphens() {
        assert_eq!(
            table_name("Medicare Physician & Other Practitioners - by Provider and Service"),
            "medicare_physician_other_practitioners_by_provider_and_service"
        );
        assert_eq!(
            table_name("Market Saturation (County-Level)"),
            "market_saturation_county_level"
        );
        assert_eq!(table_name("  Opioid  Prescribing Rates:  "), "opioid_prescribing_rates");
        assert_eq!(table_name("__Home_Health__Agencies__"), "home_health_agencies");
    }

    #[test]
    fn test_table_name_empty() {
        assert_eq!(table_name(""), "unknown_dataset");
        assert_eq!(table_name("Unknown Dataset"), "unknown_dataset");
    }

    #[test]
    fn test_tags_lowercase_in_order() {
        let keywords = vec!["Medicare".to_string(), "Value-Based Care".to_string()];
        assert_eq!(tags(&keywords), vec!["medicare", "value-based care"]);
        assert!(tags(&[]).is_empty());
    }

    #[test]
    fn test_strip_mailto() {
        assert_eq!(
            strip_mailto("mailto:SharedSavingsProgram@cms.hhs.gov"),
            "SharedSavingsProgram@cms.hhs.gov"
        );
        assert_eq!(strip_mailto("N/A"), "N/A");
        assert_eq!(strip_mailto(""), "N/A");
    }

    #[test]
    fn test_source_file_name() {
        assert_eq!(source_file_name("hospice"), "cms_hospice_sources.yml");
    }
}
