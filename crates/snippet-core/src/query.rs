use crate::date_window::DateWindow;

/// Builds the search-grammar query for one window of authored pull
/// requests. Qualifier order is fixed so recorded queries stay
/// byte-for-byte reproducible. `created` and `updated` carry the same
/// bounds; the API returns items matching either range.
pub fn build_search_query(
    author: &str,
    organization: Option<&str>,
    window: &DateWindow,
) -> String {
    let mut qualifiers = vec!["type:pr".to_string(), format!("author:{author}")];

    if let Some(organization) = non_blank(organization) {
        qualifiers.push(format!("org:{organization}"));
    }

    let start = window.start_string();
    let end = window.end_string();
    qualifiers.push(format!("created:{start}..{end}"));
    qualifiers.push(format!("updated:{start}..{end}"));

    qualifiers.join(" ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn fixture_window() -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2017, 3, 27).expect("start date"),
            end: NaiveDate::from_ymd_opt(2017, 4, 3).expect("end date"),
        }
    }

    #[test]
    fn query_orders_qualifiers_for_all_repositories() {
        let query = build_search_query("pixyzehn", None, &fixture_window());

        assert_eq!(
            query,
            "type:pr author:pixyzehn \
             created:2017-03-27..2017-04-03 updated:2017-03-27..2017-04-03"
        );
    }

    #[test]
    fn query_places_org_qualifier_between_author_and_ranges() {
        let query = build_search_query("pixyzehn", Some("JohnSundell"), &fixture_window());

        assert_eq!(
            query,
            "type:pr author:pixyzehn org:JohnSundell \
             created:2017-03-27..2017-04-03 updated:2017-03-27..2017-04-03"
        );
    }

    #[test]
    fn query_includes_org_qualifier_exactly_once() {
        let query = build_search_query("pixyzehn", Some("JohnSundell"), &fixture_window());

        assert_eq!(query.matches("org:").count(), 1);
    }

    #[test]
    fn query_omits_org_qualifier_when_absent() {
        let query = build_search_query("pixyzehn", None, &fixture_window());

        assert!(!query.contains("org:"));
    }

    #[test]
    fn query_treats_blank_organization_as_absent() {
        for organization in ["", "   "] {
            let query = build_search_query("pixyzehn", Some(organization), &fixture_window());

            assert!(!query.contains("org:"), "{organization:?} should be dropped");
        }
    }

    #[test]
    fn query_created_and_updated_ranges_share_bounds() {
        let query = build_search_query("pixyzehn", None, &fixture_window());

        assert!(query.contains("created:2017-03-27..2017-04-03"));
        assert!(query.contains("updated:2017-03-27..2017-04-03"));
    }
}
