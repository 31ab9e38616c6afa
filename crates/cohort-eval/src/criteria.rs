//! Criterion-to-query translation

use cohort_query::{Criterion, ResourceType, SourcePopulation};

/// Page size requested from the patient search API.
pub const PATIENT_MAX_COUNT: u32 = 500;

/// Filter restricting every query to the source population: patients with
/// an encounter at one of the selected care sites.
pub fn population_filter(source: &SourcePopulation) -> String {
    format!(
        "_count={}&_has:Encounter:subject:service-provider={}",
        PATIENT_MAX_COUNT,
        source.care_site_ids.join(",")
    )
}

/// Query matching the whole eligible universe: the population filter alone.
pub fn universe_query(population_filter: &str) -> String {
    format!("/Patient?{}", population_filter)
}

/// Translate one leaf criterion into a gateway query.
///
/// Patient filters are direct query parameters; clinical resources join
/// back to the patient collection through a `_has` reverse reference.
/// Unrecognized kinds return the empty query, which matches nothing — an
/// unknown criterion must never fail the whole run.
pub fn query_for_criterion(criterion: &Criterion, population_filter: &str) -> String {
    match criterion.resource_type {
        ResourceType::Patient => {
            format!("/Patient?{}&{}", population_filter, criterion.filter)
        }
        ResourceType::Condition => format!(
            "/Patient?{}&_has:Condition:patient:{}",
            population_filter, criterion.filter
        ),
        ResourceType::Composition => format!(
            "/Patient?{}&_has:Composition:patient:{}",
            population_filter, criterion.filter
        ),
        ResourceType::Unknown => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source(ids: &[&str]) -> SourcePopulation {
        SourcePopulation {
            care_site_ids: ids.iter().map(|id| (*id).to_string()).collect(),
        }
    }

    #[test]
    fn population_filter_joins_care_sites() {
        assert_eq!(
            population_filter(&source(&["123", "456"])),
            "_count=500&_has:Encounter:subject:service-provider=123,456"
        );
    }

    #[test]
    fn patient_criterion_is_a_direct_parameter() {
        let criterion = Criterion::new(ResourceType::Patient, "gender=female");
        assert_eq!(
            query_for_criterion(&criterion, "_count=500&_has:Encounter:subject:service-provider=123"),
            "/Patient?_count=500&_has:Encounter:subject:service-provider=123&gender=female"
        );
    }

    #[test]
    fn condition_criterion_joins_through_has() {
        let criterion = Criterion::new(ResourceType::Condition, "code=E11");
        assert_eq!(
            query_for_criterion(&criterion, "f"),
            "/Patient?f&_has:Condition:patient:code=E11"
        );
    }

    #[test]
    fn composition_criterion_joins_through_has() {
        let criterion = Criterion::new(ResourceType::Composition, "_text=diabetes");
        assert_eq!(
            query_for_criterion(&criterion, "f"),
            "/Patient?f&_has:Composition:patient:_text=diabetes"
        );
    }

    #[test]
    fn unknown_kind_yields_empty_query() {
        let criterion = Criterion::new(ResourceType::Unknown, "whatever=1");
        assert_eq!(query_for_criterion(&criterion, "f"), "");
    }

    #[test]
    fn universe_query_carries_only_the_filter() {
        assert_eq!(universe_query("f"), "/Patient?f");
    }
}
