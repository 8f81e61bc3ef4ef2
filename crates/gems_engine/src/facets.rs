use gems_core::{Item, Lang};

/// One facet chip's value and how many items carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Distinct sources in first-appearance order, with per-source item counts.
pub fn source_facets(items: &[Item]) -> Vec<FacetCount> {
    count_values(items.iter().map(|i| i.source.as_str()))
}

/// Distinct localized tags in first-appearance order, with counts.
pub fn tag_facets(items: &[Item], lang: Lang) -> Vec<FacetCount> {
    count_values(
        items
            .iter()
            .flat_map(|i| i.localized_tags(lang).iter().map(String::as_str)),
    )
}

fn count_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FacetCount> {
    let mut facets: Vec<FacetCount> = Vec::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        match facets.iter_mut().find(|f| f.value == value) {
            Some(facet) => facet.count += 1,
            None => facets.push(FacetCount { value: value.to_string(), count: 1 }),
        }
    }
    facets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_counts_in_first_appearance_order() {
        let items = vec![
            Item::new("http://a", "A", "RSS"),
            Item::new("http://b", "B", "Blog"),
            Item::new("http://c", "C", "RSS"),
        ];
        let facets = source_facets(&items);
        assert_eq!(facets.len(), 2);
        assert_eq!(facets[0], FacetCount { value: "RSS".to_string(), count: 2 });
        assert_eq!(facets[1], FacetCount { value: "Blog".to_string(), count: 1 });
    }

    #[test]
    fn test_tag_counts_use_localized_list() {
        let mut a = Item::new("http://a", "A", "S");
        a.tags = vec!["psychology".to_string()];
        a.tags_zh = Some(vec!["心理".to_string()]);
        let mut b = Item::new("http://b", "B", "S");
        b.tags = vec!["psychology".to_string()];

        let zh = tag_facets(&[a.clone(), b.clone()], Lang::Zh);
        assert_eq!(zh.iter().map(|f| f.value.as_str()).collect::<Vec<_>>(), ["心理", "psychology"]);

        let en = tag_facets(&[a, b], Lang::En);
        assert_eq!(en, vec![FacetCount { value: "psychology".to_string(), count: 2 }]);
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let items = vec![Item::new("http://a", "A", "")];
        assert!(source_facets(&items).is_empty());
    }
}
