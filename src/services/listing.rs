// src/services/listing.rs
//
// Busca, filtro e paginação no cliente. Nada aqui reordena: a ordem da
// coleção original é preservada.

use crate::models::listing::{Resource, FILTER_ALL};

fn filter_is_off(filter: &str) -> bool {
    filter.is_empty() || filter == FILTER_ALL
}

/// Registros que passam na busca (substring, sem caixa) E no filtro categórico.
pub fn filter_records<'a, R: Resource>(records: &'a [R], search: &str, filter: &str) -> Vec<&'a R> {
    let term = search.trim().to_lowercase();
    records
        .iter()
        .filter(|r| term.is_empty() || r.matches_search(&term))
        .filter(|r| filter_is_off(filter) || r.matches_filter(filter))
        .collect()
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::i18n::I18nStore;
    use crate::models::crm::{seeded_customers, Customer};
    use crate::models::rbac::{seeded_roles, Role};

    fn many_customers(n: usize) -> Vec<Customer> {
        let template = seeded_customers().remove(0);
        (0..n)
            .map(|i| Customer {
                id: i as i64 + 1,
                full_name: if i % 3 == 0 { format!("Alpha {i}") } else { format!("Beta {i}") },
                email: if i % 4 == 0 { Some(format!("alpha{i}@firm.om")) } else { None },
                ..template.clone()
            })
            .collect()
    }

    #[test]
    fn every_filtered_record_contains_the_term() {
        let customers = many_customers(40);
        for term in ["alpha", "ALPHA", " beta ", "firm.om", "zzz", "1"] {
            let needle = term.trim().to_lowercase();
            let filtered = filter_records(&customers, term, FILTER_ALL);
            for c in &filtered {
                assert!(c.matches_search(&needle), "{} não deveria passar em '{term}'", c.full_name);
            }
            // e nenhum que casa ficou de fora
            let expected = customers.iter().filter(|c| c.matches_search(&needle)).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn empty_search_keeps_everything_in_order() {
        let customers = many_customers(7);
        let filtered = filter_records(&customers, "   ", FILTER_ALL);
        let ids: Vec<i64> = filtered.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn page_count_is_never_zero() {
        assert_eq!(total_pages(0, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn concatenated_pages_reproduce_the_filtered_list() {
        for n in 0..30 {
            let customers = many_customers(n);
            for page_size in [1, 5, 6, 7] {
                let filtered = filter_records(&customers, "beta", FILTER_ALL);
                let pages = total_pages(filtered.len(), page_size);
                let mut joined = Vec::new();
                for page in 1..=pages {
                    joined.extend_from_slice(page_slice(&filtered, page, page_size));
                }
                let joined_ids: Vec<i64> = joined.iter().map(|c| c.id).collect();
                let filtered_ids: Vec<i64> = filtered.iter().map(|c| c.id).collect();
                assert_eq!(joined_ids, filtered_ids, "n={n} page_size={page_size}");
            }
        }
    }

    #[test]
    fn out_of_range_page_is_empty_and_clamp_fixes_it() {
        let items = [1, 2, 3];
        assert!(page_slice(&items, 5, 2).is_empty());
        assert_eq!(clamp_page(5, total_pages(items.len(), 2)), 2);
        assert_eq!(clamp_page(0, 3), 1);
    }

    #[test]
    fn guard_filter_uses_equality() {
        let store = I18nStore::new();
        let roles: Vec<Role> = seeded_roles(&store, "en");
        let lawyers = filter_records(&roles, "", "lawyer");
        assert_eq!(lawyers.len(), 1);
        assert_eq!(lawyers[0].id, 2);
        assert_eq!(filter_records(&roles, "", "all").len(), 5);
    }

    #[test]
    fn customer_type_filter_other_than_all_hides_everything() {
        let customers = seeded_customers();
        assert_eq!(filter_records(&customers, "", "").len(), 2);
        assert!(filter_records(&customers, "", "company").is_empty());
    }
}
