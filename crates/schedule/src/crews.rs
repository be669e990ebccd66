use std::collections::{HashMap, HashSet};

use crewdesk_shared::Crew;

/// Crews in schedule display order.
///
/// Parent crews are sorted by [`Crew::sort_key`], each immediately followed
/// by its own children in the same order. Children whose parent is not in
/// `crews` come after every parent group.
pub fn crew_display_order(crews: &[Crew]) -> Vec<&Crew> {
    let mut parents: Vec<&Crew> = crews.iter().filter(|crew| crew.is_parent()).collect();
    parents.sort_by_key(|crew| crew.sort_key());

    let parent_ids: HashSet<i64> = parents.iter().map(|crew| crew.id).collect();
    let mut children: HashMap<i64, Vec<&Crew>> = HashMap::new();
    let mut orphans = Vec::new();

    for crew in crews {
        let Some(parent_id) = crew.parent_id else {
            continue;
        };

        if parent_ids.contains(&parent_id) {
            children.entry(parent_id).or_default().push(crew);
        } else {
            orphans.push(crew);
        }
    }

    let mut ordered = Vec::with_capacity(crews.len());
    for parent in parents {
        ordered.push(parent);

        if let Some(mut kids) = children.remove(&parent.id) {
            kids.sort_by_key(|crew| crew.sort_key());
            ordered.extend(kids);
        }
    }

    orphans.sort_by_key(|crew| crew.sort_key());
    ordered.extend(orphans);

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crew(id: i64, code: &str, parent_id: Option<i64>, sort_order: Option<i64>) -> Crew {
        Crew {
            id,
            code: code.to_owned(),
            name: None,
            parent_id,
            sort_order,
            color: None,
        }
    }

    fn codes(crews: &[&Crew]) -> Vec<String> {
        crews.iter().map(|crew| crew.code.clone()).collect()
    }

    #[test]
    fn test_parents_precede_children() {
        let crews = vec![
            crew(10, "S1", Some(2), Some(1)),
            crew(1, "NORTH", None, Some(2)),
            crew(2, "SOUTH", None, Some(1)),
            crew(11, "N2", Some(1), Some(2)),
            crew(12, "N1", Some(1), Some(1)),
        ];

        assert_eq!(
            codes(&crew_display_order(&crews)),
            vec!["SOUTH", "S1", "NORTH", "N1", "N2"]
        );
    }

    #[test]
    fn test_ties_break_on_id_and_missing_order_is_zero() {
        let crews = vec![
            crew(5, "B", None, None),
            crew(3, "A", None, Some(0)),
            crew(4, "C", None, Some(-1)),
        ];

        assert_eq!(codes(&crew_display_order(&crews)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_orphans_follow_parent_groups() {
        let crews = vec![
            crew(20, "ORPHAN2", Some(99), Some(2)),
            crew(21, "ORPHAN1", Some(98), Some(1)),
            crew(1, "P", None, None),
        ];

        assert_eq!(
            codes(&crew_display_order(&crews)),
            vec!["P", "ORPHAN1", "ORPHAN2"]
        );
    }
}
