//! Rules to merge values observed on the server into known state without spurious diffs.

/// Keep the order of `current` when `observed` holds the same items in a different order.
///
/// The server is free to return list attributes in any order.
/// When the members did not change the state order is retained, otherwise
/// the server order is returned unchanged.
pub fn keep_state_order<T>(current: &[T], observed: Vec<T>) -> Vec<T>
where
    T: Clone + Ord,
{
    if current.len() != observed.len() {
        return observed;
    }
    let mut known = current.to_vec();
    let mut seen = observed.clone();
    known.sort();
    seen.sort();
    if known == seen {
        current.to_vec()
    } else {
        observed
    }
}

/// Merge an optional string attribute: empty server values stay absent if absent in state.
pub fn optional_string(current: &Option<String>, observed: String) -> Option<String> {
    if current.is_none() && observed.is_empty() {
        return None;
    }
    Some(observed)
}

/// Merge an optional list attribute: empty server values stay absent if absent in state.
pub fn optional_list<T>(current: &Option<Vec<T>>, observed: Vec<T>) -> Option<Vec<T>>
where
    T: Clone + Ord,
{
    match current {
        None if observed.is_empty() => None,
        None => Some(observed),
        Some(current) => Some(keep_state_order(current, observed)),
    }
}

#[cfg(test)]
mod tests {
    use super::keep_state_order;
    use super::optional_list;
    use super::optional_string;

    #[test]
    fn permutation_keeps_state_order() {
        assert_eq!(keep_state_order(&[3, 1, 2], vec![1, 2, 3]), vec![3, 1, 2]);
    }

    #[test]
    fn changed_members_take_server_order() {
        assert_eq!(keep_state_order(&[3, 1], vec![1, 2]), vec![1, 2]);
        assert_eq!(keep_state_order(&[1], vec![2, 1]), vec![2, 1]);
        assert_eq!(keep_state_order(&[1, 1, 2], vec![1, 2, 2]), vec![1, 2, 2]);
    }

    #[test]
    fn optional_string_absent_stays_absent() {
        assert_eq!(optional_string(&None, String::new()), None);
        assert_eq!(optional_string(&Some(String::new()), String::new()), Some(String::new()));
        assert_eq!(optional_string(&None, "x".into()), Some("x".into()));
    }

    #[test]
    fn optional_list_absent_stays_absent() {
        assert_eq!(optional_list::<i64>(&None, vec![]), None);
        assert_eq!(optional_list(&None, vec![2]), Some(vec![2]));
        assert_eq!(optional_list(&Some(vec![2, 1]), vec![1, 2]), Some(vec![2, 1]));
    }
}
