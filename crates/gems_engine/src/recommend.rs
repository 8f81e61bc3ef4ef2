use gems_core::Item;
use rand::Rng;
use tracing::debug;

/// Pick a uniformly random item from the visible set, avoiding an immediate
/// repeat of the previously recommended one. Empty set picks nothing.
pub fn recommend<'a>(view: &[&'a Item], last_pick: Option<&str>) -> Option<&'a Item> {
    if view.is_empty() {
        return None;
    }
    let idx = rand::thread_rng().gen_range(0..view.len());
    pick_at(view, idx, last_pick)
}

/// Deterministic core of [`recommend`]: when the drawn pick equals the last
/// recommendation and there is an alternative, advance to the next item in
/// list order instead.
pub fn pick_at<'a>(view: &[&'a Item], idx: usize, last_pick: Option<&str>) -> Option<&'a Item> {
    let mut idx = idx;
    let pick = view.get(idx)?;
    if view.len() > 1 && last_pick == Some(pick.pick_id()) {
        idx = (idx + 1) % view.len();
        debug!("Re-picked index {} to avoid repeating {:?}", idx, last_pick);
    }
    view.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new("http://a", "A", "S"),
            Item::new("http://b", "B", "S"),
            Item::new("http://c", "C", "S"),
        ]
    }

    #[test]
    fn test_empty_view_is_noop() {
        assert!(recommend(&[], None).is_none());
        assert!(pick_at(&[], 0, None).is_none());
    }

    #[test]
    fn test_repeat_advances_to_next() {
        let items = items();
        let view: Vec<&Item> = items.iter().collect();
        let pick = pick_at(&view, 1, Some("B")).unwrap();
        assert_eq!(pick.link, "http://c");
    }

    #[test]
    fn test_repeat_wraps_around() {
        let items = items();
        let view: Vec<&Item> = items.iter().collect();
        let pick = pick_at(&view, 2, Some("C")).unwrap();
        assert_eq!(pick.link, "http://a");
    }

    #[test]
    fn test_single_item_may_repeat() {
        let items = vec![Item::new("http://a", "A", "S")];
        let view: Vec<&Item> = items.iter().collect();
        let pick = pick_at(&view, 0, Some("A")).unwrap();
        assert_eq!(pick.link, "http://a");
    }

    #[test]
    fn test_non_repeat_keeps_draw() {
        let items = items();
        let view: Vec<&Item> = items.iter().collect();
        let pick = pick_at(&view, 0, Some("B")).unwrap();
        assert_eq!(pick.link, "http://a");
    }

    #[test]
    fn test_recommend_always_lands_in_view() {
        let items = items();
        let view: Vec<&Item> = items.iter().collect();
        for _ in 0..32 {
            let pick = recommend(&view, Some("A")).unwrap();
            assert!(view.iter().any(|i| i.link == pick.link));
            assert_ne!(pick.pick_id(), "A");
        }
    }
}
