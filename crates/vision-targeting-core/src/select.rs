//! Largest-area target selection.

use crate::DetectionSnapshot;

/// Number of candidates in `snapshot`; an incoherent snapshot counts as none.
#[inline]
pub fn target_count(snapshot: &DetectionSnapshot) -> usize {
    snapshot.len()
}

/// Index of the candidate with the largest projected area.
///
/// Ties keep the first occurrence. Returns `None` for an empty or
/// incoherent snapshot.
pub fn select_largest(snapshot: &DetectionSnapshot) -> Option<usize> {
    if snapshot.is_empty() {
        return None;
    }
    let area = snapshot.area();
    let mut best = 0;
    for (i, &a) in area.iter().enumerate().skip(1) {
        if a > area[best] {
            best = i;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_areas(areas: &[f64]) -> DetectionSnapshot {
        let n = areas.len();
        DetectionSnapshot::from_columns(
            Some(areas.to_vec()),
            Some(vec![10.0; n]),
            Some(vec![10.0; n]),
            Some(vec![160.0; n]),
            Some(vec![120.0; n]),
        )
    }

    #[test]
    fn first_maximum_wins_ties() {
        let snap = with_areas(&[3.0, 7.0, 7.0, 2.0]);
        assert_eq!(select_largest(&snap), Some(1));
        assert_eq!(target_count(&snap), 4);
    }

    #[test]
    fn single_candidate_is_selected() {
        assert_eq!(select_largest(&with_areas(&[0.4])), Some(0));
    }

    #[test]
    fn all_equal_selects_first() {
        assert_eq!(select_largest(&with_areas(&[5.0, 5.0, 5.0])), Some(0));
    }

    #[test]
    fn empty_selects_nothing() {
        let snap = DetectionSnapshot::empty();
        assert_eq!(select_largest(&snap), None);
        assert_eq!(target_count(&snap), 0);
    }

    #[test]
    fn incoherent_selects_nothing() {
        let snap = DetectionSnapshot::from_columns(
            Some(vec![3.0, 9.0]),
            Some(vec![1.0, 1.0]),
            Some(vec![1.0, 1.0]),
            Some(vec![1.0]),
            Some(vec![1.0, 1.0]),
        );
        assert_eq!(select_largest(&snap), None);
        assert_eq!(target_count(&snap), 0);
    }

    #[test]
    fn nan_area_never_beats_an_earlier_candidate() {
        assert_eq!(select_largest(&with_areas(&[1.0, f64::NAN, 2.0])), Some(2));
        assert_eq!(select_largest(&with_areas(&[f64::NAN, 4.0])), Some(0));
    }
}
