use crate::types::Screening;
use std::collections::HashMap;

/// Collapse screenings sharing the same identity (all five fields).
///
/// Last-seen wins: a repeated key overwrites the stored value but keeps the
/// position where the key first appeared.
pub fn deduplicate(screenings: Vec<Screening>) -> Vec<Screening> {
    let mut positions: HashMap<Screening, usize> = HashMap::with_capacity(screenings.len());
    let mut unique: Vec<Screening> = Vec::with_capacity(screenings.len());

    for screening in screenings {
        match positions.get(&screening) {
            Some(&index) => unique[index] = screening,
            None => {
                positions.insert(screening.clone(), unique.len());
                unique.push(screening);
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Version;
    use chrono::NaiveDate;

    fn screening(title: &str, time: &str, version: Option<Version>) -> Screening {
        Screening {
            cinema: "LUZY – Le Vox".to_string(),
            movie_title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            time: time.to_string(),
            version,
        }
    }

    #[test]
    fn test_collapses_identical_screenings() {
        let input = vec![
            screening("A", "20h", None),
            screening("B", "20h", None),
            screening("A", "20h", None),
        ];
        let output = deduplicate(input);
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].movie_title, "A");
        assert_eq!(output[1].movie_title, "B");
    }

    #[test]
    fn test_version_is_part_of_identity() {
        let input = vec![screening("A", "20h", None), screening("A", "20h", Some(Version::Vost))];
        assert_eq!(deduplicate(input).len(), 2);
    }

    #[test]
    fn test_is_idempotent() {
        let input = vec![
            screening("A", "14h", None),
            screening("A", "14h", None),
            screening("A", "16h30", Some(Version::Vf)),
        ];
        let once = deduplicate(input);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
