use crate::archives::Archive;

/// Split a newest-first collection into `(kept, doomed)`.
pub fn split_retained(archives: &[Archive], keep: usize) -> (&[Archive], &[Archive]) {
    archives.split_at(keep.min(archives.len()))
}

#[cfg(test)]
mod tests {
    use super::split_retained;
    use crate::archives::Archive;
    use chrono::{FixedOffset, TimeZone};

    fn archives(count: u32) -> Vec<Archive> {
        let utc = FixedOffset::east_opt(0).expect("utc");
        (0..count)
            .map(|i| Archive {
                name: format!("host-{i}").into_bytes(),
                date: utc
                    .with_ymd_and_hms(2021, 1, 10 - i, 0, 0, 0)
                    .single()
                    .expect("date"),
                partial: false,
            })
            .collect()
    }

    #[test]
    fn keeps_the_first_k_and_dooms_the_rest() {
        let all = archives(5);
        let (kept, doomed) = split_retained(&all, 3);
        assert_eq!(kept.len(), 3);
        let names: Vec<_> = doomed.iter().map(|a| a.name_lossy()).collect();
        assert_eq!(names, ["host-3", "host-4"]);
    }

    #[test]
    fn keep_at_or_beyond_len_dooms_nothing() {
        let all = archives(3);
        assert!(split_retained(&all, 3).1.is_empty());
        assert!(split_retained(&all, 10).1.is_empty());
        assert!(split_retained(&[], 0).1.is_empty());
    }

    #[test]
    fn keep_zero_dooms_everything() {
        let all = archives(2);
        let (kept, doomed) = split_retained(&all, 0);
        assert!(kept.is_empty());
        assert_eq!(doomed.len(), 2);
    }
}
