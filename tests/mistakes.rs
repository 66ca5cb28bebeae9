#[cfg(test)]
mod verify {
    use chrono::Utc;

    use quizdown::mistakes::{MistakeEntry, MistakeLog, MISTAKE_CAP};

    fn entry(tag: usize) -> MistakeEntry {
        MistakeEntry {
            id: format!("m{}", tag),
            at: Utc::now(),
            quiz_id: "quiz".to_string(),
            quiz_name: "Quiz".to_string(),
            question: format!("question {}", tag),
            choices: Vec::new(),
            chosen: Vec::new(),
            correct_ids: Vec::new(),
        }
    }

    #[test]
    fn newest_entries_come_first() {
        let mut log = MistakeLog::default();
        log.record(entry(1));
        log.record(entry(2));
        log.record(entry(3));

        let questions: Vec<&str> = log
            .all()
            .iter()
            .map(|entry| entry.question.as_str())
            .collect();
        assert_eq!(questions, vec!["question 3", "question 2", "question 1"]);
    }

    #[test]
    fn cap_evicts_the_oldest() {
        let mut log = MistakeLog::default();
        for i in 0..=MISTAKE_CAP {
            log.record(entry(i));
        }

        assert_eq!(log.len(), MISTAKE_CAP);
        // entry 0 fell off the tail; the cap's worth of newest remain
        assert_eq!(
            log.all()[0].question,
            format!("question {}", MISTAKE_CAP)
        );
        assert_eq!(
            log.all()[MISTAKE_CAP - 1].question,
            "question 1"
        );
    }

    #[test]
    fn new_session_clears_only_the_session_view() {
        let mut log = MistakeLog::default();
        log.record(entry(1));
        log.record(entry(2));
        assert_eq!(
            log.current_session()
                .len(),
            2
        );

        log.begin_session();
        assert_eq!(
            log.current_session()
                .len(),
            0
        );
        assert_eq!(log.len(), 2);

        log.record(entry(3));
        assert_eq!(
            log.current_session()
                .len(),
            1
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn rehydration_respects_the_cap() {
        let oversized: Vec<MistakeEntry> = (0..MISTAKE_CAP + 20)
            .map(entry)
            .collect();
        let log = MistakeLog::from_entries(oversized);
        assert_eq!(log.len(), MISTAKE_CAP);
        assert!(log
            .current_session()
            .is_empty());
    }

    #[test]
    fn clear_empties_both_views() {
        let mut log = MistakeLog::default();
        log.record(entry(1));
        log.clear();
        assert!(log.is_empty());
        assert!(log
            .current_session()
            .is_empty());
    }
}
