#[cfg(test)]
mod verify {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use quizdown::model::{Choice, Question, Quiz, QuizOptions};
    use quizdown::session::{Session, SessionError};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn choice(id: &str, text: &str, correct: bool) -> Choice {
        Choice {
            id: id.to_string(),
            text: text.to_string(),
            correct,
        }
    }

    fn question(id: &str, text: &str, choices: Vec<Choice>) -> Question {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            explanation: String::new(),
            choices,
        }
    }

    fn multi_select_quiz() -> Quiz {
        Quiz {
            id: "quiz1".to_string(),
            name: "Multi".to_string(),
            options: QuizOptions::default(),
            questions: vec![question(
                "q1",
                "Pick both",
                vec![
                    choice("a", "Alpha", true),
                    choice("b", "Beta", true),
                    choice("c", "Gamma", false),
                ],
            )],
        }
    }

    fn single_select_quiz(options: QuizOptions) -> Quiz {
        Quiz {
            id: "quiz2".to_string(),
            name: "Single".to_string(),
            options,
            questions: vec![
                question(
                    "q1",
                    "First",
                    vec![choice("a", "Right", true), choice("b", "Wrong", false)],
                ),
                question(
                    "q2",
                    "Second",
                    vec![choice("c", "Right", true), choice("d", "Wrong", false)],
                ),
            ],
        }
    }

    #[test]
    fn sessions_carry_the_document_identity() {
        let options = QuizOptions {
            shuffle_questions: false,
            shuffle_choices: false,
            instant_feedback: true,
        };
        let quiz = single_select_quiz(options);
        let session = Session::start(&quiz, &mut rng());
        assert_eq!(session.quiz_id(), "quiz2");
        assert_eq!(session.name(), "Single");
        assert_eq!(session.options(), options);
    }

    fn ids_by(question: &Question, correct: bool) -> Vec<String> {
        question
            .choices
            .iter()
            .filter(|choice| choice.correct == correct)
            .map(|choice| {
                choice
                    .id
                    .clone()
            })
            .collect()
    }

    #[test]
    fn exact_set_match_required_for_multi_select() {
        let quiz = multi_select_quiz();
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let correct_ids = ids_by(&session.questions()[0], true);
        let wrong_ids = ids_by(&session.questions()[0], false);
        let question_id = session.questions()[0]
            .id
            .clone();

        // proper subset
        let verdict = session
            .submit(&question_id, &correct_ids[..1].to_vec(), &mut rng)
            .unwrap();
        assert!(!verdict.correct);

        // superset
        let mut superset = correct_ids.clone();
        superset.extend(wrong_ids.clone());
        let verdict = session
            .submit(&question_id, &superset, &mut rng)
            .unwrap();
        assert!(!verdict.correct);

        // exact set, in reverse order
        let mut reversed = correct_ids.clone();
        reversed.reverse();
        let verdict = session
            .submit(&question_id, &reversed, &mut rng)
            .unwrap();
        assert!(verdict.correct);
        assert!(verdict
            .mistake
            .is_none());
    }

    #[test]
    fn resubmission_overwrites_the_record() {
        let quiz = multi_select_quiz();
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let correct_ids = ids_by(&session.questions()[0], true);
        let wrong_ids = ids_by(&session.questions()[0], false);
        let question_id = session.questions()[0]
            .id
            .clone();

        session
            .submit(&question_id, &wrong_ids, &mut rng)
            .unwrap();
        assert!(!session
            .answer(&question_id)
            .unwrap()
            .correct);

        session
            .submit(&question_id, &correct_ids, &mut rng)
            .unwrap();
        assert!(session
            .answer(&question_id)
            .unwrap()
            .correct);

        let score = session.score();
        assert_eq!(score.attempted, 1);
        assert_eq!(score.correct, 1);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let quiz = multi_select_quiz();
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);
        let question_id = session.questions()[0]
            .id
            .clone();

        let result = session.submit(&question_id, &[], &mut rng);
        assert_eq!(result, Err(SessionError::EmptySelection));
        assert!(session
            .answer(&question_id)
            .is_none());
    }

    #[test]
    fn unknown_question_is_surfaced() {
        let quiz = multi_select_quiz();
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let result = session.submit("not-a-question", &["x".to_string()], &mut rng);
        assert_eq!(
            result,
            Err(SessionError::UnknownQuestion("not-a-question".to_string()))
        );
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        let quiz = single_select_quiz(QuizOptions::default());
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        assert_eq!(session.position(), (0, 2));
        session.previous();
        assert_eq!(session.position(), (0, 2));
        session.next();
        assert_eq!(session.position(), (1, 2));
        session.next();
        assert_eq!(session.position(), (1, 2));
        session.previous();
        assert_eq!(session.position(), (0, 2));
    }

    #[test]
    fn shuffling_is_a_permutation() {
        let questions: Vec<Question> = (0..10)
            .map(|i| {
                question(
                    &format!("q{}", i),
                    &format!("Question {}", i),
                    (0..4)
                        .map(|j| {
                            choice(
                                &format!("q{}c{}", i, j),
                                &format!("Choice {}-{}", i, j),
                                j == 0,
                            )
                        })
                        .collect(),
                )
            })
            .collect();
        let quiz = Quiz {
            id: "quiz3".to_string(),
            name: "Shuffled".to_string(),
            options: QuizOptions {
                shuffle_questions: true,
                shuffle_choices: true,
                instant_feedback: false,
            },
            questions,
        };

        let mut rng = rng();
        let session = Session::start(&quiz, &mut rng);

        let original: BTreeSet<&str> = quiz
            .questions
            .iter()
            .map(|question| question.text.as_str())
            .collect();
        let shuffled: BTreeSet<&str> = session
            .questions()
            .iter()
            .map(|question| question.text.as_str())
            .collect();
        assert_eq!(original, shuffled);
        assert_eq!(
            session
                .questions()
                .len(),
            quiz.questions
                .len()
        );

        for source in &quiz.questions {
            let copy = session
                .questions()
                .iter()
                .find(|candidate| candidate.text == source.text)
                .unwrap();
            let original: BTreeSet<(&str, bool)> = source
                .choices
                .iter()
                .map(|choice| (choice.text.as_str(), choice.correct))
                .collect();
            let shuffled: BTreeSet<(&str, bool)> = copy
                .choices
                .iter()
                .map(|choice| (choice.text.as_str(), choice.correct))
                .collect();
            assert_eq!(original, shuffled);
        }

        // the source document is never reordered
        assert_eq!(quiz.questions[0].text, "Question 0");
        assert_eq!(quiz.questions[0].choices[0].text, "Choice 0-0");
    }

    #[test]
    fn sessions_mint_fresh_choice_ids() {
        let quiz = single_select_quiz(QuizOptions::default());
        let mut rng = rng();
        let session = Session::start(&quiz, &mut rng);

        let source_ids: BTreeSet<&str> = quiz
            .questions
            .iter()
            .flat_map(|question| {
                question
                    .choices
                    .iter()
            })
            .map(|choice| choice.id.as_str())
            .collect();
        let session_ids: BTreeSet<&str> = session
            .questions()
            .iter()
            .flat_map(|question| {
                question
                    .choices
                    .iter()
            })
            .map(|choice| choice.id.as_str())
            .collect();

        assert!(source_ids.is_disjoint(&session_ids));
        assert_eq!(
            session_ids.len(),
            4,
            "every session choice gets its own id"
        );
    }

    #[test]
    fn restart_resets_answers_and_cursor() {
        let quiz = single_select_quiz(QuizOptions::default());
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let question_id = session.questions()[0]
            .id
            .clone();
        let chosen = ids_by(&session.questions()[0], true);
        session
            .submit(&question_id, &chosen, &mut rng)
            .unwrap();
        session.next();

        let fresh = Session::start(&quiz, &mut rng);
        assert_eq!(fresh.position(), (0, 2));
        assert_eq!(
            fresh
                .score()
                .attempted,
            0
        );
        assert!(fresh
            .answer(&question_id)
            .is_none());
    }

    #[test]
    fn instant_feedback_evaluates_single_select_on_toggle() {
        let quiz = single_select_quiz(QuizOptions {
            shuffle_questions: false,
            shuffle_choices: false,
            instant_feedback: true,
        });
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let question_id = session.questions()[0]
            .id
            .clone();
        let right = ids_by(&session.questions()[0], true)[0].clone();
        let wrong = ids_by(&session.questions()[0], false)[0].clone();

        let verdict = session
            .select(&question_id, &right, &mut rng)
            .unwrap()
            .expect("single-select with instant feedback evaluates immediately");
        assert!(verdict.correct);
        assert!(session
            .answer(&question_id)
            .unwrap()
            .correct);

        // toggling another choice overwrites, it does not accumulate
        let verdict = session
            .select(&question_id, &wrong, &mut rng)
            .unwrap()
            .unwrap();
        assert!(!verdict.correct);
        let record = session
            .answer(&question_id)
            .unwrap();
        assert!(!record.correct);
        assert_eq!(record.selected_ids, vec![wrong]);
        assert_eq!(
            session
                .score()
                .attempted,
            1
        );
    }

    #[test]
    fn instant_feedback_never_fires_for_multi_select() {
        let mut quiz = multi_select_quiz();
        quiz.options
            .instant_feedback = true;
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let question_id = session.questions()[0]
            .id
            .clone();
        let choice_id = session.questions()[0].choices[0]
            .id
            .clone();

        let verdict = session
            .select(&question_id, &choice_id, &mut rng)
            .unwrap();
        assert!(verdict.is_none());
        assert!(session
            .answer(&question_id)
            .is_none());
    }

    #[test]
    fn select_without_instant_feedback_records_nothing() {
        let quiz = single_select_quiz(QuizOptions::default());
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let question_id = session.questions()[0]
            .id
            .clone();
        let choice_id = session.questions()[0].choices[0]
            .id
            .clone();

        let verdict = session
            .select(&question_id, &choice_id, &mut rng)
            .unwrap();
        assert!(verdict.is_none());
    }

    #[test]
    fn wrong_submission_yields_one_mistake_snapshot() {
        let quiz = multi_select_quiz();
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let question_id = session.questions()[0]
            .id
            .clone();
        let wrong = ids_by(&session.questions()[0], false);
        let correct_ids = ids_by(&session.questions()[0], true);

        let verdict = session
            .submit(&question_id, &wrong, &mut rng)
            .unwrap();
        assert!(!verdict.correct);
        let entry = verdict
            .mistake
            .expect("a wrong answer produces a mistake snapshot");
        assert_eq!(entry.quiz_id, "quiz1");
        assert_eq!(entry.quiz_name, "Multi");
        assert_eq!(entry.question, "Pick both");
        assert_eq!(entry.chosen, wrong);
        assert_eq!(entry.correct_ids, correct_ids);
        assert_eq!(
            entry
                .choices
                .len(),
            3
        );
    }

    #[test]
    fn summary_counts_the_whole_quiz() {
        let quiz = single_select_quiz(QuizOptions::default());
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let first = session.questions()[0]
            .id
            .clone();
        let right = ids_by(&session.questions()[0], true);
        session
            .submit(&first, &right, &mut rng)
            .unwrap();

        let second = session.questions()[1]
            .id
            .clone();
        let wrong = ids_by(&session.questions()[1], false);
        session
            .submit(&second, &wrong, &mut rng)
            .unwrap();

        let summary = session.finish();
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.accuracy, 50);
    }

    #[test]
    fn score_counts_only_attempted_questions() {
        let quiz = single_select_quiz(QuizOptions::default());
        let mut rng = rng();
        let mut session = Session::start(&quiz, &mut rng);

        let first = session.questions()[0]
            .id
            .clone();
        let right = ids_by(&session.questions()[0], true);
        session
            .submit(&first, &right, &mut rng)
            .unwrap();

        let score = session.score();
        assert_eq!(score.correct, 1);
        assert_eq!(score.attempted, 1);
    }
}
