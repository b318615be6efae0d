use timed_quiz::{Intent, Question, QuestionBank, QuizSession, SessionError, Status};

fn question(correct_option: usize, points: u32) -> Question {
    Question {
        text: format!("question worth {points}"),
        options: vec!["a".into(), "b".into(), "c".into()],
        correct_option,
        points,
    }
}

fn bank() -> QuestionBank {
    QuestionBank::new(vec![question(0, 10), question(1, 10), question(2, 20)])
}

/// Answer each question with the given option and finish.
fn play(session: &mut QuizSession, answers: &[usize]) -> u32 {
    session.dispatch(Intent::Start).unwrap();
    for (index, answer) in answers.iter().enumerate() {
        session.dispatch(Intent::SelectOption(*answer)).unwrap();
        if index + 1 < answers.len() {
            session.dispatch(Intent::Advance).unwrap();
        }
    }
    session.dispatch(Intent::Finish).unwrap().score
}

#[test]
fn mixed_answers_score_and_percentage() {
    let mut session = QuizSession::new(bank());
    play(&mut session, &[0, 0, 2]);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.score, 30);
    assert_eq!(snapshot.total_points, 40);
    assert_eq!(snapshot.percentage(), 75);
}

#[test]
fn all_correct_reaches_total() {
    let mut session = QuizSession::new(bank());
    let score = play(&mut session, &[0, 1, 2]);

    let snapshot = session.snapshot();
    assert_eq!(score, snapshot.total_points);
    assert_eq!(snapshot.percentage(), 100);
}

#[test]
fn high_score_tracks_best_finish() {
    let mut session = QuizSession::new(bank());
    let mut best = 0;
    let mut previous_high = 0;

    for answers in [[0, 0, 0], [0, 1, 2], [1, 1, 1], [0, 0, 2]] {
        let score = play(&mut session, &answers);
        best = best.max(score);

        let high = session.snapshot().high_score;
        assert_eq!(high, best);
        assert!(high >= previous_high);
        previous_high = high;

        session.dispatch(Intent::Restart).unwrap();
        assert_eq!(session.snapshot().high_score, best);
    }
}

#[test]
fn timeout_finishes_and_counts_toward_high_score() {
    let mut session = QuizSession::new(bank()).with_seconds_per_question(1);
    session.dispatch(Intent::Start).unwrap();
    session.dispatch(Intent::SelectOption(0)).unwrap();

    let mut snapshot = session.snapshot();
    while snapshot.status == Status::Active {
        snapshot = session.dispatch(Intent::Tick).unwrap();
    }

    assert_eq!(snapshot.status, Status::Finished);
    assert_eq!(snapshot.seconds_remaining, Some(0));
    assert_eq!(snapshot.high_score, 10);

    let late = session.dispatch(Intent::Tick).unwrap();
    assert_eq!(late.status, Status::Finished);
    assert_eq!(late.seconds_remaining, Some(0));
}

#[test]
fn repeated_selection_keeps_score() {
    let mut session = QuizSession::new(bank());
    session.dispatch(Intent::Start).unwrap();
    session.dispatch(Intent::SelectOption(0)).unwrap();

    assert_eq!(
        session.dispatch(Intent::SelectOption(0)).unwrap_err(),
        SessionError::AlreadyAnswered
    );
    assert_eq!(session.snapshot().score, 10);
}

#[test]
fn score_never_exceeds_total_for_any_intent_sequence() {
    let intents = [
        Intent::Start,
        Intent::SelectOption(0),
        Intent::SelectOption(1),
        Intent::SelectOption(2),
        Intent::Advance,
        Intent::Finish,
        Intent::Tick,
        Intent::Restart,
    ];
    let total = bank().total_points();

    // Every sequence of length 6 over the alphabet, encoded as base-8 digits.
    let sequences = intents.len().pow(6);
    for mut code in 0..sequences {
        let mut session = QuizSession::new(bank()).with_seconds_per_question(2);
        let mut previous_high = 0;
        for _ in 0..6 {
            let intent = intents[code % intents.len()];
            code /= intents.len();
            let _ = session.dispatch(intent);

            let snapshot = session.snapshot();
            assert!(snapshot.score <= total);
            assert!(snapshot.current_index < snapshot.question_count);
            assert!(snapshot.high_score >= previous_high);
            previous_high = snapshot.high_score;
        }
    }
}

#[test]
fn empty_bank_never_becomes_active() {
    let mut session = QuizSession::new(QuestionBank::new(Vec::new()));
    assert_eq!(
        session.dispatch(Intent::Start).unwrap_err(),
        SessionError::NoQuestions
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, Status::Ready);
    assert_eq!(snapshot.total_points, 0);
    assert_eq!(snapshot.percentage(), 0);
}
