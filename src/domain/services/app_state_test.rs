use anyhow::bail;
use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use super::AppState;
use super::CONNECTION_ERROR;
use super::FALLBACK_ANSWER;
use super::GREETING;
use crate::domain::models::Action;
use crate::domain::models::Answer;
use crate::domain::models::Author;
use crate::domain::models::MessageType;
use crate::domain::services::Themes;

impl Default for AppState {
    fn default() -> AppState {
        let theme = Themes::get("dark").unwrap();
        let mut app_state = AppState::new(theme);
        app_state.set_rect(Rect::new(0, 0, 100, 300));
        return app_state;
    }
}

fn fever_answer() -> Answer {
    return Answer {
        answer: "A fever is...".to_string(),
        confidence: Some(0.92),
    };
}

mod new {
    use super::*;

    #[test]
    fn it_seeds_the_greeting() {
        let app_state = AppState::default();

        assert_eq!(app_state.messages.len(), 1);
        assert_eq!(app_state.messages[0].author, Author::Bot);
        assert_eq!(app_state.messages[0].text, GREETING);
        assert_eq!(app_state.messages[0].confidence, None);
        assert!(!app_state.waiting_for_answer);
        assert!(app_state.last_error.is_none());
        assert!(app_state.draft.is_empty());
    }
}

mod update_draft {
    use super::*;

    #[test]
    fn it_stores_the_draft() {
        let mut app_state = AppState::default();
        app_state.update_draft("What is");
        app_state.update_draft("What is fever?");

        assert_eq!(app_state.draft, "What is fever?");
        assert!(app_state.can_submit());
    }

    #[test]
    fn it_cannot_submit_whitespace() {
        let mut app_state = AppState::default();
        app_state.update_draft("  \n ");

        assert!(!app_state.can_submit());
    }

    #[test]
    fn it_cannot_submit_while_waiting() {
        let mut app_state = AppState::default();
        app_state.update_draft("What is fever?");
        app_state.waiting_for_answer = true;

        assert!(!app_state.can_submit());
    }
}

mod submit {
    use super::*;

    #[test]
    fn it_ignores_empty_text() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        let submitted = app_state.submit("", &tx)?;

        assert!(!submitted);
        assert_eq!(app_state.messages.len(), 1);
        assert!(!app_state.waiting_for_answer);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_ignores_whitespace_only_text() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.update_draft("  ");

        let submitted = app_state.submit("  ", &tx)?;

        assert!(!submitted);
        assert_eq!(app_state.messages.len(), 1);
        assert_eq!(app_state.draft, "  ");
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_sends_one_trimmed_question() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.update_draft(" What is fever? ");

        let submitted = app_state.submit(" What is fever? ", &tx)?;

        assert!(submitted);
        assert!(app_state.waiting_for_answer);
        assert!(app_state.draft.is_empty());
        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.messages[1].author, Author::User);
        assert_eq!(app_state.messages[1].text, " What is fever? ");

        match rx.try_recv()? {
            Action::AskQuestion(query) => assert_eq!(query.query, "What is fever?"),
            _ => bail!("Wrong enum"),
        }
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_clears_the_last_error() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.last_error = Some(CONNECTION_ERROR.to_string());

        app_state.submit("Hello", &tx)?;

        assert!(app_state.last_error.is_none());

        return Ok(());
    }

    #[test]
    fn it_keeps_the_last_error_on_ignored_submits() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.last_error = Some(CONNECTION_ERROR.to_string());

        app_state.submit(" ", &tx)?;

        assert_eq!(app_state.last_error, Some(CONNECTION_ERROR.to_string()));

        return Ok(());
    }

    #[test]
    fn it_ignores_submits_while_waiting() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        assert!(app_state.submit("What is fever?", &tx)?);
        assert!(!app_state.submit("And a cold?", &tx)?);

        assert_eq!(app_state.messages.len(), 2);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());

        app_state.handle_answer(fever_answer());

        assert_eq!(app_state.messages.len(), 3);
        assert!(app_state
            .messages
            .iter()
            .all(|message| return message.text != "And a cold?"));

        return Ok(());
    }

    #[test]
    fn it_fails_when_the_worker_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel::<Action>();
        drop(rx);
        let mut app_state = AppState::default();

        assert!(app_state.submit("What is fever?", &tx).is_err());
        assert_eq!(app_state.messages.len(), 1);
        assert!(!app_state.waiting_for_answer);
    }
}

mod handle_answer {
    use super::*;

    #[test]
    fn it_appends_the_answer_with_confidence() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.submit("What is fever?", &tx)?;

        app_state.handle_answer(fever_answer());

        assert!(!app_state.waiting_for_answer);
        assert_eq!(app_state.messages.len(), 3);
        assert_eq!(app_state.messages[1].text, "What is fever?");
        let answer = &app_state.messages[2];
        assert_eq!(answer.author, Author::Bot);
        assert_eq!(answer.text, "A fever is...");
        assert_eq!(answer.confidence, Some(0.92));
        assert_eq!(answer.confidence_label(), Some("92% match".to_string()));
        assert_eq!(answer.message_type(), MessageType::Normal);

        return Ok(());
    }

    #[test]
    fn it_appends_the_answer_without_confidence() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.submit("Hi", &tx)?;

        app_state.handle_answer(Answer {
            answer: "Hello!".to_string(),
            confidence: None,
        });

        assert_eq!(app_state.messages[2].confidence, None);
        assert_eq!(app_state.messages[2].confidence_label(), None);

        return Ok(());
    }

    #[test]
    fn it_scrolls_to_the_newest_message() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.set_rect(Rect::new(0, 0, 60, 5));
        app_state.submit("What is fever?", &tx)?;

        app_state.handle_answer(fever_answer());

        assert_eq!(
            app_state.scroll.position,
            app_state.bubble_list.len() - 5
        );

        return Ok(());
    }
}

mod handle_failure {
    use super::*;

    #[test]
    fn it_appends_the_fallback_and_sets_the_banner() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.submit("What is fever?", &tx)?;

        app_state.handle_failure("error sending request");

        assert!(!app_state.waiting_for_answer);
        assert_eq!(app_state.last_error, Some(CONNECTION_ERROR.to_string()));
        assert_eq!(app_state.messages.len(), 3);
        assert_eq!(app_state.messages[1].author, Author::User);
        let fallback = &app_state.messages[2];
        assert_eq!(fallback.author, Author::Bot);
        assert_eq!(fallback.text, FALLBACK_ANSWER);
        assert_eq!(fallback.confidence, None);
        assert_eq!(fallback.message_type(), MessageType::Error);

        return Ok(());
    }

    #[test]
    fn it_accepts_a_new_question_afterwards() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.submit("What is fever?", &tx)?;
        app_state.handle_failure("timed out");

        assert!(app_state.submit("What is fever?", &tx)?);
        assert!(app_state.last_error.is_none());
        assert_eq!(app_state.messages.len(), 4);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());

        return Ok(());
    }
}

mod errors {
    use super::*;

    #[test]
    fn it_reports_an_unavailable_service() {
        let mut app_state = AppState::default();
        app_state.handle_service_unavailable("http://localhost:8000");

        assert_eq!(
            app_state.last_error,
            Some("Unable to reach the answer service at http://localhost:8000. Questions will fail until it is running.".to_string())
        );
        assert_eq!(app_state.messages.len(), 1);
    }

    #[test]
    fn it_dismisses_without_touching_the_transcript() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.submit("What is fever?", &tx)?;
        app_state.handle_failure("refused");

        app_state.dismiss_error();

        assert!(app_state.last_error.is_none());
        assert_eq!(app_state.messages.len(), 3);

        return Ok(());
    }
}
