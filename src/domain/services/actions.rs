#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::AnswerServiceArc;
use crate::domain::models::Event;
use crate::domain::models::Query;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Send your question
- Esc - Dismiss the error banner
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit
        "#;

    return text.trim().to_string();
}

async fn ask_question(
    service: AnswerServiceArc,
    query: Query,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match service.ask(query).await {
        Ok(answer) => {
            tx.send(Event::AnswerReceived(answer))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "Failed to get an answer");
            tx.send(Event::AnswerFailed(err.to_string()))?;
        }
    }

    return Ok(());
}

async fn health_check(service: AnswerServiceArc, tx: mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = service.health_check().await {
        tracing::warn!(error = ?err, url = %service.url(), "Answer service health check failed");
        tx.send(Event::ServiceUnavailable(service.url()))?;
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs requests off the UI loop so the screen keeps redrawing while an
    /// answer is pending. Returns once every action sender is dropped.
    pub async fn start(
        service: AnswerServiceArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_service = service.clone();
            let worker_tx = tx.clone();

            match action {
                Action::AskQuestion(query) => {
                    tokio::spawn(async move {
                        return ask_question(worker_service, query, worker_tx).await;
                    });
                }
                Action::HealthCheck() => {
                    tokio::spawn(async move {
                        return health_check(worker_service, worker_tx).await;
                    });
                }
            }
        }

        return Ok(());
    }
}
