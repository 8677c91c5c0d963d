use super::Query;

#[derive(Debug)]
pub enum Action {
    AskQuestion(Query),
    HealthCheck(),
}
