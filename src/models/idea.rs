use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::check_length;

/// An investment note inside a portfolio. `finished_at` is set iff the idea
/// is finished; both fields only change through the transitions below.
#[derive(Debug, Clone, FromRow)]
pub struct Idea {
    pub id: Uuid,
    description: String,
    pub created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    is_finished: bool,
    pub creator: Option<String>,
    pub portfolio_id: Uuid,
    pub instrument_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIdea {
    pub description: Option<String>,
    pub instrument_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateIdeaStatus {
    pub is_finished: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct IdeaRepr {
    pub id: Uuid,
    pub description: String,
    pub creator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: &'static str,
    pub portfolio_id: Uuid,
    pub instrument_id: Option<Uuid>,
}

/// Read-time idea aggregates for one portfolio.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct IdeaCounts {
    pub total: i64,
    pub open: i64,
    pub finished: i64,
}

impl Idea {
    pub fn new(
        description: &str,
        portfolio_id: Uuid,
        creator: Option<String>,
        instrument_id: Option<Uuid>,
    ) -> Result<Self, AppError> {
        let mut idea = Self {
            id: Uuid::new_v4(),
            description: String::new(),
            created_at: Utc::now(),
            finished_at: None,
            is_finished: false,
            creator,
            portfolio_id,
            instrument_id,
        };
        idea.set_description(description)?;
        Ok(idea)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn set_description(&mut self, description: &str) -> Result<(), AppError> {
        if !check_length(description, 128) {
            return Err(AppError::Validation(format!(
                "{description} is not a valid description"
            )));
        }
        self.description = description.to_string();
        Ok(())
    }

    pub fn status(&self) -> &'static str {
        if self.is_finished {
            "finished"
        } else {
            "open"
        }
    }

    pub fn mark_finished(&mut self) {
        self.is_finished = true;
        self.finished_at = Some(Utc::now());
    }

    pub fn reopen(&mut self) {
        self.is_finished = false;
        self.finished_at = None;
    }

    pub fn to_repr(&self) -> IdeaRepr {
        IdeaRepr {
            id: self.id,
            description: self.description.clone(),
            creator: self.creator.clone(),
            created_at: self.created_at,
            finished_at: self.finished_at,
            status: self.status(),
            portfolio_id: self.portfolio_id,
            instrument_id: self.instrument_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea() -> Idea {
        Idea::new("buy the dip", Uuid::new_v4(), None, None).unwrap()
    }

    #[test]
    fn test_new_idea_is_open() {
        let idea = idea();
        assert!(!idea.is_finished());
        assert!(idea.finished_at().is_none());
        assert_eq!(idea.status(), "open");
    }

    #[test]
    fn test_empty_description_rejected() {
        assert!(matches!(
            Idea::new("", Uuid::new_v4(), None, None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_description_too_long_rejected() {
        let long = "x".repeat(129);
        assert!(Idea::new(&long, Uuid::new_v4(), None, None).is_err());
    }

    #[test]
    fn test_set_description_keeps_previous_on_failure() {
        let mut idea = idea();
        assert!(idea.set_description("").is_err());
        assert_eq!(idea.description(), "buy the dip");
    }

    #[test]
    fn test_finish_then_reopen() {
        let mut idea = idea();
        idea.mark_finished();
        assert!(idea.is_finished());
        assert!(idea.finished_at().is_some());
        assert_eq!(idea.status(), "finished");
        idea.reopen();
        assert!(!idea.is_finished());
        assert!(idea.finished_at().is_none());
        assert_eq!(idea.status(), "open");
    }

    #[test]
    fn test_finish_is_idempotent_on_the_flag() {
        let mut idea = idea();
        idea.mark_finished();
        idea.mark_finished();
        assert!(idea.is_finished());
        assert!(idea.finished_at().is_some());
    }

    #[test]
    fn test_finished_at_iff_finished() {
        let mut idea = idea();
        for _ in 0..3 {
            idea.mark_finished();
            assert_eq!(idea.is_finished(), idea.finished_at().is_some());
            idea.reopen();
            assert_eq!(idea.is_finished(), idea.finished_at().is_some());
        }
    }
}
