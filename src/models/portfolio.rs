use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::links::Links;
use crate::models::IdeaCounts;
use crate::validation::check_length;

/// A named collection of ideas, optionally owned by a user (anonymous
/// portfolios have no creator).
#[derive(Debug, Clone, FromRow)]
pub struct Portfolio {
    pub id: Uuid,
    title: String,
    pub created_at: DateTime<Utc>,
    pub creator: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePortfolio {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePortfolio {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioRepr {
    pub id: Uuid,
    pub title: String,
    pub creator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_idea_count: i64,
    pub open_idea_count: i64,
    pub finished_idea_count: i64,
    pub ideas: String,
}

impl Portfolio {
    /// A missing or empty title falls back to "untitled".
    pub fn new(title: Option<String>, creator: Option<String>) -> Result<Self, AppError> {
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "untitled".to_string());
        let mut portfolio = Self {
            id: Uuid::new_v4(),
            title: String::new(),
            created_at: Utc::now(),
            creator,
        };
        portfolio.set_title(&title)?;
        Ok(portfolio)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), AppError> {
        if !check_length(title, 128) {
            return Err(AppError::Validation(format!(
                "{title} is not a valid title"
            )));
        }
        self.title = title.to_string();
        Ok(())
    }

    /// Anonymous portfolios are owned by nobody.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.creator.as_deref() == Some(username)
    }

    /// Counts are read-time aggregates, never cached on the entity.
    pub fn to_repr(&self, links: &Links, counts: &IdeaCounts) -> PortfolioRepr {
        PortfolioRepr {
            id: self.id,
            title: self.title.clone(),
            creator: self.creator.clone(),
            created_at: self.created_at,
            total_idea_count: counts.total,
            open_idea_count: counts.open,
            finished_idea_count: counts.finished,
            ideas: links.portfolio_ideas(self.id, self.creator.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_defaults_to_untitled() {
        let portfolio = Portfolio::new(None, None).unwrap();
        assert_eq!(portfolio.title(), "untitled");
        let portfolio = Portfolio::new(Some(String::new()), None).unwrap();
        assert_eq!(portfolio.title(), "untitled");
    }

    #[test]
    fn test_title_too_long_rejected() {
        let result = Portfolio::new(Some("x".repeat(129)), None);
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(Portfolio::new(Some("x".repeat(128)), None).is_ok());
    }

    #[test]
    fn test_set_title_is_all_or_nothing() {
        let mut portfolio = Portfolio::new(Some("research".to_string()), None).unwrap();
        assert!(portfolio.set_title("").is_err());
        assert!(portfolio.set_title(&"x".repeat(129)).is_err());
        assert_eq!(portfolio.title(), "research");
        portfolio.set_title("renamed").unwrap();
        assert_eq!(portfolio.title(), "renamed");
    }

    #[test]
    fn test_ownership_predicate() {
        // a mismatch here is what turns an existing portfolio into a 404
        // on the /user/{username}/portfolio/{id} routes
        let owned = Portfolio::new(Some("tech".to_string()), Some("alice".to_string())).unwrap();
        assert!(owned.is_owned_by("alice"));
        assert!(!owned.is_owned_by("bob"));

        let anonymous = Portfolio::new(None, None).unwrap();
        assert!(!anonymous.is_owned_by("alice"));
    }

    #[test]
    fn test_repr_reports_counts_and_ideas_url() {
        let portfolio =
            Portfolio::new(Some("dividends".to_string()), Some("bob".to_string())).unwrap();
        let counts = IdeaCounts {
            total: 3,
            open: 2,
            finished: 1,
        };
        let repr = portfolio.to_repr(&Links::new("http://localhost:3000"), &counts);
        assert_eq!(repr.total_idea_count, 3);
        assert_eq!(repr.open_idea_count, 2);
        assert_eq!(repr.finished_idea_count, 1);
        assert!(repr.ideas.contains("/api/user/bob/portfolio/"));
    }
}
