use uuid::Uuid;

/// Builds absolute resource URLs from the configured public base URL.
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
}

impl Links {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn users(&self) -> String {
        format!("{}/api/users", self.base)
    }

    pub fn user(&self, username: &str) -> String {
        format!("{}/api/user/{}", self.base, username)
    }

    pub fn user_portfolios(&self, username: &str) -> String {
        format!("{}/api/user/{}/portfolios", self.base, username)
    }

    pub fn portfolios(&self) -> String {
        format!("{}/api/portfolios", self.base)
    }

    /// Ideas of a portfolio; owned portfolios link through their creator.
    pub fn portfolio_ideas(&self, portfolio_id: Uuid, creator: Option<&str>) -> String {
        match creator {
            Some(username) => format!(
                "{}/api/user/{}/portfolio/{}/ideas",
                self.base, username, portfolio_id
            ),
            None => format!("{}/api/portfolio/{}/ideas", self.base, portfolio_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let links = Links::new("http://localhost:3000/");
        assert_eq!(links.user("alice"), "http://localhost:3000/api/user/alice");
    }

    #[test]
    fn test_portfolio_ideas_prefers_owner_route() {
        let links = Links::new("http://localhost:3000");
        let id = Uuid::nil();
        assert_eq!(
            links.portfolio_ideas(id, Some("bob")),
            format!("http://localhost:3000/api/user/bob/portfolio/{id}/ideas")
        );
        assert_eq!(
            links.portfolio_ideas(id, None),
            format!("http://localhost:3000/api/portfolio/{id}/ideas")
        );
    }
}
