mod idea;
mod instrument;
mod portfolio;
mod user;

pub use idea::{CreateIdea, Idea, IdeaCounts, IdeaRepr, UpdateIdeaStatus};
pub use instrument::{esg_rating, Instrument, InstrumentPayload, SustainabilityFactor};
pub use portfolio::{CreatePortfolio, Portfolio, PortfolioRepr, UpdatePortfolio};
pub use user::{CreateUser, User, UserRepr};
