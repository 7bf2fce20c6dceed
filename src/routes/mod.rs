pub(crate) mod auth;
pub(crate) mod health;
pub(crate) mod ideas;
pub(crate) mod instruments;
pub(crate) mod portfolios;
pub(crate) mod users;
