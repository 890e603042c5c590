pub mod assistant;
pub mod google;
pub mod mailer;
