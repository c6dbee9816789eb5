//! Interface to the chat assistant collaborator.
//!
//! The platform never calls an assistant itself; front ends that offer one
//! implement [`Assistant`] and route questions by [`Domain`].

use serde::{Deserialize, Serialize};

/// The record domain a question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cybersecurity,
    DataScience,
    ItOperations,
}

impl Domain {
    pub fn label(self) -> &'static str {
        match self {
            Domain::Cybersecurity => "Cybersecurity",
            Domain::DataScience => "Data Science",
            Domain::ItOperations => "IT Operations",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A conversational helper answering free-text questions for one domain.
pub trait Assistant {
    type Error: std::error::Error;

    fn reply(&self, domain: Domain, message: &str) -> Result<String, Self::Error>;
}
