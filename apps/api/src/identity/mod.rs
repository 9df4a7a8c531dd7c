// Identity: account registration and login. Candidate registration also writes the
// candidate profile, atomically with the account.

pub mod accounts;
pub mod credentials;
pub mod handlers;
pub mod service;
