mod common;
mod eligibility;
mod service;
mod session;
