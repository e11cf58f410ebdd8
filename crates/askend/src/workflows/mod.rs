pub mod columns;
pub mod dashboard;
pub mod eligibility;
pub mod signup;
