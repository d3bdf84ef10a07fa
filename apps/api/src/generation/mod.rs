//! Cover letter and application email generators.
//!
//! Both are pure functions of the document plus a job title and company.
//! Blank inputs are replaced by fixed fallback phrases, so generation never fails.

pub mod cover_letter;
pub mod email;
pub mod handlers;
pub mod tone;
