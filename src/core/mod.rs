// Core modules implementing envelope handling, file naming, writing and error modeling.
pub mod envelope;
pub mod error;
pub mod export;
pub mod safe_name;
