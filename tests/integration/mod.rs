mod import_test;
mod query_test;
mod repair_test;
pub mod support;
