mod app_relative_tests;
mod enforcer_tests;
mod test_helpers;
