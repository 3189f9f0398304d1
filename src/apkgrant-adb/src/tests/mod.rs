mod bridge_tests;
mod permissions_tests;
