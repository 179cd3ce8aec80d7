mod auto_fill_tests;
mod page_tests;
mod property_tests;
