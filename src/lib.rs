pub mod catalog;
pub mod core;
pub mod responder;
pub mod tui;

#[cfg(test)]
pub mod test_support;
