pub mod aliases;
pub mod cli;
pub mod context;
#[cfg(test)]
mod tests;
